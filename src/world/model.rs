use std::collections::{BTreeMap, HashMap};

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Substitutes that satisfy a lock's required item without an exact name match.
///
/// Worlds may add to this with an `item_equivalents` table; entries here always apply.
pub const BUILTIN_EQUIVALENTS: &[(&str, &[&str])] = &[("lantern", &["torch"])];

/// Encounters that are harder to run away from.
///
/// Worlds may add names with a `boss_enemies` list.
pub const BUILTIN_BOSSES: &[&str] = &["Ember King"];

/// Runtime world type used by the game loop.
#[derive(Debug, Clone)]
pub struct World {
    pub title: String,
    pub intro_text: String,
    pub start_room: String,
    pub rooms: HashMap<String, Room>,
    pub locks: Vec<Lock>,
    pub enemies: HashMap<String, EnemyDef>,
    pub room_enemies: HashMap<String, String>, // room name -> enemy name
    pub usable_items: HashMap<String, UsableItem>,
    pub win_condition: Option<WinCondition>,
    pub lose_condition: Option<LoseCondition>,
    pub commands_help: Vec<String>,
    pub item_equivalents: HashMap<String, Vec<String>>, // required -> substitutes
    pub boss_enemies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub items: Vec<String>,
    pub exits: BTreeMap<String, String>, // direction -> room name
    pub npcs: Vec<Npc>,
    pub darkness: Option<Darkness>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    pub name: String,
    pub dialogue: String,
}

/// A room that hides its contents and blocks exits until it is lit.
#[derive(Debug, Clone, PartialEq)]
pub struct Darkness {
    pub text: String,
    pub hint: Option<String>,
    pub blocked_exits: Vec<String>, // empty = every exit
    pub block_text: String,
}

impl Darkness {
    pub fn blocks(&self, direction: &str) -> bool {
        self.blocked_exits.is_empty() || self.blocked_exits.iter().any(|d| d == direction)
    }
}

#[derive(Debug, Clone)]
pub struct Lock {
    pub from: String,
    pub direction: String,
    pub requires_item: Option<String>,
    pub fail_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnemyDef {
    pub name: String,
    pub max_hp: u32,
    pub attack_min: u32,
    pub attack_max: u32,
    pub xp_reward: u32,
    pub intro_text: Option<String>,
    pub defeat_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UsableItem {
    pub effect: ItemEffect,
    pub text: Option<String>,
}

/// The closed set of things an item can do when used.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEffect {
    HealHealth { amount: u32 },
    LightRoom { rooms: Vec<String> }, // empty = any room
    UnlockExit { from: String, direction: String },
    ApplyShield { amount: u32 },
    // Unknown or missing effect kinds load as this and do nothing.
    Inert,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WinCondition {
    HasItem { item: String, text: Option<String> },
    ReachRoom { room: String, text: Option<String> },
    ReachRoomWithItem {
        room: String,
        item: String,
        text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoseCondition {
    MaxMoves { moves: u32, text: Option<String> },
}

impl World {
    /// First lock declared on `(from, direction)`.
    pub fn lock_on(&self, from: &str, direction: &str) -> Option<&Lock> {
        self.locks
            .iter()
            .find(|l| l.from == from && l.direction == direction)
    }

    /// Items that count as `required` when checking locks, including itself.
    pub fn equivalents_of<'a>(&'a self, required: &'a str) -> Vec<&'a str> {
        let mut out = vec![required];
        for (req, subs) in BUILTIN_EQUIVALENTS {
            if *req == required {
                out.extend(subs.iter().copied());
            }
        }
        if let Some(subs) = self.item_equivalents.get(required) {
            out.extend(subs.iter().map(String::as_str));
        }
        out
    }

    pub fn is_boss(&self, enemy_name: &str) -> bool {
        BUILTIN_BOSSES.iter().any(|b| *b == enemy_name)
            || self.boss_enemies.iter().any(|b| b == enemy_name)
    }

    /// Replace rooms with the saved versions of the same name; unknown names are added.
    pub fn merge_rooms(&mut self, rooms: impl IntoIterator<Item = Room>) {
        for room in rooms {
            self.rooms.insert(room.name.clone(), room);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_lock_wins() {
        let mut world = fixtures::world();
        world.locks.push(Lock {
            from: "Hall".to_string(),
            direction: "north".to_string(),
            requires_item: Some("gold_key".to_string()),
            fail_text: None,
        });
        let lock = world.lock_on("Hall", "north").unwrap();
        assert_eq!(lock.requires_item.as_deref(), Some("iron_key"));
        assert!(world.lock_on("Hall", "east").is_none());
    }

    #[test]
    fn equivalents_include_builtin_and_world_entries() {
        let mut world = fixtures::world();
        assert_eq!(world.equivalents_of("lantern"), vec!["lantern", "torch"]);

        world
            .item_equivalents
            .insert("lantern".to_string(), vec!["candle".to_string()]);
        assert_eq!(
            world.equivalents_of("lantern"),
            vec!["lantern", "torch", "candle"]
        );
        assert_eq!(world.equivalents_of("iron_key"), vec!["iron_key"]);
    }

    #[test]
    fn bosses_come_from_table_and_world() {
        let mut world = fixtures::world();
        assert!(world.is_boss("Ember King"));
        assert!(!world.is_boss("Rat"));
        world.boss_enemies.push("Rat".to_string());
        assert!(world.is_boss("Rat"));
    }

    #[test]
    fn darkness_with_no_listed_exits_blocks_everything() {
        let dark = Darkness {
            text: String::new(),
            hint: None,
            blocked_exits: Vec::new(),
            block_text: String::new(),
        };
        assert!(dark.blocks("north"));

        let partial = Darkness {
            blocked_exits: vec!["east".to_string()],
            ..dark
        };
        assert!(partial.blocks("east"));
        assert!(!partial.blocks("west"));
    }

    #[test]
    fn merge_replaces_and_adds_rooms() {
        let mut world = fixtures::world();
        let mut hall = world.rooms["Hall"].clone();
        hall.items.push("torch".to_string());
        let attic = fixtures::room("Attic", &[]);

        world.merge_rooms(vec![hall, attic]);

        assert_eq!(world.rooms["Hall"].items, vec!["torch".to_string()]);
        assert!(world.rooms.contains_key("Attic"));
        assert!(world.rooms.contains_key("Throne"));
    }
}
