use log::{info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use super::model::{
    Darkness, EnemyDef, ItemEffect, Lock, LoseCondition, Npc, Room, UsableItem, WinCondition,
    World,
};
use crate::error::{GameError, GameResult};

////////////////////
/// FILE STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    start_room: String,
    rooms: BTreeMap<String, RoomConfig>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    intro_text: String,
    #[serde(default)]
    locked_exits: Vec<LockConfig>, // [[locked_exits]]
    #[serde(default)]
    enemies: BTreeMap<String, EnemyConfig>,
    #[serde(default)]
    room_enemies: HashMap<String, String>,
    #[serde(default)]
    usable_items: BTreeMap<String, UsableItemConfig>,
    #[serde(default)]
    win_condition: Option<ConditionConfig>,
    #[serde(default)]
    lose_condition: Option<ConditionConfig>,
    #[serde(default)]
    commands_help: Vec<String>,
    #[serde(default)]
    item_equivalents: HashMap<String, Vec<String>>,
    #[serde(default)]
    boss_enemies: Vec<String>,
}

#[derive(Deserialize)]
struct RoomConfig {
    #[serde(default, alias = "desc")]
    description: String,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    exits: BTreeMap<String, String>,
    #[serde(default)]
    npcs: Vec<NpcConfig>, // [[rooms.<name>.npcs]]
    #[serde(default)]
    dark: Option<DarknessConfig>,
}

#[derive(Deserialize)]
struct NpcConfig {
    name: String,
    #[serde(default)]
    dialogue: Option<String>,
}

#[derive(Deserialize)]
struct DarknessConfig {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    blocked_exits: Vec<String>,
    #[serde(default)]
    block_text: Option<String>,
}

#[derive(Deserialize)]
struct LockConfig {
    from: String,
    direction: String,
    #[serde(default)]
    requires_item: Option<String>,
    #[serde(default)]
    fail_text: Option<String>,
}

#[derive(Deserialize)]
struct EnemyConfig {
    #[serde(default)]
    max_hp: Option<i64>,
    #[serde(default)]
    attack_min: Option<i64>,
    #[serde(default)]
    attack_max: Option<i64>,
    #[serde(default)]
    xp_reward: Option<i64>,
    #[serde(default)]
    intro_text: Option<String>,
    #[serde(default)]
    defeat_text: Option<String>,
}

#[derive(Deserialize)]
struct UsableItemConfig {
    #[serde(default)]
    effect: Option<String>, // "heal_health", "light_room", "unlock_exit", "shield"
    #[serde(default)]
    amount: Option<i64>,
    #[serde(default)]
    rooms: Vec<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ConditionConfig {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    item: Option<String>,
    #[serde(default)]
    room: Option<String>,
    #[serde(default)]
    moves: Option<i64>,
    #[serde(default)]
    text: Option<String>,
}

// Defaults for partially specified enemies.
const DEFAULT_ENEMY_HP: i64 = 30;
const DEFAULT_ENEMY_ATTACK: (i64, i64) = (5, 10);
const DEFAULT_ENEMY_XP: i64 = 10;

//////////////////////
/// LOAD FUNCTIONS ///
//////////////////////

/// Load a world from disk. `.json` files are read as JSON, everything else as TOML.
pub fn load_world_from_file(path: &Path) -> GameResult<World> {
    let contents = fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let world = if is_json {
        load_world_from_json_str(&contents)?
    } else {
        load_world_from_str(&contents)?
    };

    info!(
        "loaded world '{}' from {} ({} rooms)",
        world.title,
        path.display(),
        world.rooms.len()
    );
    Ok(world)
}

/// Load a world from a TOML string.
pub fn load_world_from_str(contents: &str) -> GameResult<World> {
    let file: WorldFile = toml::from_str(contents)?;
    build_world(file)
}

/// Load a world from a JSON string.
pub fn load_world_from_json_str(contents: &str) -> GameResult<World> {
    let file: WorldFile = serde_json::from_str(contents)?;
    build_world(file)
}

fn build_world(file: WorldFile) -> GameResult<World> {
    if file.start_room.trim().is_empty() {
        return Err(GameError::InvalidWorld(
            "start_room may not be empty".to_string(),
        ));
    }

    let rooms: HashMap<String, Room> = file
        .rooms
        .into_iter()
        .map(|(name, rc)| {
            let room = build_room(&name, rc);
            (name, room)
        })
        .collect();

    if !rooms.contains_key(&file.start_room) {
        return Err(GameError::InvalidWorld(format!(
            "start_room '{}' not found among rooms",
            file.start_room
        )));
    }

    let locks = file
        .locked_exits
        .into_iter()
        .map(|l| Lock {
            from: l.from,
            direction: l.direction.trim().to_lowercase(),
            requires_item: l.requires_item.filter(|s| !s.trim().is_empty()),
            fail_text: l.fail_text.map(|s| normalize_multiline_desc(&s)),
        })
        .collect();

    let enemies = file
        .enemies
        .into_iter()
        .map(|(name, ec)| {
            let enemy = build_enemy(&name, ec);
            (name, enemy)
        })
        .collect();

    let usable_items = file
        .usable_items
        .into_iter()
        .map(|(name, uc)| {
            let usable = UsableItem {
                effect: parse_effect(&name, &uc),
                text: uc.text.map(|s| normalize_multiline_desc(&s)),
            };
            (name, usable)
        })
        .collect();

    let win_condition = file.win_condition.and_then(parse_win_condition);
    let lose_condition = file.lose_condition.and_then(parse_lose_condition);

    Ok(World {
        title: file
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Text Adventure".to_string()),
        intro_text: normalize_multiline_desc(&file.intro_text),
        start_room: file.start_room,
        rooms,
        locks,
        enemies,
        room_enemies: file.room_enemies,
        usable_items,
        win_condition,
        lose_condition,
        commands_help: file.commands_help,
        item_equivalents: file.item_equivalents,
        boss_enemies: file.boss_enemies,
    })
}

fn build_room(name: &str, rc: RoomConfig) -> Room {
    let npcs = rc
        .npcs
        .into_iter()
        .map(|n| Npc {
            name: n.name,
            dialogue: n
                .dialogue
                .map(|d| normalize_multiline_desc(&d))
                .unwrap_or_else(|| "They have nothing to say.".to_string()),
        })
        .collect();

    let darkness = rc.dark.map(|d| Darkness {
        text: d
            .text
            .map(|t| normalize_multiline_desc(&t))
            .unwrap_or_else(|| "It is too dark to see anything.".to_string()),
        hint: d.hint.map(|h| normalize_multiline_desc(&h)),
        blocked_exits: d
            .blocked_exits
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .collect(),
        block_text: d
            .block_text
            .map(|t| normalize_multiline_desc(&t))
            .unwrap_or_else(|| "It's too dark to find the way. Light the room first.".to_string()),
    });

    Room {
        name: name.to_string(),
        description: normalize_multiline_desc(&rc.description),
        items: rc.items,
        exits: rc
            .exits
            .into_iter()
            .map(|(dir, dest)| (dir.trim().to_lowercase(), dest))
            .collect(),
        npcs,
        darkness,
    }
}

fn build_enemy(name: &str, ec: EnemyConfig) -> EnemyDef {
    let attack_min = non_negative(ec.attack_min.unwrap_or(DEFAULT_ENEMY_ATTACK.0));
    let mut attack_max = non_negative(ec.attack_max.unwrap_or(DEFAULT_ENEMY_ATTACK.1));
    if attack_max < attack_min {
        warn!(
            "enemy '{}' has attack_max {} below attack_min {}; using attack_min",
            name, attack_max, attack_min
        );
        attack_max = attack_min;
    }

    EnemyDef {
        name: name.to_string(),
        max_hp: non_negative(ec.max_hp.unwrap_or(DEFAULT_ENEMY_HP)),
        attack_min,
        attack_max,
        xp_reward: non_negative(ec.xp_reward.unwrap_or(DEFAULT_ENEMY_XP)),
        intro_text: ec.intro_text.map(|s| normalize_multiline_desc(&s)),
        defeat_text: ec.defeat_text.map(|s| normalize_multiline_desc(&s)),
    }
}

fn non_negative(n: i64) -> u32 {
    n.clamp(0, u32::MAX as i64) as u32
}

/////////////////////////////
/// TAGGED VARIANT PARSERS ///
/////////////////////////////

fn parse_effect(item: &str, uc: &UsableItemConfig) -> ItemEffect {
    let kind = uc.effect.as_deref().map(|s| s.trim().to_lowercase());
    match kind.as_deref() {
        Some("heal_health") => ItemEffect::HealHealth {
            amount: non_negative(uc.amount.unwrap_or(0)),
        },
        Some("light_room") => ItemEffect::LightRoom {
            rooms: uc.rooms.clone(),
        },
        Some("unlock_exit") => match (&uc.from, &uc.direction) {
            (Some(from), Some(direction)) => ItemEffect::UnlockExit {
                from: from.clone(),
                direction: direction.trim().to_lowercase(),
            },
            _ => {
                warn!(
                    "usable item '{}' unlock_exit needs 'from' and 'direction'; it will do nothing",
                    item
                );
                ItemEffect::Inert
            }
        },
        Some("shield") | Some("apply_shield") => ItemEffect::ApplyShield {
            amount: non_negative(uc.amount.unwrap_or(0)),
        },
        Some(other) => {
            warn!(
                "usable item '{}' has unknown effect '{}'; it will do nothing",
                item, other
            );
            ItemEffect::Inert
        }
        None => ItemEffect::Inert,
    }
}

fn parse_win_condition(c: ConditionConfig) -> Option<WinCondition> {
    let text = c.text.map(|s| normalize_multiline_desc(&s));
    match (c.kind.as_deref(), c.room, c.item) {
        (Some("has_item"), _, Some(item)) => Some(WinCondition::HasItem { item, text }),
        (Some("reach_room"), Some(room), _) => Some(WinCondition::ReachRoom { room, text }),
        (Some("reach_room_with_item"), Some(room), Some(item)) => {
            Some(WinCondition::ReachRoomWithItem { room, item, text })
        }
        (kind, _, _) => {
            warn!(
                "win_condition of type {:?} is unknown or incomplete; ignoring it",
                kind
            );
            None
        }
    }
}

fn parse_lose_condition(c: ConditionConfig) -> Option<LoseCondition> {
    let text = c.text.map(|s| normalize_multiline_desc(&s));
    match (c.kind.as_deref(), c.moves) {
        (Some("max_moves"), moves) => Some(LoseCondition::MaxMoves {
            moves: non_negative(moves.unwrap_or(0)),
            text,
        }),
        (kind, _) => {
            warn!("lose_condition of type {:?} is unknown; ignoring it", kind);
            None
        }
    }
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;
    let mut first_text_seen = false;

    for line in raw.lines() {
        // Indentation in the world file shouldn't reach the player.
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !first_text_seen {
            result.push_str(trimmed);
            first_text_seen = true;
        } else {
            match pending_blank_lines {
                // wrapped line
                0 => {
                    result.push(' ');
                    result.push_str(trimmed);
                }
                1 => {
                    result.push('\n');
                    result.push_str(trimmed);
                }
                _ => {
                    result.push_str("\n\n");
                    result.push_str(trimmed);
                }
            }
        }

        pending_blank_lines = 0;
    }

    result
}
