//! Mutable session state for the single player.

use std::collections::HashSet;

use crate::world::EnemyDef;

pub const MAX_HEALTH: u32 = 100;

/// Runtime snapshot of the enemy currently being fought.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEnemy {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub attack_min: u32,
    pub attack_max: u32,
    pub xp_reward: u32,
}

impl ActiveEnemy {
    pub fn from_def(def: &EnemyDef) -> Self {
        ActiveEnemy {
            name: def.name.clone(),
            hp: def.max_hp,
            max_hp: def.max_hp,
            attack_min: def.attack_min,
            attack_max: def.attack_max,
            xp_reward: def.xp_reward,
        }
    }

    pub fn status(&self) -> String {
        format!(
            "{} HP {}/{} | XP {}",
            self.name, self.hp, self.max_hp, self.xp_reward
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub current_room: String,
    pub inventory: Vec<String>,
    pub moves: u32,
    health: u32,
    pub xp: u32,
    pub shield: u32,
    pub lit_rooms: HashSet<String>,
    pub defeated_enemies: HashSet<String>,
    pub unlocked_exits: HashSet<(String, String)>,
    /// `Some` exactly while a fight is in progress.
    pub active_enemy: Option<ActiveEnemy>,
}

impl PlayerState {
    /// Session-initial state in `start_room`.
    pub fn new(start_room: impl Into<String>) -> Self {
        PlayerState {
            current_room: start_room.into(),
            inventory: Vec::new(),
            moves: 0,
            health: MAX_HEALTH,
            xp: 0,
            shield: 0,
            lit_rooms: HashSet::new(),
            defeated_enemies: HashSet::new(),
            unlocked_exits: HashSet::new(),
            active_enemy: None,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn set_health(&mut self, health: i64) {
        self.health = health.clamp(0, MAX_HEALTH as i64) as u32;
    }

    /// Heal by `amount`, returning what was actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.set_health(before as i64 + amount as i64);
        self.health - before
    }

    /// Apply incoming damage; the shield soaks first and is spent by any hit.
    pub fn take_damage(&mut self, damage: u32) -> DamageReport {
        let blocked = self.shield.min(damage);
        if self.shield > 0 {
            self.shield = 0;
        }
        let before = self.health;
        self.set_health(before as i64 - (damage - blocked) as i64);
        DamageReport {
            blocked,
            taken: before - self.health,
        }
    }

    /// Count one move; the counter sticks at its maximum instead of wrapping.
    pub fn spend_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn in_combat(&self) -> bool {
        self.active_enemy.is_some()
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Removes the first matching entry.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(pos) => {
                self.inventory.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn is_lit(&self, room: &str) -> bool {
        self.lit_rooms.contains(room)
    }

    pub fn is_unlocked(&self, room: &str, direction: &str) -> bool {
        self.unlocked_exits
            .contains(&(room.to_string(), direction.to_string()))
    }

    pub fn unlock(&mut self, room: impl Into<String>, direction: impl Into<String>) {
        self.unlocked_exits.insert((room.into(), direction.into()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    pub blocked: u32,
    pub taken: u32,
}
