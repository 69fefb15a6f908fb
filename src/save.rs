//! Save records: everything needed to resume a session, as JSON.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{GameError, GameResult};
use crate::player::PlayerState;
use crate::world::{Darkness, Npc, Room, World};

/// On-disk save. Every field is optional on read; absent ones take the
/// session-initial value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default)]
    pub current_room: Option<String>,
    #[serde(default)]
    pub inventory: Option<Vec<String>>,
    #[serde(default)]
    pub moves: Option<i64>,
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub xp: Option<i64>,
    #[serde(default)]
    pub shield: Option<i64>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub lit_rooms: Vec<String>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub defeated_enemies: Vec<String>,
    // written as [room, direction]; any other entry is dropped on read
    #[serde(default, deserialize_with = "lenient_pairs")]
    pub unlocked_exits: Vec<(String, String)>,
    #[serde(default)]
    pub rooms: Option<BTreeMap<String, RoomRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub exits: BTreeMap<String, String>,
    #[serde(default)]
    pub npcs: Vec<NpcRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<DarknessRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcRecord {
    pub name: String,
    #[serde(default)]
    pub dialogue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DarknessRecord {
    pub text: String,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub blocked_exits: Vec<String>,
    pub block_text: String,
}

impl From<&Room> for RoomRecord {
    fn from(room: &Room) -> Self {
        RoomRecord {
            description: room.description.clone(),
            items: room.items.clone(),
            exits: room.exits.clone(),
            npcs: room
                .npcs
                .iter()
                .map(|n| NpcRecord {
                    name: n.name.clone(),
                    dialogue: n.dialogue.clone(),
                })
                .collect(),
            dark: room.darkness.as_ref().map(|d| DarknessRecord {
                text: d.text.clone(),
                hint: d.hint.clone(),
                blocked_exits: d.blocked_exits.clone(),
                block_text: d.block_text.clone(),
            }),
        }
    }
}

impl RoomRecord {
    fn into_room(self, name: String) -> Room {
        Room {
            name,
            description: self.description,
            items: self.items,
            exits: self.exits,
            npcs: self
                .npcs
                .into_iter()
                .map(|n| Npc {
                    name: n.name,
                    dialogue: n.dialogue,
                })
                .collect(),
            darkness: self.dark.map(|d| Darkness {
                text: d.text,
                hint: d.hint,
                blocked_exits: d.blocked_exits,
                block_text: d.block_text,
            }),
        }
    }
}

fn sorted<T: Ord + Clone>(set: &HashSet<T>) -> Vec<T> {
    let mut v: Vec<T> = set.iter().cloned().collect();
    v.sort();
    v
}

impl SaveRecord {
    /// Snapshot the player plus the room table (so pickups and drops survive).
    pub fn capture(world: &World, state: &PlayerState) -> Self {
        SaveRecord {
            current_room: Some(state.current_room.clone()),
            inventory: Some(state.inventory.clone()),
            moves: Some(state.moves.into()),
            health: Some(state.health().into()),
            xp: Some(state.xp.into()),
            shield: Some(state.shield.into()),
            lit_rooms: sorted(&state.lit_rooms),
            defeated_enemies: sorted(&state.defeated_enemies),
            unlocked_exits: sorted(&state.unlocked_exits),
            rooms: Some(
                world
                    .rooms
                    .iter()
                    .map(|(name, room)| (name.clone(), RoomRecord::from(room)))
                    .collect(),
            ),
        }
    }

    /// Rebuild the player and merge saved rooms into `world`.
    ///
    /// Combat is always cleared; the caller re-runs the encounter check.
    pub fn restore(self, world: &mut World) -> PlayerState {
        if let Some(rooms) = self.rooms {
            world.merge_rooms(rooms.into_iter().map(|(name, rec)| rec.into_room(name)));
        }

        let mut current_room = self
            .current_room
            .unwrap_or_else(|| world.start_room.clone());
        if !world.rooms.contains_key(&current_room) {
            warn!(
                "saved room '{}' does not exist; returning to '{}'",
                current_room, world.start_room
            );
            current_room = world.start_room.clone();
        }

        let mut state = PlayerState::new(current_room);
        state.inventory = self.inventory.unwrap_or_default();
        state.moves = to_u32(self.moves);
        state.set_health(self.health.unwrap_or(i64::from(crate::player::MAX_HEALTH)));
        state.xp = to_u32(self.xp);
        state.shield = to_u32(self.shield);
        state.lit_rooms = self.lit_rooms.into_iter().collect();
        state.defeated_enemies = self.defeated_enemies.into_iter().collect();
        state.unlocked_exits = self.unlocked_exits.into_iter().collect();

        debug!(
            "restored session in '{}' ({} moves)",
            state.current_room, state.moves
        );
        state
    }

    pub fn write_to(&self, path: &Path) -> GameResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| GameError::io(path, e))
    }

    pub fn read_from(path: &Path) -> GameResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Set-valued fields keep their well-formed entries; one bad entry never
/// rejects the whole save.
fn list_entries(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!("expected a list in save file, found {}; ignoring it", other);
            Vec::new()
        }
    }
}

fn warn_dropped(kind: &str, total: usize, kept: usize) {
    if kept < total {
        warn!("dropped {} malformed {} entries from save file", total - kept, kind);
    }
}

fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = list_entries(Value::deserialize(deserializer)?);
    let total = entries.len();
    let names: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect();
    warn_dropped("name", total, names.len());
    Ok(names)
}

fn lenient_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = list_entries(Value::deserialize(deserializer)?);
    let total = entries.len();
    let pairs: Vec<(String, String)> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Array(pair) => match <[Value; 2]>::try_from(pair) {
                Ok([Value::String(room), Value::String(dir)]) => Some((room, dir)),
                _ => None,
            },
            _ => None,
        })
        .collect();
    warn_dropped("unlocked_exits", total, pairs.len());
    Ok(pairs)
}

fn to_u32(n: Option<i64>) -> u32 {
    n.unwrap_or(0).clamp(0, u32::MAX as i64) as u32
}
