mod loader;
mod model;
mod validator;

pub use loader::{load_world_from_file, load_world_from_json_str, load_world_from_str};

pub use model::{
    BUILTIN_BOSSES, BUILTIN_EQUIVALENTS, Darkness, EnemyDef, ItemEffect, Lock, LoseCondition, Npc,
    Room, UsableItem, WinCondition, World,
};
pub use validator::{ValidationError, validate_world};

#[cfg(test)]
pub(crate) use model::fixtures;
