//! Shared fixtures for the integration tests.

use std::path::{Path, PathBuf};

use castle_fic::config::EngineConfig;
use castle_fic::engine::{Output, ScriptedDice};
use castle_fic::{GameState, Turn, load_world_from_file};

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("keep.toml")
}

/// A fresh game on the test keep, saving into `save_path`.
#[allow(dead_code)]
pub fn game(save_path: &Path, dice: ScriptedDice) -> GameState {
    let world = load_world_from_file(&fixture_path()).expect("fixture world loads");
    let config = EngineConfig::default().with_save_path(save_path);
    let mut game = GameState::new(world, config).with_dice(dice);
    game.initialize();
    game
}

/// Run several commands, returning the last output and turn.
#[allow(dead_code)]
pub fn run(game: &mut GameState, commands: &[&str]) -> (Output, Turn) {
    let mut last = (Output::new(), Turn::Continue);
    for cmd in commands {
        last = game.step(cmd);
    }
    last
}
