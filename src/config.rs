use std::path::PathBuf;

use crate::engine::{Dice, RngDice};

pub const DEFAULT_SAVE_PATH: &str = "savegame.json";

/// Session settings that live outside the world file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub save_path: PathBuf,
    /// Fixed seed for combat rolls; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn dice(&self) -> Box<dyn Dice> {
        match self.seed {
            Some(seed) => Box::new(RngDice::seeded(seed)),
            None => Box::new(RngDice::from_os()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.save_path, PathBuf::from("savegame.json"));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builders_override() {
        let config = EngineConfig::default()
            .with_save_path("/tmp/slot1.json")
            .with_seed(7);
        assert_eq!(config.save_path, PathBuf::from("/tmp/slot1.json"));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn same_seed_same_rolls() {
        let config = EngineConfig::default().with_seed(42);
        let mut a = config.dice();
        let mut b = config.dice();
        let rolls_a: Vec<u32> = (0..8).map(|_| a.roll(1, 100)).collect();
        let rolls_b: Vec<u32> = (0..8).map(|_| b.roll(1, 100)).collect();
        assert_eq!(rolls_a, rolls_b);
    }
}
