//! Randomness behind a seam, so combat can be replayed in tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Dice {
    /// Uniform integer in `min..=max`.
    fn roll(&mut self, min: u32, max: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn chance(&mut self) -> f64;
}

/// Production dice backed by `StdRng`.
pub struct RngDice {
    rng: StdRng,
}

impl RngDice {
    pub fn seeded(seed: u64) -> Self {
        RngDice {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os() -> Self {
        RngDice {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Dice for RngDice {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn chance(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Dice that replay queued values; used to pin down combat outcomes.
///
/// Rolls are clamped into the requested range. When a queue runs dry, rolls
/// return `min` and chances return `0.0`.
#[derive(Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<f64>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(chances);
        self
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        let hi = max.max(min);
        self.rolls.pop_front().unwrap_or(min).clamp(min, hi)
    }

    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(0.0)
    }
}
