//! Session configuration

use crate::types::{WallKick, DEFAULT_LINES_PER_LEVEL, MAX_LEVEL, START_LEVEL};

/// Options fixed for the lifetime of a [`GameState`](crate::GameState)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for piece selection
    pub seed: u32,
    /// Level at session start and after every game over (clamped to 1..=5)
    pub start_level: u32,
    /// Lines per level step; 0 keeps the level fixed
    pub lines_per_level: u32,
    pub wall_kick: WallKick,
    /// Monotonic clock value the timers start from
    pub start_ms: u64,
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = level;
        self
    }

    pub fn with_lines_per_level(mut self, lines: u32) -> Self {
        self.lines_per_level = lines;
        self
    }

    pub fn with_wall_kick(mut self, wall_kick: WallKick) -> Self {
        self.wall_kick = wall_kick;
        self
    }

    pub fn with_start_ms(mut self, start_ms: u64) -> Self {
        self.start_ms = start_ms;
        self
    }

    /// Start level clamped into the playable range
    pub fn start_level(&self) -> u32 {
        self.start_level.clamp(1, MAX_LEVEL)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            start_level: START_LEVEL,
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
            wall_kick: WallKick::default(),
            start_ms: 0,
        }
    }
}
