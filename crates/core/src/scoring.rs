//! Scoring module - line-clear points, gravity speed and level progression
//!
//! - A settle that clears `n` rows scores `LINE_SCORES[level] * n`, once per
//!   settle (the table value is per line, scaled by the count).
//! - Every spawn adds a flat [`SPAWN_BONUS`].
//! - Gravity interval is `(1000 / 60) / (level * 8 / 512)` milliseconds.

use crate::types::{LINE_SCORES, MAX_LEVEL};

pub use crate::types::SPAWN_BONUS;

/// Points for clearing `lines` rows at `level`.
/// Levels past the table use its last entry.
pub fn line_clear_score(level: u32, lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let idx = level.min(MAX_LEVEL) as usize;
    LINE_SCORES[idx].saturating_mul(lines)
}

/// Milliseconds between forced one-row drops.
/// Level 0 is treated as level 1 (the formula divides by the level).
pub fn gravity_interval_ms(level: u32) -> f64 {
    let level = level.max(1) as f64;
    (1000.0 / 60.0) / (level * 8.0 / 512.0)
}

/// Level after `total_lines` cleared lines.
///
/// `lines_per_level == 0` disables progression and keeps `start_level`.
pub fn level_for_lines(start_level: u32, total_lines: u32, lines_per_level: u32) -> u32 {
    if lines_per_level == 0 {
        return start_level;
    }
    start_level
        .saturating_add(total_lines / lines_per_level)
        .min(MAX_LEVEL)
}
