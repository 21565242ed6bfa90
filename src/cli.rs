//! Command line and environment configuration for the terminal binary.
//!
//! Environment variables are read first and command line flags override them:
//!
//! | flag                    | variable                 |
//! |-------------------------|--------------------------|
//! | `--seed N`              | `TETRIS_SEED`            |
//! | `--level N`             | `TETRIS_LEVEL`           |
//! | `--lines-per-level N`   | `TETRIS_LINES_PER_LEVEL` |
//! | `--legacy-kick`         | `TETRIS_WALL_KICK=legacy`|
//! | `--fixed-level`         | `TETRIS_LINES_PER_LEVEL=0` |

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::core::GameConfig;
use crate::types::{WallKick, MAX_LEVEL, START_LEVEL};

pub const USAGE: &str = "\
usage: classic-tetris [--seed N] [--level N] [--lines-per-level N] [--legacy-kick] [--fixed-level]

keys: arrows / hjkl / wasd move, space drops, x or up rotates, z rotates back, q quits";

/// Parsed options; `None` keeps the game default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub seed: Option<u32>,
    pub start_level: Option<u32>,
    pub lines_per_level: Option<u32>,
    pub wall_kick: Option<WallKick>,
    pub help: bool,
}

impl CliOptions {
    /// Read `TETRIS_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read `TETRIS_*` variables through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut opts = Self::default();
        if let Some(v) = get("TETRIS_SEED") {
            opts.seed = Some(parse_u32("TETRIS_SEED", &v)?);
        }
        if let Some(v) = get("TETRIS_LEVEL") {
            opts.start_level = Some(parse_level("TETRIS_LEVEL", &v)?);
        }
        if let Some(v) = get("TETRIS_LINES_PER_LEVEL") {
            opts.lines_per_level = Some(parse_u32("TETRIS_LINES_PER_LEVEL", &v)?);
        }
        if let Some(v) = get("TETRIS_WALL_KICK") {
            let kick = WallKick::from_str(&v)
                .ok_or_else(|| anyhow!("TETRIS_WALL_KICK: expected legacy or checked, got {}", v))?;
            opts.wall_kick = Some(kick);
        }
        Ok(opts)
    }

    /// Apply command line flags (without the program name) on top.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--seed" | "--level" | "--lines-per-level" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                    match flag {
                        "--seed" => self.seed = Some(parse_u32(flag, v)?),
                        "--level" => self.start_level = Some(parse_level(flag, v)?),
                        _ => self.lines_per_level = Some(parse_u32(flag, v)?),
                    }
                }
                "--legacy-kick" => self.wall_kick = Some(WallKick::Legacy),
                "--fixed-level" => self.lines_per_level = Some(0),
                "-h" | "--help" => self.help = true,
                other => return Err(anyhow!("unknown argument: {}\n\n{}", other, USAGE)),
            }
            i += 1;
        }
        Ok(self)
    }

    pub fn into_config(self, default_seed: u32) -> GameConfig {
        let mut config = GameConfig::default().with_seed(self.seed.unwrap_or(default_seed));
        if let Some(level) = self.start_level {
            config = config.with_start_level(level);
        }
        if let Some(lines) = self.lines_per_level {
            config = config.with_lines_per_level(lines);
        }
        if let Some(kick) = self.wall_kick {
            config = config.with_wall_kick(kick);
        }
        config
    }
}

/// Seed from the wall clock, for runs that did not ask for one.
pub fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn parse_u32(name: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| anyhow!("{}: invalid number: {}", name, value))
}

fn parse_level(name: &str, value: &str) -> Result<u32> {
    let level = parse_u32(name, value)?;
    if !(START_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(anyhow!(
            "{}: level must be between {} and {}, got {}",
            name,
            START_LEVEL,
            MAX_LEVEL,
            level
        ));
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_env_values_are_ignored() {
        let opts = CliOptions::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(opts, CliOptions::default());
    }

    #[test]
    fn wall_clock_seed_is_callable() {
        let _ = wall_clock_seed();
    }
}
