//! Terminal input module (game-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::InputEvent`]s and tracks held
//! direction keys, synthesizing releases on terminals that never report them.

pub mod handler;
pub mod map;

pub use classic_tetris_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit};
