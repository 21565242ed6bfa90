//! Classic Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, tests and
//! benches can write `classic_tetris::{core, input, term, types}`.

pub mod cli;

pub use classic_tetris_core as core;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;
