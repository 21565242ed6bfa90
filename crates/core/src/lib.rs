//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed and same input timeline produce identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation tick processing
//!
//! # Module Structure
//!
//! - [`pieces`]: the static catalog (shapes on a 4x4 grid, colors, spawn offsets)
//! - [`board`]: 10x22 grid of settled cells with line clearing
//! - [`piece`]: the active piece (movement, pivot rotation, wall kicks, hard drop)
//! - [`game_state`]: the controller (timing, lock delay, scoring, spawn/game over)
//! - [`rng`]: seeded no-immediate-repeat piece selection
//! - [`scoring`]: line-clear points, gravity interval, level progression
//! - [`snapshot`]: copyable render state
//! - [`config`]: session options
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::{GameConfig, GameState};
//! use classic_tetris_types::{InputEvent, Key};
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(12345));
//!
//! game.handle_input(InputEvent::KeyDown(Key::RotateCw));
//! game.handle_input(InputEvent::KeyDown(Key::Space));
//!
//! // The dropped piece settles on the next gravity step.
//! game.tick(2_000);
//! assert_eq!(game.score(), 10);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame with a
//! monotonic millisecond clock. Gravity and lateral repeat keep their own "last
//! action" timestamps against that clock.

pub mod board;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid};
pub use config::GameConfig;
pub use game_state::{EventQueue, GameState};
pub use piece::ActivePiece;
pub use pieces::{color, get_shape, get_spawn_cells, PieceShape, Point};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{gravity_interval_ms, level_for_lines, line_clear_score};
pub use snapshot::GameSnapshot;
