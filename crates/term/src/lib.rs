//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: no widget toolkit, just a
//! framebuffer of styled characters that is diffed and flushed to the terminal
//! every frame. Board cells are drawn 2 columns wide by default so they look
//! square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, Banner, GameView, Viewport, BANNER_MS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
