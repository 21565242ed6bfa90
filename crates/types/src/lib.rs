//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), the top [`HIDDEN_ROWS`] rows are a
//!   spawn buffer that is never drawn
//! - **Visible**: rows 2-21 (20 rows)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_RATE` | 60 | Frames (and logic ticks) per second |
//! | `LATERAL_REPEAT_MS` | 100 | Interval between repeats of a held direction |
//! | `TAP_RELEASE_TIMEOUT_MS` | 80 | Synthetic release of a tap (no auto-repeat seen yet) |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Synthetic release of a held, auto-repeating key |
//!
//! Gravity is not a table: the interval is `(1000 / 60) / (level * 8 / 512)`
//! milliseconds, about 1067ms at level 1 and 213ms at level 5.
//!
//! # Scoring
//!
//! | Level | Points per cleared line |
//! |-------|-------------------------|
//! | 0 | 40 |
//! | 1 | 100 |
//! | 2 | 300 |
//! | 3 | 1200 |
//! | 4 | 2400 |
//! | 5 | 3600 |
//!
//! Every spawned piece adds a flat [`SPAWN_BONUS`].
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{Cell, Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::ALL[6];
//! assert_eq!(piece, PieceKind::T);
//!
//! let cell = Cell::Occupied(piece);
//! assert!(cell.is_occupied());
//! assert_eq!(cell.kind(), Some(PieceKind::T));
//!
//! assert_eq!(Direction::Left.delta(), (-1, 0));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, hidden buffer included (22 rows)
pub const BOARD_HEIGHT: u8 = 22;

/// Rows at the top of the board that are never displayed
pub const HIDDEN_ROWS: u8 = 2;

/// Rows the player actually sees
pub const VISIBLE_HEIGHT: u8 = BOARD_HEIGHT - HIDDEN_ROWS;

/// Frames per second; the game advances one logic tick per frame
pub const FRAME_RATE: u32 = 60;

/// Minimum time between two repeats of a held direction key
pub const LATERAL_REPEAT_MS: u64 = 100;

/// Release timeout for terminals that never report key-up events, once the
/// terminal's auto-repeat has started for the key
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Release timeout for a press not yet followed by auto-repeat.
///
/// Shorter than [`LATERAL_REPEAT_MS`] so a tap moves a piece exactly once.
pub const TAP_RELEASE_TIMEOUT_MS: u32 = 80;

const _: () = assert!((TAP_RELEASE_TIMEOUT_MS as u64) < LATERAL_REPEAT_MS);

/// Points per cleared line, indexed by level
pub const LINE_SCORES: [u32; 6] = [40, 100, 300, 1200, 2400, 3600];

/// Flat points awarded for every spawned piece
pub const SPAWN_BONUS: u32 = 10;

/// Level a fresh session starts at
pub const START_LEVEL: u32 = 1;

/// Highest reachable level (last index of [`LINE_SCORES`])
pub const MAX_LEVEL: u32 = (LINE_SCORES.len() - 1) as u32;

/// Lines needed per level step when level progression is enabled
pub const DEFAULT_LINES_PER_LEVEL: u32 = 10;

/// The seven tetromino piece kinds
///
/// The declaration order is the catalog order used by the piece generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];
}

/// One board cell. The piece tag only drives color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(kind) => Some(*kind),
        }
    }
}

/// Translation directions for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Board-space offset `(dx, dy)`; y grows downward
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Quarter-turn directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Cw,
    Ccw,
}

/// How a rotation that needed a wall kick is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallKick {
    /// Commit the kicked position without re-testing it (classic behavior;
    /// can overlap settled cells near the walls).
    Legacy,
    /// Re-test the kicked position and reject the rotation if it still collides.
    #[default]
    Checked,
}

impl WallKick {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "legacy" => Some(WallKick::Legacy),
            "checked" => Some(WallKick::Checked),
            _ => None,
        }
    }
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
}

impl Key {
    /// The held direction this key stands for, if it repeats while held
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Down => Some(Direction::Down),
            Key::Space | Key::RotateCw | Key::RotateCcw => None,
        }
    }
}

/// Per-frame input delivered to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Informational lifecycle signals for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A settle cleared this many rows
    LinesCleared(u32),
    /// Spawn was blocked and the session was reset
    GameOver,
}
