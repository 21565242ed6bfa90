use crate::board::Grid;
use crate::pieces::{get_shape, PieceShape, Point};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

/// Everything a renderer needs for one frame.
///
/// `board` already contains the active piece; `active_cells` is there for
/// renderers that want to highlight it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active_kind: PieceKind,
    pub active_cells: [Point; 4],
    pub next: PieceKind,
    pub next_shape: PieceShape,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub settle_counter: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active_kind = PieceKind::O;
        self.active_cells = [(0, 0); 4];
        self.next = PieceKind::O;
        self.next_shape = get_shape(PieceKind::O);
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.settle_counter = 0;
    }

    /// Cell at board coordinates, `None` off the grid
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active_kind: PieceKind::O,
            active_cells: [(0, 0); 4],
            next: PieceKind::O,
            next_shape: get_shape(PieceKind::O),
            score: 0,
            level: START_LEVEL,
            lines: 0,
            settle_counter: 0,
        };
        s.clear();
        s
    }
}
