//! Active piece - the falling tetromino and its state machine
//!
//! The active piece keeps its four absolute cells and its pivot in board space
//! and paints itself into the [`Board`] after every change, so the board always
//! shows settled cells plus the falling piece. Collision tests therefore have
//! to ignore the piece's own current footprint.
//!
//! Rotation turns every cell a quarter around the pivot:
//!
//! - clockwise: `(dx, dy) -> (-dy, dx)`
//! - counter-clockwise: `(dx, dy) -> (dy, -dx)`
//!
//! (y grows downward, so "clockwise" is clockwise on screen.) A rotation that
//! leaves the side walls is kicked back in by the overflow; see [`WallKick`]
//! for how the kicked position is committed.

use crate::board::Board;
use crate::pieces::{get_spawn_cells, Point, SPAWN_PIVOT};
use crate::types::{Cell, Direction, PieceKind, Rotation, WallKick, BOARD_HEIGHT, BOARD_WIDTH};

const MAX_X: i8 = BOARD_WIDTH as i8 - 1;
const MAX_Y: i8 = BOARD_HEIGHT as i8 - 1;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    pivot: Point,
    cells: [Point; 4],
}

impl ActivePiece {
    fn at_spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            pivot: SPAWN_PIVOT,
            cells: get_spawn_cells(kind),
        }
    }

    /// Spawn a piece if the rows just below its spawn cells are free.
    ///
    /// Returns `None` when any cell one row below a spawn cell is occupied;
    /// the caller treats that as game over. On success the piece is painted.
    pub fn spawn(kind: PieceKind, board: &mut Board) -> Option<Self> {
        let piece = Self::at_spawn(kind);
        if piece
            .cells
            .iter()
            .any(|&(x, y)| board.is_occupied(x, y + 1))
        {
            return None;
        }
        piece.paint(board);
        Some(piece)
    }

    /// Paint a piece at its spawn position without checking the board
    pub fn place(kind: PieceKind, board: &mut Board) -> Self {
        let piece = Self::at_spawn(kind);
        piece.paint(board);
        piece
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn cells(&self) -> [Point; 4] {
        self.cells
    }

    /// Check a candidate footprint against the walls, floor and settled cells.
    ///
    /// Cells this piece currently covers never count as obstacles.
    pub fn collides(&self, candidate: &[Point; 4], board: &Board) -> bool {
        candidate.iter().any(|&(x, y)| {
            if x < 0 || x > MAX_X || y < 0 || y > MAX_Y {
                return true;
            }
            board.is_occupied(x, y) && !self.cells.contains(&(x, y))
        })
    }

    /// Try to shift the piece one cell.
    ///
    /// Returns false and leaves both piece and board untouched on collision.
    pub fn try_move(&mut self, direction: Direction, board: &mut Board) -> bool {
        let (dx, dy) = direction.delta();
        let candidate = self.cells.map(|(x, y)| (x + dx, y + dy));
        if self.collides(&candidate, board) {
            return false;
        }

        self.erase(board);
        self.cells = candidate;
        self.pivot = (self.pivot.0 + dx, self.pivot.1 + dy);
        self.paint(board);
        true
    }

    /// Cells after a quarter turn around the pivot, before any kick
    pub fn rotated_cells(&self, rotation: Rotation) -> [Point; 4] {
        let (px, py) = self.pivot;
        self.cells.map(|(x, y)| {
            let (dx, dy) = (x - px, y - py);
            let (rx, ry) = match rotation {
                Rotation::Cw => (-dy, dx),
                Rotation::Ccw => (dy, -dx),
            };
            (px + rx, py + ry)
        })
    }

    /// Rotate a quarter turn, kicking off the side walls when needed.
    ///
    /// Returns whether the cells changed. The O piece keeps its footprint and
    /// only repaints.
    pub fn rotate(&mut self, rotation: Rotation, wall_kick: WallKick, board: &mut Board) -> bool {
        if self.kind == PieceKind::O {
            self.erase(board);
            self.paint(board);
            return false;
        }

        let mut candidate = self.rotated_cells(rotation);
        let mut pivot = self.pivot;

        if self.collides(&candidate, board) {
            let shift = wall_kick_shift(&candidate);
            if shift != 0 {
                for cell in candidate.iter_mut() {
                    cell.0 += shift;
                }
                pivot.0 += shift;
            }

            if wall_kick == WallKick::Checked && self.collides(&candidate, board) {
                return false;
            }
        }

        self.erase(board);
        self.cells = candidate;
        self.pivot = pivot;
        self.paint(board);
        true
    }

    /// True unless one more step down would collide
    pub fn can_descend(&self, board: &Board) -> bool {
        let below = self.cells.map(|(x, y)| (x, y + 1));
        !self.collides(&below, board)
    }

    /// Drop straight down until blocked; returns the rows travelled
    pub fn hard_drop(&mut self, board: &mut Board) -> u32 {
        let mut rows = 0;
        while self.can_descend(board) && self.try_move(Direction::Down, board) {
            rows += 1;
        }
        rows
    }

    fn paint(&self, board: &mut Board) {
        for &(x, y) in self.cells.iter() {
            board.set(x, y, Cell::Occupied(self.kind));
        }
    }

    fn erase(&self, board: &mut Board) {
        for &(x, y) in self.cells.iter() {
            board.clear_cell(x, y);
        }
    }
}

/// Horizontal shift that brings every cell back between the side walls
fn wall_kick_shift(cells: &[Point; 4]) -> i8 {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = cells.iter().map(|&(x, _)| x).max().unwrap_or(0);
    if min_x < 0 {
        -min_x
    } else if max_x > MAX_X {
        MAX_X - max_x
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(kind: PieceKind, board: &mut Board) -> ActivePiece {
        ActivePiece::spawn(kind, board).expect("spawn on empty board")
    }

    #[test]
    fn test_spawn_paints_cells() {
        let mut board = Board::new();
        let piece = spawn(PieceKind::T, &mut board);
        for (x, y) in piece.cells() {
            assert_eq!(board.get(x, y), Some(Cell::Occupied(PieceKind::T)));
        }
        assert_eq!(piece.pivot(), SPAWN_PIVOT);
    }

    #[test]
    fn test_spawn_checks_the_row_below() {
        let mut board = Board::new();
        // T spawns on rows 2-3; its middle column bottom cell is (5, 3).
        board.set(5, 4, Cell::Occupied(PieceKind::I));
        assert!(ActivePiece::spawn(PieceKind::T, &mut board).is_none());
        // Nothing was painted on failure.
        assert!(!board.is_occupied(5, 3));
    }

    #[test]
    fn test_no_self_collision() {
        let mut board = Board::new();
        let piece = spawn(PieceKind::S, &mut board);
        assert!(!piece.collides(&piece.cells(), &board));
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let mut board = Board::new();
        let piece = spawn(PieceKind::O, &mut board);
        assert!(piece.collides(&[(-1, 5), (0, 5), (0, 6), (1, 6)], &board));
        assert!(piece.collides(&[(9, 5), (10, 5), (9, 6), (8, 6)], &board));
        assert!(piece.collides(&[(0, 21), (0, 22), (1, 21), (1, 22)], &board));
        assert!(piece.collides(&[(0, -1), (0, 0), (1, 0), (1, 1)], &board));
    }

    #[test]
    fn test_rotation_about_pivot() {
        let mut board = Board::new();
        let mut piece = spawn(PieceKind::I, &mut board);
        assert!(piece.rotate(Rotation::Cw, WallKick::Checked, &mut board));
        assert_eq!(piece.cells(), [(5, 0), (5, 1), (5, 2), (5, 3)]);
        assert_eq!(piece.pivot(), (5, 2));
    }

    #[test]
    fn test_wall_kick_shift_amounts() {
        assert_eq!(wall_kick_shift(&[(-2, 2), (-1, 2), (0, 2), (1, 2)]), 2);
        assert_eq!(wall_kick_shift(&[(8, 2), (9, 2), (10, 2), (11, 2)]), -2);
        assert_eq!(wall_kick_shift(&[(3, 2), (4, 2), (5, 2), (6, 2)]), 0);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut board = Board::new();
        let mut piece = spawn(PieceKind::I, &mut board);
        let rows = piece.hard_drop(&mut board);
        assert_eq!(rows, 19);
        assert!(piece.cells().iter().all(|&(_, y)| y == 21));
        assert!(!piece.can_descend(&board));
    }
}
