//! Pieces module - the static tetromino catalog
//!
//! Every piece is four minos on a 4x4 local grid, written as `(row, col)`:
//!
//! ```text
//!    0  1  2  3          T = [(1, 1), (1, 2), (1, 3), (2, 2)]
//! 0 [.  .  .  .]
//! 1 [.  #  #  #]
//! 2 [.  .  #  .]
//! 3 [.  .  .  .]
//! ```
//!
//! A local `(row, col)` lands on the board at `(x = col + 3, y = row + 1)` and
//! every piece spawns rotating around [`SPAWN_PIVOT`], which is always one of
//! its own cells. The catalog holds no logic beyond these lookups.

use crate::types::PieceKind;

/// `(row, col)` offset of one mino on the local 4x4 grid
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets on the local grid
pub type PieceShape = [MinoOffset; 4];

/// Board-space `(x, y)` coordinate (x = column, y = row, y grows downward)
pub type Point = (i8, i8);

/// Column/row bias applied to local offsets at spawn `(dx, dy)`
pub const SPAWN_OFFSET: Point = (3, 1);

/// Rotation center of a freshly spawned piece
pub const SPAWN_PIVOT: Point = (5, 2);

/// Get the shape (mino offsets) for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::O => [(1, 1), (1, 2), (2, 1), (2, 2)],
        PieceKind::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
        PieceKind::S => [(1, 2), (1, 3), (2, 1), (2, 2)],
        PieceKind::Z => [(1, 1), (1, 2), (2, 2), (2, 3)],
        PieceKind::L => [(1, 1), (1, 2), (1, 3), (2, 1)],
        PieceKind::J => [(1, 1), (1, 2), (1, 3), (2, 3)],
        PieceKind::T => [(1, 1), (1, 2), (1, 3), (2, 2)],
    }
}

/// Display color as `(r, g, b)`
pub fn color(kind: PieceKind) -> (u8, u8, u8) {
    match kind {
        PieceKind::I => (0, 128, 255),
        PieceKind::J => (0, 0, 255),
        PieceKind::L => (255, 128, 0),
        PieceKind::O => (255, 255, 0),
        PieceKind::S => (0, 255, 0),
        PieceKind::T => (127, 0, 255),
        PieceKind::Z => (255, 0, 0),
    }
}

/// Board cells a piece occupies when it spawns
pub fn get_spawn_cells(kind: PieceKind) -> [Point; 4] {
    get_shape(kind).map(|(row, col)| (col + SPAWN_OFFSET.0, row + SPAWN_OFFSET.1))
}

/// Bounding box of a shape on the local grid: `(min_row, min_col, max_row, max_col)`
///
/// Used by preview panels to center the upcoming piece.
pub fn shape_bounds(kind: PieceKind) -> (i8, i8, i8, i8) {
    let shape = get_shape(kind);
    let mut bounds = (i8::MAX, i8::MAX, i8::MIN, i8::MIN);
    for &(row, col) in shape.iter() {
        bounds.0 = bounds.0.min(row);
        bounds.1 = bounds.1.min(col);
        bounds.2 = bounds.2.max(row);
        bounds.3 = bounds.3.max(col);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_fits_the_local_grid() {
        for kind in PieceKind::ALL {
            for (row, col) in get_shape(kind) {
                assert!((0..4).contains(&row), "{:?} row {}", kind, row);
                assert!((0..4).contains(&col), "{:?} col {}", kind, col);
            }
        }
    }

    #[test]
    fn spawn_pivot_is_one_of_the_spawn_cells() {
        for kind in PieceKind::ALL {
            assert!(
                get_spawn_cells(kind).contains(&SPAWN_PIVOT),
                "{:?} does not rotate around its own cell",
                kind
            );
        }
    }

    #[test]
    fn shape_bounds_of_i_and_o() {
        assert_eq!(shape_bounds(PieceKind::I), (1, 0, 1, 3));
        assert_eq!(shape_bounds(PieceKind::O), (1, 1, 2, 2));
    }

    #[test]
    fn colors_are_distinct() {
        for a in PieceKind::ALL {
            for b in PieceKind::ALL {
                if a != b {
                    assert_ne!(color(a), color(b));
                }
            }
        }
    }
}
