//! The eight symmetries of the square board.

use flywheel_core::Square;

/// A reflection or rotation of the board, acting on (x, y) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    FlipX,
    FlipY,
    Rotate180,
    /// Reflection in the a1-h8 diagonal.
    Slash,
    RotateRight,
    RotateLeft,
    /// Reflection in the h1-a8 diagonal.
    Backslash,
}

impl Symmetry {
    /// All symmetries, in the order they are tried when looking for the
    /// canonical table index.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::FlipX,
        Symmetry::FlipY,
        Symmetry::Rotate180,
        Symmetry::Slash,
        Symmetry::RotateRight,
        Symmetry::RotateLeft,
        Symmetry::Backslash,
    ];

    /// Maps a square through this symmetry.
    pub const fn apply(self, square: Square) -> Square {
        let (x, y) = (square.x(), square.y());
        let (x, y) = match self {
            Symmetry::Identity => (x, y),
            Symmetry::FlipX => (7 - x, y),
            Symmetry::FlipY => (x, 7 - y),
            Symmetry::Rotate180 => (7 - x, 7 - y),
            Symmetry::Slash => (y, x),
            Symmetry::RotateRight => (7 - y, x),
            Symmetry::RotateLeft => (y, 7 - x),
            Symmetry::Backslash => (7 - y, 7 - x),
        };
        // x and y stay in 0..8, so the index is always valid.
        match Square::from_coords(x, y) {
            Some(mapped) => mapped,
            None => square,
        }
    }

    /// Returns the symmetry that undoes this one.
    pub const fn inverse(self) -> Symmetry {
        match self {
            Symmetry::RotateRight => Symmetry::RotateLeft,
            Symmetry::RotateLeft => Symmetry::RotateRight,
            other => other,
        }
    }
}

/// Returns the position of `square` in the a1-d1-d4 triangle, or `None`
/// when it lies outside.
///
/// Every square maps into this triangle under at least one symmetry, which
/// is what lets a table store only one eighth of the black king placements.
pub const fn triangle_index(square: Square) -> Option<u32> {
    match (square.x(), square.y()) {
        (0, 0) => Some(0),
        (1, 0) => Some(1),
        (2, 0) => Some(2),
        (3, 0) => Some(3),
        (1, 1) => Some(4),
        (2, 1) => Some(5),
        (3, 1) => Some(6),
        (2, 2) => Some(7),
        (3, 2) => Some(8),
        (3, 3) => Some(9),
        _ => None,
    }
}

/// Number of squares in the triangle.
pub const TRIANGLE_SIZE: usize = 10;
