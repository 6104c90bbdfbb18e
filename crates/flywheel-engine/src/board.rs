//! Padded 10x12 board storage.
//!
//! Rows 0-1 and 10-11 and columns 0 and 9 hold [`Contents::OffBoard`], so a
//! ray or knight jump from any playable square lands inside the grid and
//! stops on a sentinel instead of needing bounds checks.

use flywheel_core::{Color, Piece, Square};

/// What occupies one cell of the padded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Contents {
    #[default]
    Empty,
    OffBoard,
    Occupied(Piece, Color),
}

impl Contents {
    /// Returns the piece and color, if the cell holds one.
    #[inline]
    pub const fn piece(self) -> Option<(Piece, Color)> {
        match self {
            Contents::Occupied(piece, color) => Some((piece, color)),
            _ => None,
        }
    }

    /// Returns the color of the occupying piece, if any.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Contents::Occupied(_, color) => Some(color),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Contents::Empty)
    }

    /// Returns true if the cell holds exactly this piece of this color.
    #[inline]
    pub fn is(self, piece: Piece, color: Color) -> bool {
        self == Contents::Occupied(piece, color)
    }
}

/// Step deltas on the padded grid.
pub mod dir {
    pub const EAST: isize = 1;
    pub const NORTH_EAST: isize = 11;
    pub const NORTH: isize = 10;
    pub const NORTH_WEST: isize = 9;
    pub const WEST: isize = -1;
    pub const SOUTH_WEST: isize = -11;
    pub const SOUTH: isize = -10;
    pub const SOUTH_EAST: isize = -9;

    pub const ROOK: [isize; 4] = [EAST, NORTH, WEST, SOUTH];
    pub const BISHOP: [isize; 4] = [NORTH_EAST, NORTH_WEST, SOUTH_WEST, SOUTH_EAST];
    pub const QUEEN: [isize; 8] = [
        EAST, NORTH_EAST, NORTH, NORTH_WEST, WEST, SOUTH_WEST, SOUTH, SOUTH_EAST,
    ];
    pub const KNIGHT: [isize; 8] = [12, 21, 19, 8, -12, -21, -19, -8];
}

/// Returns the offset one step away.
///
/// Callers only step from playable squares by at most two rows, which the
/// sentinel border absorbs.
#[inline]
pub const fn step(offset: usize, delta: isize) -> usize {
    offset.wrapping_add_signed(delta)
}

/// Returns the grid step a pawn of `color` advances by.
#[inline]
pub const fn forward(color: Color) -> isize {
    match color {
        Color::White => dir::NORTH,
        Color::Black => dir::SOUTH,
    }
}

/// The playable offsets, a1 first and h8 last.
pub fn playable_offsets() -> impl Iterator<Item = usize> {
    Square::all().map(Square::offset)
}

/// Fixed-size padded grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Contents; Square::GRID_SIZE],
}

impl Board {
    /// Creates a board with an empty interior and a sentinel border.
    pub fn empty() -> Self {
        let mut cells = [Contents::OffBoard; Square::GRID_SIZE];
        for offset in playable_offsets() {
            cells[offset] = Contents::Empty;
        }
        Board { cells }
    }

    #[inline]
    pub fn get(&self, offset: usize) -> Contents {
        self.cells[offset]
    }

    #[inline]
    pub fn at(&self, square: Square) -> Contents {
        self.cells[square.offset()]
    }

    /// Stores `contents` at a playable offset and returns what was there.
    #[inline]
    pub fn replace(&mut self, offset: usize, contents: Contents) -> Contents {
        debug_assert_ne!(self.cells[offset], Contents::OffBoard);
        std::mem::replace(&mut self.cells[offset], contents)
    }

    /// Iterates over occupied squares, a1 first.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| {
            self.at(sq)
                .piece()
                .map(|(piece, color)| (sq, piece, color))
        })
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..8).rev() {
            for x in 0..8 {
                let c = Square::from_coords(x, y)
                    .and_then(|sq| self.at(sq).piece())
                    .map_or('.', |(piece, color)| piece.to_fen_char(color));
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
