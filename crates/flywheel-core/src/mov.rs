//! Move representation.

use crate::{Piece, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A chess move.
///
/// Besides the source, destination, and optional promotion piece, a move
/// carries two pieces of metadata:
/// - a *tag*, the first word of the position hash at the time the move was
///   generated, used to reject a move applied to a different position;
/// - a *score*, filled in only when moves are ranked by a rating function.
///
/// Equality and hashing look at source, destination, and promotion only.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    tag: u32,
    score: i32,
}

impl Move {
    /// Creates a move with no promotion, tag, or score.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            tag: 0,
            score: 0,
        }
    }

    /// Creates a pawn promotion move.
    #[inline]
    pub const fn promoting(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            from,
            to,
            promotion: Some(piece),
            tag: 0,
            score: 0,
        }
    }

    /// Returns a copy of this move stamped with a position tag.
    #[inline]
    pub const fn with_tag(self, tag: u32) -> Self {
        Move { tag, ..self }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Returns the position tag this move was generated for.
    #[inline]
    pub const fn tag(self) -> u32 {
        self.tag
    }

    #[inline]
    pub const fn score(self) -> i32 {
        self.score
    }

    #[inline]
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Returns the long algebraic notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_algebraic(self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from long algebraic notation.
    ///
    /// The result is untagged; it only describes squares and promotion.
    /// Use the engine to resolve it against a position's legal moves.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s[4..].chars().next() {
            Some(c) => Some(Move::promoting(from, to, Piece::from_promotion_char(c)?)),
            None => Some(Move::new(from, to)),
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promotion.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_algebraic())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
