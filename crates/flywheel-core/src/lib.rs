//! Core types for chess.
//!
//! This crate provides the fundamental types shared by the engine and the
//! endgame tables:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates, including
//!   the conversion to padded-grid offsets used by the engine
//! - [`Move`] for move representation and long algebraic notation
//! - FEN field parsing and validation

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, Rank, Square};
