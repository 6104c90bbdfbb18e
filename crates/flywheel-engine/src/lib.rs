//! Chess rules engine on a padded mailbox board.
//!
//! This crate provides:
//! - [`Position`] - Full game state with an incrementally maintained
//!   96-bit fingerprint and a stack of undo records
//! - Legal move generation, optionally rated and sorted best first
//! - [`Position::push_move`] / [`Position::pop_move`] for exact, reversible
//!   move application
//! - [`RuleSet`] - Game result detection: checkmate, stalemate and draws
//! - SAN and long algebraic notation parsing and generation
//!
//! # Architecture
//!
//! The board is a 10x12 grid whose outer ring holds an off-board sentinel,
//! so stepping off the edge in any direction, including a knight jump,
//! lands on a sentinel rather than wrapping. Legality is decided by applying
//! each candidate move in place, checking the mover's king and undoing it.
//!
//! # Example
//!
//! ```
//! use flywheel_engine::{GameResult, Position};
//!
//! let mut position = Position::startpos();
//! println!("Legal moves from starting position: {}", position.legal_moves().len());
//!
//! position.push_history("e4 e5 Bc4 Nc6 Qh5 Nf6 Qxf7#").unwrap();
//! assert_eq!(position.game_result(), GameResult::WhiteWins);
//! assert_eq!(position.alg_history(), "e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7");
//! ```

mod board;
mod history;
mod make;
pub mod movegen;
mod position;
pub mod rules;
pub mod san;
mod zobrist;

pub use make::MoveError;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    current_player_can_move, generate_moves, generate_moves_rated, generate_pseudo_legal,
    MoveList,
};
pub use position::{CastlingRights, Position, PositionError};
pub use rules::{DrawReason, GameResult, RuleSet, StandardChess};
pub use san::{move_to_san, parse_notation, NotationError};
pub use zobrist::{HashValue, ZobristKeys, ZOBRIST};
