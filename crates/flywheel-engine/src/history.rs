//! Move history as text.
//!
//! Histories are space-separated move lists. Long algebraic histories come
//! straight from the undo records; SAN needs the position before each move,
//! so it is produced by replaying the game on a scratch position.

use flywheel_core::Move;
use tracing::debug;

use crate::movegen::generate_moves;
use crate::san::{move_to_san, parse_notation, NotationError};
use crate::Position;

impl Position {
    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&mut self) -> crate::MoveList {
        generate_moves(self)
    }

    /// Formats a legal move in SAN.
    pub fn san(&mut self, m: Move) -> Result<String, NotationError> {
        move_to_san(self, m)
    }

    /// Applies the move written in long algebraic notation or SAN.
    pub fn push_notation(&mut self, notation: &str) -> Result<Move, NotationError> {
        let m = parse_notation(self, notation)?;
        self.push_move(m)?;
        Ok(m)
    }

    /// Applies every move of a space-separated history.
    ///
    /// Either all moves are applied or, on the first bad one, the moves
    /// already applied by this call are undone and the error returned.
    pub fn push_history(&mut self, history: &str) -> Result<usize, NotationError> {
        let mut applied = 0;
        for notation in history.split_whitespace() {
            if let Err(err) = self.push_notation(notation) {
                debug!(notation, applied, "rolling back history");
                for _ in 0..applied {
                    self.pop_move()?;
                }
                return Err(err);
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Moves played since loading, in long algebraic notation.
    pub fn alg_history(&self) -> String {
        self.moves_played()
            .map(Move::to_algebraic)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Moves played since loading, in SAN.
    pub fn pgn_history(&self) -> Result<String, NotationError> {
        let mut scratch = Position::from_fen(self.initial_fen())?;
        let mut sans = Vec::with_capacity(self.ply_count());
        for m in self.moves_played() {
            sans.push(move_to_san(&mut scratch, m)?);
            scratch.push_move(m)?;
        }
        Ok(sans.join(" "))
    }
}
