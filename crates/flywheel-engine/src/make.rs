//! Applying and undoing moves.
//!
//! [`Position::push_move`] updates every field and the fingerprint
//! incrementally and saves an [`UndoRecord`]; [`Position::pop_move`] restores
//! the previous state from that record without recomputing anything.

use flywheel_core::{Color, Move, Piece, Square};
use thiserror::Error;
use tracing::{trace, warn};

use crate::board::{self, dir, Contents};
use crate::position::{CastlingRights, Position};
use crate::zobrist::{HashValue, ZOBRIST};

/// Errors from applying or undoing a move.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move {0} was generated for a different board position")]
    StaleMove(Move),

    #[error("no {color} piece on {square} to move")]
    NoPieceToMove { square: Square, color: Color },

    #[error("{color} cannot capture its own piece on {square}")]
    OwnPieceOnTarget { square: Square, color: Color },

    #[error("no move to undo")]
    EmptyHistory,
}

/// Everything needed to reverse one applied move.
#[derive(Debug, Clone)]
pub(crate) struct UndoRecord {
    pub(crate) mv: Move,
    captured: Contents,
    castling: CastlingRights,
    en_passant_target: Option<usize>,
    en_passant_file: Option<u8>,
    quiet_plies: u32,
    check_cache: Option<bool>,
    /// Fingerprint before the move.
    pub(crate) hash: HashValue,
    /// Rook source and destination when the move castled.
    rook_shift: Option<(usize, usize)>,
    /// Offset of the pawn removed by an en passant capture.
    en_passant_capture: Option<usize>,
}

// The saved check cache is a memo, so two records differing only there are equal.
impl PartialEq for UndoRecord {
    fn eq(&self, other: &Self) -> bool {
        self.mv == other.mv
            && self.captured == other.captured
            && self.castling == other.castling
            && self.en_passant_target == other.en_passant_target
            && self.en_passant_file == other.en_passant_file
            && self.quiet_plies == other.quiet_plies
            && self.hash == other.hash
            && self.rook_shift == other.rook_shift
            && self.en_passant_capture == other.en_passant_capture
    }
}

impl Eq for UndoRecord {}

impl Position {
    /// Applies a move generated for this position.
    ///
    /// The move's tag must equal the first word of the current fingerprint,
    /// which rejects moves generated for some other position. On error the
    /// position is unchanged.
    pub fn push_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if mv.tag() != self.hash.a {
            warn!(mv = %mv, hash = %self.hash, "rejected stale move");
            return Err(MoveError::StaleMove(mv));
        }
        let side = self.side_to_move;
        if self.board.at(mv.from()).color() != Some(side) {
            return Err(MoveError::NoPieceToMove {
                square: mv.from(),
                color: side,
            });
        }
        if self.board.at(mv.to()).color() == Some(side) {
            return Err(MoveError::OwnPieceOnTarget {
                square: mv.to(),
                color: side,
            });
        }
        self.apply(mv);
        Ok(())
    }

    /// Undoes the most recent move and returns it.
    pub fn pop_move(&mut self) -> Result<Move, MoveError> {
        self.undo().ok_or(MoveError::EmptyHistory)
    }

    /// Returns true if there is a move to undo.
    pub fn can_pop_move(&self) -> bool {
        !self.history.is_empty()
    }

    /// Stores `contents` at `offset`, keeping the fingerprint in step.
    fn put(&mut self, offset: usize, contents: Contents) -> Contents {
        let previous = self.board.replace(offset, contents);
        if let Some(square) = Square::from_offset(offset) {
            if let Some((piece, color)) = previous.piece() {
                self.hash ^= ZOBRIST.piece_key(piece, color, square);
            }
            if let Some((piece, color)) = contents.piece() {
                self.hash ^= ZOBRIST.piece_key(piece, color, square);
            }
        }
        previous
    }

    fn clear_castling(&mut self, right: usize) {
        if self.castling.take(right) {
            self.hash ^= ZOBRIST.castling_key(right);
        }
    }

    /// Applies a pseudo-legal move without the tag and ownership checks.
    pub(crate) fn apply(&mut self, mv: Move) {
        let side = self.side_to_move;
        let from = mv.from().offset();
        let to = mv.to().offset();

        let mut record = UndoRecord {
            mv,
            captured: Contents::Empty,
            castling: self.castling,
            en_passant_target: self.en_passant_target,
            en_passant_file: self.en_passant_file,
            quiet_plies: self.quiet_plies,
            check_cache: self.check_cache.get(),
            hash: self.hash,
            rook_shift: None,
            en_passant_capture: None,
        };

        self.hash ^= ZOBRIST.white_to_move;

        let moving = self.put(from, Contents::Empty);
        let captured = self.put(to, moving);
        record.captured = captured;

        self.quiet_plies += 1;
        self.check_cache.set(None);

        if let Some(file) = self.en_passant_file.take() {
            self.hash ^= ZOBRIST.en_passant_key(file);
        }
        self.en_passant_target = None;

        if !captured.is_empty() {
            self.quiet_plies = 0;
        }

        if let Some(promotion) = mv.promotion() {
            self.put(to, Contents::Occupied(promotion, side));
            self.quiet_plies = 0;
        } else {
            match moving.piece() {
                Some((Piece::Pawn, _)) => {
                    self.quiet_plies = 0;
                    let sideways = (to % 10) as isize - (from % 10) as isize;
                    if captured.is_empty() && sideways != 0 {
                        // The captured pawn sits beside the source, not behind the destination.
                        let victim = board::step(from, sideways);
                        self.put(victim, Contents::Empty);
                        record.en_passant_capture = Some(victim);
                    } else if to == board::step(from, 2 * board::forward(side)) {
                        self.en_passant_target = Some(board::step(from, board::forward(side)));
                    }
                }
                Some((Piece::King, _)) => {
                    self.kings[side.index()] = mv.to();
                    let (kingside, queenside) = match side {
                        Color::White => (0, 1),
                        Color::Black => (2, 3),
                    };
                    self.clear_castling(kingside);
                    self.clear_castling(queenside);

                    let shift = if to == board::step(from, 2 * dir::EAST) {
                        Some((board::step(from, 3 * dir::EAST), board::step(from, dir::EAST)))
                    } else if to == board::step(from, 2 * dir::WEST) {
                        Some((board::step(from, 4 * dir::WEST), board::step(from, dir::WEST)))
                    } else {
                        None
                    };
                    if let Some((rook_from, rook_to)) = shift {
                        let rook = self.put(rook_from, Contents::Empty);
                        self.put(rook_to, rook);
                        record.rook_shift = shift;
                    }
                }
                _ => {}
            }
        }

        for offset in [from, to] {
            if let Some(right) = CastlingRights::for_rook_home(offset) {
                self.clear_castling(right);
            }
        }

        if side == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = side.opposite();

        self.en_passant_file = self.exploitable_en_passant_file();
        if let Some(file) = self.en_passant_file {
            self.hash ^= ZOBRIST.en_passant_key(file);
        }

        self.history.push(record);
        trace!(mv = %mv, hash = %self.hash, "applied move");

        if self.debug_mode {
            assert_eq!(
                self.hash,
                self.compute_hash(),
                "incremental hash diverged after {}",
                mv
            );
        }
    }

    /// Reverses the most recent move, or returns `None` when there is none.
    pub(crate) fn undo(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        let mv = record.mv;
        let from = mv.from().offset();
        let to = mv.to().offset();

        let side = self.side_to_move.opposite();
        self.side_to_move = side;
        if side == Color::Black {
            self.fullmove_number -= 1;
        }

        let moved = self.board.replace(to, record.captured);
        let restored = if mv.is_promotion() {
            Contents::Occupied(Piece::Pawn, side)
        } else {
            moved
        };
        self.board.replace(from, restored);

        if let Some(victim) = record.en_passant_capture {
            self.board
                .replace(victim, Contents::Occupied(Piece::Pawn, side.opposite()));
        }
        if let Some((rook_from, rook_to)) = record.rook_shift {
            let rook = self.board.replace(rook_to, Contents::Empty);
            self.board.replace(rook_from, rook);
        }
        if restored.is(Piece::King, side) {
            self.kings[side.index()] = mv.from();
        }

        self.castling = record.castling;
        self.en_passant_target = record.en_passant_target;
        self.en_passant_file = record.en_passant_file;
        self.quiet_plies = record.quiet_plies;
        self.check_cache.set(record.check_cache);
        self.hash = record.hash;

        trace!(mv = %mv, "undid move");
        Some(mv)
    }
}
