//! Game-ending rules.
//!
//! This module provides the [`RuleSet`] trait which abstracts over the rules
//! deciding when a game is over. Move generation and the mutator are
//! rule-agnostic; the verdict on a position is delegated to the active rule
//! set.

mod standard;

pub use standard::StandardChess;

use std::fmt;

use crate::{MoveList, Position};
use flywheel_core::Move;

/// Verdict on a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// The side to move has a legal move and no draw rule applies.
    InProgress,
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// Returns true unless the game is still in progress.
    pub const fn is_over(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Returns the PGN result token.
    pub const fn to_pgn(self) -> &'static str {
        match self {
            GameResult::InProgress => "*",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "in progress"),
            GameResult::WhiteWins => write!(f, "white wins"),
            GameResult::BlackWins => write!(f, "black wins"),
            GameResult::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// Insufficient material to checkmate.
    InsufficientMaterial,
    /// Threefold repetition of the same position with the same side to move.
    ThreefoldRepetition,
    /// 50-move rule (100 half-moves without pawn move or capture).
    FiftyMoveRule,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::FiftyMoveRule => "fifty-move rule",
        };
        f.write_str(text)
    }
}

/// Trait for the rules deciding legality and game end.
///
/// Queries that probe moves take the position mutably: candidates are
/// applied and undone in place, and the position is unchanged on return.
///
/// # Example
///
/// ```
/// use flywheel_engine::rules::{GameResult, RuleSet, StandardChess};
///
/// let mut position = StandardChess.initial_position();
/// assert_eq!(StandardChess.generate_moves(&mut position).len(), 20);
/// assert_eq!(StandardChess.game_result(&mut position), GameResult::InProgress);
/// ```
pub trait RuleSet {
    /// Returns the initial position for this rule set.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the given position.
    fn generate_moves(&self, position: &mut Position) -> MoveList;

    /// Returns true if the given move is legal in the position.
    ///
    /// Moves compare by squares and promotion, so the tag of `m` is ignored.
    fn is_legal(&self, position: &mut Position, m: Move) -> bool {
        self.generate_moves(position).contains(&m)
    }

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Returns the verdict on the position.
    fn game_result(&self, position: &mut Position) -> GameResult;

    /// Returns true if the game is over.
    fn is_game_over(&self, position: &mut Position) -> bool {
        self.game_result(position).is_over()
    }

    /// Returns true if checkmate is provably impossible from material alone.
    fn is_insufficient_material(&self, position: &Position) -> bool;

    /// Counts occurrences of the current position, including this one.
    fn repetition_count(&self, position: &Position) -> usize;
}

impl Position {
    /// Returns the verdict on this position under standard rules.
    pub fn game_result(&mut self) -> GameResult {
        StandardChess.game_result(self)
    }

    /// Counts how often the current position occurred with the same side to
    /// move, including this occurrence.
    pub fn repetition_count(&self) -> usize {
        StandardChess.repetition_count(self)
    }

    /// Returns true if neither side can ever deliver mate with the material
    /// on the board.
    pub fn is_material_draw(&self) -> bool {
        StandardChess.is_insufficient_material(self)
    }

    /// Returns true if the side to move is in check with no legal reply.
    pub fn is_checkmated(&mut self) -> bool {
        self.is_in_check() && !crate::current_player_can_move(self)
    }
}
