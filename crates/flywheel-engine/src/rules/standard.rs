//! Standard chess rules implementation.

use flywheel_core::{Color, Piece};
use tracing::debug;

use super::{DrawReason, GameResult, RuleSet};
use crate::movegen::{current_player_can_move, generate_moves};
use crate::{MoveList, Position};

/// Quiet plies after which the game is drawn.
const FIFTY_MOVE_PLIES: u32 = 100;

/// Standard chess rules (FIDE).
///
/// Draws are applied automatically rather than claimed:
/// - stalemate
/// - 50-move rule
/// - threefold repetition
/// - insufficient material, judged conservatively
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

/// Minor pieces held by one side.
#[derive(Debug, Clone, Copy, Default)]
struct Minors {
    knights: u32,
    dark_bishops: u32,
    light_bishops: u32,
}

impl Minors {
    fn is_bare(self) -> bool {
        self.knights == 0 && self.dark_bishops == 0 && self.light_bishops == 0
    }

    /// Bishops all on one square color, or a single knight and nothing else.
    fn cannot_mate_bare_king(self) -> bool {
        let bishops = self.dark_bishops + self.light_bishops;
        if self.knights == 0 {
            self.dark_bishops == 0 || self.light_bishops == 0
        } else {
            self.knights == 1 && bishops == 0
        }
    }
}

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn generate_moves(&self, position: &mut Position) -> MoveList {
        generate_moves(position)
    }

    fn is_check(&self, position: &Position) -> bool {
        position.is_in_check()
    }

    fn game_result(&self, position: &mut Position) -> GameResult {
        let result = if current_player_can_move(position) {
            if position.quiet_plies() >= FIFTY_MOVE_PLIES {
                GameResult::Draw(DrawReason::FiftyMoveRule)
            } else if self.repetition_count(position) >= 3 {
                GameResult::Draw(DrawReason::ThreefoldRepetition)
            } else if self.is_insufficient_material(position) {
                GameResult::Draw(DrawReason::InsufficientMaterial)
            } else {
                GameResult::InProgress
            }
        } else if position.is_in_check() {
            match position.side_to_move() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            }
        } else {
            GameResult::Draw(DrawReason::Stalemate)
        };

        if result.is_over() {
            debug!(%result, fen = %position.to_fen(), "game over");
        }
        result
    }

    fn is_insufficient_material(&self, position: &Position) -> bool {
        let mut minors = [Minors::default(); 2];
        for (square, piece, color) in position.board.occupied() {
            let side = &mut minors[color.index()];
            match piece {
                Piece::Pawn | Piece::Rook | Piece::Queen => return false,
                Piece::Knight => side.knights += 1,
                Piece::Bishop if square.is_dark() => side.dark_bishops += 1,
                Piece::Bishop => side.light_bishops += 1,
                Piece::King => {}
            }
        }

        let white = minors[Color::White.index()];
        let black = minors[Color::Black.index()];
        if white.is_bare() {
            black.cannot_mate_bare_king()
        } else if black.is_bare() {
            white.cannot_mate_bare_king()
        } else {
            false
        }
    }

    fn repetition_count(&self, position: &Position) -> usize {
        let current = position.hash();
        let history = &position.history;
        // Only positions with the same side to move can match, and the one
        // two plies back never does.
        let earlier = (0..history.len().saturating_sub(3))
            .rev()
            .step_by(2)
            .filter(|&idx| history[idx].hash == current)
            .count();
        1 + earlier
    }
}
