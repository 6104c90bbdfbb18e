//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"
//!
//! Parsing also accepts long algebraic notation ("e2e4", "a7a8q") and SAN
//! written by other programs with a redundant source file or rank ("Ngf3").

use thiserror::Error;
use tracing::debug;

use crate::board::dir;
use crate::make::MoveError;
use crate::movegen::{current_player_can_move, generate_moves, MoveList};
use crate::position::PositionError;
use crate::Position;
use flywheel_core::{Move, Piece};

/// SAN is never shorter or longer than this.
const SAN_LENGTH: std::ops::RangeInclusive<usize> = 2..=7;

/// How many redundant disambiguation characters parsing will drop.
const MAX_STRIPPED: usize = 2;

/// Errors from formatting or parsing move notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    /// The move cannot be formatted because it is not legal here.
    #[error("move {0} is not legal in this position")]
    IllegalMove(Move),

    /// No legal move matches the text.
    #[error("move notation is not valid/legal: {0:?}")]
    NoMatch(String),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// Converts a legal move to SAN, including the `+` or `#` suffix.
///
/// The position must be the state BEFORE the move is made. It is probed in
/// place and unchanged on return.
pub fn move_to_san(position: &mut Position, m: Move) -> Result<String, NotationError> {
    let legal = generate_moves(position);
    format_legal(position, m, &legal)
}

/// Finds the legal move written as `notation`, in long algebraic or SAN.
///
/// A trailing `+` or `#` is ignored. The returned move is tagged for the
/// current position and can be passed to [`Position::push_move`].
pub fn parse_notation(position: &mut Position, notation: &str) -> Result<Move, NotationError> {
    let legal = generate_moves(position);
    if notation.is_ascii() {
        if let Some(m) = find_move(position, notation, &legal, 0) {
            return Ok(m);
        }
    }
    debug!(notation, fen = %position.to_fen(), "no legal move matches");
    Err(NotationError::NoMatch(notation.to_string()))
}

/// Removes one trailing check or mate marker.
pub fn strip_check_suffix(notation: &str) -> &str {
    notation
        .strip_suffix(|c| c == '+' || c == '#')
        .unwrap_or(notation)
}

fn find_move(position: &mut Position, notation: &str, legal: &MoveList, depth: usize) -> Option<Move> {
    let notation = strip_check_suffix(notation);

    if depth == 0 {
        if let Some(m) = legal.as_slice().iter().find(|m| m.to_algebraic() == notation) {
            return Some(*m);
        }
    }

    if !SAN_LENGTH.contains(&notation.len()) {
        return None;
    }

    for m in legal {
        if let Ok(san) = format_legal(position, *m, legal) {
            if strip_check_suffix(&san) == notation {
                return Some(*m);
            }
        }
    }

    // "Ngf3" or "Ng1f3" when "Nf3" was enough: drop the character after the
    // piece letter and try again. A truly ambiguous result never matches.
    if notation.len() >= 4 && depth < MAX_STRIPPED && is_piece_with_source_hint(notation) {
        let shorter = format!("{}{}", &notation[..1], &notation[2..]);
        return find_move(position, &shorter, legal, depth + 1);
    }
    None
}

fn is_piece_with_source_hint(notation: &str) -> bool {
    match notation.as_bytes() {
        [piece, hint, ..] => {
            b"NBRQK".contains(piece) && matches!(hint, b'a'..=b'h' | b'1'..=b'8')
        }
        _ => false,
    }
}

/// Formats `m`, which must appear in `legal`, the legal moves of `position`.
fn format_legal(position: &mut Position, m: Move, legal: &MoveList) -> Result<String, NotationError> {
    if !legal.contains(&m) {
        return Err(NotationError::IllegalMove(m));
    }
    let (piece, _) = position
        .piece_at(m.from())
        .ok_or(NotationError::IllegalMove(m))?;

    let from = m.from();
    let to = m.to();
    let shift = to.offset() as isize - from.offset() as isize;

    let mut san = String::new();
    if piece == Piece::King && shift == 2 * dir::EAST {
        san.push_str("O-O");
    } else if piece == Piece::King && shift == 2 * dir::WEST {
        san.push_str("O-O-O");
    } else {
        // A pawn changing file onto an empty square captures en passant.
        let capture = position.piece_at(to).is_some() || (piece == Piece::Pawn && from.x() != to.x());

        let (mut need_file, need_rank) = disambiguation(position, m, piece, legal);
        match piece.san_char() {
            Some(letter) => san.push(letter),
            None => need_file |= capture,
        }
        if need_file {
            san.push(from.file().to_char());
        }
        if need_rank {
            san.push(from.rank().to_char());
        }
        if capture {
            san.push('x');
        }
        san.push_str(&to.to_algebraic());
        if let Some(promotion) = m.promotion() {
            san.push('=');
            san.extend(promotion.san_char());
        }
    }

    position.apply(m);
    let check = position.is_in_check();
    let mate = check && !current_player_can_move(position);
    position.undo();

    if mate {
        san.push('#');
    } else if check {
        san.push('+');
    }
    Ok(san)
}

/// Decides whether the source file and rank are needed to tell `m` apart
/// from other legal moves of the same piece kind to the same square.
///
/// The file is preferred, then the rank, then both.
fn disambiguation(position: &Position, m: Move, piece: Piece, legal: &MoveList) -> (bool, bool) {
    let from = m.from();
    let rivals: Vec<&Move> = legal
        .as_slice()
        .iter()
        .filter(|other| other.to() == m.to() && other.promotion() == m.promotion())
        .filter(|other| position.piece_at(other.from()).map(|(p, _)| p) == Some(piece))
        .collect();

    if rivals.len() <= 1 {
        return (false, false);
    }

    let same_file = rivals.iter().filter(|o| o.from().x() == from.x()).count();
    let same_rank = rivals.iter().filter(|o| o.from().y() == from.y()).count();
    if same_file == 1 {
        (true, false)
    } else {
        (same_rank > 1, true)
    }
}
