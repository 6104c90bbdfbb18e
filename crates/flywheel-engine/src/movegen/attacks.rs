//! Square attack detection on the padded board.

use flywheel_core::{Color, Piece};

use crate::board::{dir, forward, step, Board, Contents};

/// Returns true if any piece of color `by` attacks the square at `target`.
///
/// `target` must be a playable offset.
pub fn is_attacked_by(board: &Board, target: usize, by: Color) -> bool {
    // Pawns attack diagonally forward, so look one row back from the target.
    let behind = step(target, -forward(by));
    if [dir::EAST, dir::WEST]
        .iter()
        .any(|&d| board.get(step(behind, d)).is(Piece::Pawn, by))
    {
        return true;
    }

    if dir::KNIGHT
        .iter()
        .any(|&d| board.get(step(target, d)).is(Piece::Knight, by))
    {
        return true;
    }

    if dir::QUEEN
        .iter()
        .any(|&d| board.get(step(target, d)).is(Piece::King, by))
    {
        return true;
    }

    ray_hits(board, target, &dir::ROOK, Piece::Rook, by)
        || ray_hits(board, target, &dir::BISHOP, Piece::Bishop, by)
}

/// Walks each ray until the first non-empty cell and checks for `slider` or a queen.
fn ray_hits(board: &Board, target: usize, directions: &[isize], slider: Piece, by: Color) -> bool {
    directions.iter().any(|&d| {
        let mut offset = step(target, d);
        loop {
            match board.get(offset) {
                Contents::Empty => offset = step(offset, d),
                contents => return contents.is(slider, by) || contents.is(Piece::Queen, by),
            }
        }
    })
}
