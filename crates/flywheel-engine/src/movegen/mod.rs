//! Move generation.
//!
//! Pseudo-legal moves are produced per piece kind by stepping over the padded
//! board. The legality filter then applies each candidate, checks whether the
//! mover's king is attacked, and undoes it again.

pub(crate) mod attacks;
pub mod perft;

use crate::board::{self, dir, playable_offsets, Contents};
use crate::Position;
use flywheel_core::{Color, Move, Piece, Square};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::new(Square::A1, Square::A1); Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if an equal move (same squares and promotion) is present.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    /// Sorts by descending score. Moves with equal scores keep their order.
    pub fn sort_by_score(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score().cmp(&a.score()));
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, { MoveList::MAX_MOVES }>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.len)
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move.
///
/// Every returned move is tagged for the current position. The position is
/// probed in place and is unchanged on return.
pub fn generate_moves(position: &mut Position) -> MoveList {
    let mut moves = generate_pseudo_legal(position);
    moves.retain(|m| leaves_king_safe(position, *m));
    moves
}

/// Generates legal moves scored by `rate`, best first.
///
/// `rate` is called with each move applied to the position and must leave
/// the position as it found it. Equal scores keep generation order.
pub fn generate_moves_rated<F>(position: &mut Position, mut rate: F) -> MoveList
where
    F: FnMut(&mut Position, &Move) -> i32,
{
    let candidates = generate_pseudo_legal(position);
    let mut moves = MoveList::new();
    for m in &candidates {
        let mover = position.side_to_move();
        position.apply(*m);
        if !position.is_king_attacked(mover) {
            let mut rated = *m;
            rated.set_score(rate(position, m));
            moves.push(rated);
        }
        position.undo();
    }
    moves.sort_by_score();
    moves
}

/// Returns true if the side to move has at least one legal move.
///
/// Stops at the first legal move found.
pub fn current_player_can_move(position: &mut Position) -> bool {
    let candidates = generate_pseudo_legal(position);
    candidates
        .as_slice()
        .iter()
        .any(|m| leaves_king_safe(position, *m))
}

fn leaves_king_safe(position: &mut Position, m: Move) -> bool {
    let mover = position.side_to_move();
    position.apply(m);
    let safe = !position.is_king_attacked(mover);
    position.undo();
    safe
}

/// Generates pseudo-legal moves: movement and capture rules are obeyed, but
/// the mover's king may be left in check.
pub fn generate_pseudo_legal(position: &Position) -> MoveList {
    let mut generator = Generator {
        position,
        side: position.side_to_move(),
        tag: position.hash().a,
        moves: MoveList::new(),
    };

    for source in playable_offsets() {
        let piece = match position.board.get(source) {
            Contents::Occupied(piece, color) if color == generator.side => piece,
            _ => continue,
        };
        match piece {
            Piece::Pawn => generator.pawn(source),
            Piece::Knight => generator.leaper(source, &dir::KNIGHT),
            Piece::Bishop => generator.slider(source, &dir::BISHOP),
            Piece::Rook => generator.slider(source, &dir::ROOK),
            Piece::Queen => generator.slider(source, &dir::QUEEN),
            Piece::King => {
                generator.leaper(source, &dir::QUEEN);
                generator.castling(source);
            }
        }
    }

    generator.moves
}

struct Generator<'a> {
    position: &'a Position,
    side: Color,
    tag: u32,
    moves: MoveList,
}

impl Generator<'_> {
    fn add(&mut self, from: usize, to: usize, promotion: Option<Piece>) {
        if let (Some(from), Some(to)) = (Square::from_offset(from), Square::from_offset(to)) {
            let m = match promotion {
                Some(piece) => Move::promoting(from, to, piece),
                None => Move::new(from, to),
            };
            self.moves.push(m.with_tag(self.tag));
        }
    }

    /// Adds a pawn move, expanding it into all four promotions on the far rank.
    fn add_pawn(&mut self, from: usize, to: usize) {
        let promotes = Square::from_offset(to).map(Square::y) == Some(self.side.promotion_rank());
        if promotes {
            for piece in Piece::PROMOTIONS {
                self.add(from, to, Some(piece));
            }
        } else {
            self.add(from, to, None);
        }
    }

    fn is_enemy(&self, offset: usize) -> bool {
        self.position.board.get(offset).color() == Some(self.side.opposite())
    }

    fn is_empty(&self, offset: usize) -> bool {
        self.position.board.get(offset).is_empty()
    }

    fn pawn(&mut self, source: usize) {
        let ahead = board::forward(self.side);
        let one = board::step(source, ahead);
        if self.is_empty(one) {
            self.add_pawn(source, one);
            let on_home_rank =
                Square::from_offset(source).map(Square::y) == Some(self.side.pawn_home_rank());
            let two = board::step(one, ahead);
            if on_home_rank && self.is_empty(two) {
                self.add(source, two, None);
            }
        }

        for side_step in [dir::EAST, dir::WEST] {
            let dest = board::step(one, side_step);
            if self.is_enemy(dest) {
                self.add_pawn(source, dest);
            } else if self.position.en_passant_target == Some(dest) {
                self.add(source, dest, None);
            }
        }
    }

    fn leaper(&mut self, source: usize, deltas: &[isize]) {
        for &d in deltas {
            let dest = board::step(source, d);
            if self.is_empty(dest) || self.is_enemy(dest) {
                self.add(source, dest, None);
            }
        }
    }

    fn slider(&mut self, source: usize, directions: &[isize]) {
        for &d in directions {
            let mut dest = board::step(source, d);
            while self.is_empty(dest) {
                self.add(source, dest, None);
                dest = board::step(dest, d);
            }
            if self.is_enemy(dest) {
                self.add(source, dest, None);
            }
        }
    }

    /// Castling needs the right, an empty path, the square the king crosses
    /// to be safe, and the king not in check. Landing in check is left to
    /// the legality filter.
    fn castling(&mut self, king: usize) {
        let rights = self.position.castling();
        let kingside = rights.can_castle_kingside(self.side)
            && self.is_empty(board::step(king, dir::EAST))
            && self.is_empty(board::step(king, 2 * dir::EAST))
            && !self.crossing_attacked(board::step(king, dir::EAST));
        let queenside = rights.can_castle_queenside(self.side)
            && self.is_empty(board::step(king, dir::WEST))
            && self.is_empty(board::step(king, 2 * dir::WEST))
            && self.is_empty(board::step(king, 3 * dir::WEST))
            && !self.crossing_attacked(board::step(king, dir::WEST));

        if (kingside || queenside) && !self.position.is_in_check() {
            if kingside {
                self.add(king, board::step(king, 2 * dir::EAST), None);
            }
            if queenside {
                self.add(king, board::step(king, 2 * dir::WEST), None);
            }
        }
    }

    fn crossing_attacked(&self, offset: usize) -> bool {
        attacks::is_attacked_by(&self.position.board, offset, self.side.opposite())
    }
}
