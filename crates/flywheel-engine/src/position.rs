//! Chess position representation.

use std::cell::Cell;

use flywheel_core::{Color, FenError, FenParser, Move, Piece, Square};
use thiserror::Error;
use tracing::debug;

use crate::board::{self, Board, Contents};
use crate::make::UndoRecord;
use crate::movegen::attacks::is_attacked_by;
use crate::zobrist::{HashValue, ZOBRIST};

/// Errors raised when a position fails structural validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: usize },

    #[error("{color} pawn on back rank at {square}")]
    PawnOnBackRank { color: Color, square: Square },

    #[error("{color} has {count} pieces of kind {piece}, at most {limit} possible")]
    TooManyPieces {
        color: Color,
        piece: Piece,
        count: usize,
        limit: usize,
    },

    #[error("{color} has {count} pieces besides the king, at most 15 possible")]
    TooManyNonKingPieces { color: Color, count: usize },

    #[error("castling right '{0}' requires king and rook on their home squares")]
    CastlingWithoutPieces(char),

    #[error("en passant target {0} does not follow a pawn double step")]
    InvalidEnPassant(Square),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    #[error("invalid square name: {0:?}")]
    InvalidSquareName(String),

    #[error("invalid square coordinates ({x}, {y})")]
    InvalidCoordinates { x: u8, y: u8 },
}

/// Castling rights flags.
///
/// Bit `i` corresponds to castling salt `i`: White kingside, White
/// queenside, Black kingside, Black queenside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// FEN letters in bit order.
    const LETTERS: [char; 4] = ['K', 'Q', 'k', 'q'];

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn kingside_bit(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    const fn queenside_bit(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_bit(color)) != 0
    }

    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_bit(color)) != 0
    }

    /// Returns true if right `index` (0-3) is held.
    #[inline]
    pub const fn has(self, index: usize) -> bool {
        (self.0 >> index) & 1 != 0
    }

    /// Clears right `index` (0-3), returning whether it was held.
    #[inline]
    pub fn take(&mut self, index: usize) -> bool {
        let held = self.has(index);
        self.0 &= !(1 << index);
        held
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Reads the castling field of a parsed FEN record.
    pub fn from_fen(fen: &FenParser) -> Self {
        let bits = Self::LETTERS
            .iter()
            .enumerate()
            .filter(|(_, &letter)| fen.has_castling(letter))
            .fold(0, |acc, (i, _)| acc | (1 << i));
        CastlingRights(bits)
    }

    /// Formats as a FEN castling field.
    pub fn to_fen(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        Self::LETTERS
            .iter()
            .enumerate()
            .filter(|(i, _)| self.has(*i))
            .map(|(_, &letter)| letter)
            .collect()
    }

    /// Home squares of the king and rook a right depends on.
    const fn home_squares(index: usize) -> (Square, Square) {
        match index {
            0 => (Square::E1, Square::H1),
            1 => (Square::E1, Square::A1),
            2 => (Square::E8, Square::H8),
            _ => (Square::E8, Square::A8),
        }
    }

    /// Returns the right that is lost when a rook home square is vacated or captured on.
    pub const fn for_rook_home(offset: usize) -> Option<usize> {
        match offset {
            28 => Some(0),
            21 => Some(1),
            98 => Some(2),
            91 => Some(3),
            _ => None,
        }
    }
}

/// Inventory limits reachable through promotion.
const PIECE_LIMITS: [(Piece, usize); 5] = [
    (Piece::Pawn, 8),
    (Piece::Knight, 10),
    (Piece::Bishop, 10),
    (Piece::Rook, 10),
    (Piece::Queen, 9),
];

/// Complete chess position state, including the history needed to undo moves.
///
/// A position is only ever changed through [`Position::push_move`] and
/// [`Position::pop_move`]. Move generation probes candidate moves by
/// applying and undoing them on the same position, so at most one probe is
/// in flight at any time.
#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    /// Offset of the square skipped by the last double step.
    pub(crate) en_passant_target: Option<usize>,
    /// File of the en passant target, only when a pawn can capture there.
    pub(crate) en_passant_file: Option<u8>,
    pub(crate) quiet_plies: u32,
    pub(crate) fullmove_number: u32,
    /// King squares, indexed by color.
    pub(crate) kings: [Square; 2],
    pub(crate) hash: HashValue,
    pub(crate) history: Vec<UndoRecord>,
    pub(crate) check_cache: Cell<Option<bool>>,
    pub(crate) debug_mode: bool,
    initial_fen: String,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// The record must be well formed and describe a position that could
    /// arise in a game: one king each, no pawns on the back ranks, piece
    /// counts reachable by promotion, and the side not to move not in check.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed = FenParser::parse(fen)?;

        let mut board = Board::empty();
        for (square, piece, color) in parsed.pieces() {
            board.replace(square.offset(), Contents::Occupied(piece, color));
        }

        let mut position = Position {
            board,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen(&parsed),
            en_passant_target: parsed.en_passant.map(Square::offset),
            en_passant_file: None,
            quiet_plies: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            kings: [Square::A1; 2],
            hash: HashValue::ZERO,
            history: Vec::new(),
            check_cache: Cell::new(None),
            debug_mode: false,
            initial_fen: String::new(),
        };

        position.validate(&parsed)?;
        position.en_passant_file = position.exploitable_en_passant_file();
        position.hash = position.compute_hash();
        position.initial_fen = position.to_fen();

        debug!(fen = %position.initial_fen, hash = %position.hash, "loaded position");
        Ok(position)
    }

    fn validate(&mut self, parsed: &FenParser) -> Result<(), PositionError> {
        let mut counts = [[0usize; 6]; 2];
        for (square, piece, color) in self.board.occupied() {
            counts[color.index()][piece.index()] += 1;
            match piece {
                Piece::King => self.kings[color.index()] = square,
                Piece::Pawn if square.y() == 0 || square.y() == 7 => {
                    return Err(PositionError::PawnOnBackRank { color, square });
                }
                _ => {}
            }
        }

        for color in Color::BOTH {
            let inventory = &counts[color.index()];
            let kings = inventory[Piece::King.index()];
            if kings != 1 {
                return Err(PositionError::KingCount {
                    color,
                    count: kings,
                });
            }
            for (piece, limit) in PIECE_LIMITS {
                let count = inventory[piece.index()];
                if count > limit {
                    return Err(PositionError::TooManyPieces {
                        color,
                        piece,
                        count,
                        limit,
                    });
                }
            }
            let others = inventory.iter().sum::<usize>() - kings;
            if others > 15 {
                return Err(PositionError::TooManyNonKingPieces {
                    color,
                    count: others,
                });
            }
        }

        for (index, letter) in CastlingRights::LETTERS.iter().enumerate() {
            if !self.castling.has(index) {
                continue;
            }
            let color = if letter.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let (king_home, rook_home) = CastlingRights::home_squares(index);
            if !self.board.at(king_home).is(Piece::King, color)
                || !self.board.at(rook_home).is(Piece::Rook, color)
            {
                return Err(PositionError::CastlingWithoutPieces(*letter));
            }
        }

        if let Some(target) = parsed.en_passant {
            let side = self.side_to_move;
            let pushed = board::step(target.offset(), -board::forward(side));
            let origin = board::step(target.offset(), board::forward(side));
            if !self.board.at(target).is_empty()
                || !self.board.get(origin).is_empty()
                || !self.board.get(pushed).is(Piece::Pawn, side.opposite())
            {
                return Err(PositionError::InvalidEnPassant(target));
            }
        }

        let waiting = self.side_to_move.opposite();
        if self.is_king_attacked(waiting) {
            return Err(PositionError::OpponentInCheck(waiting));
        }

        Ok(())
    }

    /// Returns the en passant file when a pawn of the side to move stands
    /// beside the pawn that just double-stepped.
    ///
    /// This only keeps the fingerprint independent of unusable en passant
    /// targets; whether the capture is legal is left to move generation.
    pub(crate) fn exploitable_en_passant_file(&self) -> Option<u8> {
        let target = self.en_passant_target?;
        let side = self.side_to_move;
        let beside = board::step(target, -board::forward(side));
        let capturer_present = [board::dir::EAST, board::dir::WEST]
            .iter()
            .any(|&d| self.board.get(board::step(beside, d)).is(Piece::Pawn, side));
        if capturer_present {
            Square::from_offset(target).map(Square::x)
        } else {
            None
        }
    }

    /// Recomputes the fingerprint by scanning the whole position.
    pub fn compute_hash(&self) -> HashValue {
        let mut hash = HashValue::ZERO;
        if self.side_to_move == Color::White {
            hash ^= ZOBRIST.white_to_move;
        }
        for right in 0..4 {
            if self.castling.has(right) {
                hash ^= ZOBRIST.castling_key(right);
            }
        }
        for (square, piece, color) in self.board.occupied() {
            hash ^= ZOBRIST.piece_key(piece, color, square);
        }
        if let Some(file) = self.en_passant_file {
            hash ^= ZOBRIST.en_passant_key(file);
        }
        hash
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for y in (0..8).rev() {
            let mut empty_count = 0;
            for x in 0..8 {
                let piece = Square::from_coords(x, y).and_then(|sq| self.piece_at(sq));
                if let Some((piece, color)) = piece {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if y > 0 {
                fen.push('/');
            }
        }

        let en_passant = self
            .en_passant_target()
            .map_or_else(|| "-".to_string(), Square::to_algebraic);

        format!(
            "{} {} {} {} {} {}",
            fen,
            self.side_to_move.to_fen_char(),
            self.castling.to_fen(),
            en_passant,
            self.quiet_plies,
            self.fullmove_number
        )
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board.at(sq).piece()
    }

    /// Looks up a square by algebraic name, such as "e4".
    pub fn piece_at_algebraic(&self, name: &str) -> Result<Option<(Piece, Color)>, PositionError> {
        Square::from_algebraic(name)
            .map(|sq| self.piece_at(sq))
            .ok_or_else(|| PositionError::InvalidSquareName(name.to_string()))
    }

    /// Looks up a square by zero-based file and rank coordinates.
    pub fn piece_at_coords(&self, x: u8, y: u8) -> Result<Option<(Piece, Color)>, PositionError> {
        Square::from_coords(x, y)
            .map(|sq| self.piece_at(sq))
            .ok_or(PositionError::InvalidCoordinates { x, y })
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The side that just moved.
    #[inline]
    pub fn enemy(&self) -> Color {
        self.side_to_move.opposite()
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target.and_then(Square::from_offset)
    }

    /// File of the en passant target when an enemy pawn is placed to use it.
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn quiet_plies(&self) -> u32 {
        self.quiet_plies
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    pub fn hash(&self) -> HashValue {
        self.hash
    }

    /// The fingerprint as 24 hex digits.
    pub fn hash_hex(&self) -> String {
        self.hash.to_string()
    }

    /// Canonical FEN of the position this one was loaded from.
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    /// Number of moves applied since loading.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Moves applied since loading, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mv)
    }

    /// When enabled, every applied move is followed by a full fingerprint
    /// recomputation that panics on mismatch.
    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Returns true if `square` is attacked by any piece of color `by`.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        is_attacked_by(&self.board, square.offset(), by)
    }

    /// Returns true if the king of the given color is attacked.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        is_attacked_by(&self.board, self.kings[color.index()].offset(), color.opposite())
    }

    /// Returns true if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        if let Some(known) = self.check_cache.get() {
            return known;
        }
        let in_check = self.is_king_attacked(self.side_to_move);
        self.check_cache.set(Some(in_check));
        in_check
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Positions are equal when every piece of game state matches, including the
/// undo history. The check cache and debug flag are not state.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant_target == other.en_passant_target
            && self.en_passant_file == other.en_passant_file
            && self.quiet_plies == other.quiet_plies
            && self.fullmove_number == other.fullmove_number
            && self.kings == other.kings
            && self.hash == other.hash
            && self.history == other.history
            && self.initial_fen == other.initial_fen
    }
}

impl Eq for Position {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
        assert_eq!(pos.initial_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(pos.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(pos.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(pos.piece_at_algebraic("e4"), Ok(None));
        assert_eq!(
            pos.piece_at_coords(3, 7),
            Ok(Some((Piece::Queen, Color::Black)))
        );
    }

    #[test]
    fn invalid_square_queries() {
        let pos = Position::startpos();
        assert!(matches!(
            pos.piece_at_algebraic("j9"),
            Err(PositionError::InvalidSquareName(_))
        ));
        assert_eq!(
            pos.piece_at_coords(8, 0),
            Err(PositionError::InvalidCoordinates { x: 8, y: 0 })
        );
    }

    #[test]
    fn king_squares_cached() {
        let pos = Position::from_fen("8/8/8/3k4/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black).to_algebraic(), "d5");
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        assert!(rights.take(0));
        assert!(!rights.take(0));
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));
        assert_eq!(rights.to_fen(), "Qkq");
        assert_eq!(CastlingRights::NONE.to_fen(), "-");
    }

    #[test]
    fn rook_home_rights() {
        assert_eq!(CastlingRights::for_rook_home(Square::H1.offset()), Some(0));
        assert_eq!(CastlingRights::for_rook_home(Square::A1.offset()), Some(1));
        assert_eq!(CastlingRights::for_rook_home(Square::H8.offset()), Some(2));
        assert_eq!(CastlingRights::for_rook_home(Square::A8.offset()), Some(3));
        assert_eq!(CastlingRights::for_rook_home(Square::E1.offset()), None);
    }

    #[test]
    fn hash_matches_recomputation() {
        let pos = Position::startpos();
        assert_eq!(pos.hash(), pos.compute_hash());
        assert_eq!(pos.hash_hex().len(), 24);
    }

    #[test]
    fn hash_depends_on_side_and_rights() {
        let white = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let black = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let no_rights = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert_ne!(white.hash(), black.hash());
        assert_ne!(white.hash(), no_rights.hash());
        assert_eq!(
            white.hash() ^ black.hash(),
            ZOBRIST.white_to_move,
        );
    }

    #[test]
    fn unusable_en_passant_target_does_not_change_hash() {
        // No black pawn can reach e3.
        let with_target =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        let without =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
                .unwrap();
        assert_eq!(with_target.en_passant_file(), None);
        assert_eq!(with_target.hash(), without.hash());
        assert_eq!(with_target.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn usable_en_passant_target_changes_hash() {
        let with_target =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let without =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        assert_eq!(with_target.en_passant_file(), Some(5));
        assert_ne!(with_target.hash(), without.hash());
    }

    #[test]
    fn rejects_wrong_king_count() {
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::KingCount {
                color: Color::Black,
                count: 0
            })
        ));
        assert!(matches!(
            Position::from_fen("k7/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(PositionError::KingCount {
                color: Color::White,
                count: 2
            })
        ));
    }

    #[test]
    fn rejects_pawn_on_back_rank() {
        assert!(matches!(
            Position::from_fen("k6P/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::PawnOnBackRank { .. })
        ));
        assert!(matches!(
            Position::from_fen("k7/8/8/8/8/8/8/p3K3 w - - 0 1"),
            Err(PositionError::PawnOnBackRank { .. })
        ));
    }

    #[test]
    fn rejects_impossible_inventory() {
        assert!(matches!(
            Position::from_fen("k7/8/8/8/8/8/PPPPPPPP/P3K3 w - - 0 1"),
            Err(PositionError::PawnOnBackRank { .. }) | Err(PositionError::TooManyPieces { .. })
        ));
        assert!(matches!(
            Position::from_fen("k7/8/QQQQQ3/QQQQQ3/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::TooManyPieces {
                piece: Piece::Queen,
                count: 10,
                ..
            })
        ));
        assert!(matches!(
            Position::from_fen("k7/8/NNNNNNNN/NNNNNNNN/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::TooManyPieces {
                piece: Piece::Knight,
                ..
            })
        ));
        assert!(matches!(
            Position::from_fen("k7/8/RRRRRRRR/BBBBBBBB/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::TooManyNonKingPieces { count: 16, .. })
        ));
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2r b - - 0 1").unwrap_err(),
            PositionError::OpponentInCheck(Color::White)
        );
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").is_ok());
    }

    #[test]
    fn rejects_castling_rights_without_pieces() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap_err(),
            PositionError::CastlingWithoutPieces('K')
        );
        assert_eq!(
            Position::from_fen("r3k3/8/8/8/8/8/8/4K3 w q - 0 1")
                .unwrap()
                .castling()
                .raw(),
            CastlingRights::BLACK_QUEENSIDE
        );
    }

    #[test]
    fn rejects_inconsistent_en_passant_target() {
        assert!(matches!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1"),
            Err(PositionError::InvalidEnPassant(_))
        ));
    }

    #[test]
    fn fen_errors_propagate() {
        assert!(matches!(
            Position::from_fen("not a fen"),
            Err(PositionError::Fen(FenError::InvalidPartCount(3)))
        ));
    }

    #[test]
    fn position_default() {
        let pos = Position::default();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.enemy(), Color::Black);
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn check_detection() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(pos.is_in_check());
        assert!(pos.is_in_check());
        assert!(pos.is_attacked(Square::F1, Color::Black));
        assert!(!pos.is_attacked(Square::D8, Color::White));
    }
}
