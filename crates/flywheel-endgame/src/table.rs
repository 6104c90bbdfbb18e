//! A single endgame table and its lookup.
//!
//! A table covers one fixed set of pieces, listed in canonical config order
//! (black king, queen, rook, bishop, knight, pawn, then the white pieces in
//! the same order). Each entry is indexed by the black king's triangle
//! index followed by the other pieces' square indexes, six bits each, after
//! the board has been turned so that the index is as small as possible.

use std::fmt;

use flywheel_core::{Color, Move, Piece, Square};
use flywheel_engine::Position;
use thiserror::Error;
use tracing::trace;

use crate::symmetry::{triangle_index, Symmetry, TRIANGLE_SIZE};

/// Order in which piece kinds appear in a configuration.
const CONFIG_ORDER: [(Piece, Color); 12] = [
    (Piece::King, Color::Black),
    (Piece::Queen, Color::Black),
    (Piece::Rook, Color::Black),
    (Piece::Bishop, Color::Black),
    (Piece::Knight, Color::Black),
    (Piece::Pawn, Color::Black),
    (Piece::King, Color::White),
    (Piece::Queen, Color::White),
    (Piece::Rook, Color::White),
    (Piece::Bishop, Color::White),
    (Piece::Knight, Color::White),
    (Piece::Pawn, Color::White),
];

/// Tables hold the two kings and at most two other pieces.
const PIECE_COUNT: std::ops::RangeInclusive<usize> = 2..=4;

/// Errors from building or probing an endgame table.
#[derive(Debug, Error)]
pub enum EndgameError {
    #[error("invalid piece letter {0:?} in table piece list")]
    InvalidPieceLetter(char),

    #[error("table piece list must hold 2 to 4 pieces, got {0}")]
    PieceCount(usize),

    #[error("table piece list must start with the black king")]
    MissingBlackKing,

    #[error("table piece list {0:?} is not in canonical order")]
    PieceOrder(String),

    #[error("table for {pieces} needs {expected} entries, got {actual}")]
    DataLength {
        pieces: String,
        expected: usize,
        actual: usize,
    },

    #[error("malformed table entry {entry:?} at index {index}")]
    MalformedEntry { index: usize, entry: String },

    #[error("failed to read endgame data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse endgame data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse endgame config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One occupied square of a position, in config order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry {
    pub piece: Piece,
    pub color: Color,
    pub square: Square,
}

/// Lists the pieces of a position in canonical config order.
///
/// Within one piece kind, squares are listed rank by rank from the first
/// rank, a-file first.
pub fn config(position: &Position) -> Vec<ConfigEntry> {
    let mut entries = Vec::new();
    for (piece, color) in CONFIG_ORDER {
        for square in Square::all() {
            if position.piece_at(square) == Some((piece, color)) {
                entries.push(ConfigEntry {
                    piece,
                    color,
                    square,
                });
            }
        }
    }
    entries
}

/// Best move and distance to mate found in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndgameLookup {
    /// The recommended move, tagged for the probed position.
    pub mv: Move,
    /// Moves to mate including this one, when the entry records it.
    pub mate_in: Option<u32>,
}

impl fmt::Display for EndgameLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mate_in {
            Some(n) => write!(f, "{} (mate in {n})", self.mv),
            None => write!(f, "{}", self.mv),
        }
    }
}

/// The table index reached through one symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalIndex {
    pub index: usize,
    pub symmetry: Symmetry,
}

/// A flat results table for one piece configuration.
#[derive(Debug, Clone)]
pub struct EndgameTable {
    pieces: Vec<(Piece, Color)>,
    data: Vec<Option<String>>,
}

impl EndgameTable {
    /// Creates a table from its piece list and flat entries.
    ///
    /// `pieces` are FEN letters in canonical config order, such as `"kKQ"`.
    /// `data` must hold `10 * 64^(n-1)` entries for `n` pieces.
    pub fn new(pieces: &str, data: Vec<Option<String>>) -> Result<Self, EndgameError> {
        let pieces = pieces
            .chars()
            .map(|c| Piece::from_fen_char(c).ok_or(EndgameError::InvalidPieceLetter(c)))
            .collect::<Result<Vec<_>, _>>()?;

        if !PIECE_COUNT.contains(&pieces.len()) {
            return Err(EndgameError::PieceCount(pieces.len()));
        }
        if pieces[0] != (Piece::King, Color::Black) {
            return Err(EndgameError::MissingBlackKing);
        }
        let rank = |entry: &(Piece, Color)| CONFIG_ORDER.iter().position(|o| o == entry);
        if pieces.windows(2).any(|w| rank(&w[0]) > rank(&w[1])) {
            return Err(EndgameError::PieceOrder(letters(&pieces)));
        }

        let expected = TRIANGLE_SIZE * 64usize.pow(pieces.len() as u32 - 1);
        if data.len() != expected {
            return Err(EndgameError::DataLength {
                pieces: letters(&pieces),
                expected,
                actual: data.len(),
            });
        }

        Ok(EndgameTable { pieces, data })
    }

    /// The piece list as FEN letters.
    pub fn pieces(&self) -> String {
        letters(&self.pieces)
    }

    /// Returns true if the position holds exactly this table's pieces.
    pub fn matches(&self, config: &[ConfigEntry]) -> bool {
        config.len() == self.pieces.len()
            && config
                .iter()
                .zip(&self.pieces)
                .all(|(entry, &(piece, color))| entry.piece == piece && entry.color == color)
    }

    /// Looks up the best move for the position.
    ///
    /// Returns `Ok(None)` when the pieces do not match this table or the
    /// entry is empty.
    pub fn probe(&self, position: &Position) -> Result<Option<EndgameLookup>, EndgameError> {
        let config = config(position);
        if !self.matches(&config) {
            return Ok(None);
        }
        let Some(best) = canonical_index(&config) else {
            return Ok(None);
        };
        let Some(entry) = self.data.get(best.index).and_then(Option::as_deref) else {
            trace!(index = best.index, "empty endgame entry");
            return Ok(None);
        };

        let malformed = || EndgameError::MalformedEntry {
            index: best.index,
            entry: entry.to_string(),
        };
        let (from, to, mate_in) = decode_entry(entry).ok_or_else(malformed)?;

        let undo = best.symmetry.inverse();
        let mv = Move::new(undo.apply(from), undo.apply(to)).with_tag(position.hash().a);
        trace!(index = best.index, symmetry = ?best.symmetry, %mv, "endgame hit");
        Ok(Some(EndgameLookup { mv, mate_in }))
    }
}

/// Finds the smallest table index over all symmetries that put the black
/// king in the triangle. Ties go to the earlier symmetry.
pub fn canonical_index(config: &[ConfigEntry]) -> Option<CanonicalIndex> {
    let (king, others) = config.split_first()?;
    let mut best: Option<CanonicalIndex> = None;
    for symmetry in Symmetry::ALL {
        let Some(first) = triangle_index(symmetry.apply(king.square)) else {
            continue;
        };
        let index = others.iter().fold(first as usize, |index, entry| {
            index * 64 + symmetry.apply(entry.square).index() as usize
        });
        if best.map_or(true, |b| index < b.index) {
            best = Some(CanonicalIndex { index, symmetry });
        }
    }
    best
}

/// Splits an entry into source, destination and the optional mate count.
fn decode_entry(entry: &str) -> Option<(Square, Square, Option<u32>)> {
    let from = Square::from_algebraic(entry.get(0..2)?)?;
    let to = Square::from_algebraic(entry.get(2..4)?)?;
    let mate_in = match entry.get(4..)? {
        "" => None,
        digits => Some(digits.parse().ok()?),
    };
    Some((from, to, mate_in))
}

fn letters(pieces: &[(Piece, Color)]) -> String {
    pieces
        .iter()
        .map(|&(piece, color)| piece.to_fen_char(color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn empty_data(n: usize) -> Vec<Option<String>> {
        vec![None; TRIANGLE_SIZE * 64usize.pow(n as u32 - 1)]
    }

    #[test]
    fn config_order_is_black_first() {
        let pos = Position::from_fen("8/8/8/8/8/2k5/8/KQ2R3 w - - 0 1").unwrap();
        let pieces: Vec<_> = config(&pos).iter().map(|e| (e.piece, e.color, e.square)).collect();
        assert_eq!(
            pieces,
            [
                (Piece::King, Color::Black, sq("c3")),
                (Piece::King, Color::White, sq("a1")),
                (Piece::Queen, Color::White, sq("b1")),
                (Piece::Rook, Color::White, sq("e1")),
            ]
        );
    }

    #[test]
    fn same_kind_listed_rank_by_rank() {
        let pos = Position::from_fen("7k/8/8/8/8/8/R7/1R2K3 w - - 0 1").unwrap();
        let rooks: Vec<_> = config(&pos)
            .iter()
            .filter(|e| e.piece == Piece::Rook)
            .map(|e| e.square)
            .collect();
        assert_eq!(rooks, [sq("b1"), sq("a2")]);
    }

    #[test]
    fn construction_checks() {
        assert!(EndgameTable::new("kKQ", empty_data(3)).is_ok());
        assert!(matches!(
            EndgameTable::new("kKX", empty_data(3)),
            Err(EndgameError::InvalidPieceLetter('X'))
        ));
        assert!(matches!(
            EndgameTable::new("k", vec![None; 10]),
            Err(EndgameError::PieceCount(1))
        ));
        assert!(matches!(
            EndgameTable::new("Kkq", empty_data(3)),
            Err(EndgameError::MissingBlackKing)
        ));
        assert!(matches!(
            EndgameTable::new("kQK", empty_data(3)),
            Err(EndgameError::PieceOrder(_))
        ));
        assert!(matches!(
            EndgameTable::new("kKQ", empty_data(2)),
            Err(EndgameError::DataLength { expected: 40960, actual: 640, .. })
        ));
    }

    #[test]
    fn canonical_index_prefers_smallest() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/k1K5 w - - 0 1").unwrap();
        // Black king a1, white king c1. Identity gives 0*64+2, the a1-h8
        // reflection keeps a1 and moves c1 to a3 (16).
        let best = canonical_index(&config(&pos)).unwrap();
        assert_eq!(best.index, 2);
        assert_eq!(best.symmetry, Symmetry::Identity);

        let pos = Position::from_fen("8/8/8/8/8/8/8/2K4k w - - 0 1").unwrap();
        // Black king h1 reaches the triangle only through FlipX or RotateLeft.
        let best = canonical_index(&config(&pos)).unwrap();
        assert_eq!(best.index, 5);
        assert_eq!(best.symmetry, Symmetry::FlipX);
    }

    #[test]
    fn probe_unrotates_the_stored_move() {
        let mut data = empty_data(3);
        // Black king a1, white king c2, white queen b4 in canonical form.
        let index = sq("c2").index() as usize * 64 + sq("b4").index() as usize;
        data[index] = Some("b4b2".to_string());
        let table = EndgameTable::new("kKQ", data).unwrap();

        let pos = Position::from_fen("8/8/8/8/1Q6/8/2K5/k7 w - - 0 1").unwrap();
        let hit = table.probe(&pos).unwrap().unwrap();
        assert_eq!(hit.mv.to_algebraic(), "b4b2");
        assert_eq!(hit.mate_in, None);
        assert_eq!(hit.mv.tag(), pos.hash().a);

        // The same position flipped left to right.
        let flipped = Position::from_fen("8/8/8/8/6Q1/8/5K2/7k w - - 0 1").unwrap();
        let hit = table.probe(&flipped).unwrap().unwrap();
        assert_eq!(hit.mv.to_algebraic(), "g4g2");
    }

    #[test]
    fn probe_reads_mate_count() {
        let mut data = empty_data(3);
        let index = sq("c3").index() as usize * 64 + sq("h2").index() as usize;
        data[index] = Some("h2b21".to_string());
        let table = EndgameTable::new("kKQ", data).unwrap();
        let pos = Position::from_fen("8/8/8/8/8/2K5/7Q/k7 w - - 0 1").unwrap();
        let hit = table.probe(&pos).unwrap().unwrap();
        assert_eq!(hit.mv.to_algebraic(), "h2b2");
        assert_eq!(hit.mate_in, Some(1));
        assert_eq!(hit.to_string(), "h2b2 (mate in 1)");
    }

    #[test]
    fn probe_misses() {
        let table = EndgameTable::new("kKQ", empty_data(3)).unwrap();
        // Right pieces, empty entry.
        let pos = Position::from_fen("8/8/8/8/8/2K5/7Q/k7 w - - 0 1").unwrap();
        assert_eq!(table.probe(&pos).unwrap(), None);
        // Wrong pieces.
        let pos = Position::from_fen("8/8/8/8/8/2K5/7R/k7 w - - 0 1").unwrap();
        assert_eq!(table.probe(&pos).unwrap(), None);
        assert_eq!(table.probe(&Position::startpos()).unwrap(), None);
    }

    #[test]
    fn malformed_entry_is_error() {
        let mut data = empty_data(3);
        let index = sq("c3").index() as usize * 64 + sq("h2").index() as usize;
        data[index] = Some("h2b2x".to_string());
        let table = EndgameTable::new("kKQ", data).unwrap();
        let pos = Position::from_fen("8/8/8/8/8/2K5/7Q/k7 w - - 0 1").unwrap();
        assert!(matches!(
            table.probe(&pos),
            Err(EndgameError::MalformedEntry { .. })
        ));
    }

    #[test]
    fn decode_entries() {
        assert_eq!(decode_entry("a1b2"), Some((sq("a1"), sq("b2"), None)));
        assert_eq!(decode_entry("a1b212"), Some((sq("a1"), sq("b2"), Some(12))));
        assert_eq!(decode_entry("a1b"), None);
        assert_eq!(decode_entry("a1z2"), None);
        assert_eq!(decode_entry("a1b2-3"), None);
    }
}
