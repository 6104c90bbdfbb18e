//! Position fingerprint salts.
//!
//! The fingerprint is 96 bits wide, kept as three 32-bit words. It is the XOR
//! of one salt for every piece on every square, one per castling right still
//! held, one for the en passant file when a capture is actually possible,
//! and one when White is to move.

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

use flywheel_core::{Color, Piece, Square};

/// A 96-bit position fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashValue {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl HashValue {
    pub const ZERO: HashValue = HashValue { a: 0, b: 0, c: 0 };
}

impl BitXor for HashValue {
    type Output = HashValue;

    #[inline]
    fn bitxor(self, rhs: HashValue) -> HashValue {
        HashValue {
            a: self.a ^ rhs.a,
            b: self.b ^ rhs.b,
            c: self.c ^ rhs.c,
        }
    }
}

impl BitXorAssign for HashValue {
    #[inline]
    fn bitxor_assign(&mut self, rhs: HashValue) {
        *self = *self ^ rhs;
    }
}

/// Formats as 24 lowercase hex digits, words a, b, c.
impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}{:08x}{:08x}", self.a, self.b, self.c)
    }
}

/// Salt tables.
pub struct ZobristKeys {
    /// Keys for pieces: [piece][color][square]
    pub pieces: [[[HashValue; 64]; 2]; 6],
    pub white_to_move: HashValue,
    /// White kingside, White queenside, Black kingside, Black queenside.
    pub castling: [HashValue; 4],
    pub en_passant: [HashValue; 8],
}

impl ZobristKeys {
    /// Fills the tables from a fixed-seed xorshift64 stream.
    pub const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        const fn next_salt(state: u64) -> (u64, HashValue) {
            let a = next_random(state);
            let b = next_random(a);
            let c = next_random(b);
            let salt = HashValue {
                a: (a >> 32) as u32,
                b: (b >> 32) as u32,
                c: (c >> 32) as u32,
            };
            (c, salt)
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[HashValue::ZERO; 64]; 2]; 6];
        let mut castling = [HashValue::ZERO; 4];
        let mut en_passant = [HashValue::ZERO; 8];

        let mut piece = 0;
        while piece < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    let (next, salt) = next_salt(state);
                    state = next;
                    pieces[piece][color][square] = salt;
                    square += 1;
                }
                color += 1;
            }
            piece += 1;
        }

        let (next, white_to_move) = next_salt(state);
        state = next;

        let mut i = 0;
        while i < 4 {
            let (next, salt) = next_salt(state);
            state = next;
            castling[i] = salt;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            let (next, salt) = next_salt(state);
            state = next;
            en_passant[i] = salt;
            i += 1;
        }

        ZobristKeys {
            pieces,
            white_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub const fn piece_key(&self, piece: Piece, color: Color, square: Square) -> HashValue {
        self.pieces[piece.index()][color.index()][square.index() as usize]
    }

    /// Returns the key for a castling right (0-3).
    #[inline]
    pub const fn castling_key(&self, right: usize) -> HashValue {
        self.castling[right]
    }

    /// Returns the key for an en passant file (0-7).
    #[inline]
    pub const fn en_passant_key(&self, file: u8) -> HashValue {
        self.en_passant[file as usize]
    }
}

/// Process-wide salts, built at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
