//! Endgame table lookup with symmetry reduction.
//!
//! A table stores the best move for every placement of a small fixed set of
//! pieces. Placements that differ only by a reflection or rotation of the
//! board share one entry: the position is turned so that the black king
//! lands in the a1-d1-d4 triangle and the table index is smallest, and the
//! stored move is turned back before it is returned.
//!
//! # Example
//!
//! ```
//! use flywheel_endgame::EndgameTable;
//! use flywheel_engine::Position;
//!
//! let mut data = vec![None; 10 * 64 * 64];
//! // Black king a1, white king c3, white queen h2.
//! data[18 * 64 + 15] = Some("h2b21".to_string());
//! let table = EndgameTable::new("kKQ", data).unwrap();
//!
//! let position = Position::from_fen("8/8/8/8/8/2K5/7Q/k7 w - - 0 1").unwrap();
//! let hit = table.probe(&position).unwrap().unwrap();
//! assert_eq!(hit.mv.to_algebraic(), "h2b2");
//! assert_eq!(hit.mate_in, Some(1));
//! ```

mod registry;
mod symmetry;
mod table;

pub use registry::{load_table, EndgameRegistry, RegistryConfig, TableConfig};
pub use symmetry::{triangle_index, Symmetry, TRIANGLE_SIZE};
pub use table::{
    canonical_index, config, CanonicalIndex, ConfigEntry, EndgameError, EndgameLookup,
    EndgameTable,
};
