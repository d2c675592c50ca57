//! Move-ranking search for elemental chess.
//!
//! Works on its own flat board snapshot and knows nothing about effects or
//! tile hazards; it only answers "which ordinary chess moves look strongest".

mod board;
mod error;
mod movegen;
mod notation;

pub mod eval;
pub mod search;

pub use board::{FlatBoard, piece_code};
pub use error::NotationError;
pub use eval::evaluate;
pub use movegen::{EngineMove, Undo, generate_legal_moves};
pub use notation::{format_move, parse_move, parse_square};
pub use search::control::SearchControl;
pub use search::{RankedMove, SearchLimits, rank_moves};
