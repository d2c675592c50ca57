//! Rules core of elemental chess: board state, status effects, legality,
//! end-of-turn ticking, and capture reactions.

mod board;
mod direction;
mod dump;
mod effect;
mod error;
mod layout;
mod outcome;
mod piece;
mod piece_kind;
mod placement;
mod side;
mod square;
mod square_set;
mod status;
mod ticking;

pub mod movegen;
pub mod reaction;

pub use board::{BoardState, Streak, Tile};
pub use dump::BoardDump;
pub use effect::{CleanseMode, PieceEffect, PieceEffectKind, TileEffect, TileEffectKind};
pub use error::{BoardError, DescriptorError, PlacementError};
pub use layout::{BoardLayout, ElementOverride, default_element};
pub use movegen::{MovePair, all_legal_moves, is_in_check, legal_moves, possible_moves};
pub use outcome::{GameOutcome, game_status};
pub use piece::{Element, Piece, PieceId};
pub use piece_kind::PieceKind;
pub use placement::{STARTING_PLACEMENT, parse_position};
pub use side::Side;
pub use square::Square;
pub use square_set::SquareSet;
pub use status::EffectOutcome;
pub use ticking::{BURN_TURNS, GROWTH_TURNS, TickReport, tick_side};
