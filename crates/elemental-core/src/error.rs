//! Error types for board construction, validation, and descriptor decoding.

use crate::effect::TileEffectKind;
use crate::side::Side;
use crate::square::Square;

/// Errors that occur when parsing a piece-placement string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The placement does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {row} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based row (0 = rank 8).
        row: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The side-to-move field is not "w" or "b".
    #[error("invalid side to move: \"{found}\"")]
    InvalidSide {
        /// The invalid field.
        found: String,
    },
}

/// Structural invariant violations detected by
/// [`BoardState::validate`](crate::board::BoardState::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side has no king on the board.
    #[error("{side} has no king")]
    MissingKing {
        /// The side without a king.
        side: Side,
    },
    /// A side has more than one king.
    #[error("expected 1 king for {side}, found {count}")]
    TooManyKings {
        /// The side with extra kings.
        side: Side,
        /// Number of kings found.
        count: usize,
    },
    /// A tile holds two effects of the same kind.
    #[error("tile {square} holds more than one {kind:?} effect")]
    DuplicateTileEffect {
        /// The offending tile.
        square: Square,
        /// The duplicated kind.
        kind: TileEffectKind,
    },
    /// An effect with zero duration survived a tick.
    #[error("stale zero-duration effect on {square}")]
    StaleEffect {
        /// The square holding the effect.
        square: Square,
    },
    /// A spawn targeted a square that already holds a piece.
    #[error("square {square} is already occupied")]
    SquareOccupied {
        /// The occupied square.
        square: Square,
    },
}

/// Errors decoding externally supplied JSON documents.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed document: {source}")]
    Json {
        /// The underlying parse error.
        #[from]
        source: serde_json::Error,
    },
}
