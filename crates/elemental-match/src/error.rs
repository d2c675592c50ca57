//! Match errors.

use std::time::Duration;

use elemental_core::{DescriptorError, Side, Square};

/// Why a submitted move (or a direct trigger) was refused.
///
/// A rejection never changes match state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Another move has not finished resolving.
    #[error("a move is already in progress")]
    MoveInProgress,

    /// There is no started move to complete.
    #[error("no move is in progress")]
    NothingInProgress,

    /// The match has ended.
    #[error("the game is over")]
    GameOver,

    /// The mover is not the side to move.
    #[error("it is {expected}'s turn, not {found}'s")]
    WrongSide {
        /// The side to move.
        expected: Side,
        /// The side that tried to move.
        found: Side,
    },

    /// The origin square holds no piece of the mover.
    #[error("no {side} piece on {square}")]
    NoPiece {
        /// The mover.
        side: Side,
        /// The empty or foreign origin.
        square: Square,
    },

    /// The destination is not in the piece's legal-move set.
    #[error("{from}{to} is not a legal move")]
    IllegalMove {
        /// Origin square.
        from: Square,
        /// Requested destination.
        to: Square,
    },
}

/// Failure of an external mix/reaction source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    /// No answer arrived within the configured bound.
    #[error("no answer within {waited:?}")]
    TimedOut {
        /// How long the caller waited.
        waited: Duration,
    },

    /// The generator refused or cannot be reached.
    #[error("generator unavailable: {reason}")]
    Unavailable {
        /// Human-readable cause.
        reason: String,
    },

    /// The worker or channel went away before answering.
    #[error("generator disconnected")]
    Disconnected,

    /// The generator answered with something that does not decode.
    #[error("malformed generator output: {reason}")]
    Malformed {
        /// The decoding error.
        reason: String,
    },
}

impl From<DescriptorError> for GeneratorError {
    fn from(err: DescriptorError) -> Self {
        GeneratorError::Malformed {
            reason: err.to_string(),
        }
    }
}
