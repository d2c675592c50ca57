//! Error types for move and square notation.

/// Errors that occur when parsing algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// A square is not a file letter followed by a rank digit.
    #[error("invalid square: \"{text}\"")]
    InvalidSquare {
        /// The offending text.
        text: String,
    },
    /// A move is not exactly four characters.
    #[error("expected 4 characters in move, found {found}")]
    WrongLength {
        /// Number of characters found.
        found: usize,
    },
}
