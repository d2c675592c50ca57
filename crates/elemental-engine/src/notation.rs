//! Coordinate move notation (`e7e5`).

use elemental_core::Square;

use crate::error::NotationError;

/// Parse a square such as `"e2"`.
pub fn parse_square(text: &str) -> Result<Square, NotationError> {
    Square::from_algebraic(text).ok_or_else(|| NotationError::InvalidSquare {
        text: text.to_string(),
    })
}

/// Parse a move such as `"e7e5"` into its origin and destination.
pub fn parse_move(text: &str) -> Result<(Square, Square), NotationError> {
    let text = text.trim();
    if text.len() != 4 || !text.is_ascii() {
        return Err(NotationError::WrongLength {
            found: text.chars().count(),
        });
    }
    let from = parse_square(&text[..2])?;
    let to = parse_square(&text[2..])?;
    Ok((from, to))
}

/// Format a move as `<file><rank><file><rank>`.
pub fn format_move(from: Square, to: Square) -> String {
    format!("{from}{to}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(parse_move("e7e5"), Ok((Square::E7, Square::E5)));
        assert_eq!(parse_move(" a1h8 "), Ok((Square::A1, Square::H8)));
    }

    #[test]
    fn rejects_malformed_moves() {
        assert_eq!(parse_move("e7e"), Err(NotationError::WrongLength { found: 3 }));
        assert!(matches!(parse_move("e9e5"), Err(NotationError::InvalidSquare { .. })));
        assert!(matches!(parse_square("z1"), Err(NotationError::InvalidSquare { .. })));
    }

    #[test]
    fn formats_moves() {
        assert_eq!(format_move(Square::G1, Square::F3), "g1f3");
    }
}
