//! Piece-placement strings for [`BoardState`], in the first-field format of FEN.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::board::BoardState;
use crate::error::PlacementError;
use crate::layout::BoardLayout;
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

/// Placement of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

impl BoardState {
    /// Parse a placement string (rank 8 first) into a board, taking elements
    /// from `layout`.
    ///
    /// Kings and rooks off their home squares, and pawns off their starting
    /// row, are marked as moved.
    pub fn from_placement(
        placement: &str,
        layout: &BoardLayout,
    ) -> Result<BoardState, PlacementError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::WrongRankCount { found: ranks.len() });
        }

        let mut board = BoardState::empty();
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col: usize = 0;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(PlacementError::InvalidPieceChar { character: c });
                    }
                    col += digit as usize;
                    continue;
                }

                let kind = PieceKind::from_letter(c)
                    .ok_or(PlacementError::InvalidPieceChar { character: c })?;
                let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
                let sq = Square::from_coords(row as i8, col as i8)
                    .ok_or(PlacementError::BadRankLength {
                        row,
                        length: col + 1,
                    })?;
                let element = layout.element_for(side, kind, sq);
                // Squares are visited once each, so the spawn cannot collide.
                let _ = board.spawn(sq, kind, side, element);
                if !on_home_square(kind, side, sq) {
                    board.set_moved(sq, true);
                }
                col += 1;
            }

            if col != 8 {
                return Err(PlacementError::BadRankLength { row, length: col });
            }
        }

        Ok(board)
    }

    /// Serialize piece positions as a placement string.
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8i8 {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0u8;
            for col in 0..8i8 {
                match Square::from_coords(row, col).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(out, "{empty}");
                            empty = 0;
                        }
                        out.push(piece.letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(out, "{empty}");
            }
        }
        out
    }
}

impl FromStr for BoardState {
    type Err = PlacementError;

    fn from_str(placement: &str) -> Result<BoardState, PlacementError> {
        BoardState::from_placement(placement, &BoardLayout::default())
    }
}

/// Parse `"<placement> <w|b>"`, defaulting the side to move to White when
/// the second field is absent.
pub fn parse_position(
    text: &str,
    layout: &BoardLayout,
) -> Result<(BoardState, Side), PlacementError> {
    let mut fields = text.split_whitespace();
    let board = BoardState::from_placement(fields.next().unwrap_or_default(), layout)?;
    let side = match fields.next() {
        None | Some("w") => Side::White,
        Some("b") => Side::Black,
        Some(other) => {
            return Err(PlacementError::InvalidSide {
                found: other.to_string(),
            });
        }
    };
    Ok((board, side))
}

fn on_home_square(kind: PieceKind, side: Side, sq: Square) -> bool {
    match kind {
        PieceKind::Pawn => sq.row() == side.pawn_row(),
        PieceKind::King => sq.row() == side.back_row() && sq.col() == 4,
        PieceKind::Rook => sq.row() == side.back_row() && (sq.col() == 0 || sq.col() == 7),
        _ => true,
    }
}
