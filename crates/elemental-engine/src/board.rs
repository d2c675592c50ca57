//! Flat signed-integer board used by the search.

use std::fmt;

use elemental_core::{BoardState, PieceKind, Side, Square};

/// Signed code for a piece: `kind.index() + 1`, negated for Black.
pub const fn piece_code(kind: PieceKind, side: Side) -> i8 {
    let code = kind.index() as i8 + 1;
    match side {
        Side::White => code,
        Side::Black => -code,
    }
}

/// Decode a non-zero piece code.
pub(crate) fn decode(code: i8) -> Option<(PieceKind, Side)> {
    let side = if code > 0 { Side::White } else { Side::Black };
    let index = code.unsigned_abs() as usize;
    if index == 0 || index > PieceKind::COUNT {
        return None;
    }
    Some((PieceKind::ALL[index - 1], side))
}

/// A snapshot of piece placement plus the side to move.
///
/// Index 0 is a8, matching [`Square`]. Zero is an empty cell.
#[derive(Clone, PartialEq, Eq)]
pub struct FlatBoard {
    cells: [i8; 64],
    side_to_move: Side,
}

impl FlatBoard {
    /// An empty board with `side_to_move` to play.
    pub fn empty(side_to_move: Side) -> FlatBoard {
        FlatBoard {
            cells: [0; 64],
            side_to_move,
        }
    }

    /// Snapshot the piece placement of `state`. Effects and tiles are dropped.
    pub fn from_state(state: &BoardState, side_to_move: Side) -> FlatBoard {
        let mut board = FlatBoard::empty(side_to_move);
        for (sq, piece) in state.occupied_squares() {
            board.cells[sq.index()] = piece_code(piece.kind(), piece.side());
        }
        board
    }

    /// Raw cell value on `sq`.
    #[inline]
    pub fn code(&self, sq: Square) -> i8 {
        self.cells[sq.index()]
    }

    /// Kind and side of the piece on `sq`.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(PieceKind, Side)> {
        decode(self.cells[sq.index()])
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Square of `side`'s king.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        let king = piece_code(PieceKind::King, side);
        Square::all().find(|sq| self.cells[sq.index()] == king)
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, code: i8) {
        self.cells[sq.index()] = code;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, side: Side) {
        self.side_to_move = side;
    }
}

impl fmt::Debug for FlatBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            let cells = &self.cells[row * 8..row * 8 + 8];
            writeln!(f, "{cells:>3?}")?;
        }
        write!(f, "side to move: {}", self.side_to_move)
    }
}
