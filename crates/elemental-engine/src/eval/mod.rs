//! Static evaluation: material plus piece-square tables.

pub mod material;
pub mod pst;

use elemental_core::{Side, Square};

use crate::board::FlatBoard;

/// Evaluate `board` from the side to move's perspective, in centipawns.
pub fn evaluate(board: &FlatBoard) -> i32 {
    let mut white = 0;
    for sq in Square::all() {
        let Some((kind, side)) = board.piece_at(sq) else {
            continue;
        };
        let value = material::MATERIAL_VALUE[kind.index()] + pst::pst_value(kind, side, sq);
        match side {
            Side::White => white += value,
            Side::Black => white -= value,
        }
    }
    match board.side_to_move() {
        Side::White => white,
        Side::Black => -white,
    }
}
