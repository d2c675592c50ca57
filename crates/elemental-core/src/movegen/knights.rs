//! Knight move generation.

use crate::board::BoardState;
use crate::direction::KNIGHT_JUMPS;
use crate::side::Side;
use crate::square::Square;
use crate::square_set::SquareSet;

/// Pseudo-legal knight destinations. Walls never block a jump.
pub(super) fn knight_targets(board: &BoardState, from: Square, side: Side) -> SquareSet {
    KNIGHT_JUMPS
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| board.side_at(to) != Some(side))
        .collect()
}
