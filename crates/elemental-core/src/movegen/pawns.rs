//! Pawn move generation.

use crate::board::BoardState;
use crate::side::Side;
use crate::square::Square;
use crate::square_set::SquareSet;

use super::blocking::Blocking;

/// The two squares a pawn of `side` on `from` attacks.
pub(super) fn pawn_attacks(from: Square, side: Side) -> SquareSet {
    [-1, 1]
        .iter()
        .filter_map(|&d_col| from.offset(side.forward(), d_col))
        .collect()
}

/// Pseudo-legal pawn destinations: pushes onto empty squares and diagonal
/// captures of enemy pieces.
///
/// With `B::WALLS` set, a wall on the first square stops the double push.
pub(super) fn pawn_targets<B: Blocking>(board: &BoardState, from: Square, side: Side) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    let forward = side.forward();

    if let Some(one) = from.offset(forward, 0)
        && !board.is_occupied(one)
    {
        targets.insert(one);
        let blocked = B::WALLS && board.is_wall(one);
        if from.row() == side.pawn_row()
            && !blocked
            && let Some(two) = one.offset(forward, 0)
            && !board.is_occupied(two)
        {
            targets.insert(two);
        }
    }

    for to in pawn_attacks(from, side) {
        if board.side_at(to) == Some(!side) {
            targets.insert(to);
        }
    }
    targets
}
