//! Ray generation for bishops, rooks, and queens.

use crate::board::BoardState;
use crate::direction::{DIAGONAL, ORTHOGONAL};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;
use crate::square_set::SquareSet;

use super::blocking::Blocking;

/// Cells reachable along one ray from `from`.
///
/// The ray ends on the first piece (included when it is an enemy) and, when
/// `B::WALLS` is set, on the first wall (included).
pub(super) fn ray<B: Blocking>(
    board: &BoardState,
    from: Square,
    side: Side,
    (d_row, d_col): (i8, i8),
) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    let mut current = from;
    while let Some(next) = current.offset(d_row, d_col) {
        if let Some(other) = board.side_at(next) {
            if other != side {
                targets.insert(next);
            }
            break;
        }
        targets.insert(next);
        if B::WALLS && board.is_wall(next) {
            break;
        }
        current = next;
    }
    targets
}

/// Pseudo-legal destinations of a sliding piece of `kind` on `from`.
pub(super) fn slider_targets<B: Blocking>(
    board: &BoardState,
    from: Square,
    side: Side,
    kind: PieceKind,
) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    if matches!(kind, PieceKind::Rook | PieceKind::Queen) {
        for dir in ORTHOGONAL {
            targets |= ray::<B>(board, from, side, dir);
        }
    }
    if matches!(kind, PieceKind::Bishop | PieceKind::Queen) {
        for dir in DIAGONAL {
            targets |= ray::<B>(board, from, side, dir);
        }
    }
    targets
}
