//! King move generation, including castling.

use crate::board::BoardState;
use crate::direction::ALL_EIGHT;
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;
use crate::square_set::SquareSet;

use super::attacks::is_square_attacked;

/// Pseudo-legal one-step king destinations.
pub(super) fn king_steps(board: &BoardState, from: Square, side: Side) -> SquareSet {
    ALL_EIGHT
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| board.side_at(to) != Some(side))
        .collect()
}

/// Castling destinations for the king on `from`.
///
/// Requires an unmoved king that is not in check, an unmoved rook of the
/// same side on the same row, and every square strictly between them empty,
/// wall-free, and not attacked. The king lands two columns toward the rook.
pub(super) fn castling_targets(board: &BoardState, from: Square, side: Side) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    let Some(king) = board.piece_at(from) else {
        return targets;
    };
    if king.kind() != PieceKind::King || king.has_moved() || from.row() != side.back_row() {
        return targets;
    }
    if !king.is_shielded() && is_square_attacked(board, from, !side) {
        return targets;
    }

    for rook_col in [0i8, 7] {
        let Some(rook_sq) = Square::from_coords(from.row() as i8, rook_col) else {
            continue;
        };
        let rook_ok = board
            .piece_at(rook_sq)
            .is_some_and(|p| p.kind() == PieceKind::Rook && p.side() == side && !p.has_moved());
        if !rook_ok {
            continue;
        }

        let step = if rook_col > from.col() as i8 { 1 } else { -1 };
        let mut path_clear = true;
        let mut current = from;
        while let Some(next) = current.offset(0, step) {
            if next == rook_sq {
                break;
            }
            if board.is_occupied(next)
                || board.is_wall(next)
                || is_square_attacked(board, next, !side)
            {
                path_clear = false;
                break;
            }
            current = next;
        }

        if path_clear && let Some(to) = from.offset(0, 2 * step) {
            targets.insert(to);
        }
    }
    targets
}

/// The rook relocation implied by a king moving from `from` to `to`, if the
/// move is a castle.
pub fn castling_rook(board: &BoardState, from: Square, to: Square) -> Option<(Square, Square)> {
    let king = board.piece_at(from)?;
    let (d_row, d_col) = from.delta_to(to);
    if king.kind() != PieceKind::King || d_row != 0 || d_col.abs() != 2 {
        return None;
    }
    let rook_col = if d_col > 0 { 7 } else { 0 };
    let rook_from = Square::from_coords(from.row() as i8, rook_col)?;
    let rook_to = from.offset(0, d_col.signum())?;
    Some((rook_from, rook_to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_castles_available() {
        let board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
        let targets = castling_targets(&board, Square::E1, Side::White);
        assert!(targets.contains(Square::G1));
        assert!(targets.contains(Square::C1));
    }

    #[test]
    fn moved_rook_blocks_its_side() {
        let mut board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
        board.set_moved(Square::H1, true);
        let targets = castling_targets(&board, Square::E1, Side::White);
        assert!(!targets.contains(Square::G1));
        assert!(targets.contains(Square::C1));
    }

    #[test]
    fn rook_relocation() {
        let board: BoardState = "4k3/8/8/8/8/8/8/R3K2R".parse().unwrap();
        assert_eq!(castling_rook(&board, Square::E1, Square::G1), Some((Square::H1, Square::F1)));
        assert_eq!(castling_rook(&board, Square::E1, Square::C1), Some((Square::A1, Square::D1)));
        assert_eq!(castling_rook(&board, Square::E1, Square::F1), None);
    }
}
