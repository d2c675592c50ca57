//! Attack detection on an effect-aware board.

use crate::board::BoardState;
use crate::direction::{ALL_EIGHT, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

/// Return `true` if any piece of `by` attacks `sq`.
///
/// Rays stop at the first piece and at the first wall, exactly as sliding
/// movement does.
pub fn is_square_attacked(board: &BoardState, sq: Square, by: Side) -> bool {
    let holds = |target: Square, kinds: &[PieceKind]| {
        board
            .piece_at(target)
            .is_some_and(|p| p.side() == by && kinds.contains(&p.kind()))
    };

    // Knights
    if KNIGHT_JUMPS
        .iter()
        .filter_map(|&(r, c)| sq.offset(r, c))
        .any(|from| holds(from, &[PieceKind::Knight]))
    {
        return true;
    }

    // Kings
    if ALL_EIGHT
        .iter()
        .filter_map(|&(r, c)| sq.offset(r, c))
        .any(|from| holds(from, &[PieceKind::King]))
    {
        return true;
    }

    // Pawns of `by` attack toward `by.forward()`, so look back against it.
    if [-1, 1]
        .iter()
        .filter_map(|&c| sq.offset(-by.forward(), c))
        .any(|from| holds(from, &[PieceKind::Pawn]))
    {
        return true;
    }

    let rook_like = [PieceKind::Rook, PieceKind::Queen];
    let bishop_like = [PieceKind::Bishop, PieceKind::Queen];
    ORTHOGONAL
        .iter()
        .any(|&dir| first_hit(board, sq, dir).is_some_and(|from| holds(from, &rook_like)))
        || DIAGONAL
            .iter()
            .any(|&dir| first_hit(board, sq, dir).is_some_and(|from| holds(from, &bishop_like)))
}

/// First occupied square along a ray from `sq`, or `None` when the ray
/// leaves the board or a wall intervenes first.
///
/// A piece standing on a wall is still hit, since movement may end on a wall.
fn first_hit(board: &BoardState, sq: Square, (d_row, d_col): (i8, i8)) -> Option<Square> {
    let mut current = sq;
    while let Some(next) = current.offset(d_row, d_col) {
        if board.is_occupied(next) {
            return Some(next);
        }
        if board.is_wall(next) {
            return None;
        }
        current = next;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{TileEffect, TileEffectKind};

    #[test]
    fn pawn_attack_direction() {
        let board: BoardState = "4k3/8/8/8/8/8/4P3/4K3".parse().unwrap();
        assert!(is_square_attacked(&board, Square::D3, Side::White));
        assert!(is_square_attacked(&board, Square::F3, Side::White));
        assert!(!is_square_attacked(&board, Square::E3, Side::White));
        assert!(!is_square_attacked(&board, Square::E3, Side::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let board: BoardState = "4k3/8/8/8/8/8/8/N3K3".parse().unwrap();
        assert!(is_square_attacked(&board, Square::B3, Side::White));
        assert!(is_square_attacked(&board, Square::D2, Side::White));
        assert!(is_square_attacked(&board, Square::D7, Side::Black));
        assert!(!is_square_attacked(&board, Square::E6, Side::Black));
    }

    #[test]
    fn wall_stops_slider_attack() {
        let mut board: BoardState = "4k3/8/8/8/8/8/8/R3K3".parse().unwrap();
        assert!(is_square_attacked(&board, Square::A8, Side::White));
        let tile = TileEffect::new(TileEffectKind::Occupied, -1, Side::Black);
        board.add_tile_effect(Square::A5, tile);
        assert!(is_square_attacked(&board, Square::A5, Side::White));
        assert!(!is_square_attacked(&board, Square::A8, Side::White));
    }

    #[test]
    fn pieces_block_rays() {
        let board: BoardState = "4k3/8/8/8/8/8/P7/R3K3".parse().unwrap();
        assert!(!is_square_attacked(&board, Square::A8, Side::White));
        assert!(is_square_attacked(&board, Square::D1, Side::White));
    }
}
