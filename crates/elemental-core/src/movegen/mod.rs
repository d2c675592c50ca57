//! Legality Engine: effect-aware move generation and check detection.

mod attacks;
mod blocking;
mod king;
mod knights;
mod pawns;
mod sliders;

use crate::board::BoardState;
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;
use crate::square_set::SquareSet;

use self::blocking::{Blocking, EffectAware, ShapeOnly};
use self::king::{castling_targets, king_steps};
use self::knights::knight_targets;
use self::pawns::pawn_targets;
use self::sliders::slider_targets;

pub use self::attacks::is_square_attacked;
pub use self::king::castling_rook;

/// A from/to pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovePair {
    pub from: Square,
    pub to: Square,
}

impl std::fmt::Display for MovePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

fn pseudo_targets<B: Blocking>(board: &BoardState, from: Square) -> SquareSet {
    let Some(piece) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    let side = piece.side();
    match piece.kind() {
        PieceKind::Pawn => pawn_targets::<B>(board, from, side),
        PieceKind::Knight => knight_targets(board, from, side),
        PieceKind::King => king_steps(board, from, side),
        kind => slider_targets::<B>(board, from, side, kind),
    }
}

/// Destinations permitted by the piece's shape alone.
///
/// Pieces block and may be captured; tile effects, stun, and check are
/// ignored.
pub fn possible_moves(board: &BoardState, from: Square) -> SquareSet {
    pseudo_targets::<ShapeOnly>(board, from)
}

/// Fully legal destinations for the piece on `from`.
///
/// Stunned pieces have none. Walls stop rays and double pushes, castling is
/// added for an eligible king, and any move leaving the mover's king in check
/// is removed.
pub fn legal_moves(board: &BoardState, from: Square) -> SquareSet {
    let Some(piece) = board.piece_at(from) else {
        return SquareSet::EMPTY;
    };
    if piece.is_stunned() {
        return SquareSet::EMPTY;
    }
    let side = piece.side();

    let mut targets = pseudo_targets::<EffectAware>(board, from);
    if piece.kind() == PieceKind::King {
        targets |= castling_targets(board, from, side);
    }

    targets.retain(|to| {
        let after = play_unchecked(board, from, to);
        !is_in_check(&after, side)
    });
    targets
}

/// All legal moves for `side`, ordered by origin then destination square.
pub fn all_legal_moves(board: &BoardState, side: Side) -> Vec<MovePair> {
    let origins: Vec<Square> = board.pieces(side).map(|(sq, _)| sq).collect();
    origins
        .into_iter()
        .flat_map(|from| legal_moves(board, from).into_iter().map(move |to| MovePair { from, to }))
        .collect()
}

/// Return `true` if `side` has at least one legal move.
pub fn has_legal_move(board: &BoardState, side: Side) -> bool {
    board
        .pieces(side)
        .any(|(from, _)| !legal_moves(board, from).is_empty())
}

/// Return `true` if `side`'s king is attacked.
///
/// A shielded king is never in check, and a missing king is not in check.
pub fn is_in_check(board: &BoardState, side: Side) -> bool {
    let Some(king_sq) = board.king_square(side) else {
        return false;
    };
    if board.piece_at(king_sq).is_some_and(|k| k.is_shielded()) {
        return false;
    }
    is_square_attacked(board, king_sq, !side)
}

/// Return a copy of `board` with the move played (rook included for a
/// castle). No promotion, slide, or reaction is applied.
pub fn play_unchecked(board: &BoardState, from: Square, to: Square) -> BoardState {
    let mut after = board.clone();
    let rook = castling_rook(board, from, to);
    after.relocate(from, to);
    if let Some((rook_from, rook_to)) = rook {
        after.relocate(rook_from, rook_to);
    }
    after
}
