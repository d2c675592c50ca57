//! Material values.

use elemental_core::PieceKind;

/// Centipawn values indexed by [`PieceKind::index()`].
///
/// | Piece  | Value |
/// |--------|-------|
/// | Pawn   | 100   |
/// | Knight | 320   |
/// | Bishop | 330   |
/// | Rook   | 500   |
/// | Queen  | 900   |
/// | King   | 0     |
pub const MATERIAL_VALUE: [i32; PieceKind::COUNT] = [100, 320, 330, 500, 900, 0];

/// Value of `kind` in centipawns.
#[inline]
pub const fn value(kind: PieceKind) -> i32 {
    MATERIAL_VALUE[kind.index()]
}
