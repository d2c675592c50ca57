//! Compile-time dispatch for whether walls take part in move generation.

/// Marker trait selecting shape-only or effect-aware generation.
pub(crate) trait Blocking {
    /// `true` when Occupied tiles stop rays and double pawn pushes.
    const WALLS: bool;
}

/// Zero-sized type: only pieces block movement.
pub(crate) struct ShapeOnly;
impl Blocking for ShapeOnly {
    const WALLS: bool = false;
}

/// Zero-sized type: pieces and walls block movement.
pub(crate) struct EffectAware;
impl Blocking for EffectAware {
    const WALLS: bool = true;
}
