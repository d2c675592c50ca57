//! A piece on the board: kind, side, element tag, and active effects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::{PieceEffect, PieceEffectKind};
use crate::piece_kind::PieceKind;
use crate::side::Side;

/// Stable identity of a spawned piece, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    /// Return the raw id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The elemental identity carried by a piece.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub glyph: String,
}

impl Element {
    /// Create an element from a name and a display glyph.
    pub fn new(name: impl Into<String>, glyph: impl Into<String>) -> Element {
        Element {
            name: name.into(),
            glyph: glyph.into(),
        }
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A piece record owned by [`BoardState`](crate::board::BoardState).
///
/// The original kind and side are remembered so that Transform and Convert
/// can be reverted. Promotion rewrites both the current and original kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    side: Side,
    original_kind: PieceKind,
    original_side: Side,
    moved: bool,
    element: Element,
    effects: Vec<PieceEffect>,
}

impl Piece {
    pub(crate) fn new(id: PieceId, kind: PieceKind, side: Side, element: Element) -> Piece {
        Piece {
            id,
            kind,
            side,
            original_kind: kind,
            original_side: side,
            moved: false,
            element,
            effects: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn original_kind(&self) -> PieceKind {
        self.original_kind
    }

    #[inline]
    pub fn original_side(&self) -> Side {
        self.original_side
    }

    /// Return `true` once the piece has been relocated at least once.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Active effects in the order they were first applied.
    #[inline]
    pub fn effects(&self) -> &[PieceEffect] {
        &self.effects
    }

    /// Return the active effect of the same kind as `probe`, if any.
    pub fn effect(&self, probe: &PieceEffectKind) -> Option<&PieceEffect> {
        self.effects.iter().find(|e| e.kind.same_kind(probe))
    }

    /// Return `true` if an effect of the same kind as `probe` is active.
    pub fn has_effect(&self, probe: &PieceEffectKind) -> bool {
        self.effect(probe).is_some()
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.has_effect(&PieceEffectKind::Stun)
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.has_effect(&PieceEffectKind::Shield)
    }

    /// Board letter: uppercase for White, lowercase for Black.
    pub fn letter(&self) -> char {
        let base = self.kind.letter();
        match self.side {
            Side::White => base.to_ascii_uppercase(),
            Side::Black => base,
        }
    }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }

    pub(crate) fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    pub(crate) fn promote(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.original_kind = kind;
    }

    pub(crate) fn mark_moved(&mut self) {
        self.moved = true;
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }

    pub(crate) fn set_element(&mut self, element: Element) {
        self.element = element;
    }

    /// Store an effect, replacing any active effect of the same kind in place.
    ///
    /// Returns the effect that was replaced.
    pub(crate) fn insert_effect(&mut self, effect: PieceEffect) -> Option<PieceEffect> {
        match self.effects.iter_mut().find(|e| e.kind.same_kind(&effect.kind)) {
            Some(slot) => Some(std::mem::replace(slot, effect)),
            None => {
                self.effects.push(effect);
                None
            }
        }
    }

    /// Remove the effect of the same kind as `probe`, if any.
    pub(crate) fn remove_effect(&mut self, probe: &PieceEffectKind) -> Option<PieceEffect> {
        let pos = self.effects.iter().position(|e| e.kind.same_kind(probe))?;
        Some(self.effects.remove(pos))
    }

    pub(crate) fn effects_mut(&mut self) -> &mut Vec<PieceEffect> {
        &mut self.effects
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.letter(), self.side, self.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Piece {
        Piece::new(PieceId(1), PieceKind::Knight, Side::White, Element::new("Fire", "🔥"))
    }

    #[test]
    fn readding_effect_refreshes_in_place() {
        let mut piece = knight();
        piece.insert_effect(PieceEffect::new(PieceEffectKind::Stun, 2));
        piece.insert_effect(PieceEffect::new(PieceEffectKind::Shield, 3));
        let replaced = piece.insert_effect(PieceEffect::new(PieceEffectKind::Stun, 5));
        assert_eq!(replaced.map(|e| e.duration), Some(2));
        assert_eq!(piece.effects().len(), 2);
        assert_eq!(piece.effects()[0], PieceEffect::new(PieceEffectKind::Stun, 5));
    }

    #[test]
    fn payload_variants_share_one_slot() {
        let mut piece = knight();
        piece.insert_effect(PieceEffect::new(PieceEffectKind::Transform(PieceKind::Rook), 2));
        piece.insert_effect(PieceEffect::new(PieceEffectKind::Transform(PieceKind::Bishop), 2));
        assert_eq!(piece.effects().len(), 1);
        assert_eq!(
            piece.effects()[0].kind,
            PieceEffectKind::Transform(PieceKind::Bishop)
        );
    }

    #[test]
    fn letter_case_follows_side() {
        let mut piece = knight();
        assert_eq!(piece.letter(), 'N');
        piece.set_side(Side::Black);
        assert_eq!(piece.letter(), 'n');
        assert_eq!(piece.original_side(), Side::White);
    }

    #[test]
    fn promotion_rewrites_original_kind() {
        let mut piece =
            Piece::new(PieceId(2), PieceKind::Pawn, Side::Black, Element::new("Ice", "❄"));
        piece.promote(PieceKind::Queen);
        assert_eq!(piece.kind(), PieceKind::Queen);
        assert_eq!(piece.original_kind(), PieceKind::Queen);
    }

    #[test]
    fn element_name_comparison_ignores_case() {
        let element = Element::new("Fire", "🔥");
        assert!(element.is_named("fire"));
        assert!(element.is_named(" FIRE "));
        assert!(!element.is_named("Water"));
    }
}
