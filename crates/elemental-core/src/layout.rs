//! Element assignment at spawn time: fixed defaults plus persisted overrides.

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;
use crate::piece::Element;
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

/// Default elements for back-rank pieces, indexed by column.
const BACK_RANK_ELEMENTS: [(&str, &str); 8] = [
    ("Stone", "🪨"),
    ("Water", "💧"),
    ("Fire", "🔥"),
    ("Lightning", "⚡"),
    ("Light", "✨"),
    ("Fire", "🔥"),
    ("Water", "💧"),
    ("Stone", "🪨"),
];

/// Default elements for pawns, indexed by column.
const PAWN_ELEMENTS: [(&str, &str); 8] = [
    ("Plant", "🌿"),
    ("Ice", "❄"),
    ("Fire", "🔥"),
    ("Wind", "🌬"),
    ("Wind", "🌬"),
    ("Fire", "🔥"),
    ("Ice", "❄"),
    ("Plant", "🌿"),
];

/// Return the default element for a piece spawned on `sq`.
///
/// The choice depends only on the column and on whether the piece is a pawn.
pub fn default_element(kind: PieceKind, sq: Square) -> Element {
    let (name, glyph) = match kind {
        PieceKind::Pawn => PAWN_ELEMENTS[sq.col() as usize],
        _ => BACK_RANK_ELEMENTS[sq.col() as usize],
    };
    Element::new(name, glyph)
}

/// A custom element for one spawn square of one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementOverride {
    pub side: Side,
    pub square: Square,
    pub element: String,
    #[serde(default)]
    pub glyph: String,
}

/// Per-square element overrides consulted when pieces are spawned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    #[serde(default)]
    overrides: Vec<ElementOverride>,
}

impl BoardLayout {
    /// A layout with no overrides.
    pub fn new() -> BoardLayout {
        BoardLayout::default()
    }

    /// Parse a persisted layout document.
    pub fn from_json(json: &str) -> Result<BoardLayout, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the layout for persistence.
    pub fn to_json(&self) -> Result<String, DescriptorError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Add or replace the override for `(side, square)`.
    pub fn with_override(
        mut self,
        side: Side,
        square: Square,
        element: impl Into<String>,
        glyph: impl Into<String>,
    ) -> BoardLayout {
        self.overrides.retain(|o| !(o.side == side && o.square == square));
        self.overrides.push(ElementOverride {
            side,
            square,
            element: element.into(),
            glyph: glyph.into(),
        });
        self
    }

    /// All overrides in insertion order.
    pub fn overrides(&self) -> &[ElementOverride] {
        &self.overrides
    }

    /// Element for a piece of `side` spawned on `sq`.
    pub fn element_for(&self, side: Side, kind: PieceKind, sq: Square) -> Element {
        self.overrides
            .iter()
            .find(|o| o.side == side && o.square == sq && !o.element.trim().is_empty())
            .map(|o| Element::new(o.element.trim(), o.glyph.clone()))
            .unwrap_or_else(|| default_element(kind, sq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_depend_on_file_and_role() {
        assert_eq!(default_element(PieceKind::Queen, Square::D1).name, "Lightning");
        assert_eq!(default_element(PieceKind::Queen, Square::D8).name, "Lightning");
        assert_eq!(default_element(PieceKind::Pawn, Square::A2).name, "Plant");
        assert_eq!(default_element(PieceKind::Knight, Square::B1).name, "Water");
    }

    #[test]
    fn override_applies_to_one_side_only() {
        let layout = BoardLayout::new().with_override(Side::White, Square::E1, "Void", "V");
        assert_eq!(layout.element_for(Side::White, PieceKind::King, Square::E1).name, "Void");
        assert_eq!(layout.element_for(Side::Black, PieceKind::King, Square::E1).name, "Light");
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        let layout = BoardLayout::new().with_override(Side::White, Square::A2, "  ", "");
        assert_eq!(layout.element_for(Side::White, PieceKind::Pawn, Square::A2).name, "Plant");
    }

    #[test]
    fn json_roundtrip() {
        let layout = BoardLayout::new()
            .with_override(Side::Black, Square::D8, "Storm", "S")
            .with_override(Side::Black, Square::D8, "Magma", "M");
        assert_eq!(layout.overrides().len(), 1);
        let json = layout.to_json().unwrap();
        assert_eq!(BoardLayout::from_json(&json).unwrap(), layout);
    }

    #[test]
    fn json_missing_fields_default() {
        let layout = BoardLayout::from_json("{}").unwrap();
        assert!(layout.overrides().is_empty());
        let layout = BoardLayout::from_json(
            r#"{"overrides":[{"side":"white","square":60,"element":"Frost"}]}"#,
        )
        .unwrap();
        assert_eq!(layout.element_for(Side::White, PieceKind::King, Square::E1).name, "Frost");
    }

    #[test]
    fn json_rejects_bad_square() {
        assert!(
            BoardLayout::from_json(r#"{"overrides":[{"side":"white","square":99,"element":"X"}]}"#)
                .is_err()
        );
    }
}
