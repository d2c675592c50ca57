//! Capture context and the externally supplied mix result.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::error::DescriptorError;
use crate::piece::{Element, Piece};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

/// Chebyshev radius used to count nearby pieces.
pub const NEIGHBOUR_RADIUS: u8 = 2;

/// Magnitude of a capture, from the combined material of both pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerTier {
    Minor,
    Moderate,
    Major,
    Massive,
}

impl PowerTier {
    /// Tier for a combined material value: up to 3, 6, 9, then beyond.
    pub const fn from_value(value: u32) -> PowerTier {
        match value {
            0..=3 => PowerTier::Minor,
            4..=6 => PowerTier::Moderate,
            7..=9 => PowerTier::Major,
            _ => PowerTier::Massive,
        }
    }
}

/// Result of an elemental mix, from the attacker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Won,
    Lost,
    Draw,
}

impl TradeOutcome {
    /// Compare a mix winner against both elements, ignoring case.
    ///
    /// Anything that names neither element (including `"draw"`) is a draw.
    pub fn from_winner(winner: &str, attacker: &Element, defender: &Element) -> TradeOutcome {
        let attacker_wins = attacker.is_named(winner);
        let defender_wins = defender.is_named(winner);
        match (attacker_wins, defender_wins) {
            (true, false) => TradeOutcome::Won,
            (false, true) => TradeOutcome::Lost,
            _ => TradeOutcome::Draw,
        }
    }
}

/// The new element produced by mixing attacker and defender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixResult {
    #[serde(alias = "new_element", alias = "name")]
    pub element: String,
    #[serde(default, alias = "emoji")]
    pub glyph: String,
    #[serde(default = "draw_label")]
    pub winner: String,
    #[serde(default, alias = "reason", alias = "explanation")]
    pub rationale: String,
}

fn draw_label() -> String {
    "draw".to_string()
}

impl MixResult {
    /// Decode a mix result from JSON.
    pub fn from_json(json: &str) -> Result<MixResult, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The trivial "no change" mix: the attacker keeps its element and the
    /// trade is a draw.
    pub fn unchanged(attacker: &Element) -> MixResult {
        MixResult {
            element: attacker.name.clone(),
            glyph: attacker.glyph.clone(),
            winner: draw_label(),
            rationale: String::new(),
        }
    }

    /// The mixed element as a piece element. A blank name keeps `fallback`.
    pub fn to_element(&self, fallback: &Element) -> Element {
        if self.element.trim().is_empty() {
            return fallback.clone();
        }
        Element::new(self.element.trim(), self.glyph.clone())
    }
}

/// Snapshot of a capture handed to the reaction generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionContext {
    pub square: Square,
    pub attacker_kind: PieceKind,
    pub attacker_side: Side,
    pub defender_kind: PieceKind,
    pub defender_side: Side,
    pub combined_value: u32,
    pub tier: PowerTier,
    pub attacker_element: Element,
    pub defender_element: Element,
    /// Pieces of the defender's side within [`NEIGHBOUR_RADIUS`].
    pub enemies_nearby: usize,
    /// Pieces of the attacker's side within [`NEIGHBOUR_RADIUS`], excluding
    /// the attacker.
    pub friendlies_nearby: usize,
}

impl ReactionContext {
    /// Build a context for `attacker` having captured `defender` on `square`.
    ///
    /// `board` is the position after the capture.
    pub fn capture(
        board: &BoardState,
        square: Square,
        attacker: &Piece,
        defender: &Piece,
    ) -> ReactionContext {
        let combined_value = attacker.kind().material_value() + defender.kind().material_value();
        let side = attacker.side();
        let (enemies_nearby, friendlies_nearby) = board
            .occupied_squares()
            .filter(|(sq, _)| *sq != square && sq.distance(square) <= NEIGHBOUR_RADIUS)
            .fold((0, 0), |(enemies, friends), (_, p)| {
                if p.side() == side {
                    (enemies, friends + 1)
                } else {
                    (enemies + 1, friends)
                }
            });

        ReactionContext {
            square,
            attacker_kind: attacker.kind(),
            attacker_side: side,
            defender_kind: defender.kind(),
            defender_side: defender.side(),
            combined_value,
            tier: PowerTier::from_value(combined_value),
            attacker_element: attacker.element().clone(),
            defender_element: defender.element().clone(),
            enemies_nearby,
            friendlies_nearby,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BoardLayout;

    #[test]
    fn tier_thresholds() {
        assert_eq!(PowerTier::from_value(2), PowerTier::Minor);
        assert_eq!(PowerTier::from_value(3), PowerTier::Minor);
        assert_eq!(PowerTier::from_value(4), PowerTier::Moderate);
        assert_eq!(PowerTier::from_value(9), PowerTier::Major);
        assert_eq!(PowerTier::from_value(10), PowerTier::Massive);
    }

    #[test]
    fn trade_outcome_ignores_case() {
        let fire = Element::new("Fire", "");
        let plant = Element::new("Plant", "");
        assert_eq!(TradeOutcome::from_winner("fire", &fire, &plant), TradeOutcome::Won);
        assert_eq!(TradeOutcome::from_winner(" PLANT ", &fire, &plant), TradeOutcome::Lost);
        assert_eq!(TradeOutcome::from_winner("draw", &fire, &plant), TradeOutcome::Draw);
        assert_eq!(TradeOutcome::from_winner("fire", &fire, &fire), TradeOutcome::Draw);
    }

    #[test]
    fn mix_result_accepts_aliases_and_defaults() {
        let mix = MixResult::from_json(r#"{"new_element": "Ash", "emoji": "x"}"#).unwrap();
        assert_eq!(mix.element, "Ash");
        assert_eq!(mix.glyph, "x");
        assert_eq!(mix.winner, "draw");
        assert!(MixResult::from_json(r#"{"glyph": "x"}"#).is_err());
    }

    #[test]
    fn capture_context_counts_neighbours() {
        let mut board = BoardState::starting_position(&BoardLayout::default());
        let attacker = board.piece_at(Square::D1).cloned().unwrap();
        board.relocate(Square::D1, Square::D4);
        let defender = board.remove(Square::D7).unwrap();
        board.relocate(Square::D4, Square::D7);
        let ctx = ReactionContext::capture(&board, Square::D7, &attacker, &defender);
        assert_eq!(ctx.combined_value, 10);
        assert_eq!(ctx.tier, PowerTier::Massive);
        assert_eq!(ctx.attacker_side, Side::White);
        // b8 through f8, plus b7, c7, e7, and f7.
        assert_eq!(ctx.enemies_nearby, 9);
        assert_eq!(ctx.friendlies_nearby, 0);
    }
}
