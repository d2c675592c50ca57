//! Target filters and the buff/debuff table.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::side::Side;
use crate::square::Square;

use super::context::TradeOutcome;

/// Which cells an effect may land on, relative to the acting side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFilter {
    /// Cells holding a piece of the other side.
    Enemies,
    /// Cells holding a piece of the acting side.
    Friendlies,
    /// Every occupied cell.
    AllPieces,
    /// Every unoccupied cell.
    Empty,
    /// Every cell.
    Any,
    /// Empty cells and cells holding friendly pieces.
    NotEnemies,
    /// Empty cells and cells holding enemy pieces.
    NotFriendlies,
}

impl TargetFilter {
    /// Parse a literal filter name (case-insensitive, a few synonyms).
    pub fn parse(s: &str) -> Option<TargetFilter> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "enemies" | "enemy" | "opponents" => Some(TargetFilter::Enemies),
            "friendlies" | "friendly" | "allies" | "ally" => Some(TargetFilter::Friendlies),
            "all_pieces" | "all" | "pieces" | "occupied" => Some(TargetFilter::AllPieces),
            "empty" | "empty_cells" | "vacant" => Some(TargetFilter::Empty),
            "any" | "all_cells" | "cells" | "everything" => Some(TargetFilter::Any),
            "not_enemies" | "non_enemies" => Some(TargetFilter::NotEnemies),
            "not_friendlies" | "non_friendlies" => Some(TargetFilter::NotFriendlies),
            _ => None,
        }
    }

    /// Return `true` if `sq` passes this filter for `acting`.
    pub fn matches(self, board: &BoardState, sq: Square, acting: Side) -> bool {
        let occupant = board.side_at(sq);
        match self {
            TargetFilter::Enemies => occupant == Some(!acting),
            TargetFilter::Friendlies => occupant == Some(acting),
            TargetFilter::AllPieces => occupant.is_some(),
            TargetFilter::Empty => occupant.is_none(),
            TargetFilter::Any => true,
            TargetFilter::NotEnemies => occupant != Some(!acting),
            TargetFilter::NotFriendlies => occupant != Some(acting),
        }
    }
}

/// Beneficial or harmful, before the trade outcome is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Buff,
    Debuff,
}

/// Whether an effect lands on a piece or on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Piece,
    Tile,
}

/// A descriptor's target: a literal filter or an abstract polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSpec {
    Literal(TargetFilter),
    Polar(Polarity),
}

impl TargetSpec {
    /// Parse a target field.
    pub fn parse(s: &str) -> Option<TargetSpec> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buff" | "buffs" | "positive" | "beneficial" => Some(TargetSpec::Polar(Polarity::Buff)),
            "debuff" | "debuffs" | "negative" | "harmful" => {
                Some(TargetSpec::Polar(Polarity::Debuff))
            }
            other => TargetFilter::parse(other).map(TargetSpec::Literal),
        }
    }

    /// Concrete filter for this target given the trade outcome.
    pub fn concretize(self, outcome: TradeOutcome, binding: Binding) -> TargetFilter {
        match self {
            TargetSpec::Literal(filter) => filter,
            TargetSpec::Polar(polarity) => concretize(outcome, polarity, binding),
        }
    }
}

/// Map an abstract polarity to a concrete filter.
///
/// Buffs favour the winner of the trade and debuffs punish the loser; a
/// draw hits everything the binding can reach.
pub const fn concretize(
    outcome: TradeOutcome,
    polarity: Polarity,
    binding: Binding,
) -> TargetFilter {
    use Binding::{Piece, Tile};
    use Polarity::{Buff, Debuff};
    use TradeOutcome::{Draw, Lost, Won};

    match (binding, polarity, outcome) {
        (Piece, Buff, Won) => TargetFilter::Friendlies,
        (Piece, Buff, Lost) => TargetFilter::Enemies,
        (Piece, Debuff, Won) => TargetFilter::Enemies,
        (Piece, Debuff, Lost) => TargetFilter::Friendlies,
        (Piece, _, Draw) => TargetFilter::AllPieces,
        (Tile, Buff, Won) => TargetFilter::NotEnemies,
        (Tile, Buff, Lost) => TargetFilter::NotFriendlies,
        (Tile, Debuff, Won) => TargetFilter::NotFriendlies,
        (Tile, Debuff, Lost) => TargetFilter::NotEnemies,
        (Tile, _, Draw) => TargetFilter::Any,
    }
}
