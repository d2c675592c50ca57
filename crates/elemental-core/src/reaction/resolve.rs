//! Turning validated entries into concrete per-cell effects.

use tracing::debug;

use crate::board::BoardState;
use crate::effect::{PieceEffect, PieceEffectKind, TileEffect};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

use super::context::TradeOutcome;
use super::descriptor::{EffectSpec, EntryEffect, ReactionEntry};

/// Default global cap on resolved effects per descriptor.
pub const DEFAULT_EFFECT_CAP: usize = 8;

/// Minimum raw duration for piece-bound effects.
const PIECE_DURATION_FLOOR: i32 = 1;

/// A resolved effect ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAction {
    Piece(PieceEffect),
    Tile(TileEffect),
}

impl ResolvedAction {
    /// `true` for an instant Damage effect.
    pub fn is_damage(&self) -> bool {
        matches!(self, ResolvedAction::Piece(e) if e.kind == PieceEffectKind::Damage)
    }
}

/// One effect bound to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEffect {
    /// Index of the originating entry among the validated entries.
    pub entry: usize,
    pub square: Square,
    /// Chebyshev distance from the trigger.
    pub wave: u8,
    /// `true` when the entry's pattern applies all at once.
    pub discrete: bool,
    pub action: ResolvedAction,
}

/// Everything needed to resolve a descriptor against a board.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    pub board: &'a BoardState,
    pub trigger: Square,
    pub acting: Side,
    pub outcome: TradeOutcome,
    pub cap: usize,
}

impl Resolver<'_> {
    /// Resolve `entries` in order, stopping once `cap` effects are produced.
    pub fn resolve(&self, entries: &[ReactionEntry]) -> Vec<ResolvedEffect> {
        let mut resolved = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if resolved.len() >= self.cap {
                debug!(cap = self.cap, "reaction effect cap reached");
                break;
            }
            let mut batch = self.resolve_entry(index, entry);
            let room = self.cap - resolved.len();
            if batch.len() > room {
                debug!(
                    entry = index,
                    dropped = batch.len() - room,
                    "reaction effect cap reached"
                );
                batch.truncate(room);
            }
            // Stable: relative order of the other effects is kept.
            batch.sort_by_key(|e| e.action.is_damage());
            resolved.extend(batch);
        }
        resolved
    }

    fn resolve_entry(&self, index: usize, entry: &ReactionEntry) -> Vec<ResolvedEffect> {
        let cells = entry
            .pattern
            .cells(self.board, self.trigger, entry.distance, entry.obstruction, self.acting);
        let mut batch = Vec::new();
        for effect in &entry.effects {
            let filter = entry.target.concretize(self.outcome, effect.spec.binding());
            for &sq in &cells {
                if !filter.matches(self.board, sq, self.acting) {
                    continue;
                }
                if let Some(action) = self.derive(sq, effect) {
                    batch.push(ResolvedEffect {
                        entry: index,
                        square: sq,
                        wave: sq.distance(self.trigger),
                        discrete: entry.pattern.is_discrete(),
                        action,
                    });
                }
            }
        }
        batch
    }

    /// Validate one effect for one cell.
    fn derive(&self, sq: Square, effect: &EntryEffect) -> Option<ResolvedAction> {
        if let EffectSpec::Tile(kind) = effect.spec {
            let duration = effective_duration(effect.duration, kind.duration_floor());
            return Some(ResolvedAction::Tile(TileEffect::new(kind, duration, self.acting)));
        }

        let piece = self.board.piece_at(sq)?;
        if piece.kind() == PieceKind::King && effect.spec.spares_kings() {
            debug!(square = %sq, "king is immune");
            return None;
        }

        let kind = match effect.spec {
            EffectSpec::Damage => {
                let damage = PieceEffect::instant(PieceEffectKind::Damage);
                return Some(ResolvedAction::Piece(damage));
            }
            EffectSpec::Cleanse(mode) => {
                let cleanse = PieceEffect::instant(PieceEffectKind::Cleanse(mode));
                return Some(ResolvedAction::Piece(cleanse));
            }
            EffectSpec::Stun => PieceEffectKind::Stun,
            EffectSpec::Shield => PieceEffectKind::Shield,
            EffectSpec::Convert => PieceEffectKind::Convert,
            EffectSpec::Poison => PieceEffectKind::Poison,
            EffectSpec::Transform(target) => PieceEffectKind::Transform(target),
            EffectSpec::Push { direction, distance } => {
                let (d_row, d_col) = direction.vector(self.trigger.delta_to(sq))?;
                PieceEffectKind::Push { d_row, d_col, distance }
            }
            EffectSpec::Tile(_) => return None,
        };
        let duration = effective_duration(effect.duration, PIECE_DURATION_FLOOR);
        Some(ResolvedAction::Piece(PieceEffect::new(kind, duration)))
    }
}

/// Apply the floor and the +1 creation bonus; negative stays permanent.
pub const fn effective_duration(raw: i32, floor: i32) -> i32 {
    if raw < 0 {
        return -1;
    }
    let floored = if raw < floor { floor } else { raw };
    floored + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::TileEffectKind;
    use crate::reaction::descriptor::ReactionDescriptor;

    fn entries(json: &str) -> Vec<ReactionEntry> {
        ReactionDescriptor::from_json(json).unwrap().entries()
    }

    fn resolver(board: &BoardState, outcome: TradeOutcome) -> Resolver<'_> {
        Resolver {
            board,
            trigger: Square::D5,
            acting: Side::White,
            outcome,
            cap: DEFAULT_EFFECT_CAP,
        }
    }

    #[test]
    fn durations_get_floor_and_bonus() {
        assert_eq!(effective_duration(1, 3), 4);
        assert_eq!(effective_duration(5, 3), 6);
        assert_eq!(effective_duration(0, 1), 2);
        assert_eq!(effective_duration(-3, 1), -1);
    }

    #[test]
    fn tile_effects_use_acting_side_as_owner() {
        let board: BoardState = "4k3/8/8/3Q4/8/8/8/4K3".parse().unwrap();
        let resolved = resolver(&board, TradeOutcome::Won)
            .resolve(&entries(r#"{"effects": [{"pattern": "area", "distance": 1, "target": "empty", "effect": "burning", "duration": 2}]}"#));
        assert_eq!(resolved.len(), 8);
        assert!(resolved.iter().all(|e| e.square != Square::D5));
        let ResolvedAction::Tile(tile) = resolved[0].action else {
            panic!("expected a tile effect");
        };
        assert_eq!(tile.kind, TileEffectKind::Burning);
        assert_eq!(tile.duration, 4);
        assert_eq!(tile.owner, Side::White);
    }

    #[test]
    fn piece_effects_skip_empty_cells_and_spare_kings() {
        let board: BoardState = "8/8/3pk3/3Q4/8/8/8/4K3".parse().unwrap();
        let resolved = resolver(&board, TradeOutcome::Won)
            .resolve(&entries(r#"{"effects": [{"pattern": "*", "distance": 1, "target": "enemies", "effect": "damage"}]}"#));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].square, Square::D6);

        let resolved = resolver(&board, TradeOutcome::Won)
            .resolve(&entries(r#"{"effects": [{"pattern": "*", "distance": 1, "target": "enemies", "effect": "stun"}]}"#));
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn convert_and_transform_spare_kings() {
        let board: BoardState = "8/8/3pk3/3Q4/8/8/8/4K3".parse().unwrap();

        let resolved = resolver(&board, TradeOutcome::Won).resolve(&entries(
            r#"{"effects": [{"pattern": "*", "distance": 1, "target": "enemies", "effect": "convert", "duration": 1}]}"#,
        ));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].square, Square::D6);
        assert!(matches!(
            resolved[0].action,
            ResolvedAction::Piece(PieceEffect {
                kind: PieceEffectKind::Convert,
                ..
            })
        ));

        let resolved = resolver(&board, TradeOutcome::Won).resolve(&entries(
            r#"{"effects": [{"pattern": "*", "distance": 1, "target": "enemies", "effect": "transform", "piece": "knight"}]}"#,
        ));
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].square, Square::D6);
        assert!(matches!(
            resolved[0].action,
            ResolvedAction::Piece(PieceEffect {
                kind: PieceEffectKind::Transform(PieceKind::Knight),
                ..
            })
        ));
    }

    #[test]
    fn buff_follows_trade_outcome() {
        let board: BoardState = "4k3/8/3pP3/3Q4/8/8/8/4K3".parse().unwrap();
        let json = r#"{"effects": [{"pattern": "*", "distance": 1, "target": "buff", "effect": "shield", "duration": 1}]}"#;
        let won = resolver(&board, TradeOutcome::Won).resolve(&entries(json));
        assert_eq!(won.iter().map(|e| e.square).collect::<Vec<_>>(), vec![Square::E6]);
        let lost = resolver(&board, TradeOutcome::Lost).resolve(&entries(json));
        assert_eq!(lost.iter().map(|e| e.square).collect::<Vec<_>>(), vec![Square::D6]);
        let draw = resolver(&board, TradeOutcome::Draw).resolve(&entries(json));
        assert_eq!(draw.len(), 2);
    }

    #[test]
    fn cap_limits_total_effects() {
        let board = BoardState::empty();
        let json = r#"{"effects": [
            {"pattern": "area", "distance": 1, "effect": "ice"},
            {"pattern": "area", "distance": 1, "effect": "plant"}
        ]}"#;
        let resolved = resolver(&board, TradeOutcome::Won).resolve(&entries(json));
        assert_eq!(resolved.len(), DEFAULT_EFFECT_CAP);
        assert!(resolved.iter().all(|e| e.entry == 0));
    }

    #[test]
    fn damage_is_ordered_last_within_entry() {
        let board: BoardState = "4k3/8/3pp3/3Q4/8/8/8/4K3".parse().unwrap();
        let json = r#"{"effects": [{"pattern": "*", "distance": 1, "target": "all", "effect": "damage",
                                    "combo": [{"effect": "shield", "duration": 1}]}]}"#;
        let resolved = resolver(&board, TradeOutcome::Won).resolve(&entries(json));
        assert_eq!(resolved.len(), 4);
        assert!(!resolved[0].action.is_damage());
        assert!(!resolved[1].action.is_damage());
        assert!(resolved[2].action.is_damage());
        assert!(resolved[3].action.is_damage());
    }

    #[test]
    fn cap_keeps_resolution_order_before_moving_damage_last() {
        let board: BoardState = "4k3/8/2ppp3/2pQp3/2ppp3/8/8/4K3".parse().unwrap();
        let json = r#"{"effects": [{"pattern": "area", "distance": 1, "target": "all", "effect": "damage",
                                    "combo": [{"effect": "shield", "duration": 1}]}]}"#;
        let resolved = resolver(&board, TradeOutcome::Won).resolve(&entries(json));
        assert_eq!(resolved.len(), DEFAULT_EFFECT_CAP);
        assert!(
            resolved.iter().all(|e| e.action.is_damage()),
            "damage resolves first, so it fills the cap"
        );
    }

    #[test]
    fn push_direction_is_relative_to_trigger() {
        let board: BoardState = "4k3/8/8/3Qp3/8/8/8/4K3".parse().unwrap();
        let json = r#"{"effects": [{"pattern": "+", "distance": 1, "target": "enemies", "effect": "push", "push_distance": 2}]}"#;
        let resolved = resolver(&board, TradeOutcome::Won).resolve(&entries(json));
        let ResolvedAction::Piece(effect) = resolved[0].action else {
            panic!("expected a piece effect");
        };
        assert_eq!(
            effect.kind,
            PieceEffectKind::Push {
                d_row: 0,
                d_col: 1,
                distance: 2
            }
        );
    }
}
