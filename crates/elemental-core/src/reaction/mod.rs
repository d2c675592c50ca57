//! Reaction Resolution Engine: spreading pattern effects from a capture.
//!
//! A [`ReactionDescriptor`] arrives as untrusted JSON. Its entries are
//! validated one by one ([`descriptor`]), expanded into cells ([`pattern`]),
//! filtered by a target concretized from the trade outcome ([`polarity`]),
//! turned into per-cell effects under the global cap ([`resolve`]), and
//! finally applied wave by wave ([`apply`]). When no entry survives
//! validation the keyword fallback ([`fallback`]) is used instead.

pub mod apply;
pub mod context;
pub mod descriptor;
pub mod fallback;
pub mod pattern;
pub mod polarity;
pub mod resolve;

use tracing::{debug, warn};

use crate::board::BoardState;
use crate::side::Side;
use crate::square::Square;

pub use self::apply::{Wave, WaveReport, apply_all, apply_wave, into_waves};
pub use self::context::{MixResult, PowerTier, ReactionContext, TradeOutcome};
pub use self::descriptor::{EffectSpec, PushDirection, ReactionDescriptor, ReactionEntry};
pub use self::fallback::{fallback_descriptor, fallback_kind};
pub use self::pattern::Pattern;
pub use self::polarity::{Binding, Polarity, TargetFilter, TargetSpec, concretize};
pub use self::resolve::{DEFAULT_EFFECT_CAP, ResolvedAction, ResolvedEffect, Resolver};

/// A reaction resolved against a board, grouped into waves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionPlan {
    pub waves: Vec<Wave>,
    /// `true` when the keyword fallback replaced the supplied descriptor.
    pub used_fallback: bool,
    pub flavor: String,
}

impl ReactionPlan {
    /// Total number of effects across all waves.
    pub fn effect_count(&self) -> usize {
        self.waves.iter().map(|w| w.effects.len()).sum()
    }
}

/// Inputs for planning a reaction at one square.
#[derive(Debug, Clone, Copy)]
pub struct Trigger<'a> {
    pub square: Square,
    pub acting: Side,
    pub outcome: TradeOutcome,
    /// Element name consulted by the fallback.
    pub element: &'a str,
    pub cap: usize,
}

/// Resolve `descriptor` at the trigger, falling back to the keyword reaction
/// when the descriptor is absent or none of its entries validate.
pub fn plan_reaction(
    board: &BoardState,
    trigger: Trigger<'_>,
    descriptor: Option<&ReactionDescriptor>,
) -> ReactionPlan {
    let supplied = descriptor.map(|d| (d.entries(), d.flavor.clone()));
    let (entries, flavor, used_fallback) = match supplied {
        Some((entries, flavor)) if !entries.is_empty() => (entries, flavor, false),
        _ => {
            if descriptor.is_some() {
                warn!(
                    square = %trigger.square,
                    "reaction descriptor had no usable entries, using fallback"
                );
            } else {
                debug!(square = %trigger.square, "no reaction descriptor, using fallback");
            }
            let fallback = fallback_descriptor(trigger.element);
            (fallback.entries(), fallback.flavor, true)
        }
    };

    let resolver = Resolver {
        board,
        trigger: trigger.square,
        acting: trigger.acting,
        outcome: trigger.outcome,
        cap: trigger.cap,
    };
    let effects = resolver.resolve(&entries);
    debug!(
        square = %trigger.square,
        entries = entries.len(),
        effects = effects.len(),
        "reaction resolved"
    );
    ReactionPlan {
        waves: into_waves(&effects),
        used_fallback,
        flavor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::TileEffectKind;

    fn trigger(element: &str) -> Trigger<'_> {
        Trigger {
            square: Square::D5,
            acting: Side::White,
            outcome: TradeOutcome::Draw,
            element,
            cap: DEFAULT_EFFECT_CAP,
        }
    }

    #[test]
    fn absent_descriptor_uses_fallback() {
        let board: BoardState = "4k3/8/8/3Q4/8/8/8/4K3".parse().unwrap();
        let plan = plan_reaction(&board, trigger("Fire"), None);
        assert!(plan.used_fallback);
        assert_eq!(plan.effect_count(), 8);
        let first = plan.waves[0].effects[0];
        assert!(matches!(
            first.action,
            ResolvedAction::Tile(t) if t.kind == TileEffectKind::Burning && t.duration == 4
        ));
    }

    #[test]
    fn garbage_descriptor_uses_fallback() {
        let board = BoardState::empty();
        let descriptor =
            ReactionDescriptor::from_json(r#"{"effects": [{"pattern": "spiral"}]}"#).unwrap();
        let plan = plan_reaction(&board, trigger("Ice"), Some(&descriptor));
        assert!(plan.used_fallback);
        assert_eq!(plan.effect_count(), 8);
    }

    #[test]
    fn valid_descriptor_is_used() {
        let board = BoardState::empty();
        let descriptor = ReactionDescriptor::from_json(
            r#"{"effects": [{"pattern": "x", "distance": 7, "effect": "ice"}], "flavor": "frost lines"}"#,
        )
        .unwrap();
        let plan = plan_reaction(&board, trigger("Ice"), Some(&descriptor));
        assert!(!plan.used_fallback);
        assert_eq!(plan.flavor, "frost lines");
        assert_eq!(plan.effect_count(), DEFAULT_EFFECT_CAP);
        assert_eq!(plan.waves[0].distance, Some(1));
    }
}
