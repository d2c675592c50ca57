//! Deterministic local reaction used when the generator gives nothing usable.

use serde_json::json;

use crate::effect::TileEffectKind;

use super::descriptor::ReactionDescriptor;

/// Raw duration of the fallback effect, before floors and bonus.
pub const FALLBACK_DURATION: i32 = 2;

const FIRE_WORDS: &[&str] = &["fire", "flame", "lava", "magma", "heat", "ember", "sun", "burn"];
const ICE_WORDS: &[&str] = &["ice", "frost", "snow", "water", "cold", "freeze", "glacier", "steam"];
const PLANT_WORDS: &[&str] = &[
    "plant", "wood", "leaf", "forest", "nature", "vine", "earth", "grass", "tree", "seed",
];

/// Tile kind for the fallback reaction, chosen by keywords in the element
/// name. Fire words win over ice words, which win over plant words; anything
/// else burns.
pub fn fallback_kind(element: &str) -> TileEffectKind {
    let name = element.to_ascii_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| name.contains(w));
    if mentions(FIRE_WORDS) {
        TileEffectKind::Burning
    } else if mentions(ICE_WORDS) {
        TileEffectKind::Ice
    } else if mentions(PLANT_WORDS) {
        TileEffectKind::Plant
    } else {
        TileEffectKind::Burning
    }
}

/// A radius-1 area of the element's tile kind on empty cells.
pub fn fallback_descriptor(element: &str) -> ReactionDescriptor {
    let kind = fallback_kind(element);
    ReactionDescriptor {
        effects: vec![json!({
            "pattern": "area",
            "distance": 1,
            "obstruction": false,
            "target": "empty",
            "effect": kind.name(),
            "duration": FALLBACK_DURATION,
        })],
        flavor: format!("{element} flares around the capture"),
    }
}
