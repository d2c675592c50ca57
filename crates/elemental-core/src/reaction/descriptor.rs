//! Reaction descriptors: the untrusted JSON boundary and its typed form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::effect::{CleanseMode, TileEffectKind};
use crate::error::DescriptorError;
use crate::piece_kind::PieceKind;

use super::pattern::{MAX_DISTANCE, Pattern};
use super::polarity::{Binding, TargetSpec};

/// Default push distance when a descriptor omits it.
const DEFAULT_PUSH_DISTANCE: u8 = 1;

/// A reaction as supplied by the generator.
///
/// Entries stay as raw JSON values so that one malformed entry cannot spoil
/// the rest; [`ReactionDescriptor::entries`] decodes them one at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionDescriptor {
    #[serde(default, alias = "reactions", alias = "entries")]
    pub effects: Vec<Value>,
    #[serde(default, alias = "description", alias = "flavour")]
    pub flavor: String,
}

/// Field layout of one entry on the wire. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    #[serde(alias = "shape")]
    pattern: Option<String>,
    #[serde(alias = "radius", alias = "range")]
    distance: Option<i64>,
    #[serde(alias = "obstructed", alias = "blocked")]
    obstruction: Option<bool>,
    #[serde(alias = "targets", alias = "polarity")]
    target: Option<String>,
    #[serde(flatten)]
    effect: RawEffect,
    combo: Vec<RawEffect>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEffect {
    #[serde(alias = "kind", alias = "type")]
    effect: Option<String>,
    #[serde(alias = "turns")]
    duration: Option<i64>,
    direction: Option<String>,
    push_distance: Option<i64>,
    #[serde(alias = "transform_to", alias = "into")]
    piece: Option<String>,
    #[serde(alias = "cleanse")]
    mode: Option<String>,
}

/// Symbolic push direction, relative to the trigger square or absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushDirection {
    Outwards,
    Inwards,
    Clockwise,
    CounterClockwise,
    /// A fixed `(d_row, d_col)` unit vector; row 0 is rank 8.
    Absolute(i8, i8),
}

impl PushDirection {
    /// Parse a direction name.
    pub fn parse(s: &str) -> Option<PushDirection> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "outwards" | "outward" | "away" => Some(PushDirection::Outwards),
            "inwards" | "inward" | "toward" | "towards" => Some(PushDirection::Inwards),
            "clockwise" | "cw" => Some(PushDirection::Clockwise),
            "counter_clockwise" | "counterclockwise" | "anticlockwise" | "anti_clockwise" | "ccw" => {
                Some(PushDirection::CounterClockwise)
            }
            "north" | "up" => Some(PushDirection::Absolute(-1, 0)),
            "south" | "down" => Some(PushDirection::Absolute(1, 0)),
            "east" | "right" => Some(PushDirection::Absolute(0, 1)),
            "west" | "left" => Some(PushDirection::Absolute(0, -1)),
            _ => None,
        }
    }

    /// Concrete unit vector for a cell at `delta` from the trigger.
    ///
    /// Relative directions have no vector on the trigger itself.
    pub fn vector(self, (d_row, d_col): (i8, i8)) -> Option<(i8, i8)> {
        let out = (d_row.signum(), d_col.signum());
        if out == (0, 0) && !matches!(self, PushDirection::Absolute(..)) {
            return None;
        }
        Some(match self {
            PushDirection::Outwards => out,
            PushDirection::Inwards => (-out.0, -out.1),
            PushDirection::Clockwise => (out.1, -out.0),
            PushDirection::CounterClockwise => (-out.1, out.0),
            PushDirection::Absolute(r, c) => (r, c),
        })
    }
}

/// A validated effect kind with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectSpec {
    Damage,
    Stun,
    Shield,
    Convert,
    Poison,
    Push { direction: PushDirection, distance: u8 },
    Transform(PieceKind),
    Cleanse(CleanseMode),
    Tile(TileEffectKind),
}

impl EffectSpec {
    /// Whether the effect lands on a piece or a tile.
    pub const fn binding(self) -> Binding {
        match self {
            EffectSpec::Tile(_) => Binding::Tile,
            _ => Binding::Piece,
        }
    }

    /// Kinds a king is immune to.
    pub const fn spares_kings(self) -> bool {
        matches!(self, EffectSpec::Damage | EffectSpec::Convert | EffectSpec::Transform(_))
    }
}

/// One validated effect of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryEffect {
    pub spec: EffectSpec,
    /// Raw duration before floors and the creation bonus; negative is
    /// permanent.
    pub duration: i32,
}

/// A validated descriptor entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    pub pattern: Pattern,
    pub distance: u8,
    pub obstruction: bool,
    pub target: TargetSpec,
    /// The entry's effects, applied to the same cells. Never empty.
    pub effects: Vec<EntryEffect>,
}

impl ReactionDescriptor {
    /// Decode a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<ReactionDescriptor, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every entry, skipping the malformed ones.
    pub fn entries(&self) -> Vec<ReactionEntry> {
        self.effects
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let entry = decode_entry(value);
                if entry.is_none() {
                    debug!(index, "skipping malformed reaction entry");
                }
                entry
            })
            .collect()
    }
}

fn decode_entry(value: &Value) -> Option<ReactionEntry> {
    let raw: RawEntry = serde_json::from_value(value.clone()).ok()?;
    let pattern = Pattern::parse(raw.pattern.as_deref()?)?;
    let distance = raw.distance.unwrap_or(1).clamp(0, MAX_DISTANCE as i64) as u8;
    let target = TargetSpec::parse(raw.target.as_deref().unwrap_or("any"))?;

    let effects: Vec<EntryEffect> = std::iter::once(&raw.effect)
        .chain(raw.combo.iter())
        .filter_map(decode_effect)
        .collect();
    if effects.is_empty() {
        return None;
    }

    Some(ReactionEntry {
        pattern,
        distance,
        obstruction: raw.obstruction.unwrap_or(false),
        target,
        effects,
    })
}

fn decode_effect(raw: &RawEffect) -> Option<EntryEffect> {
    let name = raw.effect.as_deref()?.trim().to_ascii_lowercase();
    let spec = match name.as_str() {
        "damage" | "destroy" | "kill" => EffectSpec::Damage,
        "stun" | "freeze_piece" | "paralyze" => EffectSpec::Stun,
        "shield" | "protect" => EffectSpec::Shield,
        "convert" | "charm" => EffectSpec::Convert,
        "poison" => EffectSpec::Poison,
        "push" | "knockback" => {
            let direction = match raw.direction.as_deref() {
                Some(d) => PushDirection::parse(d)?,
                None => PushDirection::Outwards,
            };
            let distance = raw
                .push_distance
                .map_or(DEFAULT_PUSH_DISTANCE, |d| d.clamp(1, MAX_DISTANCE as i64) as u8);
            EffectSpec::Push { direction, distance }
        }
        "transform" | "polymorph" => {
            let kind = PieceKind::from_name(raw.piece.as_deref()?)?;
            if kind == PieceKind::King {
                return None;
            }
            EffectSpec::Transform(kind)
        }
        "cleanse" | "purify" => {
            EffectSpec::Cleanse(CleanseMode::parse(raw.mode.as_deref().unwrap_or("all"))?)
        }
        "burning" | "burn" | "fire" => EffectSpec::Tile(TileEffectKind::Burning),
        "ice" | "frozen" => EffectSpec::Tile(TileEffectKind::Ice),
        "plant" | "vines" | "overgrowth" => EffectSpec::Tile(TileEffectKind::Plant),
        "occupied" | "wall" | "block" => EffectSpec::Tile(TileEffectKind::Occupied),
        _ => return None,
    };
    let duration = raw.duration.unwrap_or(1).clamp(-1, 99) as i32;
    Some(EntryEffect { spec, duration })
}
