//! Status effects bound to pieces and to tiles.
//!
//! Durations follow one convention everywhere: a negative duration is
//! permanent, a positive duration is decremented once per owning-side turn,
//! and an effect whose duration reaches zero is removed in the same tick.

use std::fmt;
use std::mem;

use crate::piece_kind::PieceKind;
use crate::side::Side;

/// Which effects a cleanse removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanseMode {
    /// Remove beneficial effects (shields).
    Positive,
    /// Remove harmful effects.
    Negative,
    /// Remove everything.
    All,
}

impl CleanseMode {
    /// Parse a cleanse polarity, returning `None` for unrecognized values.
    pub fn parse(s: &str) -> Option<CleanseMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "buffs" | "buff" | "good" => Some(CleanseMode::Positive),
            "negative" | "debuffs" | "debuff" | "bad" => Some(CleanseMode::Negative),
            "all" | "both" | "any" => Some(CleanseMode::All),
            _ => None,
        }
    }

    /// Return `true` if this mode strips `kind`.
    pub fn removes(self, kind: &PieceEffectKind) -> bool {
        match self {
            CleanseMode::All => true,
            CleanseMode::Positive => kind.is_beneficial(),
            CleanseMode::Negative => !kind.is_beneficial(),
        }
    }
}

/// The kind of a piece effect together with its kind-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceEffectKind {
    /// Instant: destroys the piece unless it is shielded. Never stored.
    Damage,
    /// The piece cannot be selected or moved.
    Stun,
    /// Displacement applied on arrival, then kept as a marker.
    Push {
        /// Row step of the push vector (-1, 0 or 1).
        d_row: i8,
        /// Column step of the push vector (-1, 0 or 1).
        d_col: i8,
        /// Maximum number of cells travelled.
        distance: u8,
    },
    /// Absorbs damage and hides a king from check detection.
    Shield,
    /// The piece fights for the other side until expiry.
    Convert,
    /// Deals damage when the duration runs out.
    Poison,
    /// The piece moves as another kind until expiry.
    Transform(PieceKind),
    /// Mirrors a burning tile under the piece.
    Burning,
    /// Mirrors an overgrown tile under the piece.
    Plant,
    /// Instant: strips effects according to the mode. Never stored.
    Cleanse(CleanseMode),
}

impl PieceEffectKind {
    /// Return `true` for kinds a positive cleanse removes.
    #[inline]
    pub const fn is_beneficial(&self) -> bool {
        matches!(self, PieceEffectKind::Shield)
    }

    /// Return `true` if both values are the same kind, ignoring payload.
    #[inline]
    pub fn same_kind(&self, other: &PieceEffectKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Lowercase name used in dumps and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            PieceEffectKind::Damage => "damage",
            PieceEffectKind::Stun => "stun",
            PieceEffectKind::Push { .. } => "push",
            PieceEffectKind::Shield => "shield",
            PieceEffectKind::Convert => "convert",
            PieceEffectKind::Poison => "poison",
            PieceEffectKind::Transform(_) => "transform",
            PieceEffectKind::Burning => "burning",
            PieceEffectKind::Plant => "plant",
            PieceEffectKind::Cleanse(_) => "cleanse",
        }
    }
}

/// An effect attached to a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceEffect {
    pub kind: PieceEffectKind,
    pub duration: i32,
}

impl PieceEffect {
    /// Create a piece effect.
    pub const fn new(kind: PieceEffectKind, duration: i32) -> PieceEffect {
        PieceEffect { kind, duration }
    }

    /// Create an instant effect (duration is irrelevant and set to zero).
    pub const fn instant(kind: PieceEffectKind) -> PieceEffect {
        PieceEffect { kind, duration: 0 }
    }

    /// Return `true` if the effect never expires.
    #[inline]
    pub const fn is_permanent(&self) -> bool {
        self.duration < 0
    }

    /// Decrement the duration. Returns `true` if the effect has expired.
    #[inline]
    pub fn tick(&mut self) -> bool {
        tick_duration(&mut self.duration)
    }
}

impl fmt::Display for PieceEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PieceEffectKind::Transform(kind) => write!(f, "transform:{}", kind.letter())?,
            PieceEffectKind::Push { d_row, d_col, distance } => {
                write!(f, "push:{d_row},{d_col}x{distance}")?
            }
            other => f.write_str(other.name())?,
        }
        if self.is_permanent() {
            write!(f, "(perm)")
        } else {
            write!(f, "({})", self.duration)
        }
    }
}

/// The kind of a tile effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileEffectKind {
    /// Damages a piece that stays for three consecutive turns.
    Burning,
    /// Pieces entering slide onward in their entry direction.
    Ice,
    /// Stuns a piece that stays for two consecutive turns.
    Plant,
    /// A wall: movement and attacks may end on it but never pass through.
    Occupied,
}

impl TileEffectKind {
    /// All tile effect kinds.
    pub const ALL: [TileEffectKind; 4] = [
        TileEffectKind::Burning,
        TileEffectKind::Ice,
        TileEffectKind::Plant,
        TileEffectKind::Occupied,
    ];

    /// Lowercase name used in dumps and logs.
    pub const fn name(self) -> &'static str {
        match self {
            TileEffectKind::Burning => "burning",
            TileEffectKind::Ice => "ice",
            TileEffectKind::Plant => "plant",
            TileEffectKind::Occupied => "wall",
        }
    }

    /// Minimum duration before the creation bonus is added.
    pub const fn duration_floor(self) -> i32 {
        match self {
            TileEffectKind::Burning => 3,
            _ => 1,
        }
    }

    /// The piece marker mirroring this tile, if any.
    pub const fn piece_marker(self) -> Option<PieceEffectKind> {
        match self {
            TileEffectKind::Burning => Some(PieceEffectKind::Burning),
            TileEffectKind::Plant => Some(PieceEffectKind::Plant),
            _ => None,
        }
    }
}

/// An effect attached to a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEffect {
    pub kind: TileEffectKind,
    pub duration: i32,
    /// The side on whose turns this effect runs and ticks.
    pub owner: Side,
}

impl TileEffect {
    /// Create a tile effect.
    pub const fn new(kind: TileEffectKind, duration: i32, owner: Side) -> TileEffect {
        TileEffect { kind, duration, owner }
    }

    /// Return `true` if the effect never expires.
    #[inline]
    pub const fn is_permanent(&self) -> bool {
        self.duration < 0
    }

    /// Decrement the duration. Returns `true` if the effect has expired.
    #[inline]
    pub fn tick(&mut self) -> bool {
        tick_duration(&mut self.duration)
    }
}

impl fmt::Display for TileEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_permanent() {
            write!(f, "{}(perm,{})", self.kind.name(), self.owner)
        } else {
            write!(f, "{}({},{})", self.kind.name(), self.duration, self.owner)
        }
    }
}

fn tick_duration(duration: &mut i32) -> bool {
    if *duration < 0 {
        return false;
    }
    *duration -= 1;
    *duration <= 0
}
