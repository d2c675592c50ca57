//! Applying and clearing status effects on pieces and tiles.

use tracing::debug;

use crate::board::BoardState;
use crate::effect::{CleanseMode, PieceEffect, PieceEffectKind, TileEffect, TileEffectKind};
use crate::piece::Piece;
use crate::square::Square;

/// What happened when a piece effect was applied to a square.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectOutcome {
    /// The effect was stored on the occupant.
    Applied,
    /// An active effect of the same kind was refreshed in place.
    Refreshed,
    /// Damage destroyed the occupant.
    Destroyed(Piece),
    /// Damage hit a shielded occupant and was ignored.
    Absorbed,
    /// The occupant was displaced to `to` (which may equal its origin when
    /// the first step is blocked).
    Pushed {
        /// Where the piece ended up.
        to: Square,
    },
    /// A cleanse removed `removed` effects.
    Cleansed {
        /// Number of effects removed.
        removed: usize,
    },
    /// The square was empty.
    NoTarget,
}

impl BoardState {
    /// Apply a piece effect to the occupant of `sq`.
    ///
    /// Instant kinds (Damage, Cleanse) act immediately and are never stored.
    /// Every other kind is stored, replacing any active effect of the same
    /// kind, so a piece never carries two of one kind.
    pub fn add_piece_effect(&mut self, sq: Square, effect: PieceEffect) -> EffectOutcome {
        let Some(piece) = self.piece_at_mut(sq) else {
            return EffectOutcome::NoTarget;
        };

        match effect.kind {
            PieceEffectKind::Damage => {
                if piece.is_shielded() {
                    debug!(square = %sq, "damage absorbed by shield");
                    return EffectOutcome::Absorbed;
                }
                match self.remove(sq) {
                    Some(victim) => {
                        debug!(square = %sq, piece = %victim, "piece destroyed by damage");
                        EffectOutcome::Destroyed(victim)
                    }
                    None => EffectOutcome::NoTarget,
                }
            }
            PieceEffectKind::Cleanse(mode) => {
                let removed = cleanse(piece, mode);
                EffectOutcome::Cleansed { removed }
            }
            PieceEffectKind::Convert => {
                if !piece.has_effect(&PieceEffectKind::Convert) {
                    let flipped = !piece.side();
                    piece.set_side(flipped);
                }
                store(piece, effect)
            }
            PieceEffectKind::Transform(target) => {
                piece.set_kind(target);
                store(piece, effect)
            }
            PieceEffectKind::Push {
                d_row,
                d_col,
                distance,
            } => {
                let to = self.push_destination(sq, d_row, d_col, distance);
                if to != sq {
                    self.relocate_without_moving(sq, to);
                }
                if effect.duration != 0
                    && let Some(piece) = self.piece_at_mut(to)
                {
                    piece.insert_effect(effect);
                }
                debug!(from = %sq, to = %to, "piece pushed");
                EffectOutcome::Pushed { to }
            }
            _ => store(piece, effect),
        }
    }

    /// Remove the active effect of the same kind as `probe` from the
    /// occupant of `sq`, reverting Convert and Transform.
    pub fn remove_piece_effect(
        &mut self,
        sq: Square,
        probe: &PieceEffectKind,
    ) -> Option<PieceEffect> {
        let piece = self.piece_at_mut(sq)?;
        let removed = piece.remove_effect(probe)?;
        revert(piece, &removed.kind);
        Some(removed)
    }

    /// Add a tile effect to `sq`, replacing any active effect of the same kind.
    ///
    /// Burning and Plant also mark the current occupant.
    pub fn add_tile_effect(&mut self, sq: Square, effect: TileEffect) -> Option<TileEffect> {
        let tile = self.tile_mut(sq);
        let effects = tile.effects_mut();
        let previous = match effects.iter_mut().find(|e| e.kind == effect.kind) {
            Some(slot) => Some(std::mem::replace(slot, effect)),
            None => {
                effects.push(effect);
                None
            }
        };
        if let Some(marker) = effect.kind.piece_marker()
            && let Some(piece) = self.piece_at_mut(sq)
            && !piece.has_effect(&marker)
        {
            piece.insert_effect(PieceEffect::new(marker, -1));
        }
        previous
    }

    /// Remove the tile effect of `kind` from `sq`.
    ///
    /// Clears the matching marker on the occupant and resets the hazard
    /// streak the effect was driving.
    pub fn remove_tile_effect(&mut self, sq: Square, kind: TileEffectKind) -> Option<TileEffect> {
        let tile = self.tile_mut(sq);
        let effects = tile.effects_mut();
        let pos = effects.iter().position(|e| e.kind == kind)?;
        let removed = effects.remove(pos);
        match kind {
            TileEffectKind::Burning => tile.burn.reset(),
            TileEffectKind::Plant => tile.growth.reset(),
            TileEffectKind::Ice | TileEffectKind::Occupied => {}
        }
        if let Some(marker) = kind.piece_marker()
            && let Some(piece) = self.piece_at_mut(sq)
        {
            piece.remove_effect(&marker);
        }
        Some(removed)
    }

    /// Last square reachable from `from` stepping `(d_row, d_col)` up to
    /// `distance` times. Stops before a piece or the board edge, and on a wall.
    pub fn push_destination(&self, from: Square, d_row: i8, d_col: i8, distance: u8) -> Square {
        let mut current = from;
        if d_row == 0 && d_col == 0 {
            return current;
        }
        for _ in 0..distance {
            let Some(next) = current.offset(d_row, d_col) else {
                break;
            };
            if self.is_occupied(next) {
                break;
            }
            current = next;
            if self.is_wall(next) {
                break;
            }
        }
        current
    }

    fn relocate_without_moving(&mut self, from: Square, to: Square) {
        let moved = self.piece_at(from).is_some_and(Piece::has_moved);
        self.relocate(from, to);
        self.set_moved(to, moved);
    }
}

fn store(piece: &mut Piece, effect: PieceEffect) -> EffectOutcome {
    if effect.duration == 0 {
        return EffectOutcome::Applied;
    }
    match piece.insert_effect(effect) {
        Some(_) => EffectOutcome::Refreshed,
        None => EffectOutcome::Applied,
    }
}

fn cleanse(piece: &mut Piece, mode: CleanseMode) -> usize {
    let (removed, kept): (Vec<_>, Vec<_>) = piece
        .effects_mut()
        .drain(..)
        .partition(|e| mode.removes(&e.kind));
    *piece.effects_mut() = kept;
    for effect in &removed {
        revert(piece, &effect.kind);
    }
    removed.len()
}

/// Undo the state change an effect made when it was applied.
pub(crate) fn revert(piece: &mut Piece, kind: &PieceEffectKind) {
    match kind {
        PieceEffectKind::Convert => {
            let side = piece.original_side();
            piece.set_side(side);
        }
        PieceEffectKind::Transform(_) => {
            let kind = piece.original_kind();
            piece.set_kind(kind);
        }
        _ => {}
    }
}
