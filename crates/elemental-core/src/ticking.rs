//! End-of-turn effect processing for the side that just moved.

use tracing::debug;

use crate::board::BoardState;
use crate::effect::{PieceEffect, PieceEffectKind, TileEffectKind};
use crate::piece::Piece;
use crate::side::Side;
use crate::square::Square;
use crate::status::{EffectOutcome, revert};

/// Consecutive turns on a burning tile before the occupant takes damage.
pub const BURN_TURNS: u8 = 3;

/// Consecutive turns on a plant tile before the occupant is stunned.
pub const GROWTH_TURNS: u8 = 2;

/// Everything that changed during one [`tick_side`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Pieces destroyed by poison or burning, with the square they stood on.
    pub destroyed: Vec<(Square, Piece)>,
    /// Squares whose occupant was stunned by a plant tile.
    pub stunned: Vec<Square>,
    /// Squares whose occupant reverted a Convert or Transform.
    pub reverted: Vec<Square>,
    /// Piece effects that expired, by square.
    pub expired_piece_effects: Vec<(Square, PieceEffectKind)>,
    /// Tile effects that expired.
    pub expired_tile_effects: Vec<(Square, TileEffectKind)>,
}

impl TickReport {
    /// Return `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty()
            && self.stunned.is_empty()
            && self.reverted.is_empty()
            && self.expired_piece_effects.is_empty()
            && self.expired_tile_effects.is_empty()
    }
}

/// Run end-of-turn processing for `side`.
///
/// Piece effects of `side`'s pieces tick first, then the logic of tiles
/// owned by `side` runs, then those tiles' durations tick. A tile can
/// therefore still fire on the turn it expires.
pub fn tick_side(board: &mut BoardState, side: Side) -> TickReport {
    let mut report = TickReport::default();
    tick_piece_effects(board, side, &mut report);
    run_tile_logic(board, side, &mut report);
    tick_tile_durations(board, side, &mut report);
    board.sync_hazard_markers();
    report
}

fn tick_piece_effects(board: &mut BoardState, side: Side, report: &mut TickReport) {
    let squares: Vec<Square> = board.pieces(side).map(|(sq, _)| sq).collect();
    for sq in squares {
        let mut poisoned = false;
        if let Some(piece) = board.piece_at_mut(sq) {
            let mut i = 0;
            while i < piece.effects().len() {
                let expired = piece.effects_mut()[i].tick();
                if !expired {
                    i += 1;
                    continue;
                }
                let effect = piece.effects_mut().remove(i);
                report.expired_piece_effects.push((sq, effect.kind));
                match effect.kind {
                    PieceEffectKind::Convert | PieceEffectKind::Transform(_) => {
                        revert(piece, &effect.kind);
                        report.reverted.push(sq);
                    }
                    PieceEffectKind::Poison => {
                        poisoned = true;
                        break;
                    }
                    _ => {}
                }
            }
        }

        if poisoned {
            debug!(square = %sq, "poison expired");
            if let EffectOutcome::Destroyed(piece) =
                board.add_piece_effect(sq, PieceEffect::instant(PieceEffectKind::Damage))
            {
                report.destroyed.push((sq, piece));
            }
        }
    }
}

fn run_tile_logic(board: &mut BoardState, side: Side, report: &mut TickReport) {
    for sq in Square::all() {
        let owns = |kind| board.tile_effect(sq, kind).is_some_and(|e| e.owner == side);
        let burning = owns(TileEffectKind::Burning);
        let overgrown = owns(TileEffectKind::Plant);
        if !burning && !overgrown {
            continue;
        }
        if burning {
            let occupant = board.piece_at(sq).map(Piece::id);
            let turns = board.tile_mut(sq).burn.advance(occupant);
            if turns >= BURN_TURNS {
                board.tile_mut(sq).burn.reset();
                debug!(square = %sq, turns, "burning tile fires");
                if let EffectOutcome::Destroyed(piece) =
                    board.add_piece_effect(sq, PieceEffect::instant(PieceEffectKind::Damage))
                {
                    report.destroyed.push((sq, piece));
                }
            }
        }

        if overgrown {
            let occupant = board.piece_at(sq).map(Piece::id);
            let turns = board.tile_mut(sq).growth.advance(occupant);
            if turns >= GROWTH_TURNS {
                board.tile_mut(sq).growth.reset();
                debug!(square = %sq, turns, "plant tile stuns occupant");
                board.add_piece_effect(sq, PieceEffect::new(PieceEffectKind::Stun, 1));
                report.stunned.push(sq);
            }
        }
    }
}

fn tick_tile_durations(board: &mut BoardState, side: Side, report: &mut TickReport) {
    for sq in Square::all() {
        let mut expired = Vec::new();
        for effect in board.tile_mut(sq).effects_mut().iter_mut() {
            if effect.owner == side && effect.tick() {
                expired.push(effect.kind);
            }
        }
        for kind in expired {
            board.remove_tile_effect(sq, kind);
            report.expired_tile_effects.push((sq, kind));
        }
    }
}
