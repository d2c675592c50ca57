//! Applying resolved effects wave by wave.

use tracing::debug;

use crate::board::BoardState;
use crate::piece::Piece;
use crate::square::Square;
use crate::status::EffectOutcome;

use super::resolve::{ResolvedAction, ResolvedEffect};

/// A group of effects applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    /// Originating entry index.
    pub entry: usize,
    /// Distance from the trigger, or `None` for a discrete pattern applied
    /// all at once.
    pub distance: Option<u8>,
    pub effects: Vec<ResolvedEffect>,
}

/// Outcome of applying one wave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveReport {
    pub destroyed: Vec<(Square, Piece)>,
    /// Pieces pushed, as (from, to).
    pub pushed: Vec<(Square, Square)>,
    pub applied: usize,
}

/// Group effects by entry, then by distance from the trigger.
///
/// Entry order and the relative order of effects inside a wave are kept.
pub fn into_waves(effects: &[ResolvedEffect]) -> Vec<Wave> {
    let mut waves: Vec<Wave> = Vec::new();
    let mut start = 0;
    while start < effects.len() {
        let entry = effects[start].entry;
        let end = effects[start..]
            .iter()
            .position(|e| e.entry != entry)
            .map_or(effects.len(), |n| start + n);
        let group = &effects[start..end];

        if group[0].discrete {
            waves.push(Wave {
                entry,
                distance: None,
                effects: group.to_vec(),
            });
        } else {
            let mut distances: Vec<u8> = group.iter().map(|e| e.wave).collect();
            distances.sort_unstable();
            distances.dedup();
            for distance in distances {
                waves.push(Wave {
                    entry,
                    distance: Some(distance),
                    effects: group.iter().filter(|e| e.wave == distance).copied().collect(),
                });
            }
        }
        start = end;
    }
    waves
}

/// Apply one wave to the board.
pub fn apply_wave(board: &mut BoardState, wave: &Wave) -> WaveReport {
    let mut report = WaveReport::default();
    for effect in &wave.effects {
        match effect.action {
            ResolvedAction::Tile(tile) => {
                board.add_tile_effect(effect.square, tile);
                report.applied += 1;
            }
            ResolvedAction::Piece(piece_effect) => {
                match board.add_piece_effect(effect.square, piece_effect) {
                    EffectOutcome::Destroyed(piece) => {
                        report.destroyed.push((effect.square, piece));
                        report.applied += 1;
                    }
                    EffectOutcome::Pushed { to } => {
                        report.pushed.push((effect.square, to));
                        report.applied += 1;
                    }
                    EffectOutcome::NoTarget => {
                        debug!(
                            square = %effect.square,
                            "reaction target vanished before it applied"
                        );
                    }
                    _ => report.applied += 1,
                }
            }
        }
    }
    report
}

/// Apply every wave in order and merge the reports.
pub fn apply_all(board: &mut BoardState, waves: &[Wave]) -> WaveReport {
    let mut total = WaveReport::default();
    for wave in waves {
        let report = apply_wave(board, wave);
        total.destroyed.extend(report.destroyed);
        total.pushed.extend(report.pushed);
        total.applied += report.applied;
    }
    total
}
