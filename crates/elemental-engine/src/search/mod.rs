//! Ranking candidate moves.

pub mod control;
pub mod negamax;
pub mod ordering;

use std::fmt;

use elemental_core::Square;
use tracing::debug;

use crate::board::FlatBoard;
use crate::movegen::generate_legal_moves;
use control::SearchControl;
use negamax::{INF, SearchContext, negamax};
use ordering::MovePicker;

/// How deep to search and how many moves to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Plies searched below each root move. Clamped to at least 1.
    pub depth: u8,
    /// Maximum number of ranked moves returned.
    pub count: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits { depth: 3, count: 5 }
    }
}

/// A root move with its score for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedMove {
    pub from: Square,
    pub to: Square,
    pub score: i32,
}

impl fmt::Display for RankedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Rank the legal moves of `board`, best first.
///
/// Every root move is searched with a full window to `limits.depth` plies
/// in total, so scores are exact and comparable. Ties keep move-ordering
/// order. A stopped search returns the moves finished so far.
pub fn rank_moves(
    board: &FlatBoard,
    limits: SearchLimits,
    control: &SearchControl,
) -> Vec<RankedMove> {
    let depth = limits.depth.max(1);
    let mut scratch = board.clone();
    let mut ctx = SearchContext { control, nodes: 0 };
    let mut ranked = Vec::new();

    let mut picker = MovePicker::new(generate_legal_moves(board));
    while let Some(mv) = picker.pick_next() {
        let undo = scratch.make_move(mv);
        let score = -negamax(&mut scratch, depth - 1, -INF, INF, &mut ctx);
        scratch.unmake_move(undo);
        if control.should_stop(ctx.nodes) {
            break;
        }
        ranked.push(RankedMove {
            from: mv.from,
            to: mv.to,
            score,
        });
    }

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limits.count);
    debug!(depth, nodes = ctx.nodes, returned = ranked.len(), "moves ranked");
    ranked
}
