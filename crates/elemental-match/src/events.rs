//! Notifications emitted to presentation collaborators.

use elemental_core::reaction::{MixResult, TradeOutcome, Wave, WaveReport};
use elemental_core::{GameOutcome, Piece, Side, Square, TickReport};

/// A discrete notification from a [`Match`](crate::Match).
///
/// Per turn, events arrive in this order: `MoveCommitted`, then for a
/// capture `PieceCaptured`, `CaptureResolved` and one `ReactionWave` per
/// wave, then `Slid` if the mover crossed ice, `Ticked` if the end-of-turn
/// tick changed anything, and finally `TurnChanged` or `GameOver`.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    MoveCommitted {
        side: Side,
        from: Square,
        to: Square,
        /// Rook relocation for a castle, as (from, to).
        castle: Option<(Square, Square)>,
        promoted: bool,
    },
    PieceCaptured {
        square: Square,
        piece: Piece,
    },
    CaptureResolved {
        square: Square,
        mix: MixResult,
        trade: TradeOutcome,
        flavor: String,
        used_fallback: bool,
    },
    ReactionWave {
        index: usize,
        wave: Wave,
        report: WaveReport,
    },
    Slid {
        from: Square,
        to: Square,
    },
    Ticked {
        side: Side,
        report: TickReport,
    },
    TurnChanged {
        side_to_move: Side,
        turn: u32,
    },
    GameOver {
        outcome: GameOutcome,
    },
}

/// Receives match notifications. Return values are never consulted.
pub trait MatchObserver {
    fn notify(&mut self, event: &MatchEvent);
}

impl<F> MatchObserver for F
where
    F: FnMut(&MatchEvent),
{
    fn notify(&mut self, event: &MatchEvent) {
        self(event)
    }
}
