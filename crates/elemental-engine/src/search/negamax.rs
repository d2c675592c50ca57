//! Negamax alpha-beta search.

use crate::board::FlatBoard;
use crate::evaluate;
use crate::movegen::generate_legal_moves;
use crate::search::control::SearchControl;
use crate::search::ordering::MovePicker;

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Base score for checkmate, raised by the remaining depth so that
/// shallower mates score higher.
pub const MATE_SCORE: i32 = 100_000;

/// Mutable state threaded through one search.
pub(crate) struct SearchContext<'a> {
    pub control: &'a SearchControl,
    pub nodes: u64,
}

/// Negamax with alpha-beta pruning. Returns the score for the side to move.
pub(crate) fn negamax(
    board: &mut FlatBoard,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;
    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }

    if depth == 0 {
        return evaluate(board);
    }

    let moves = generate_legal_moves(board);
    if moves.is_empty() {
        let side = board.side_to_move();
        return if board.in_check(side) {
            -(MATE_SCORE + depth as i32)
        } else {
            0
        };
    }

    let mut best = -INF;
    let mut picker = MovePicker::new(moves);
    while let Some(mv) = picker.pick_next() {
        let undo = board.make_move(mv);
        let score = -negamax(board, depth - 1, -beta, -alpha, ctx);
        board.unmake_move(undo);

        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}
