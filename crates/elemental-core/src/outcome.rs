//! Game-end detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::movegen::{has_legal_move, is_in_check};
use crate::side::Side;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum GameOutcome {
    /// The side to move is in check with no legal move.
    Checkmate { winner: Side },
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// A king left the board (captured while shielded, or destroyed by an
    /// effect).
    KingLost { winner: Side },
    /// Both kings left the board in the same turn.
    MutualKingLoss,
    /// A structural invariant broke and the match cannot continue.
    Aborted,
}

impl GameOutcome {
    /// The winning side, if the outcome is decisive.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::KingLost { winner } => Some(winner),
            GameOutcome::Stalemate | GameOutcome::MutualKingLoss | GameOutcome::Aborted => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => f.write_str("stalemate"),
            GameOutcome::KingLost { winner } => write!(f, "king lost, {winner} wins"),
            GameOutcome::MutualKingLoss => f.write_str("both kings lost"),
            GameOutcome::Aborted => f.write_str("aborted"),
        }
    }
}

/// Decide whether the game is over with `side_to_move` about to play.
///
/// Missing kings are checked first, then checkmate and stalemate.
pub fn game_status(board: &BoardState, side_to_move: Side) -> Option<GameOutcome> {
    let white = board.king_square(Side::White).is_some();
    let black = board.king_square(Side::Black).is_some();
    match (white, black) {
        (false, false) => return Some(GameOutcome::MutualKingLoss),
        (false, true) => return Some(GameOutcome::KingLost { winner: Side::Black }),
        (true, false) => return Some(GameOutcome::KingLost { winner: Side::White }),
        (true, true) => {}
    }

    if has_legal_move(board, side_to_move) {
        return None;
    }
    if is_in_check(board, side_to_move) {
        Some(GameOutcome::Checkmate {
            winner: !side_to_move,
        })
    } else {
        Some(GameOutcome::Stalemate)
    }
}
