//! Move ordering by MVV-LVA.

use crate::board::decode;
use crate::movegen::EngineMove;

/// MVV-LVA scores indexed by `[victim][attacker]`.
///
/// Weights: Pawn=1, Knight=3, Bishop=3, Rook=5, Queen=9, King=0.
/// Formula: `victim_weight * 16 - attacker_weight`.
const MVV_LVA: [[i32; 6]; 6] = [
    // victim = Pawn (weight 1)
    [15, 13, 13, 11, 7, 16],
    // victim = Knight (weight 3)
    [47, 45, 45, 43, 39, 48],
    // victim = Bishop (weight 3)
    [47, 45, 45, 43, 39, 48],
    // victim = Rook (weight 5)
    [79, 77, 77, 75, 71, 80],
    // victim = Queen (weight 9)
    [143, 141, 141, 139, 135, 144],
    // victim = King (weight 0)
    [-1, -3, -3, -5, -9, 0],
];

/// Ordering score: captures by MVV-LVA above promotions above quiet moves.
pub fn score_move(mv: &EngineMove) -> i32 {
    let capture = match (decode(mv.captured), decode(mv.moved)) {
        (Some((victim, _)), Some((attacker, _))) => {
            1_000 + MVV_LVA[victim.index()][attacker.index()]
        }
        _ => 0,
    };
    let promotion = if mv.promotion { 500 } else { 0 };
    capture + promotion
}

/// Yields moves best-first by selection sort, scoring each move once.
pub struct MovePicker {
    moves: Vec<EngineMove>,
    scores: Vec<i32>,
    cursor: usize,
}

impl MovePicker {
    /// Create a picker over `moves`.
    pub fn new(moves: Vec<EngineMove>) -> MovePicker {
        let scores = moves.iter().map(score_move).collect();
        MovePicker {
            moves,
            scores,
            cursor: 0,
        }
    }

    /// Return the highest-scored move not yet yielded.
    pub fn pick_next(&mut self) -> Option<EngineMove> {
        if self.cursor >= self.moves.len() {
            return None;
        }
        let mut best = self.cursor;
        for i in self.cursor + 1..self.moves.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(self.cursor, best);
        self.scores.swap(self.cursor, best);
        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}
