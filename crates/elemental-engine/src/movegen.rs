//! Plain chess move generation on a [`FlatBoard`].
//!
//! No castling and no en passant. Pawns reaching the last row always become
//! queens.

use elemental_core::{PieceKind, Side, Square};

use crate::board::{FlatBoard, piece_code};

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
const KNIGHT: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
];

/// A move with enough context to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineMove {
    pub from: Square,
    pub to: Square,
    /// Code of the moving piece.
    pub moved: i8,
    /// Code of the captured piece, 0 for a quiet move.
    pub captured: i8,
    pub promotion: bool,
}

impl EngineMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured != 0
    }
}

/// State restored by [`FlatBoard::unmake_move`].
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    mv: EngineMove,
}

impl FlatBoard {
    /// Play `mv` in place and hand the side to move over.
    pub fn make_move(&mut self, mv: EngineMove) -> Undo {
        let side = self.side_to_move();
        let placed = if mv.promotion {
            piece_code(PieceKind::Queen, side)
        } else {
            mv.moved
        };
        self.set(mv.from, 0);
        self.set(mv.to, placed);
        self.set_side_to_move(!side);
        Undo { mv }
    }

    /// Reverse a move made with [`make_move`](Self::make_move).
    pub fn unmake_move(&mut self, undo: Undo) {
        let mv = undo.mv;
        self.set(mv.to, mv.captured);
        self.set(mv.from, mv.moved);
        self.set_side_to_move(!self.side_to_move());
    }

    /// Return `true` if any piece of `by` attacks `sq`.
    pub fn is_attacked(&self, sq: Square, by: Side) -> bool {
        let holds = |target: Option<Square>, kind: PieceKind| {
            target.is_some_and(|t| self.code(t) == piece_code(kind, by))
        };

        if KNIGHT.iter().any(|&(r, c)| holds(sq.offset(r, c), PieceKind::Knight)) {
            return true;
        }
        if ORTHOGONAL
            .iter()
            .chain(DIAGONAL.iter())
            .any(|&(r, c)| holds(sq.offset(r, c), PieceKind::King))
        {
            return true;
        }
        if [-1, 1]
            .iter()
            .any(|&c| holds(sq.offset(-by.forward(), c), PieceKind::Pawn))
        {
            return true;
        }

        let slides = |dirs: &[(i8, i8)], kind: PieceKind| {
            dirs.iter().any(|&(r, c)| {
                let mut current = sq;
                while let Some(next) = current.offset(r, c) {
                    let code = self.code(next);
                    if code != 0 {
                        return code == piece_code(kind, by)
                            || code == piece_code(PieceKind::Queen, by);
                    }
                    current = next;
                }
                false
            })
        };
        slides(&ORTHOGONAL, PieceKind::Rook) || slides(&DIAGONAL, PieceKind::Bishop)
    }

    /// Return `true` if `side`'s king is attacked. A missing king is not.
    pub fn in_check(&self, side: Side) -> bool {
        self.king_square(side)
            .is_some_and(|king| self.is_attacked(king, !side))
    }
}

fn push(
    board: &FlatBoard,
    moves: &mut Vec<EngineMove>,
    from: Square,
    to: Square,
    moved: i8,
    side: Side,
) {
    let captured = board.code(to);
    let promotion = moved == piece_code(PieceKind::Pawn, side) && to.row() == side.promotion_row();
    moves.push(EngineMove {
        from,
        to,
        moved,
        captured,
        promotion,
    });
}

fn pseudo_legal(board: &FlatBoard) -> Vec<EngineMove> {
    let side = board.side_to_move();
    let mut moves = Vec::with_capacity(64);
    let own = |code: i8| (code > 0) == (side == Side::White) && code != 0;

    for from in Square::all() {
        let Some((kind, piece_side)) = board.piece_at(from) else {
            continue;
        };
        if piece_side != side {
            continue;
        }
        let moved = board.code(from);

        match kind {
            PieceKind::Pawn => {
                let forward = side.forward();
                if let Some(one) = from.offset(forward, 0)
                    && board.code(one) == 0
                {
                    push(board, &mut moves, from, one, moved, side);
                    if from.row() == side.pawn_row()
                        && let Some(two) = one.offset(forward, 0)
                        && board.code(two) == 0
                    {
                        push(board, &mut moves, from, two, moved, side);
                    }
                }
                for d_col in [-1, 1] {
                    if let Some(to) = from.offset(forward, d_col) {
                        let code = board.code(to);
                        if code != 0 && !own(code) {
                            push(board, &mut moves, from, to, moved, side);
                        }
                    }
                }
            }
            PieceKind::Knight | PieceKind::King => {
                let steps: &[(i8, i8)] = if kind == PieceKind::Knight {
                    &KNIGHT
                } else {
                    &[(-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1)]
                };
                for &(r, c) in steps {
                    if let Some(to) = from.offset(r, c)
                        && !own(board.code(to))
                    {
                        push(board, &mut moves, from, to, moved, side);
                    }
                }
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let mut dirs: Vec<(i8, i8)> = Vec::with_capacity(8);
                if kind != PieceKind::Bishop {
                    dirs.extend(ORTHOGONAL);
                }
                if kind != PieceKind::Rook {
                    dirs.extend(DIAGONAL);
                }
                for (r, c) in dirs {
                    let mut current = from;
                    while let Some(to) = current.offset(r, c) {
                        let code = board.code(to);
                        if own(code) {
                            break;
                        }
                        push(board, &mut moves, from, to, moved, side);
                        if code != 0 {
                            break;
                        }
                        current = to;
                    }
                }
            }
        }
    }
    moves
}

/// All legal moves for the side to move.
pub fn generate_legal_moves(board: &FlatBoard) -> Vec<EngineMove> {
    let side = board.side_to_move();
    let mut scratch = board.clone();
    pseudo_legal(board)
        .into_iter()
        .filter(|&mv| {
            let undo = scratch.make_move(mv);
            let legal = !scratch.in_check(side);
            scratch.unmake_move(undo);
            legal
        })
        .collect()
}
