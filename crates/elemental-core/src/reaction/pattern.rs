//! Geometric patterns expanding a trigger square into target cells.

use std::fmt;

use crate::board::BoardState;
use crate::direction::{ALL_EIGHT, DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};
use crate::side::Side;
use crate::square::Square;

/// Largest pattern distance; larger values are clamped.
pub const MAX_DISTANCE: u8 = 7;

/// The allow-listed pattern kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Four orthogonal rays (`+`).
    Cardinal,
    /// Four diagonal rays (`x`).
    Diagonal,
    /// All eight rays (`*`).
    Star,
    /// One ray in the acting side's forward direction.
    Forward,
    /// The eight knight jumps (`L`); distance is ignored.
    KnightJump,
    /// Cells at exactly the given distance.
    Ring,
    /// Cells within the given distance, trigger included.
    Area,
}

impl Pattern {
    /// Parse a pattern name. Unknown or empty names yield `None`.
    pub fn parse(s: &str) -> Option<Pattern> {
        let s = s.trim();
        if s == "L" {
            return Some(Pattern::KnightJump);
        }
        match s.to_ascii_lowercase().as_str() {
            "+" | "cardinal" | "plus" | "cross" | "orthogonal" => Some(Pattern::Cardinal),
            "x" | "diagonal" | "diagonals" => Some(Pattern::Diagonal),
            "*" | "star" | "all_directions" | "omni" => Some(Pattern::Star),
            "forward" | "pawn" | "ahead" => Some(Pattern::Forward),
            "l" | "knight" | "knight_jump" => Some(Pattern::KnightJump),
            "ring" | "circle" => Some(Pattern::Ring),
            "area" | "square" | "fill" | "blast" => Some(Pattern::Area),
            _ => None,
        }
    }

    /// `true` for patterns that apply in a single wave rather than by
    /// distance.
    pub const fn is_discrete(self) -> bool {
        matches!(self, Pattern::KnightJump | Pattern::Ring)
    }

    /// `true` for ray patterns, which honour the obstruction flag.
    pub const fn is_ray(self) -> bool {
        matches!(
            self,
            Pattern::Cardinal | Pattern::Diagonal | Pattern::Star | Pattern::Forward
        )
    }

    /// Expand the pattern around `trigger`.
    ///
    /// Ray patterns exclude the trigger and, when `obstruction` is set, stop
    /// at (and include) the first occupied cell. Ring and area ignore
    /// obstruction. Cells are unique and ordered by ray then step, or by
    /// square index for ring and area.
    pub fn cells(
        self,
        board: &BoardState,
        trigger: Square,
        distance: u8,
        obstruction: bool,
        acting: Side,
    ) -> Vec<Square> {
        let distance = distance.min(MAX_DISTANCE);
        let rays = |dirs: &[(i8, i8)]| -> Vec<Square> {
            dirs.iter()
                .flat_map(|&dir| ray(board, trigger, dir, distance, obstruction))
                .collect()
        };
        match self {
            Pattern::Cardinal => rays(&ORTHOGONAL),
            Pattern::Diagonal => rays(&DIAGONAL),
            Pattern::Star => rays(&ALL_EIGHT),
            Pattern::Forward => rays(&[(acting.forward(), 0)]),
            Pattern::KnightJump => KNIGHT_JUMPS
                .iter()
                .filter_map(|&(r, c)| trigger.offset(r, c))
                .collect(),
            Pattern::Ring => Square::all().filter(|sq| sq.distance(trigger) == distance).collect(),
            Pattern::Area => Square::all().filter(|sq| sq.distance(trigger) <= distance).collect(),
        }
    }
}

fn ray(
    board: &BoardState,
    from: Square,
    (d_row, d_col): (i8, i8),
    distance: u8,
    obstruction: bool,
) -> Vec<Square> {
    let mut cells = Vec::new();
    let mut current = from;
    for _ in 0..distance {
        let Some(next) = current.offset(d_row, d_col) else {
            break;
        };
        cells.push(next);
        if obstruction && board.is_occupied(next) {
            break;
        }
        current = next;
    }
    cells
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pattern::Cardinal => "+",
            Pattern::Diagonal => "x",
            Pattern::Star => "*",
            Pattern::Forward => "forward",
            Pattern::KnightJump => "L",
            Pattern::Ring => "ring",
            Pattern::Area => "area",
        };
        f.write_str(s)
    }
}
