//! Deterministic text dump of a board for tooling and AI prompts.

use std::fmt;

use crate::board::BoardState;
use crate::effect::TileEffectKind;
use crate::side::Side;
use crate::square::Square;

/// Wrapper printing a [`BoardState`] as an 8x8 grid followed by piece and
/// tile annotations.
///
/// Empty squares show their strongest tile marker: `#` wall, `^` burning,
/// `~` ice, `%` plant, otherwise `.`.
pub struct BoardDump<'a> {
    board: &'a BoardState,
    side_to_move: Side,
}

impl BoardState {
    /// Return a [`BoardDump`] for this board.
    pub fn dump(&self, side_to_move: Side) -> BoardDump<'_> {
        BoardDump {
            board: self,
            side_to_move,
        }
    }
}

fn tile_marker(board: &BoardState, sq: Square) -> char {
    const PRIORITY: [(TileEffectKind, char); 4] = [
        (TileEffectKind::Occupied, '#'),
        (TileEffectKind::Burning, '^'),
        (TileEffectKind::Ice, '~'),
        (TileEffectKind::Plant, '%'),
    ];
    PRIORITY
        .iter()
        .find(|(kind, _)| board.has_tile_effect(sq, *kind))
        .map_or('.', |(_, c)| *c)
}

impl fmt::Display for BoardDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board;
        for row in 0..8i8 {
            write!(f, "{}  ", 8 - row)?;
            for col in 0..8i8 {
                let Some(sq) = Square::from_coords(row, col) else {
                    continue;
                };
                let c = match board.piece_at(sq) {
                    Some(piece) => piece.letter(),
                    None => tile_marker(board, sq),
                };
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        writeln!(f, "side to move: {}", self.side_to_move)?;

        writeln!(f, "pieces:")?;
        for (sq, piece) in board.occupied_squares() {
            write!(f, "  {sq} {} {} {}", piece.letter(), piece.side(), piece.element())?;
            if !piece.effects().is_empty() {
                let effects: Vec<String> =
                    piece.effects().iter().map(ToString::to_string).collect();
                write!(f, " [{}]", effects.join(", "))?;
            }
            writeln!(f)?;
        }

        write!(f, "tiles:")?;
        for sq in Square::all() {
            let effects = board.tile_effects(sq);
            if effects.is_empty() {
                continue;
            }
            let effects: Vec<String> = effects.iter().map(ToString::to_string).collect();
            write!(f, "\n  {sq} {}", effects.join(", "))?;
        }
        Ok(())
    }
}
