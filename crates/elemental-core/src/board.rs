//! Board State: piece occupancy, tile effects, and per-tile hazard streaks.

use std::array;

use crate::effect::{PieceEffect, PieceEffectKind, TileEffect, TileEffectKind};
use crate::error::BoardError;
use crate::layout::BoardLayout;
use crate::piece::{Element, Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

/// Back-rank piece order by column.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Consecutive-turn counter for the piece standing on a hazard tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streak {
    occupant: Option<PieceId>,
    turns: u8,
}

impl Streak {
    /// Record one more turn with `occupant` on the tile and return the count.
    ///
    /// The count restarts at 1 when the occupant changes and drops to 0 when
    /// the tile is empty.
    pub fn advance(&mut self, occupant: Option<PieceId>) -> u8 {
        match occupant {
            None => self.reset(),
            Some(id) if self.occupant == Some(id) => self.turns = self.turns.saturating_add(1),
            Some(id) => {
                self.occupant = Some(id);
                self.turns = 1;
            }
        }
        self.turns
    }

    /// Forget the occupant and zero the count.
    pub fn reset(&mut self) {
        self.occupant = None;
        self.turns = 0;
    }

    /// Current consecutive-turn count.
    pub fn turns(&self) -> u8 {
        self.turns
    }
}

/// Everything bound to a single square apart from its occupant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tile {
    effects: Vec<TileEffect>,
    pub(crate) burn: Streak,
    pub(crate) growth: Streak,
}

impl Tile {
    /// Active tile effects, at most one per kind.
    pub fn effects(&self) -> &[TileEffect] {
        &self.effects
    }

    /// Consecutive turns counted toward burning damage.
    pub fn burn_streak(&self) -> Streak {
        self.burn
    }

    /// Consecutive turns counted toward an overgrowth stun.
    pub fn growth_streak(&self) -> Streak {
        self.growth
    }

    pub(crate) fn effects_mut(&mut self) -> &mut Vec<TileEffect> {
        &mut self.effects
    }
}

/// The 8x8 grid of optional pieces and the parallel grid of tiles.
///
/// All occupancy changes go through this type so that a square never holds
/// two pieces and a tile never holds two effects of the same kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    squares: [Option<Piece>; 64],
    tiles: [Tile; 64],
    next_id: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::empty()
    }
}

impl BoardState {
    /// A board with no pieces and no tile effects.
    pub fn empty() -> BoardState {
        BoardState {
            squares: array::from_fn(|_| None),
            tiles: array::from_fn(|_| Tile::default()),
            next_id: 1,
        }
    }

    /// The standard starting position with elements taken from `layout`.
    pub fn starting_position(layout: &BoardLayout) -> BoardState {
        let mut board = BoardState::empty();
        for side in Side::ALL {
            let back = side.back_row() as i8;
            let pawns = side.pawn_row() as i8;
            for col in 0..8i8 {
                let kind = BACK_RANK[col as usize];
                if let Some(sq) = Square::from_coords(back, col) {
                    let element = layout.element_for(side, kind, sq);
                    board.place(sq, kind, side, element);
                }
                if let Some(sq) = Square::from_coords(pawns, col) {
                    let element = layout.element_for(side, PieceKind::Pawn, sq);
                    board.place(sq, PieceKind::Pawn, side, element);
                }
            }
        }
        board
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index()].as_ref()
    }

    #[inline]
    pub(crate) fn piece_at_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.squares[sq.index()].as_mut()
    }

    /// Return `true` if a piece stands on `sq`.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_some()
    }

    /// Side of the piece on `sq`, if any.
    #[inline]
    pub fn side_at(&self, sq: Square) -> Option<Side> {
        self.piece_at(sq).map(Piece::side)
    }

    /// Iterate over every occupied square.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterate over the pieces currently belonging to `side`.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.occupied_squares().filter(move |(_, p)| p.side() == side)
    }

    /// Square of `side`'s king, or `None` if it has been destroyed.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces(side)
            .find(|(_, p)| p.kind() == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Current square of the piece with identity `id`.
    pub fn find_piece(&self, id: PieceId) -> Option<Square> {
        self.occupied_squares()
            .find(|(_, p)| p.id() == id)
            .map(|(sq, _)| sq)
    }

    /// Spawn a new piece on an empty square.
    pub fn spawn(
        &mut self,
        sq: Square,
        kind: PieceKind,
        side: Side,
        element: Element,
    ) -> Result<PieceId, BoardError> {
        if self.is_occupied(sq) {
            return Err(BoardError::SquareOccupied { square: sq });
        }
        Ok(self.place(sq, kind, side, element))
    }

    fn place(&mut self, sq: Square, kind: PieceKind, side: Side, element: Element) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.squares[sq.index()] = Some(Piece::new(id, kind, side, element));
        id
    }

    /// Remove and return the piece on `sq`.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Move the piece on `from` to `to`, marking it as moved.
    ///
    /// Returns the piece previously on `to`, which is destroyed. Does nothing
    /// and returns `None` when `from` is empty or equals `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to {
            return None;
        }
        let mut piece = self.squares[from.index()].take()?;
        piece.mark_moved();
        self.squares[to.index()].replace(piece)
    }

    /// Promote the piece on `sq` to `kind` in place.
    pub fn promote(&mut self, sq: Square, kind: PieceKind) {
        if let Some(piece) = self.piece_at_mut(sq) {
            piece.promote(kind);
        }
    }

    /// Replace the element of the piece on `sq`.
    pub fn set_element(&mut self, sq: Square, element: Element) {
        if let Some(piece) = self.piece_at_mut(sq) {
            piece.set_element(element);
        }
    }

    /// Override the moved flag of the piece on `sq` (setup and tooling).
    pub fn set_moved(&mut self, sq: Square, moved: bool) {
        if let Some(piece) = self.piece_at_mut(sq) {
            piece.set_moved(moved);
        }
    }

    /// The tile bound to `sq`.
    #[inline]
    pub fn tile(&self, sq: Square) -> &Tile {
        &self.tiles[sq.index()]
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, sq: Square) -> &mut Tile {
        &mut self.tiles[sq.index()]
    }

    /// Active effects on the tile at `sq`.
    #[inline]
    pub fn tile_effects(&self, sq: Square) -> &[TileEffect] {
        self.tiles[sq.index()].effects()
    }

    /// The effect of `kind` on `sq`, if active.
    pub fn tile_effect(&self, sq: Square, kind: TileEffectKind) -> Option<&TileEffect> {
        self.tile_effects(sq).iter().find(|e| e.kind == kind)
    }

    /// Return `true` if `sq` carries an effect of `kind`.
    #[inline]
    pub fn has_tile_effect(&self, sq: Square, kind: TileEffectKind) -> bool {
        self.tile_effect(sq, kind).is_some()
    }

    /// Return `true` if `sq` carries an Occupied (wall) effect.
    #[inline]
    pub fn is_wall(&self, sq: Square) -> bool {
        self.has_tile_effect(sq, TileEffectKind::Occupied)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), BoardError> {
        for side in Side::ALL {
            let count = self
                .pieces(side)
                .filter(|(_, p)| p.kind() == PieceKind::King)
                .count();
            match count {
                0 => return Err(BoardError::MissingKing { side }),
                1 => {}
                _ => return Err(BoardError::TooManyKings { side, count }),
            }
        }

        for sq in Square::all() {
            let effects = self.tile_effects(sq);
            for (i, effect) in effects.iter().enumerate() {
                if effects[i + 1..].iter().any(|e| e.kind == effect.kind) {
                    return Err(BoardError::DuplicateTileEffect {
                        square: sq,
                        kind: effect.kind,
                    });
                }
                if effect.duration == 0 {
                    return Err(BoardError::StaleEffect { square: sq });
                }
            }
            if let Some(piece) = self.piece_at(sq)
                && piece.effects().iter().any(|e| e.duration == 0)
            {
                return Err(BoardError::StaleEffect { square: sq });
            }
        }

        Ok(())
    }

    /// Drop Burning/Plant markers from pieces no longer standing on the
    /// matching tile, and add them to pieces that are.
    pub(crate) fn sync_hazard_markers(&mut self) {
        for sq in Square::all() {
            let on_fire = self.has_tile_effect(sq, TileEffectKind::Burning);
            let overgrown = self.has_tile_effect(sq, TileEffectKind::Plant);
            if let Some(piece) = self.piece_at_mut(sq) {
                sync_marker(piece, PieceEffectKind::Burning, on_fire);
                sync_marker(piece, PieceEffectKind::Plant, overgrown);
            }
        }
    }
}

fn sync_marker(piece: &mut Piece, marker: PieceEffectKind, present: bool) {
    if present {
        if !piece.has_effect(&marker) {
            piece.insert_effect(PieceEffect::new(marker, -1));
        }
    } else {
        piece.remove_effect(&marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> BoardState {
        BoardState::starting_position(&BoardLayout::default())
    }

    #[test]
    fn starting_position_validates() {
        start().validate().unwrap();
    }

    #[test]
    fn starting_position_pieces() {
        let board = start();
        let king = board.piece_at(Square::E1).unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert_eq!(king.side(), Side::White);
        assert_eq!(board.piece_at(Square::D8).map(Piece::kind), Some(PieceKind::Queen));
        assert_eq!(board.piece_at(Square::E7).map(Piece::kind), Some(PieceKind::Pawn));
        assert!(board.piece_at(Square::E4).is_none());
        assert_eq!(board.occupied_squares().count(), 32);
    }

    #[test]
    fn king_squares() {
        let board = start();
        assert_eq!(board.king_square(Side::White), Some(Square::E1));
        assert_eq!(board.king_square(Side::Black), Some(Square::E8));
    }

    #[test]
    fn ids_are_unique() {
        let board = start();
        let mut ids: Vec<_> = board.occupied_squares().map(|(_, p)| p.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn relocate_captures_and_marks_moved() {
        let mut board = start();
        let mover = board.piece_at(Square::E2).unwrap().id();
        assert!(board.relocate(Square::E2, Square::E4).is_none());
        assert!(board.piece_at(Square::E4).unwrap().has_moved());
        let captured = board.relocate(Square::E4, Square::D7).unwrap();
        assert_eq!(captured.side(), Side::Black);
        assert_eq!(board.find_piece(mover), Some(Square::D7));
        assert_eq!(board.occupied_squares().count(), 31);
    }

    #[test]
    fn spawn_refuses_occupied_square() {
        let mut board = start();
        let element = Element::new("Fire", "🔥");
        assert!(matches!(
            board.spawn(Square::E2, PieceKind::Queen, Side::White, element.clone()),
            Err(BoardError::SquareOccupied { .. })
        ));
        assert!(board.spawn(Square::E4, PieceKind::Queen, Side::White, element).is_ok());
    }

    #[test]
    fn validate_detects_missing_king() {
        let mut board = start();
        board.remove(Square::E8);
        assert_eq!(board.validate(), Err(BoardError::MissingKing { side: Side::Black }));
    }

    #[test]
    fn validate_detects_extra_king() {
        let mut board = start();
        board
            .spawn(Square::E4, PieceKind::King, Side::White, Element::new("Light", ""))
            .unwrap();
        assert!(matches!(board.validate(), Err(BoardError::TooManyKings { count: 2, .. })));
    }

    #[test]
    fn streak_counts_consecutive_occupancy() {
        let mut streak = Streak::default();
        let a = Some(PieceId(1));
        let b = Some(PieceId(2));
        assert_eq!(streak.advance(a), 1);
        assert_eq!(streak.advance(a), 2);
        assert_eq!(streak.advance(b), 1);
        assert_eq!(streak.advance(None), 0);
        assert_eq!(streak.advance(b), 1);
    }
}
