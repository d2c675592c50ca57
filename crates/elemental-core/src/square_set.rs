//! Sets of squares packed into a single `u64`, one bit per square index.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::square::Square;

/// A set of squares. Bit `i` is set when the square with index `i` is a member.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Every square on the board.
    pub const FULL: SquareSet = SquareSet(!0);

    /// Create a set from raw bits.
    #[inline]
    pub const fn from_bits(bits: u64) -> SquareSet {
        SquareSet(bits)
    }

    /// Return the raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Return `true` if the set has no members.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of members.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Return `true` if `sq` is a member.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Return a new set with `sq` added.
    #[inline]
    pub const fn with(self, sq: Square) -> SquareSet {
        SquareSet(self.0 | (1u64 << sq.index()))
    }

    /// Return a new set with `sq` removed.
    #[inline]
    pub const fn without(self, sq: Square) -> SquareSet {
        SquareSet(self.0 & !(1u64 << sq.index()))
    }

    /// Add `sq` in place.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Remove `sq` in place.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Keep only the members for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(Square) -> bool) {
        for sq in self.iter() {
            if !keep(sq) {
                self.remove(sq);
            }
        }
    }

    /// Iterate over members in ascending index order.
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

/// Iterator over the members of a [`SquareSet`].
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> SquareSet {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for SquareSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: SquareSet) {
        self.0 &= rhs.0;
    }
}

impl Not for SquareSet {
    type Output = SquareSet;
    #[inline]
    fn not(self) -> SquareSet {
        SquareSet(!self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|sq| sq.to_string())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::SquareSet;
    use crate::square::Square;

    #[test]
    fn insert_contains_remove() {
        let mut set = SquareSet::EMPTY;
        set.insert(Square::E4);
        set.insert(Square::A8);
        assert!(set.contains(Square::E4));
        assert!(!set.contains(Square::E5));
        assert_eq!(set.len(), 2);
        set.remove(Square::E4);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iter_is_ascending() {
        let set: SquareSet = [Square::H1, Square::A8, Square::D4].into_iter().collect();
        let squares: Vec<_> = set.iter().collect();
        assert_eq!(squares, vec![Square::A8, Square::D4, Square::H1]);
    }

    #[test]
    fn retain_filters_members() {
        let mut set: SquareSet = Square::all().take(8).collect();
        set.retain(|sq| sq.col() % 2 == 0);
        assert_eq!(set.len(), 4);
        assert!(set.contains(Square::A8));
        assert!(!set.contains(Square::B8));
    }

    #[test]
    fn full_has_every_square() {
        assert_eq!(SquareSet::FULL.len(), 64);
        assert_eq!((!SquareSet::FULL).len(), 0);
    }

    #[test]
    fn debug_lists_algebraic() {
        let set = SquareSet::EMPTY.with(Square::E4);
        assert_eq!(format!("{set:?}"), "{\"e4\"}");
    }
}
