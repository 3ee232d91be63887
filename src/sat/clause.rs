//! Clauses with two watcher slots.
//!
//! A clause owns its literals, sorted by identifier so that iteration and comparison
//! are deterministic. The two watcher slots hold *indices* into that literal array.
//! Only the slots ever change after construction.

use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// Inline capacity of a clause before it spills to the heap.
pub const INLINE_LITERALS: usize = 8;

pub type LiteralStorage = SmallVec<[Literal; INLINE_LITERALS]>;

/// Identifies one of the two watcher slots of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WatcherRank {
    First,
    Second,
}

impl WatcherRank {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: LiteralStorage,
    watched: (usize, usize),
}

impl Clause {
    /// Builds a clause from any list of literals. Duplicates are kept.
    ///
    /// Clauses with fewer than two literals have both watchers at index 0, the others
    /// start watching indices 0 and 1.
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: LiteralStorage = literals.into_iter().collect();
        literals.sort_unstable();
        let watched = if literals.len() > 1 { (0, 1) } else { (0, 0) };

        Self { literals, watched }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Which watcher slot `l` occupies, if any. `First` wins when both slots coincide.
    #[must_use]
    pub fn get_rank(&self, l: Literal) -> Option<WatcherRank> {
        if self.literals.get(self.watched.0) == Some(&l) {
            Some(WatcherRank::First)
        } else if self.literals.get(self.watched.1) == Some(&l) {
            Some(WatcherRank::Second)
        } else {
            None
        }
    }

    /// The literal index held by the given watcher slot.
    #[must_use]
    pub const fn get_index(&self, rank: WatcherRank) -> usize {
        match rank {
            WatcherRank::First => self.watched.0,
            WatcherRank::Second => self.watched.1,
        }
    }

    /// Moves the given watcher slot onto the first occurrence of `l`.
    ///
    /// Returns `false`, without touching either slot, if `l` is not in the clause.
    pub fn set_watcher(&mut self, l: Literal, rank: WatcherRank) -> bool {
        let Some(index) = self.literals.iter().position(|&x| x == l) else {
            return false;
        };

        match rank {
            WatcherRank::First => self.watched.0 = index,
            WatcherRank::Second => self.watched.1 = index,
        }
        true
    }

    /// Points the given watcher slot at position `index` of the literal array.
    ///
    /// Unlike [`set_watcher`](Self::set_watcher) this can tell repeated literals apart.
    /// Returns `false`, without touching either slot, if `index` is out of bounds.
    pub fn set_watcher_index(&mut self, index: usize, rank: WatcherRank) -> bool {
        if index >= self.literals.len() {
            return false;
        }

        match rank {
            WatcherRank::First => self.watched.0 = index,
            WatcherRank::Second => self.watched.1 = index,
        }
        true
    }

    /// The literal in the given watcher slot, `None` for the empty clause.
    #[must_use]
    pub fn get_watcher_by_rank(&self, rank: WatcherRank) -> Option<Literal> {
        self.literals.get(self.get_index(rank)).copied()
    }

    /// Multiset equality of the literals, independent of watcher state.
    #[must_use]
    pub fn same_literals(&self, other: &Self) -> bool {
        // both sides are kept sorted
        self.literals == other.literals
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

impl From<&[Literal]> for Clause {
    fn from(literals: &[Literal]) -> Self {
        Self::new(literals.iter().copied())
    }
}

impl<const N: usize> From<[Literal; N]> for Clause {
    fn from(literals: [Literal; N]) -> Self {
        Self::new(literals)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.literals.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn lits(ids: &[u32]) -> Vec<Literal> {
        ids.iter().copied().map(Literal::new).collect()
    }

    #[test]
    fn test_empty_clause() {
        let mut c = Clause::default();
        assert!(c.is_empty());
        assert_eq!(c.iter().next(), None);
        assert!(!c.set_watcher(Literal::new(3), WatcherRank::First));
        assert_eq!(c.get_watcher_by_rank(WatcherRank::First), None);
        assert_eq!(c.get_rank(Literal::new(0)), None);
    }

    #[test]
    fn test_new() {
        let input = lits(&[2, 5, 3, 1, 4]);
        let c = Clause::new(input.clone());
        assert!(!c.is_empty());
        assert_eq!(c.len(), 5);

        let expected: HashSet<_> = input.into_iter().collect();
        let got: HashSet<_> = c.iter().copied().collect();
        assert_eq!(got, expected);
        assert_eq!(c.literals(), lits(&[1, 2, 3, 4, 5]).as_slice());
    }

    #[test]
    fn test_initial_watchers() {
        let unit = Clause::new(lits(&[6]));
        assert_eq!(unit.get_index(WatcherRank::First), 0);
        assert_eq!(unit.get_index(WatcherRank::Second), 0);
        assert_eq!(unit.get_rank(Literal::new(6)), Some(WatcherRank::First));

        let binary = Clause::new(lits(&[9, 2]));
        assert_eq!(binary.get_index(WatcherRank::First), 0);
        assert_eq!(binary.get_index(WatcherRank::Second), 1);
        assert_eq!(binary.get_watcher_by_rank(WatcherRank::First), Some(Literal::new(2)));
        assert_eq!(binary.get_watcher_by_rank(WatcherRank::Second), Some(Literal::new(9)));
    }

    #[test]
    fn test_same_literals() {
        let c1 = Clause::new(lits(&[3, 1, 4, 2]));
        let c2 = Clause::new(lits(&[1, 2, 3, 4]));
        assert!(c1.same_literals(&c2));
        assert!(c2.same_literals(&c1));

        let c3 = Clause::new(lits(&[4, 2, 5, 1]));
        assert!(!c3.same_literals(&c1));
        assert!(!c2.same_literals(&c3));
    }

    #[test]
    fn test_same_literals_respects_multiplicity() {
        let c1 = Clause::new(lits(&[1, 1, 2]));
        let c2 = Clause::new(lits(&[1, 2, 2]));
        let c3 = Clause::new(lits(&[2, 1, 1]));
        assert!(!c1.same_literals(&c2));
        assert!(c1.same_literals(&c3));
    }

    #[test]
    fn test_watchers() {
        let mut c = Clause::new(lits(&[5, 2, 3, 4, 1]));
        assert!(c.set_watcher(Literal::new(3), WatcherRank::First));
        assert!(c.set_watcher(Literal::new(5), WatcherRank::Second));
        assert_eq!(c.get_rank(Literal::new(3)), Some(WatcherRank::First));
        assert_eq!(c.get_rank(Literal::new(5)), Some(WatcherRank::Second));
        assert_eq!(c.get_rank(Literal::new(19)), None);
        assert_eq!(c.get_rank(Literal::new(2)), None);
        assert_eq!(c.get_watcher_by_rank(WatcherRank::First), Some(Literal::new(3)));
        assert_eq!(c.get_watcher_by_rank(WatcherRank::Second), Some(Literal::new(5)));
    }

    #[test]
    fn test_set_watcher() {
        let mut c = Clause::new(lits(&[5, 2, 3, 4, 1]));
        c.set_watcher(Literal::new(4), WatcherRank::Second);
        c.set_watcher(Literal::new(5), WatcherRank::First);
        c.set_watcher(Literal::new(2), WatcherRank::First);
        assert_eq!(c.get_watcher_by_rank(WatcherRank::First), Some(Literal::new(2)));
        assert_eq!(c.get_watcher_by_rank(WatcherRank::Second), Some(Literal::new(4)));
        assert_eq!(c.get_rank(Literal::new(5)), None);
    }

    #[test]
    fn test_set_watcher_missing_literal_keeps_state() {
        let mut c = Clause::new(lits(&[5, 2, 3, 4, 1]));
        c.set_watcher(Literal::new(4), WatcherRank::Second);
        let before: Vec<_> = c.iter().map(|&l| c.get_rank(l)).collect();

        assert!(!c.set_watcher(Literal::new(11), WatcherRank::First));
        assert!(!c.set_watcher(Literal::new(0), WatcherRank::Second));

        let after: Vec<_> = c.iter().map(|&l| c.get_rank(l)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_watcher_index() {
        let mut c = Clause::new(lits(&[5, 2, 3, 4, 1]));
        c.set_watcher(Literal::new(4), WatcherRank::Second);
        c.set_watcher(Literal::new(2), WatcherRank::First);
        assert_eq!(
            c.get_watcher_by_rank(WatcherRank::First),
            Some(c[c.get_index(WatcherRank::First)])
        );
        assert_eq!(
            c.get_watcher_by_rank(WatcherRank::Second),
            Some(c[c.get_index(WatcherRank::Second)])
        );
    }

    #[test]
    fn test_set_watcher_index_on_repeated_literal() {
        let mut c = Clause::new(lits(&[7, 7, 2]));
        assert_eq!(c.literals(), lits(&[2, 7, 7]).as_slice());

        assert!(c.set_watcher_index(1, WatcherRank::First));
        assert!(c.set_watcher_index(2, WatcherRank::Second));
        assert_eq!(c.get_watcher_by_rank(WatcherRank::First), Some(Literal::new(7)));
        assert_eq!(c.get_watcher_by_rank(WatcherRank::Second), Some(Literal::new(7)));
        assert_eq!(c.get_index(WatcherRank::Second), 2);
        assert_eq!(c.get_rank(Literal::new(7)), Some(WatcherRank::First));

        assert!(!c.set_watcher_index(3, WatcherRank::First));
        assert_eq!(c.get_index(WatcherRank::First), 1);
    }

    #[test]
    fn test_display() {
        let c = Clause::new(lits(&[3, 0]));
        assert_eq!(c.to_string(), "[¬x0, x1]");
    }
}
