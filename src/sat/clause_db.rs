//! Append-only clause arena.
//!
//! The database is the single owner of every clause. Everything else (watch lists,
//! propagation bookkeeping) refers to clauses through a [`ClauseRef`], which stays
//! valid for the lifetime of the database since nothing is ever removed.

use crate::sat::clause::Clause;
use core::ops::Index;
use std::fmt;

/// Stable handle to a clause in a [`ClauseDb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseRef(usize);

impl ClauseRef {
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
}

impl ClauseDb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) -> ClauseRef {
        self.clauses.push(clause);
        ClauseRef(self.clauses.len() - 1)
    }

    #[must_use]
    pub fn get(&self, cref: ClauseRef) -> Option<&Clause> {
        self.clauses.get(cref.0)
    }

    /// Mutable access, used to relocate watcher slots.
    #[must_use]
    pub fn get_mut(&mut self, cref: ClauseRef) -> Option<&mut Clause> {
        self.clauses.get_mut(cref.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Handles of every clause from `start` onwards, in insertion order.
    pub fn refs_from(&self, start: usize) -> impl Iterator<Item = ClauseRef> + use<> {
        (start..self.clauses.len()).map(ClauseRef)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseRef, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, c)| (ClauseRef(i), c))
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

impl Index<ClauseRef> for ClauseDb {
    type Output = Clause;

    fn index(&self, index: ClauseRef) -> &Self::Output {
        &self.clauses[index.0]
    }
}
