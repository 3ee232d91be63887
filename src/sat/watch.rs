#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause_db::ClauseRef;
use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

pub type WatchList = SmallVec<[ClauseRef; 6]>;

/// For every literal, the clauses that currently watch it.
///
/// A clause sits in the list of exactly the two literals its watcher slots point at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchLists(Vec<WatchList>);

impl WatchLists {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![SmallVec::new(); num_vars * 2])
    }

    pub fn watch(&mut self, lit: Literal, cref: ClauseRef) {
        self[lit].push(cref);
    }

    /// Takes the list of `lit` out, leaving it empty while the caller walks it.
    pub fn take(&mut self, lit: Literal) -> WatchList {
        std::mem::take(&mut self[lit])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.iter().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(SmallVec::is_empty)
    }
}

impl Index<Literal> for WatchLists {
    type Output = WatchList;

    fn index(&self, index: Literal) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<Literal> for WatchLists {
    fn index_mut(&mut self, index: Literal) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
