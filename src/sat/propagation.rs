#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation.
//!
//! Two interchangeable algorithms compute the same fixpoint:
//!
//! - [`FullScan`] re-evaluates every clause of the database on every pass and starts a
//!   new pass whenever the previous one assigned something. Simple, and quadratic in
//!   the worst case.
//! - [`WatchedLiterals`] uses the two watcher slots of each clause. A clause is only
//!   looked at when one of its watched literals becomes false, at which point the
//!   watch either moves to another non-false literal or the clause has become unit
//!   (or conflicting).
//!
//! Unit propagation is confluent, so both report a conflict on exactly the same
//! inputs and otherwise reach the same model.

use crate::sat::clause::WatcherRank;
use crate::sat::clause_db::ClauseRef;
use crate::sat::literal::Literal;
use crate::sat::log::targets;
use crate::sat::state::{ClauseStatus, State};
use crate::sat::watch::{WatchList, WatchLists};
use clap::ValueEnum;
use smallvec::SmallVec;
use std::fmt::{Debug, Display};

pub trait Propagator: Debug + Clone {
    /// Propagates to a fixpoint.
    ///
    /// Returns `false` as soon as a clause is found with every literal falsified, or a
    /// forced assignment contradicts the model.
    fn propagate(&mut self, state: &mut State) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullScan;

impl Propagator for FullScan {
    fn propagate(&mut self, state: &mut State) -> bool {
        loop {
            state.stats.passes += 1;
            let mut changed = false;

            // clauses synthesised during this pass are picked up by the next one
            for cref in state.clauses().refs_from(0) {
                state.stats.clause_visits += 1;

                match state.clause_status(cref) {
                    ClauseStatus::Satisfied | ClauseStatus::Open => {}
                    ClauseStatus::Conflicting => {
                        state.conflict(cref);
                        return false;
                    }
                    ClauseStatus::Unit(lit) => {
                        if !state.imply(lit, cref) {
                            state.conflict(cref);
                            return false;
                        }
                        changed = true;
                    }
                }
            }

            if !changed {
                return true;
            }
        }
    }
}

/// Two-watched-literal propagation.
///
/// Clauses are indexed lazily: anything added to the database since the last call is
/// evaluated once when propagation next runs. Since assignments are never undone a
/// clause that is satisfied at that point is never watched, and a clause with a single
/// open literal occurrence is propagated on the spot. Every other clause watches two
/// open positions, which may hold the same literal twice. After indexing, each literal
/// assigned since the last call is processed in trail order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedLiterals {
    watches: WatchLists,
    /// Clauses of the database already indexed.
    indexed: usize,
    /// Position in the trail up to which assignments have been processed.
    head: usize,
    /// Set once a conflict is found. Assignments are never undone, so it stays.
    conflict: Option<ClauseRef>,
}

impl WatchedLiterals {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            watches: WatchLists::new(num_vars),
            indexed: 0,
            head: 0,
            conflict: None,
        }
    }

    #[must_use]
    pub const fn watches(&self) -> &WatchLists {
        &self.watches
    }

    fn index_clause(&mut self, cref: ClauseRef, state: &mut State) -> bool {
        state.stats.clause_visits += 1;

        // positions, so that two occurrences of one literal are two candidates
        let mut open: SmallVec<[usize; 2]> = SmallVec::new();
        for (i, &l) in state.clauses()[cref].iter().enumerate() {
            if state.satisfied(l) {
                return true;
            }
            if !state.falsified(l) {
                open.push(i);
                if open.len() == 2 {
                    break;
                }
            }
        }

        match open.as_slice() {
            [] => {
                state.conflict(cref);
                false
            }
            [unit] => {
                let unit = state.clauses()[cref][*unit];
                if state.imply(unit, cref) {
                    true
                } else {
                    state.conflict(cref);
                    false
                }
            }
            [first, second, ..] => {
                let (first, second) = (*first, *second);
                let clause = &state.clauses()[cref];
                let watched = (clause[first], clause[second]);
                if let Some(clause) = state.clause_mut(cref) {
                    clause.set_watcher_index(first, WatcherRank::First);
                    clause.set_watcher_index(second, WatcherRank::Second);
                }
                self.watches.watch(watched.0, cref);
                self.watches.watch(watched.1, cref);
                true
            }
        }
    }

    /// Visits the clauses watching `!lit`, now that `lit` holds.
    ///
    /// Returns the conflicting clause, if any.
    fn propagate_literal(&mut self, lit: Literal, state: &mut State) -> Option<ClauseRef> {
        let false_lit = !lit;
        let watchers = self.watches.take(false_lit);
        let mut kept = WatchList::new();

        for (i, &cref) in watchers.iter().enumerate() {
            state.stats.clause_visits += 1;

            let clause = &state.clauses()[cref];
            let Some(rank) = clause.get_rank(false_lit) else {
                continue;
            };
            let Some(other) = clause.get_watcher_by_rank(rank.other()) else {
                continue;
            };

            if state.satisfied(other) {
                kept.push(cref);
                continue;
            }

            let other_index = clause.get_index(rank.other());
            let replacement = clause
                .iter()
                .enumerate()
                .find(|&(j, &l)| j != other_index && !state.falsified(l))
                .map(|(j, &l)| (j, l));

            if let Some((index, new_watch)) = replacement {
                if let Some(clause) = state.clause_mut(cref) {
                    clause.set_watcher_index(index, rank);
                }
                self.watches.watch(new_watch, cref);
                continue;
            }

            kept.push(cref);

            if state.falsified(other) || !state.imply(other, cref) {
                state.conflict(cref);
                kept.extend(watchers[i + 1..].iter().copied());
                self.watches[false_lit] = kept;
                return Some(cref);
            }
        }

        self.watches[false_lit] = kept;
        None
    }
}

impl Propagator for WatchedLiterals {
    fn propagate(&mut self, state: &mut State) -> bool {
        if let Some(cref) = self.conflict {
            log::debug!(target: targets::PROPAGATION, "Conflict in {cref} persists.");
            return false;
        }

        loop {
            state.stats.passes += 1;

            while self.indexed < state.clauses().len() {
                let cref = ClauseRef::from_index(self.indexed);
                self.indexed += 1;
                if !self.index_clause(cref, state) {
                    self.conflict = Some(cref);
                    return false;
                }
            }

            while let Some(&lit) = state.trail().get(self.head) {
                self.head += 1;
                if let Some(cref) = self.propagate_literal(lit, state) {
                    self.conflict = Some(cref);
                    return false;
                }
            }

            // forced assignments added unit clauses, which still need indexing
            if self.indexed == state.clauses().len() {
                log::trace!(
                    target: targets::PROPAGATION,
                    "Fixpoint with {} of {} variables assigned.",
                    state.trail().len(),
                    state.num_vars()
                );
                return true;
            }
        }
    }
}

/// Enum dispatch over the available propagators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagatorImpls {
    FullScan(FullScan),
    WatchedLiterals(WatchedLiterals),
}

impl Propagator for PropagatorImpls {
    fn propagate(&mut self, state: &mut State) -> bool {
        match self {
            Self::FullScan(p) => p.propagate(state),
            Self::WatchedLiterals(p) => p.propagate(state),
        }
    }
}

/// Selects the propagation algorithm of a solver.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum PropagatorType {
    /// Rescan the whole clause database until nothing changes.
    #[default]
    FullScan,
    /// Two-watched-literal propagation.
    WatchedLiterals,
}

impl Display for PropagatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullScan => write!(f, "full-scan"),
            Self::WatchedLiterals => write!(f, "watched-literals"),
        }
    }
}

impl PropagatorType {
    #[must_use]
    pub fn to_impl(self, num_vars: usize) -> PropagatorImpls {
        match self {
            Self::FullScan => PropagatorImpls::FullScan(FullScan),
            Self::WatchedLiterals => PropagatorImpls::WatchedLiterals(WatchedLiterals::new(num_vars)),
        }
    }
}
