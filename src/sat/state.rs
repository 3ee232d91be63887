#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The assignment state a propagator works on.
//!
//! [`State`] owns the model, the clause database and the trail of assigned literals.
//! It is kept apart from the propagator so that a propagator can hold its own
//! bookkeeping mutably while it drives assignments through the state.

use crate::sat::assignment::{Model, TruthValue};
use crate::sat::clause::Clause;
use crate::sat::clause_db::{ClauseDb, ClauseRef};
use crate::sat::literal::{Literal, Variable};
use crate::sat::log::targets;

/// Counters collected while propagating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropagationStats {
    /// Full passes over the database (full scan) or rounds of indexing and
    /// trail processing (watched literals).
    pub passes: usize,
    /// Clauses inspected.
    pub clause_visits: usize,
    /// Assignments forced by unit clauses.
    pub propagations: usize,
    /// Conflicts reported.
    pub conflicts: usize,
}

/// What a clause says under the current model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStatus {
    Satisfied,
    /// Every literal is falsified.
    Conflicting,
    /// Exactly one literal occurrence is open, and it is forced.
    Unit(Literal),
    /// At least two literal occurrences are open.
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    model: Model,
    clauses: ClauseDb,
    trail: Vec<Literal>,
    pub(crate) stats: PropagationStats,
}

impl State {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            model: Model::new(num_vars),
            clauses: ClauseDb::new(),
            trail: Vec::with_capacity(num_vars),
            stats: PropagationStats::default(),
        }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.model.len()
    }

    #[must_use]
    pub const fn model(&self) -> &Model {
        &self.model
    }

    #[must_use]
    pub const fn clauses(&self) -> &ClauseDb {
        &self.clauses
    }

    pub(crate) fn clause_mut(&mut self, cref: ClauseRef) -> Option<&mut Clause> {
        self.clauses.get_mut(cref)
    }

    /// Literals in the order they were assigned.
    #[must_use]
    pub fn trail(&self) -> &[Literal] {
        &self.trail
    }

    #[must_use]
    pub const fn stats(&self) -> PropagationStats {
        self.stats
    }

    /// Adds a clause to the database.
    ///
    /// Rejects the empty clause and clauses mentioning a variable outside
    /// `0..num_vars`. The clause is not checked against the model.
    pub fn add_clause(&mut self, clause: Clause) -> bool {
        if clause.is_empty() {
            log::debug!(target: targets::CLAUSE_DB, "Rejected empty clause.");
            return false;
        }

        if let Some(l) = clause
            .iter()
            .find(|l| l.variable().index() >= self.num_vars())
        {
            log::warn!(
                target: targets::CLAUSE_DB,
                "Rejected clause {clause}: {l} is outside of {} variables.",
                self.num_vars()
            );
            return false;
        }

        let cref = self.clauses.push(clause);
        log::trace!(target: targets::CLAUSE_DB, "Added {cref}: {}", self.clauses[cref]);
        true
    }

    /// # Panics
    ///
    /// If `x` is not a variable of this state.
    #[must_use]
    pub fn val(&self, x: Variable) -> TruthValue {
        self.model[x]
    }

    #[must_use]
    pub fn satisfied(&self, l: Literal) -> bool {
        self.model.literal_value(l) == TruthValue::True
    }

    #[must_use]
    pub fn falsified(&self, l: Literal) -> bool {
        self.model.literal_value(l) == TruthValue::False
    }

    /// Makes `l` true.
    ///
    /// Fails, leaving everything untouched, if `l` is already falsified. Assigning an
    /// open literal records the decision as a unit clause in the database; assigning a
    /// literal that already holds changes nothing.
    pub fn assign(&mut self, l: Literal) -> bool {
        if self.falsified(l) {
            log::debug!(target: targets::VALUATION, "Refused {l}: already falsified.");
            return false;
        }

        if self.val(l.variable()).is_undefined() {
            self.model.set(l);
            self.trail.push(l);
            self.clauses.push(Clause::new([l]));
            log::trace!(target: targets::VALUATION, "Assigned {l}.");
        }

        self.satisfied(l)
    }

    /// Assigns a literal forced by a unit clause.
    pub(crate) fn imply(&mut self, l: Literal, reason: ClauseRef) -> bool {
        if !self.assign(l) {
            return false;
        }
        self.stats.propagations += 1;
        log::trace!(target: targets::PROPAGATION, "{reason} forces {l}.");
        true
    }

    pub(crate) fn conflict(&mut self, cref: ClauseRef) {
        self.stats.conflicts += 1;
        log::debug!(target: targets::PROPAGATION, "Conflict in {cref}: {}", self.clauses[cref]);
    }

    /// Evaluates a clause from scratch. Every occurrence of a literal counts, so
    /// `[a, a]` with `a` open is not unit.
    #[must_use]
    pub fn clause_status(&self, cref: ClauseRef) -> ClauseStatus {
        let mut open = None;

        for &l in self.clauses[cref].iter() {
            if self.satisfied(l) {
                return ClauseStatus::Satisfied;
            }
            if !self.falsified(l) {
                if open.is_some() {
                    return ClauseStatus::Open;
                }
                open = Some(l);
            }
        }

        open.map_or(ClauseStatus::Conflicting, ClauseStatus::Unit)
    }

    /// The clause database simplified under the model, plus the model as unit clauses.
    ///
    /// Satisfied clauses are dropped and falsified literals removed; clauses left with
    /// no literals are not emitted. A reduced clause of size one is emitted even when
    /// the same literal also appears among the model's unit clauses.
    #[must_use]
    pub fn rebase(&self) -> Vec<Clause> {
        let mut reduced = Vec::new();

        for (_, clause) in self.clauses.iter() {
            if clause.iter().any(|&l| self.satisfied(l)) {
                continue;
            }

            let open: Vec<Literal> = clause
                .iter()
                .copied()
                .filter(|&l| !self.falsified(l))
                .collect();

            if !open.is_empty() {
                reduced.push(Clause::new(open));
            }
        }

        let kept = reduced.len();
        reduced.extend(self.model.assigned_literals().map(|l| Clause::new([l])));

        log::debug!(
            target: targets::REBASE,
            "Rebased {} clauses into {kept} reduced and {} unit clauses.",
            self.clauses.len(),
            reduced.len() - kept
        );

        reduced
    }
}
