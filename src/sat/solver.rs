#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The propagation engine.
//!
//! A [`Solver`] owns the model and the clause database for a fixed number of
//! variables. It answers one question: can the current partial assignment be
//! extended by forced (unit) implications, and if not, is it already contradictory?
//! There is no search, backtracking or learning here.
//!
//! ```
//! use sat_propagator::sat::clause::Clause;
//! use sat_propagator::sat::literal::{neg, pos, Variable};
//! use sat_propagator::sat::solver::Solver;
//!
//! let x = Variable::new;
//! let mut solver = Solver::new(3);
//! solver.add_clause(Clause::new([neg(x(1)), pos(x(0)), neg(x(2))]));
//! solver.add_clause(Clause::new([neg(x(1)), pos(x(2))]));
//! solver.add_clause(Clause::new([neg(x(0)), neg(x(2))]));
//!
//! solver.assign(pos(x(1)));
//! assert!(!solver.unit_propagate());
//! ```

use crate::sat::assignment::{Model, TruthValue};
use crate::sat::clause::Clause;
use crate::sat::clause_db::ClauseDb;
use crate::sat::configs::SolverConfig;
use crate::sat::literal::{Literal, Variable};
use crate::sat::log::targets;
use crate::sat::propagation::{Propagator, PropagatorImpls};
use crate::sat::state::{PropagationStats, State};

#[derive(Debug, Clone)]
pub struct Solver {
    state: State,
    propagator: PropagatorImpls,
    config: SolverConfig,
}

impl Solver {
    /// A solver over variables `0..num_vars`, all undefined, with no clauses.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self::with_config(num_vars, SolverConfig::default())
    }

    #[must_use]
    pub fn with_config(num_vars: usize, config: SolverConfig) -> Self {
        Self {
            state: State::new(num_vars),
            propagator: config.propagator.to_impl(num_vars),
            config,
        }
    }

    /// Builds a solver from already parsed clauses, e.g. from a DIMACS loader.
    ///
    /// Clauses that [`add_clause`](Self::add_clause) rejects are skipped.
    #[must_use]
    pub fn from_clauses<I, C>(num_vars: usize, clauses: I, config: SolverConfig) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = Literal>,
    {
        let mut solver = Self::with_config(num_vars, config);
        let mut rejected = 0_usize;
        for clause in clauses {
            if !solver.add_clause(Clause::new(clause)) {
                rejected += 1;
            }
        }

        if rejected > 0 {
            log::info!(target: targets::CLAUSE_DB, "Skipped {rejected} clauses while loading.");
        }
        solver
    }

    /// Appends a clause to the database.
    ///
    /// Returns `false`, adding nothing, for the empty clause or a clause that mentions
    /// a variable this solver does not have. Satisfiability under the current model is
    /// not checked.
    pub fn add_clause(&mut self, clause: Clause) -> bool {
        self.state.add_clause(clause)
    }

    /// # Panics
    ///
    /// If `x` is not below [`num_vars`](Self::num_vars).
    #[must_use]
    pub fn val(&self, x: Variable) -> TruthValue {
        self.state.val(x)
    }

    /// Whether `l` holds under the current model.
    ///
    /// # Panics
    ///
    /// If the variable of `l` is not below [`num_vars`](Self::num_vars).
    #[must_use]
    pub fn satisfied(&self, l: Literal) -> bool {
        self.state.satisfied(l)
    }

    /// Whether the negation of `l` holds under the current model.
    ///
    /// # Panics
    ///
    /// If the variable of `l` is not below [`num_vars`](Self::num_vars).
    #[must_use]
    pub fn falsified(&self, l: Literal) -> bool {
        self.state.falsified(l)
    }

    /// Assigns `l` directly.
    ///
    /// Returns `false`, changing nothing, if `l` is already falsified. A new assignment
    /// is recorded in the database as the unit clause `{l}`; re-assigning a literal
    /// that already holds is allowed and changes nothing.
    ///
    /// # Panics
    ///
    /// If the variable of `l` is not below [`num_vars`](Self::num_vars).
    pub fn assign(&mut self, l: Literal) -> bool {
        self.state.assign(l)
    }

    /// Runs unit propagation over the whole database to a fixpoint.
    ///
    /// Returns `true` if the fixpoint is reached without conflict, and `false` as
    /// soon as some clause has every literal falsified or a forced assignment
    /// contradicts the model. Assignments made before a conflict are kept.
    pub fn unit_propagate(&mut self) -> bool {
        let ok = self.propagator.propagate(&mut self.state);
        log::debug!(
            target: targets::PROPAGATION,
            "Propagation ({}) {} with {}/{} variables assigned.",
            self.config.propagator,
            if ok { "reached a fixpoint" } else { "found a conflict" },
            self.state.trail().len(),
            self.num_vars()
        );
        ok
    }

    /// A simplified, logically equivalent clause set.
    ///
    /// Every clause satisfied by the model is dropped, falsified literals are removed
    /// from the rest, and each assigned variable is appended as a unit clause. The
    /// database itself is left untouched.
    #[must_use]
    pub fn rebase(&self) -> Vec<Clause> {
        self.state.rebase()
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.state.num_vars()
    }

    #[must_use]
    pub const fn model(&self) -> &Model {
        self.state.model()
    }

    #[must_use]
    pub const fn clauses(&self) -> &ClauseDb {
        self.state.clauses()
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.state.clauses().len()
    }

    #[must_use]
    pub fn num_assigned(&self) -> usize {
        self.state.trail().len()
    }

    /// Assigned literals, in assignment order.
    #[must_use]
    pub fn trail(&self) -> &[Literal] {
        self.state.trail()
    }

    #[must_use]
    pub const fn stats(&self) -> PropagationStats {
        self.state.stats()
    }

    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }
}
