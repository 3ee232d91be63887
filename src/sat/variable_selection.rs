#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics.
//!
//! A search layer on top of propagation needs to pick the next variable to decide.
//! Propagation itself never calls these.

use crate::sat::assignment::Model;
use crate::sat::literal::Variable;
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Seed used by [`RandomOrder`] when none is given.
pub const DEFAULT_SEED: u64 = 1337;

pub trait VariableSelection: Debug {
    /// Picks an unassigned variable, `None` if every variable is assigned.
    ///
    /// `num_open` is the number of unassigned variables in `model`.
    fn pick(&mut self, model: &Model, num_open: usize) -> Option<Variable>;
}

/// The unassigned variable with the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirstUnassigned;

impl VariableSelection for FirstUnassigned {
    fn pick(&mut self, model: &Model, _num_open: usize) -> Option<Variable> {
        model
            .iter()
            .find(|(_, v)| v.is_undefined())
            .map(|(x, _)| x)
    }
}

/// A uniformly random unassigned variable.
///
/// The generator is owned and explicitly seeded, so runs are reproducible.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: fastrand::Rng,
}

impl RandomOrder {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl VariableSelection for RandomOrder {
    fn pick(&mut self, model: &Model, num_open: usize) -> Option<Variable> {
        if num_open == 0 {
            return None;
        }

        let nth = self.rng.usize(..num_open);
        model
            .iter()
            .filter(|(_, v)| v.is_undefined())
            .nth(nth)
            .map(|(x, _)| x)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum VariableSelectionType {
    /// Lowest-index unassigned variable.
    #[default]
    First,
    /// Uniformly random unassigned variable.
    Random,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl VariableSelectionType {
    #[must_use]
    pub fn to_impl(self, seed: u64) -> Box<dyn VariableSelection> {
        match self {
            Self::First => Box::new(FirstUnassigned),
            Self::Random => Box::new(RandomOrder::new(seed)),
        }
    }
}
