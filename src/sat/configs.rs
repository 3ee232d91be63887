use crate::sat::propagation::PropagatorType;

/// Construction-time options of a [`Solver`](crate::sat::solver::Solver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfig {
    /// Algorithm used by `unit_propagate`.
    pub propagator: PropagatorType,
}

impl SolverConfig {
    #[must_use]
    pub const fn new(propagator: PropagatorType) -> Self {
        Self { propagator }
    }
}
