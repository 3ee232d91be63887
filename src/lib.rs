//! Unit propagation for CNF formulas.
//!
//! The crate maintains a partial assignment over a fixed set of boolean variables
//! together with a growing set of clauses, propagates forced assignments to a
//! fixpoint and reports contradictions. It is the propagation layer of a SAT solver,
//! without search, backtracking or learning.

/// Literals, clauses, the model, propagation and DIMACS I/O.
pub mod sat;
