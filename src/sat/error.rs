//! Error types.
//!
//! The propagation core itself reports contradictions and conflicts through plain
//! boolean results. Errors here belong to the boundary: loading and writing DIMACS
//! and turning user input into literals.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("failed to read DIMACS input: {0}")]
    Io(#[from] io::Error),

    #[error("no `p cnf <variables> <clauses>` header found")]
    MissingHeader,

    #[error("invalid header line `{0}`")]
    InvalidHeader(String),

    #[error("expected {expected} clause lines but found only {found}")]
    NotEnoughClauses { expected: usize, found: usize },

    #[error("line {line}: `{token}` is not a literal")]
    InvalidLiteral { line: usize, token: String },

    #[error("{num_vars} variables exceed the limit of {max}")]
    TooManyVariables { num_vars: usize, max: usize },

    #[error("line {line}: literal {literal} exceeds the declared {num_vars} variables")]
    VariableOutOfRange {
        line: usize,
        literal: i32,
        num_vars: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Dimacs(#[from] DimacsError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("assumption {0} is not a literal of the formula")]
    InvalidAssumption(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
