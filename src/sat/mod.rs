#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod clause;
pub mod clause_db;
pub mod configs;
pub mod dimacs;
pub mod error;
pub mod literal;
pub mod log;
pub mod propagation;
pub mod solver;
pub mod state;
pub mod variable_selection;
pub mod watch;
