/*!
Targets for the [log] macros used throughout the library.

No logger is installed by the library itself; the binary sets up `env_logger`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Forced assignments and conflicts found by unit propagation.
    pub const PROPAGATION: &str = "propagation";

    /// Clauses entering or being rejected by the clause database.
    pub const CLAUSE_DB: &str = "clause_db";

    /// Direct assignments to the model.
    pub const VALUATION: &str = "valuation";

    /// Simplification of the clause database under the model.
    pub const REBASE: &str = "rebase";

    /// Reading and writing DIMACS files.
    pub const DIMACS: &str = "dimacs";
}
