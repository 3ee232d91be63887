#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use sat_propagator::sat::configs::SolverConfig;
use sat_propagator::sat::dimacs::{self, Formula};
use sat_propagator::sat::error::{Error, Result};
use sat_propagator::sat::literal::Literal;
use sat_propagator::sat::propagation::PropagatorType;
use sat_propagator::sat::solver::Solver;
use sat_propagator::sat::variable_selection::{
    DEFAULT_SEED, VariableSelection, VariableSelectionType,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Command-line interface of the propagator.
#[derive(Parser, Debug)]
#[command(
    name = "sat-propagator",
    version,
    about = "Unit propagation over CNF formulas"
)]
pub(crate) struct Cli {
    /// A DIMACS `.cnf` file, or a directory searched recursively for them.
    /// Used when no subcommand is given.
    pub path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Propagate a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Propagate a CNF formula given as plain text, without a header.
    Text {
        /// One clause per line, e.g. "1 -2 0\n2 3 0".
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print problem and propagation statistics.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) stats: bool,

    #[arg(long, default_value_t = PropagatorType::FullScan)]
    pub(crate) propagator: PropagatorType,

    /// A DIMACS literal to assign before propagating. Repeatable.
    #[arg(short, long = "assume", value_name = "LITERAL", allow_negative_numbers = true)]
    pub(crate) assumptions: Vec<i32>,

    /// Write the rebased clause set to this file in DIMACS format.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Print the rebased clause set in DIMACS format.
    #[arg(long, default_value_t = false)]
    pub(crate) print_rebase: bool,

    /// Suggest the next decision variable after a successful propagation.
    #[arg(long)]
    pub(crate) suggest: Option<VariableSelectionType>,

    /// Seed of the random variable selection.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,
}

/// Result of propagating one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Propagated,
    Conflict,
}

impl Outcome {
    pub(crate) const fn is_conflict(self) -> bool {
        matches!(self, Self::Conflict)
    }
}

/// Propagates a DIMACS file.
///
/// # Errors
///
/// If the file cannot be parsed, an assumption is invalid or output cannot be written.
pub(crate) fn propagate_file(path: &Path, common: &CommonOptions) -> Result<Outcome> {
    let time = Instant::now();
    let formula = dimacs::parse_file(path)?;
    let parse_time = time.elapsed();

    propagate_and_report(&formula, common, Some(path), parse_time)
}

/// Propagates a header-less formula given on the command line.
///
/// # Errors
///
/// See [`propagate_file`].
pub(crate) fn propagate_text(input: &str, common: &CommonOptions) -> Result<Outcome> {
    let time = Instant::now();
    let formula = dimacs::parse_text(input)?;
    let parse_time = time.elapsed();

    propagate_and_report(&formula, common, None, parse_time)
}

/// Propagates every `.cnf` file below `path`.
///
/// The outcome is a conflict if any file conflicts.
///
/// # Errors
///
/// Stops at the first file that fails, see [`propagate_file`].
pub(crate) fn propagate_dir(path: &Path, common: &CommonOptions) -> Result<Outcome> {
    let mut outcome = Outcome::Propagated;

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            log::info!("Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        if propagate_file(file_path, common)?.is_conflict() {
            outcome = Outcome::Conflict;
        }
    }

    Ok(outcome)
}

fn assumption_literal(value: i32, num_vars: usize) -> Result<Literal> {
    Literal::from_dimacs(value)
        .filter(|l| l.variable().index() < num_vars)
        .ok_or(Error::InvalidAssumption(value))
}

/// Assigns the assumptions, then propagates.
///
/// Returns `false` if an assumption contradicts an earlier one or propagation hits
/// a conflict.
pub(crate) fn run(solver: &mut Solver, assumptions: &[Literal]) -> bool {
    for &l in assumptions {
        if !solver.assign(l) {
            log::info!("Assumption {l} contradicts the model.");
            return false;
        }
    }
    solver.unit_propagate()
}

pub(crate) fn propagate_and_report(
    formula: &Formula,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<Outcome> {
    if let Some(name) = label {
        println!("Propagating: {}", name.display());
    }

    let assumptions = common
        .assumptions
        .iter()
        .map(|&a| assumption_literal(a, formula.num_vars))
        .collect::<Result<Vec<_>>>()?;

    let config = SolverConfig::new(common.propagator);
    let time = Instant::now();
    let mut solver = Solver::from_clauses(formula.num_vars, formula.clauses.iter().cloned(), config);
    let ok = run(&mut solver, &assumptions);
    let elapsed = time.elapsed();

    let outcome = if ok {
        Outcome::Propagated
    } else {
        Outcome::Conflict
    };

    if ok {
        if let Some(suggest) = common.suggest {
            let mut heuristic = suggest.to_impl(common.seed);
            let model = solver.model();
            match heuristic.pick(model, model.num_open()) {
                Some(x) => println!("Next decision ({suggest}): {x}"),
                None => println!("Every variable is assigned"),
            }
        }
    }

    if common.print_rebase || common.output.is_some() {
        let rebased = solver.rebase();
        if common.print_rebase {
            print!("{}", dimacs::to_dimacs(&rebased));
        }
        if let Some(output) = &common.output {
            dimacs::write_file(output, &rebased)?;
            println!("Rebased formula written to: {}", output.display());
        }
    }

    if common.stats {
        print_stats(parse_time, elapsed, formula, &solver, assumptions.len());
    }

    println!(
        "\n{}",
        match outcome {
            Outcome::Propagated => "PROPAGATED",
            Outcome::Conflict => "CONFLICT",
        }
    );

    Ok(outcome)
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;

    let allocated_bytes = stats::allocated::mib().ok()?.read().ok()?;
    let resident_bytes = stats::resident::mib().ok()?.read().ok()?;

    Some((
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    ))
}

pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a statistic together with its rate per second of `elapsed`.
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    formula: &Formula,
    solver: &Solver,
    num_assumptions: usize,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let s = solver.stats();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", formula.num_vars);
    stat_line("Clauses (input)", formula.num_clauses());
    stat_line("Literals (input)", formula.num_literals());
    stat_line("Clauses (database)", solver.num_clauses());

    println!("======================[ Propagation Statistics ]=====================");
    stat_line("Propagator", solver.config().propagator);
    stat_line("Assumptions", num_assumptions);
    stat_line("Assigned variables", solver.num_assigned());
    stat_line("Passes", s.passes);
    stat_line_with_rate("Clause visits", s.clause_visits, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line("Conflicts", s.conflicts);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sat_propagator::sat::literal::{Variable, neg, pos};

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_common_options() {
        let cli = Cli::parse_from([
            "sat-propagator",
            "problem.cnf",
            "--propagator",
            "watched-literals",
            "-a",
            "-3",
            "--assume",
            "1",
            "--stats",
            "false",
            "--suggest",
            "random",
        ]);

        assert_eq!(cli.path, Some(PathBuf::from("problem.cnf")));
        assert!(cli.command.is_none());
        assert_eq!(cli.common.propagator, PropagatorType::WatchedLiterals);
        assert_eq!(cli.common.assumptions, vec![-3, 1]);
        assert!(!cli.common.stats);
        assert_eq!(cli.common.suggest, Some(VariableSelectionType::Random));
        assert_eq!(cli.common.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_parse_text_subcommand() {
        let cli = Cli::parse_from(["sat-propagator", "text", "--input", "1 -2 0", "--print-rebase"]);
        match cli.command {
            Some(Commands::Text { input, common }) => {
                assert_eq!(input, "1 -2 0");
                assert!(common.print_rebase);
                assert_eq!(common.propagator, PropagatorType::FullScan);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_assumption_literal() {
        assert_eq!(
            assumption_literal(-2, 3).unwrap(),
            neg(Variable::new(1))
        );
        assert!(matches!(
            assumption_literal(4, 3),
            Err(Error::InvalidAssumption(4))
        ));
        assert!(matches!(
            assumption_literal(0, 3),
            Err(Error::InvalidAssumption(0))
        ));
    }

    #[test]
    fn test_run_with_assumptions() {
        let formula = dimacs::parse_text("-1 2 0\n-2 3 0").unwrap();
        let mut solver =
            Solver::from_clauses(formula.num_vars, formula.clauses, SolverConfig::default());

        assert!(run(&mut solver, &[pos(Variable::new(0))]));
        assert!(solver.satisfied(pos(Variable::new(2))));
    }

    #[test]
    fn test_run_with_contradicting_assumptions() {
        let x = Variable::new(0);
        let mut solver = Solver::new(1);
        assert!(!run(&mut solver, &[pos(x), neg(x)]));
    }
}
