//! # sat-propagator
//!
//! Command-line front end for the unit propagation engine. It loads a CNF formula,
//! optionally assigns a set of assumption literals, propagates to a fixpoint and
//! reports whether a conflict was found.
//!
//! ## Usage
//!
//! ```sh
//! sat-propagator [PATH] [OPTIONS]
//! sat-propagator file --path <file.cnf> [OPTIONS]
//! sat-propagator text --input "1 -2 0\n2 3 0" [OPTIONS]
//! sat-propagator completions <SHELL>
//! ```
//!
//! `PATH` may be a single DIMACS file or a directory, in which case every `.cnf` file
//! below it is processed.
//!
//! ## Options
//!
//! -   `-d, --debug`: Enable debug logging (`RUST_LOG` takes precedence).
//! -   `--stats <BOOL>`: Print statistics (default: `true`).
//! -   `--propagator <full-scan|watched-literals>`: Propagation algorithm.
//! -   `-a, --assume <LITERAL>`: Assign a DIMACS literal before propagating. Repeatable.
//! -   `-o, --output <FILE>`: Write the rebased formula as DIMACS.
//! -   `--print-rebase`: Print the rebased formula as DIMACS.
//! -   `--suggest <first|random>`: Suggest the next decision variable.
//! -   `--seed <N>`: Seed of the random suggestion.
//!
//! ## Exit status
//!
//! `0` when every formula propagates without conflict, `20` when a conflict is found,
//! `1` on errors.

use crate::command_line::cli::{Cli, Commands, CommonOptions, Outcome};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const EXIT_CONFLICT: u8 = 20;

fn init_logging(common: &CommonOptions) {
    let level = if common.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            return ExitCode::SUCCESS;
        }
        Some(Commands::File { path, common }) => {
            init_logging(&common);
            command_line::cli::propagate_file(&path, &common)
        }
        Some(Commands::Text { input, common }) => {
            init_logging(&common);
            command_line::cli::propagate_text(&input, &common)
        }
        None => {
            init_logging(&cli.common);
            match cli.path {
                Some(path) if path.is_dir() => command_line::cli::propagate_dir(&path, &cli.common),
                Some(path) => command_line::cli::propagate_file(&path, &cli.common),
                None => {
                    eprintln!("No command provided. Use --help for more information.");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match result {
        Ok(Outcome::Propagated) => ExitCode::SUCCESS,
        Ok(Outcome::Conflict) => ExitCode::from(EXIT_CONFLICT),
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
