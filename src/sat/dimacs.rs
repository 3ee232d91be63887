#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading and writing the DIMACS CNF format.
//!
//! The format typically includes:
//! - Comment lines starting with 'c'.
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - One clause per line: signed, 1-based literals terminated by a '0'.
//!
//! The loader reads the header and then exactly the declared number of clause lines,
//! skipping comments in between. Anything after the last declared clause is ignored.

use crate::sat::clause::Clause;
use crate::sat::error::DimacsError;
use crate::sat::literal::Literal;
use crate::sat::log::targets;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;

/// Largest variable count whose literals all have a DIMACS form.
pub const MAX_DIMACS_VARIABLES: usize = i32::MAX as usize;

/// Largest variable count [`parse_text`] accepts, as the model is sized by the
/// largest variable mentioned.
pub const MAX_TEXT_VARIABLES: usize = 1 << 24;

/// Parsed clauses together with the declared number of variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    pub clauses: Vec<Vec<Literal>>,
    pub num_vars: usize,
}

impl Formula {
    /// Number of clauses, including empty ones.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Vec::len).sum()
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), DimacsError> {
    let invalid = || DimacsError::InvalidHeader(line.to_string());

    let parts = line.split_whitespace().collect_vec();
    let [_, _, vars, clauses] = parts.as_slice() else {
        return Err(invalid());
    };

    let vars: usize = vars.parse().map_err(|_| invalid())?;
    let clauses = clauses.parse().map_err(|_| invalid())?;

    // every variable must be writable back as a positive `i32`
    if vars > MAX_DIMACS_VARIABLES {
        return Err(invalid());
    }
    Ok((vars, clauses))
}

/// Parses one clause line, stopping at the first `0`.
fn parse_clause(line: &str, line_no: usize, num_vars: usize) -> Result<Vec<Literal>, DimacsError> {
    let mut literals = Vec::new();

    for token in line.split_whitespace() {
        let value: i32 = token
            .parse()
            .ok()
            .filter(|&v| v != i32::MIN)
            .ok_or_else(|| DimacsError::InvalidLiteral {
                line: line_no,
                token: token.to_string(),
            })?;

        let Some(literal) = Literal::from_dimacs(value) else {
            break;
        };

        if literal.variable().index() >= num_vars {
            return Err(DimacsError::VariableOutOfRange {
                line: line_no,
                literal: value,
                num_vars,
            });
        }
        literals.push(literal);
    }

    Ok(literals)
}

/// Parses DIMACS formatted data from a `BufRead` source.
///
/// # Errors
///
/// - [`DimacsError::Io`] if reading fails.
/// - [`DimacsError::MissingHeader`] if no line starts with `p`.
/// - [`DimacsError::InvalidHeader`] if the problem line is not `p cnf <vars> <clauses>`.
/// - [`DimacsError::NotEnoughClauses`] if the input ends before the declared clause count.
/// - [`DimacsError::InvalidLiteral`] for a token that is not an integer.
/// - [`DimacsError::VariableOutOfRange`] for a literal beyond the declared variables.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Formula, DimacsError> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let mut header = None;
    for (_, line) in lines.by_ref() {
        let line = line?;
        if line.starts_with('c') {
            continue;
        }
        if line.starts_with('p') {
            header = Some(parse_header(&line)?);
            break;
        }
    }
    let (num_vars, num_clauses) = header.ok_or(DimacsError::MissingHeader)?;

    let mut clauses = Vec::with_capacity(num_clauses);
    while clauses.len() < num_clauses {
        let Some((line_no, line)) = lines.next() else {
            return Err(DimacsError::NotEnoughClauses {
                expected: num_clauses,
                found: clauses.len(),
            });
        };
        let line = line?;
        if line.starts_with('c') {
            continue;
        }
        clauses.push(parse_clause(&line, line_no, num_vars)?);
    }

    log::debug!(
        target: targets::DIMACS,
        "Parsed {} clauses over {num_vars} variables.",
        clauses.len()
    );

    Ok(Formula { clauses, num_vars })
}

/// Parses header-less clause lines, e.g. `"1 -2 0\n2 3 0"`.
///
/// Empty lines and comments are skipped and the variable count is the largest
/// variable mentioned.
///
/// # Errors
///
/// - [`DimacsError::InvalidLiteral`] for a token that is not an integer.
/// - [`DimacsError::TooManyVariables`] if a variable beyond [`MAX_TEXT_VARIABLES`]
///   is mentioned.
pub fn parse_text(input: &str) -> Result<Formula, DimacsError> {
    let clauses: Vec<Vec<Literal>> = input
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty() && !l.starts_with('c') && !l.starts_with('p'))
        .map(|(i, l)| parse_clause(l, i + 1, usize::MAX))
        .try_collect()?;

    let num_vars = clauses
        .iter()
        .flatten()
        .map(|l| l.variable().index() + 1)
        .max()
        .unwrap_or(0);

    if num_vars > MAX_TEXT_VARIABLES {
        return Err(DimacsError::TooManyVariables {
            num_vars,
            max: MAX_TEXT_VARIABLES,
        });
    }

    Ok(Formula { clauses, num_vars })
}

/// Parses a DIMACS CNF file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its content is malformed,
/// see [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Formula, DimacsError> {
    let file = std::fs::File::open(file_path)?;
    let reader = io::BufReader::new(file);
    parse_dimacs(reader)
}

/// Serialises clauses to DIMACS.
///
/// The header declares `var(max literal) + 1` variables; every clause becomes a line
/// of signed 1-based literals terminated by `0`.
#[must_use]
pub fn to_dimacs<'a, I>(clauses: I) -> String
where
    I: IntoIterator<Item = &'a Clause>,
    I::IntoIter: Clone,
{
    let clauses = clauses.into_iter();
    let num_vars = clauses
        .clone()
        .flat_map(Clause::iter)
        .max()
        .map_or(0, |l| l.variable().index() + 1);

    let mut out = format!("p cnf {num_vars} {}\n", clauses.clone().count());
    for clause in clauses {
        for l in clause {
            out.push_str(&l.to_dimacs().to_string());
            out.push(' ');
        }
        out.push_str("0\n");
    }
    out
}

/// Writes clauses to `path` in DIMACS format.
///
/// # Errors
///
/// Returns any I/O error raised while writing.
pub fn write_file<P: AsRef<Path>>(path: P, clauses: &[Clause]) -> io::Result<()> {
    std::fs::write(path, to_dimacs(clauses))
}
