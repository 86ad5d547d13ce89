use crate::formula::{Clause, Formula, FormulaError, Literal};
use std::fmt::{self, Display, Formatter};
use std::io::{BufRead, BufReader, Read};

/// Reads a formula in DIMACS CNF format.
///
/// Clauses are runs of literals terminated by `0` and may span lines. The number of clauses
/// must match the `p cnf` header exactly, and every literal must name one of the declared
/// variables.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut header = None;
    let mut clauses = vec![];
    let mut clause = vec![];

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            None => continue,
            Some(t) if t.starts_with('c') => continue,
            Some(t) if t.starts_with('%') => break,
            Some(&"p") => {
                if header.is_some() {
                    return Err(DimacsParseError::Format("duplicate 'p' line".into()));
                }
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let num_clauses = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                if line.next().is_some() {
                    return Err(DimacsParseError::Format("trailing tokens after 'p' line".into()));
                }

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                if header.is_none() {
                    return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
                }

                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => clauses.push(Clause::new(clause.drain(..))),
                    }
                }
            }
        }
    }

    let (num_variables, num_clauses) = header.ok_or_else(|| DimacsParseError::Format("missing 'p' line".into()))?;

    // tolerate a missing terminator on the last clause
    if !clause.is_empty() {
        clauses.push(Clause::new(clause));
    }

    if clauses.len() != num_clauses {
        return Err(DimacsParseError::Format(format!(
            "expected {} clauses, found {}",
            num_clauses,
            clauses.len()
        )));
    }

    log::debug!("parsed {} variables, {} clauses", num_variables, num_clauses);

    let formula = Formula::new(num_variables, clauses)?;
    Ok(formula)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    Ok(Literal::from_dimacs(l))
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
    Formula(FormulaError),
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DimacsParseError::Io(e) => write!(f, "read error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "malformed input: {}", msg),
            DimacsParseError::Formula(e) => write!(f, "malformed input: {}", e),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
            DimacsParseError::Formula(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FormulaError> for DimacsParseError {
    fn from(e: FormulaError) -> Self {
        Self::Formula(e)
    }
}
