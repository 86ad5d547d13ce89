pub mod dimacs;

use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};

/// A propositional variable, numbered from 1 as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

impl Variable {
    /// Zero-based slot for this variable in per-variable tables.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    /// Decodes a signed DIMACS literal. Returns `None` for the clause terminator `0`.
    pub fn from_dimacs(l: isize) -> Option<Self> {
        if l > 0 {
            Some(Literal::Positive(Variable(l as usize)))
        } else if l < 0 {
            Some(Literal::Negative(Variable(l.unsigned_abs())))
        } else {
            None
        }
    }

    pub fn to_dimacs(&self) -> isize {
        match self {
            Literal::Positive(v) => v.0 as isize,
            Literal::Negative(v) => -(v.0 as isize),
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().index()
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A disjunction of literals. Repeated literals are dropped on construction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: Vec<Literal> = vec![];
        for literal in disjuncts {
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        Self { literals }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True if the clause contains some literal together with its negation.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|l| l.is_positive() && self.literals.contains(&l.negated()))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("(")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", literal)?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    VariableOutOfRange { literal: isize, num_variables: usize },
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FormulaError::VariableOutOfRange { literal, num_variables } => write!(
                f,
                "literal {} is outside the declared {} variables",
                literal, num_variables
            ),
        }
    }
}

impl std::error::Error for FormulaError {}

/// A CNF formula over the variables `1..=num_variables`. Immutable once built.
#[derive(Clone)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_variables: usize, conjuncts: impl IntoIterator<Item = Clause>) -> Result<Self, FormulaError> {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        for literal in clauses.iter().flat_map(|c| c.literals()) {
            let Variable(v) = *literal.variable();
            if v == 0 || v > num_variables {
                return Err(FormulaError::VariableOutOfRange {
                    literal: literal.to_dimacs(),
                    num_variables,
                });
            }
        }
        Ok(Self { num_variables, clauses })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.len() == 1 {
                write!(f, "{}", clause.literals[0])?;
            } else {
                write!(f, "{}", clause)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

// Random 3-SAT formulas small enough for the brute-force oracle
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1usize..=8).prop_flat_map(|num_variables| {
        let literal = (1..=num_variables, any::<bool>()).prop_map(|(x, positive)| if positive { p(x) } else { n(x) });
        let clause = proptest::collection::vec(literal, 1..=3).prop_map(|literals| Clause::new(literals));
        proptest::collection::vec(clause, 0..24)
            .prop_map(move |clauses| Formula::new(num_variables, clauses).expect("literals are in range"))
    })
}
