pub mod assignment;
pub mod formula;
pub mod report;
mod solver;

#[cfg(test)]
mod brute_force;

use assignment::Trail;

pub use formula::dimacs::{parse, DimacsParseError};
pub use formula::{Clause, Formula, FormulaError, Literal, Variable};
pub use report::write_result;
pub use solver::{Solver, Stats};

#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }
}

/// A total assignment to the variables `1..=n` of a formula.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    #[cfg(test)]
    pub(crate) fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Reads the final assignment off the trail. Variables the search never had to
    /// decide on are set to true; any value works for them.
    pub(crate) fn from_trail(trail: &Trail) -> Self {
        let mut values = vec![true; trail.num_variables()];
        for event in trail.events() {
            values[event.literal.idx()] = event.literal.is_positive();
        }
        Self { values }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: Variable) -> bool {
        self.values[variable.index()]
    }

    /// The literal made true for each variable, in increasing variable order.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().enumerate().map(|(i, &value)| {
            let variable = Variable(i + 1);
            if value {
                Literal::Positive(variable)
            } else {
                Literal::Negative(variable)
            }
        })
    }

    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula.clauses().all(|clause| {
            clause
                .literals()
                .any(|literal| literal.idx() < self.values.len() && self.values[literal.idx()] == literal.is_positive())
        })
    }
}
