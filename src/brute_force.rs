use crate::*;

// Exhaustive search, used as an oracle in tests
pub(crate) fn solve_brute_force(f: &Formula) -> SatResult {
    let num_variables = f.num_variables();
    assert!(num_variables <= 15); // just for safety

    fn assignment_for(assignment: u32, x: usize) -> bool {
        assignment & (1 << x) == 0
    }

    'search: for assignment in 0..2u32.pow(num_variables as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if assignment_for(assignment, literal.idx()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied, so we're done and satisfiable
        let values = (0..num_variables).map(|x| assignment_for(assignment, x)).collect();
        return SatResult::Satisfiable(Model::new(values));
    }
    // no assignment is valid
    SatResult::Unsatisfiable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};
    use test_env_log::test;

    fn formula(num_variables: usize, clauses: Vec<Clause>) -> Formula {
        Formula::new(num_variables, clauses).expect("literals are in range")
    }

    #[test]
    fn brute_force_sat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let f = formula(2, vec![c1, c2]);

        match solve_brute_force(&f) {
            SatResult::Satisfiable(model) => assert!(model.satisfies(&f)),
            SatResult::Unsatisfiable => panic!("expected sat"),
        }
    }

    #[test]
    fn brute_force_unsat() {
        let c1 = Clause::new(vec![p(1), p(2)]);
        let c2 = Clause::new(vec![n(1)]);
        let c3 = Clause::new(vec![n(2)]);
        let f = formula(2, vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), SatResult::Unsatisfiable);
    }

    #[test]
    fn brute_force_boundaries() {
        assert!(solve_brute_force(&formula(0, vec![])).is_satisfiable());
        assert_eq!(
            solve_brute_force(&formula(1, vec![Clause::new(vec![])])),
            SatResult::Unsatisfiable
        );
    }
}
