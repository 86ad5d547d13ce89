use crate::assignment::{Checkpoint, ClauseIdx, Reason, Trail, Value};
use crate::formula::{Clause, Formula, Literal, Variable};
use crate::{Model, SatResult};
use log::{debug, trace};

/// A DPLL solver: unit propagation and pure-literal elimination at every node, then
/// chronological backtracking over both polarities of a branching variable.
pub struct Solver {
    // tautologies are dropped; each clause keeps its position in the formula
    clauses: Vec<(ClauseIdx, Clause)>,
    num_variables: usize,
    stats: Stats,
}

/// Counters for the most recent call to [`Solver::solve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

#[derive(PartialEq, Eq, Clone, Debug)]
enum BcpResult {
    Conflict(ClauseIdx),
    NoConflict,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Node {
    Satisfied,
    Conflict,
    Branch(Variable),
}

/// One open decision on the search stack.
#[derive(Debug)]
struct Frame {
    variable: Variable,
    // trail position before the decision was made
    checkpoint: Checkpoint,
    tried_false: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Occurrences {
    positive: bool,
    negative: bool,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        let num_variables = formula.num_variables();
        let clauses = formula
            .clauses()
            .enumerate()
            .filter(|(_, c)| !c.is_tautology())
            .map(|(idx, c)| (ClauseIdx(idx), c.clone()))
            .collect();
        Self {
            clauses,
            num_variables,
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        self.stats = Stats::default();
        let mut trail = Trail::new(self.num_variables);
        let mut stack: Vec<Frame> = vec![];

        let result = loop {
            match self.simplify(&mut trail) {
                Node::Satisfied => break SatResult::Satisfiable(Model::from_trail(&trail)),
                Node::Branch(variable) => {
                    stack.push(Frame {
                        variable,
                        checkpoint: trail.checkpoint(),
                        tried_false: false,
                    });
                    self.decide(&mut trail, Literal::Positive(variable));
                }
                Node::Conflict => {
                    self.stats.conflicts += 1;
                    if !self.backtrack(&mut trail, &mut stack) {
                        break SatResult::Unsatisfiable;
                    }
                }
            }
        };

        debug!(
            "{}: {} decisions, {} propagations, {} pure literals, {} conflicts",
            if result.is_satisfiable() { "sat" } else { "unsat" },
            self.stats.decisions,
            self.stats.propagations,
            self.stats.pure_literals,
            self.stats.conflicts
        );
        result
    }

    /// Propagates and eliminates pure literals to a fixpoint, then classifies the node.
    fn simplify(&mut self, trail: &mut Trail) -> Node {
        loop {
            if let BcpResult::Conflict(idx) = self.bcp(trail) {
                trace!(
                    "conflict on clause {} at level {} with {} assigned",
                    idx.0,
                    trail.decision_level(),
                    trail.len()
                );
                return Node::Conflict;
            }
            if !self.eliminate_pure_literals(trail) {
                break;
            }
        }
        self.choose_branch(trail)
    }

    fn bcp(&mut self, trail: &mut Trail) -> BcpResult {
        let mut did_work = true;
        while did_work {
            did_work = false;
            'clauses: for (idx, clause) in &self.clauses {
                let mut last_literal = None;
                'literals: for literal in clause.literals() {
                    match trail.value_of(literal) {
                        // true => this clause is satisfied
                        Value::True => continue 'clauses,
                        // false => need to look at more literals, but we can't change the assignment
                        Value::False => continue 'literals,
                        // undecided => we'll be assigning this literal if it's the only undecided one
                        Value::Undecided => {
                            if last_literal.is_none() {
                                last_literal = Some(literal);
                            } else {
                                // Second undecided literal, can't resolve this clause
                                continue 'clauses;
                            }
                        }
                    }
                }
                // if last_literal is none, every literal was false => we have a conflict
                // otherwise we can apply unit resolution and continue
                match last_literal {
                    Some(literal) => trail.assign(literal, Reason::Implied(*idx)),
                    None => return BcpResult::Conflict(*idx),
                }
                self.stats.propagations += 1;
                did_work = true;
            }
        }
        BcpResult::NoConflict
    }

    /// Polarities of each variable's undecided occurrences in clauses not yet satisfied.
    fn occurrences(&self, trail: &Trail) -> Vec<Occurrences> {
        let mut occurrences = vec![Occurrences::default(); self.num_variables];
        for (_, clause) in &self.clauses {
            if is_satisfied(clause, trail) {
                continue;
            }
            for literal in clause.literals() {
                if trail.value_of(literal) == Value::Undecided {
                    let occurrence = &mut occurrences[literal.idx()];
                    if literal.is_positive() {
                        occurrence.positive = true;
                    } else {
                        occurrence.negative = true;
                    }
                }
            }
        }
        occurrences
    }

    // Returns true if anything was assigned.
    fn eliminate_pure_literals(&mut self, trail: &mut Trail) -> bool {
        let mut eliminated = false;
        for (i, occurrence) in self.occurrences(trail).into_iter().enumerate() {
            let variable = Variable(i + 1);
            let literal = match (occurrence.positive, occurrence.negative) {
                (true, false) => Literal::Positive(variable),
                (false, true) => Literal::Negative(variable),
                _ => continue,
            };
            // Satisfying other pure literals first can only remove occurrences, so this stays safe.
            trail.assign(&literal, Reason::Pure);
            self.stats.pure_literals += 1;
            eliminated = true;
        }
        eliminated
    }

    /// Picks the lowest-numbered undecided variable of any unsatisfied clause.
    fn choose_branch(&self, trail: &Trail) -> Node {
        let mut branch: Option<Variable> = None;
        for (_, clause) in &self.clauses {
            if is_satisfied(clause, trail) {
                continue;
            }
            for literal in clause.literals() {
                let variable = *literal.variable();
                if trail.value_of(literal) == Value::Undecided && branch.map_or(true, |b| variable < b) {
                    branch = Some(variable);
                }
            }
        }
        match branch {
            Some(variable) => Node::Branch(variable),
            None => Node::Satisfied,
        }
    }

    fn decide(&mut self, trail: &mut Trail, literal: Literal) {
        self.stats.decisions += 1;
        trail.assign(&literal, Reason::Decision);
    }

    /// Undoes the search up to the most recent decision that still has its `false` branch open,
    /// and takes that branch. Returns false once every decision is exhausted.
    fn backtrack(&mut self, trail: &mut Trail, stack: &mut Vec<Frame>) -> bool {
        while let Some(frame) = stack.last_mut() {
            trail.rollback_to(frame.checkpoint);
            if !frame.tried_false {
                frame.tried_false = true;
                let literal = Literal::Negative(frame.variable);
                self.decide(trail, literal);
                return true;
            }
            stack.pop();
        }
        false
    }
}

fn is_satisfied(clause: &Clause, trail: &Trail) -> bool {
    clause.literals().any(|l| trail.value_of(l) == Value::True)
}
