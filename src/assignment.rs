use crate::formula::Literal;
use log::trace;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Value {
    True,
    False,
    Undecided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseIdx(pub usize);

/// Why a literal was put on the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    Decision,
    /// Forced by unit propagation on the given clause.
    Implied(ClauseIdx),
    /// Implied by pure-literal elimination; justifies itself.
    Pure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub literal: Literal,
    pub reason: Reason,
}

/// A position on the trail that [`Trail::rollback_to`] can return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// Current truth values plus the chronological log of how they were assigned.
#[derive(Debug)]
pub struct Trail {
    values: Vec<Value>,
    events: Vec<Event>,
    decision_level: usize,
}

impl Trail {
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![Value::Undecided; num_variables],
            events: vec![],
            decision_level: 0,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn decision_level(&self) -> usize {
        self.decision_level
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn value_of(&self, literal: &Literal) -> Value {
        match self.values[literal.idx()] {
            Value::True => {
                if literal.is_positive() {
                    Value::True
                } else {
                    Value::False
                }
            }
            Value::False => {
                if literal.is_positive() {
                    Value::False
                } else {
                    Value::True
                }
            }
            Value::Undecided => Value::Undecided,
        }
    }

    /// Makes `literal` true. Panics if its variable already has a value.
    pub fn assign(&mut self, literal: &Literal, reason: Reason) {
        assert_eq!(
            self.value_of(literal),
            Value::Undecided,
            "variable {} assigned twice",
            literal.variable().0
        );

        if reason == Reason::Decision {
            self.decision_level += 1;
        }

        trace!(
            "{} {} at level {}",
            match reason {
                Reason::Decision => "decision".to_string(),
                Reason::Implied(c) => format!("implied({})", c.0),
                Reason::Pure => "pure".to_string(),
            },
            literal,
            self.decision_level
        );

        self.events.push(Event {
            literal: *literal,
            reason,
        });
        self.values[literal.idx()] = if literal.is_positive() { Value::True } else { Value::False };
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.events.len())
    }

    /// Unassigns everything assigned since `checkpoint`, newest first.
    pub fn rollback_to(&mut self, checkpoint: Checkpoint) {
        assert!(checkpoint.0 <= self.events.len(), "rollback past the end of the trail");
        trace!("rollback: dropping to {} from {}", checkpoint.0, self.events.len());

        for event in self.events.drain(checkpoint.0..).rev() {
            self.values[event.literal.idx()] = Value::Undecided;
            if event.reason == Reason::Decision {
                self.decision_level -= 1;
            }
        }
    }
}
