use std::fmt::{self, Display};

use crate::{State, Symbol};

/// Labeled edge `start --label--> end`. A `None` label is an epsilon transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    start: State,
    label: Option<Symbol>,
    end: State,
}

impl Transition {
    pub fn new(start: State, symbol: Symbol, end: State) -> Transition {
        Transition {
            start,
            label: Some(symbol),
            end,
        }
    }

    pub fn epsilon(start: State, end: State) -> Transition {
        Transition {
            start,
            label: None,
            end,
        }
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn label(&self) -> Option<Symbol> {
        self.label
    }

    pub fn end(&self) -> State {
        self.end
    }

    pub fn is_epsilon(&self) -> bool {
        self.label.is_none()
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label {
            Some(c) => write!(f, "{} |-{}-> {}", self.start, c, self.end),
            None => write!(f, "{} |--> {}", self.start, self.end),
        }
    }
}
