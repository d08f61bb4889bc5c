use std::fmt::{self, Display};

use thiserror::Error;

use crate::Automaton;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no automaton was found")]
    NoAutomaton,
    #[error("automaton #{0} has no name")]
    Unnamed(usize),
    #[error("two automata are named {0}")]
    DuplicateName(String),
    #[error("automaton {0} is not deterministic")]
    NotDeterministic(String),
}

/// Every problem found by [`validate`], in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "error: {}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

/// Checks that `automata` can be handed to the code generator: there is at
/// least one, each is named, names are unique and each is deterministic.
pub fn validate(automata: &[Automaton]) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if automata.is_empty() {
        errors.push(ValidationError::NoAutomaton);
    }

    for (i, a) in automata.iter().enumerate() {
        if !a.is_deterministic() {
            errors.push(ValidationError::NotDeterministic(a.name().to_string()));
        }
        if a.name().is_empty() {
            errors.push(ValidationError::Unnamed(i));
        }
        // report each clash once, at its first occurrence
        let is_first = automata[..i].iter().all(|b| b.name() != a.name());
        let clashes = automata[i + 1..].iter().any(|b| b.name() == a.name());
        if is_first && clashes {
            errors.push(ValidationError::DuplicateName(a.name().to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
