mod automaton;
mod determinize;
mod set;
mod transition;

pub mod codegen;
pub mod dot;
pub mod parser;
pub mod validate;

#[cfg(test)]
mod automaton_tests;

/// Opaque state identifier.
pub type State = u32;
/// A single input symbol. Epsilon is the absence of one (`None` on a label).
pub type Symbol = char;

pub use automaton::{Automaton, AutomatonBuilder};
pub use determinize::{DeterminizeConfig, Determinizer, SubsetLookup};
pub use set::{FiniteSet, SetError};
pub use transition::Transition;
