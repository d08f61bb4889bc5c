use std::fmt::{self, Display};

use crate::{FiniteSet, State, Symbol, Transition};

/// Finite automaton over `char` symbols whose states are integers.
///
/// The state set is never stored: it is whatever the initial states, the final
/// states and the transition endpoints mention (see [`Automaton::states`]).
#[derive(Clone, Debug)]
pub struct Automaton {
    name: String,
    initials: FiniteSet<State>,
    finals: FiniteSet<State>,
    transitions: FiniteSet<Transition>,
}

/// Accumulates states and transitions, then produces an [`Automaton`].
#[derive(Clone, Debug, Default)]
pub struct AutomatonBuilder {
    name: String,
    initials: FiniteSet<State>,
    finals: FiniteSet<State>,
    transitions: FiniteSet<Transition>,
}

impl AutomatonBuilder {
    pub fn new(name: impl Into<String>) -> AutomatonBuilder {
        AutomatonBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn initial(mut self, state: State) -> Self {
        self.initials.insert(state);
        self
    }

    pub fn final_state(mut self, state: State) -> Self {
        self.finals.insert(state);
        self
    }

    pub fn transition(mut self, start: State, symbol: Symbol, end: State) -> Self {
        self.transitions.insert(Transition::new(start, symbol, end));
        self
    }

    pub fn epsilon(mut self, start: State, end: State) -> Self {
        self.transitions.insert(Transition::epsilon(start, end));
        self
    }

    // in-place variants for incremental construction (parser, determinizer)
    pub fn add_initial(&mut self, state: State) {
        self.initials.insert(state);
    }

    pub fn add_final(&mut self, state: State) {
        self.finals.insert(state);
    }

    pub fn add_transition(&mut self, transition: Transition) {
        self.transitions.insert(transition);
    }

    pub fn build(self) -> Automaton {
        Automaton {
            name: self.name,
            initials: self.initials,
            finals: self.finals,
            transitions: self.transitions,
        }
    }
}

impl Automaton {
    pub fn builder(name: impl Into<String>) -> AutomatonBuilder {
        AutomatonBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initials(&self) -> &FiniteSet<State> {
        &self.initials
    }

    pub fn finals(&self) -> &FiniteSet<State> {
        &self.finals
    }

    pub fn transitions(&self) -> &FiniteSet<Transition> {
        &self.transitions
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Automaton {
        self.name = name.into();
        self
    }

    /// All distinct non-epsilon labels.
    pub fn alphabet(&self) -> FiniteSet<Symbol> {
        self.transitions.iter().filter_map(|t| t.label()).collect()
    }

    pub fn states(&self) -> FiniteSet<State> {
        let mut states = self.initials.union(&self.finals);
        for t in &self.transitions {
            states.insert(t.start());
            states.insert(t.end());
        }
        states
    }

    /// Smallest superset of `from` closed under epsilon transitions.
    ///
    /// Rescans every transition until a full pass adds nothing; the result only
    /// grows and is bounded by `states()`, so this terminates.
    pub fn epsilon_closure(&self, from: &FiniteSet<State>) -> FiniteSet<State> {
        let mut result = from.clone();
        let mut changed = true;
        while changed {
            changed = false;
            for t in &self.transitions {
                if t.is_epsilon() && result.contains(&t.start()) && result.insert(t.end()) {
                    changed = true;
                }
            }
        }
        result
    }

    /// States reachable from `from` by exactly one `symbol` transition.
    /// No epsilon closure is applied on either side.
    pub fn move_on(&self, from: &FiniteSet<State>, symbol: Symbol) -> FiniteSet<State> {
        self.transitions
            .iter()
            .filter(|t| t.label() == Some(symbol) && from.contains(&t.start()))
            .map(|t| t.end())
            .collect()
    }

    /// Exactly one initial state, no epsilon transition, and no two transitions
    /// leaving the same state on the same symbol towards different states.
    pub fn is_deterministic(&self) -> bool {
        if self.initials.len() != 1 {
            return false;
        }

        for (i, t1) in self.transitions.iter().enumerate() {
            if t1.is_epsilon() {
                return false;
            }
            for t2 in self.transitions.iter().skip(i + 1) {
                if t1.start() == t2.start() && t1.label() == t2.label() && t1.end() != t2.end() {
                    return false;
                }
            }
        }

        true
    }

    pub fn accepts(&self, word: &str) -> bool {
        let mut current = self.epsilon_closure(&self.initials);
        for c in word.chars() {
            if current.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&self.move_on(&current, c));
        }

        !current.is_disjoint(&self.finals)
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.initials == other.initials
            && self.finals == other.finals
            && self.transitions == other.transitions
    }
}

impl Eq for Automaton {}

impl Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {{ ", self.name)?;
        for i in &self.initials {
            write!(f, "initial {}; ", i)?;
        }
        for s in &self.finals {
            write!(f, "final {}; ", s)?;
        }
        for t in &self.transitions {
            write!(f, "{}; ", t)?;
        }
        write!(f, "}}")
    }
}
