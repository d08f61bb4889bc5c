use std::collections::{HashMap, VecDeque};

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{Automaton, AutomatonBuilder, FiniteSet, State, Symbol, Transition};

/// How the subset table is searched for an already discovered state set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubsetLookup {
    /// Scan the table comparing sets by inclusion.
    Linear,
    /// Key each set by a bitset over the dense positions of the input's states.
    #[default]
    Hashed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterminizeConfig {
    /// Return already deterministic automata without rebuilding them.
    pub skip_if_deterministic: bool,
    /// Appended to the name of the produced automaton.
    pub name_suffix: Option<String>,
    pub lookup: SubsetLookup,
}

impl Default for DeterminizeConfig {
    fn default() -> Self {
        DeterminizeConfig {
            skip_if_deterministic: true,
            name_suffix: None,
            lookup: SubsetLookup::default(),
        }
    }
}

impl DeterminizeConfig {
    fn output_name(&self, name: &str) -> String {
        match &self.name_suffix {
            Some(suffix) => format!("{}{}", name, suffix),
            None => name.to_string(),
        }
    }
}

// Table indices double as state ids. Every entry is a distinct heap allocated
// set, so the table exhausts memory long before it holds `State::MAX` entries.
fn state_id(index: usize) -> State {
    debug_assert!(index <= State::MAX as usize);
    index as State
}

/// Subset construction over one input automaton.
///
/// Every state of the produced automaton is an index into [`subsets`], the
/// table of input state sets discovered so far. Entries are pairwise distinct
/// as sets, which bounds the table by the powerset of the input states.
///
/// [`subsets`]: Determinizer::subsets
pub struct Determinizer<'a> {
    nfa: &'a Automaton,
    config: DeterminizeConfig,
    subsets: Vec<FiniteSet<State>>,
    // input state -> position in nfa.states(), keys the hashed lookup
    dense: HashMap<State, usize>,
    keys: HashMap<BitSet, usize>,
}

impl<'a> Determinizer<'a> {
    pub fn new(nfa: &'a Automaton) -> Determinizer<'a> {
        Self::with_config(nfa, DeterminizeConfig::default())
    }

    pub fn with_config(nfa: &'a Automaton, config: DeterminizeConfig) -> Determinizer<'a> {
        let dense = nfa
            .states()
            .iter()
            .enumerate()
            .map(|(i, s)| (*s, i))
            .collect();

        Determinizer {
            nfa,
            config,
            subsets: Vec::new(),
            dense,
            keys: HashMap::new(),
        }
    }

    /// Input state sets backing each produced state, indexed by state id.
    pub fn subsets(&self) -> &[FiniteSet<State>] {
        &self.subsets
    }

    /// Builds the deterministic automaton. Always runs the construction, even
    /// on an input that is already deterministic.
    pub fn run(&mut self) -> Automaton {
        self.subsets.clear();
        self.keys.clear();

        let nfa = self.nfa;
        let finals = nfa.finals();
        let mut dfa = AutomatonBuilder::new(self.config.output_name(nfa.name()));

        let initial = nfa.epsilon_closure(nfa.initials());
        let initial_is_final = !initial.is_disjoint(finals);
        let initial_id = self.push(initial);
        dfa.add_initial(state_id(initial_id));
        if initial_is_final {
            dfa.add_final(state_id(initial_id));
        }

        // sorted so that state numbering is reproducible
        let mut alphabet: Vec<Symbol> = nfa.alphabet().into_iter().collect();
        alphabet.sort_unstable();

        let mut work_queue: VecDeque<usize> = VecDeque::new();
        work_queue.push_back(initial_id);

        while let Some(i) = work_queue.pop_front() {
            for &c in &alphabet {
                let moved = nfa.move_on(&self.subsets[i], c);
                let target = nfa.epsilon_closure(&moved);
                if target.is_empty() {
                    continue;
                }

                let j = match self.find(&target) {
                    Some(j) => j,
                    None => {
                        let is_final = !target.is_disjoint(finals);
                        trace!(
                            "discovered state {} = {} (final: {})",
                            self.subsets.len(),
                            target,
                            is_final
                        );
                        let k = self.push(target);
                        if is_final {
                            dfa.add_final(state_id(k));
                        }
                        work_queue.push_back(k);
                        k
                    }
                };

                dfa.add_transition(Transition::new(state_id(i), c, state_id(j)));
            }
        }

        let dfa = dfa.build();
        debug!(
            "determinized {}: {} input states -> {} states, {} transitions",
            nfa.name(),
            self.dense.len(),
            self.subsets.len(),
            dfa.transitions().len()
        );
        dfa
    }

    fn key(&self, set: &FiniteSet<State>) -> BitSet {
        let mut key = BitSet::with_capacity(self.dense.len());
        for s in set {
            if let Some(&i) = self.dense.get(s) {
                key.insert(i);
            }
        }
        key
    }

    fn find(&self, target: &FiniteSet<State>) -> Option<usize> {
        match self.config.lookup {
            SubsetLookup::Linear => self.subsets.iter().position(|s| s == target),
            SubsetLookup::Hashed => self.keys.get(&self.key(target)).copied(),
        }
    }

    fn push(&mut self, set: FiniteSet<State>) -> usize {
        let id = self.subsets.len();
        if self.config.lookup == SubsetLookup::Hashed {
            self.keys.insert(self.key(&set), id);
        }
        self.subsets.push(set);
        id
    }
}

impl Automaton {
    /// Equivalent deterministic automaton, built with the default configuration.
    pub fn determinize(&self) -> Automaton {
        self.determinize_with(&DeterminizeConfig::default())
    }

    pub fn determinize_with(&self, config: &DeterminizeConfig) -> Automaton {
        if config.skip_if_deterministic && self.is_deterministic() {
            debug!("{} is already deterministic", self.name());
            return self.clone().with_name(config.output_name(self.name()));
        }

        Determinizer::with_config(self, config.clone()).run()
    }
}
