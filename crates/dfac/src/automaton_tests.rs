use crate::{Automaton, FiniteSet, State, Transition};

// a(b|c)* with epsilon moves between the pieces
fn epsilon_nfa() -> Automaton {
    Automaton::builder("abc")
        .initial(0)
        .final_state(3)
        .transition(0, 'a', 1)
        .epsilon(1, 3)
        .epsilon(3, 2)
        .transition(2, 'b', 3)
        .transition(2, 'c', 3)
        .build()
}

#[test]
fn transitions_are_structural() {
    assert_eq!(Transition::new(0, 'a', 1), Transition::new(0, 'a', 1));
    assert_ne!(Transition::new(0, 'a', 1), Transition::epsilon(0, 1));
    assert_ne!(Transition::new(0, 'a', 1), Transition::new(0, 'b', 1));
    assert!(Transition::epsilon(0, 1).is_epsilon());
    assert_eq!(Transition::new(0, 'a', 1).to_string(), "0 |-a-> 1");
    assert_eq!(Transition::epsilon(4, 2).to_string(), "4 |--> 2");
}

#[test]
fn alphabet_excludes_epsilon() {
    let a = epsilon_nfa();
    assert_eq!(a.alphabet(), FiniteSet::from(['a', 'b', 'c']));
}

#[test]
fn states_are_derived() {
    let a = Automaton::builder("s")
        .initial(7)
        .final_state(9)
        .transition(1, 'x', 2)
        .build();
    assert_eq!(a.states(), FiniteSet::from([7, 9, 1, 2]));
}

#[test]
fn epsilon_closure() {
    let a = epsilon_nfa();
    assert_eq!(a.epsilon_closure(&FiniteSet::from([0])), FiniteSet::from([0]));
    assert_eq!(
        a.epsilon_closure(&FiniteSet::from([1])),
        FiniteSet::from([1, 2, 3])
    );
    assert!(a.epsilon_closure(&FiniteSet::new()).is_empty());

    // fixpoint
    for s in a.states() {
        let once = a.epsilon_closure(&FiniteSet::from([s]));
        assert_eq!(a.epsilon_closure(&once), once);
    }
}

#[test]
fn epsilon_closure_follows_chains_in_any_order() {
    // transitions listed against the direction of the chain so one pass is not enough
    let a = Automaton::builder("chain")
        .initial(0)
        .epsilon(3, 4)
        .epsilon(2, 3)
        .epsilon(1, 2)
        .epsilon(0, 1)
        .epsilon(4, 0)
        .build();
    assert_eq!(
        a.epsilon_closure(&FiniteSet::from([0])),
        FiniteSet::from([0, 1, 2, 3, 4])
    );
}

#[test]
fn move_does_not_close() {
    let a = epsilon_nfa();
    let from: FiniteSet<State> = FiniteSet::from([0]);
    assert_eq!(a.move_on(&from, 'a'), FiniteSet::from([1]));
    assert!(a.move_on(&from, 'b').is_empty());
    assert_eq!(
        a.move_on(&FiniteSet::from([1, 2, 3]), 'b'),
        FiniteSet::from([3])
    );
}

#[test]
fn is_deterministic() {
    let dfa = Automaton::builder("d")
        .initial(0)
        .transition(0, 'a', 1)
        .transition(0, 'b', 0)
        .transition(1, 'a', 1)
        .build();
    assert!(dfa.is_deterministic());

    assert!(!epsilon_nfa().is_deterministic());
    assert!(!Automaton::builder("none").build().is_deterministic());
    assert!(!Automaton::builder("two").initial(0).initial(1).build().is_deterministic());

    // the conflicting pair comes last
    let late_conflict = Automaton::builder("late")
        .initial(0)
        .transition(0, 'a', 1)
        .transition(1, 'b', 2)
        .transition(2, 'c', 0)
        .transition(2, 'c', 1)
        .build();
    assert!(!late_conflict.is_deterministic());

    // same (start, label) towards the same end is a single transition
    let repeated = Automaton::builder("r")
        .initial(0)
        .transition(0, 'a', 1)
        .transition(0, 'a', 1)
        .build();
    assert!(repeated.is_deterministic());
}

#[test]
fn accepts() {
    let a = epsilon_nfa();
    let test_vectors = vec![
        ("a", true),
        ("", false),
        ("ab", true),
        ("acbcb", true),
        ("b", false),
        ("aa", false),
        ("abx", false),
    ];

    for (word, expected) in test_vectors {
        assert_eq!(a.accepts(word), expected, "on input '{}'", word);
    }
}

#[test]
fn equality_is_by_sets() {
    let a = Automaton::builder("L")
        .initial(0)
        .final_state(1)
        .final_state(2)
        .transition(0, 'a', 1)
        .transition(0, 'b', 2)
        .build();
    let b = Automaton::builder("L")
        .transition(0, 'b', 2)
        .final_state(2)
        .transition(0, 'a', 1)
        .final_state(1)
        .initial(0)
        .build();
    assert_eq!(a, b);
    assert_ne!(a, b.clone().with_name("M"));
}

#[test]
fn display() {
    let a = Automaton::builder("L")
        .initial(0)
        .final_state(1)
        .transition(0, 'a', 1)
        .epsilon(1, 0)
        .build();
    assert_eq!(
        a.to_string(),
        "L = { initial 0; final 1; 0 |-a-> 1; 1 |--> 0; }"
    );
}
