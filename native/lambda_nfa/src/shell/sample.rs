//! Built-in automaton loaded by the GENERATE command.

use crate::formlang::{EPSILON, LambdaNFA, Result, StateId};

/// `(source, target, label)` triples of the sample automaton.
const SAMPLE_TRANSITIONS: [(StateId, StateId, char); 22] = [
    (1, 2, EPSILON),
    (2, 2, EPSILON),
    (2, 4, EPSILON),
    (2, 3, 'a'),
    (3, 4, 'b'),
    (3, 4, EPSILON),
    (4, 5, 'a'),
    (4, 1, EPSILON),
    (5, 10, EPSILON),
    (5, 6, 'c'),
    (6, 7, 'l'),
    (7, 6, 'a'),
    (7, 8, 'e'),
    (8, 6, EPSILON),
    (7, 9, 'u'),
    (9, 10, 'n'),
    (10, 7, EPSILON),
    (5, 6, EPSILON),
    (9, 7, 'r'),
    (7, 7, 'd'),
    (7, 3, 'm'),
    (5, 9, EPSILON),
];

/// Ten states, start state 1, accepting state 10.
pub fn sample_automaton() -> Result<LambdaNFA> {
    let mut nfa = LambdaNFA::new(10, 1, &[10])?;
    for (source, target, label) in SAMPLE_TRANSITIONS {
        nfa.try_add_transition(source, target, label)?;
    }
    Ok(nfa)
}
