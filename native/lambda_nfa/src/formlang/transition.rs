//! Labelled edges between states.

use crate::formlang::state::StateId;
use crate::formlang::symbol::sort_key;
use std::cmp::Ordering;
use std::fmt;

/// An edge from `source` to `target` carrying a real symbol or epsilon.
///
/// States are referenced by identifier; the automaton owns them.
///
/// Transitions order by target identifier first, then by label, with
/// epsilon after every real symbol. Two transitions with the same target
/// and label compare equal regardless of their source, which only matters
/// for display since a state sorts its own outgoing edges.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    source: StateId,
    target: StateId,
    label: char,
}

impl Transition {
    pub fn new(source: StateId, target: StateId, label: char) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    pub fn source(&self) -> StateId {
        self.source
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn label(&self) -> char {
        self.label
    }

    /// Check if this transition can be taken on `c`.
    #[inline]
    pub fn matches(&self, c: char) -> bool {
        self.label == c
    }

    fn order_key(&self) -> (StateId, u32) {
        (self.target, sort_key(self.label))
    }
}

impl PartialEq for Transition {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for Transition {}

impl PartialOrd for Transition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.source, self.target, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formlang::symbol::EPSILON;

    #[test]
    fn test_matches() {
        let t = Transition::new(1, 2, 'a');
        assert!(t.matches('a'));
        assert!(!t.matches('b'));
        assert!(!t.matches(EPSILON));
        assert!(Transition::new(1, 2, EPSILON).matches(EPSILON));
    }

    #[test]
    fn test_order_by_target_first() {
        let low = Transition::new(1, 2, 'z');
        let high = Transition::new(1, 3, 'a');
        assert!(low < high);
    }

    #[test]
    fn test_epsilon_sorts_last() {
        let eps = Transition::new(1, 2, EPSILON);
        let z = Transition::new(1, 2, 'z');
        let a = Transition::new(1, 2, 'a');
        assert!(a < z);
        assert!(z < eps);
        assert_eq!(eps.cmp(&Transition::new(4, 2, EPSILON)), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let mut edges = vec![
            Transition::new(1, 3, EPSILON),
            Transition::new(1, 1, 'b'),
            Transition::new(1, 3, 'a'),
            Transition::new(1, 1, EPSILON),
            Transition::new(1, 1, 'a'),
        ];
        edges.sort();
        let rendered: Vec<String> = edges.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["(1, 1) a", "(1, 1) b", "(1, 1) ~", "(1, 3) a", "(1, 3) ~"]
        );
    }
}
