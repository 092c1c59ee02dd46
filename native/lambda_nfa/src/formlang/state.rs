//! State types for the automaton.

use crate::formlang::symbol::{EPSILON, LABEL_SLOTS, label_index};
use crate::formlang::transition::Transition;
use fixedbitset::FixedBitSet;
use std::collections::VecDeque;
use std::fmt;

/// A state identifier. Valid identifiers run from 1 to the state count.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set for efficiency.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state into the set. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let items: Vec<StateId> = iter.into_iter().collect();
        let capacity = items.iter().copied().max().map_or(0, |m| m as usize + 1);
        let mut set = Self::with_capacity(capacity);
        for state in items {
            set.insert(state);
        }
        set
    }
}

/// A node of the automaton.
///
/// Outgoing transitions are bucketed by dense label index, so several
/// transitions with the same label from the same state are all kept.
#[derive(Debug, Clone)]
pub struct State {
    id: StateId,
    accepting: bool,
    outgoing: Vec<Vec<Transition>>,
    /// States reachable over one or more epsilon transitions, without `id`.
    epsilon_closure: StateSet,
}

impl State {
    pub(crate) fn new(id: StateId, capacity: usize) -> Self {
        Self {
            id,
            accepting: false,
            outgoing: vec![Vec::new(); LABEL_SLOTS],
            epsilon_closure: StateSet::with_capacity(capacity),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub(crate) fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Append a transition to the bucket of its label.
    ///
    /// Range checks happen in the automaton; a label without a bucket is
    /// dropped.
    pub fn add_outgoing(&mut self, transition: Transition) {
        match label_index(transition.label()) {
            Some(idx) => self.outgoing[idx].push(transition),
            None => log::warn!(
                "state {}: dropping transition with unknown label {:?}",
                self.id,
                transition.label()
            ),
        }
    }

    /// Every state reachable from this one by exactly one `label` transition.
    pub fn targets_for(&self, label: char) -> impl Iterator<Item = StateId> + '_ {
        label_index(label)
            .map(|idx| self.outgoing[idx].as_slice())
            .unwrap_or_default()
            .iter()
            .filter(move |t| t.matches(label))
            .map(Transition::target)
    }

    /// The epsilon-closure computed by the last refresh of the automaton.
    pub fn epsilon_closure(&self) -> &StateSet {
        &self.epsilon_closure
    }

    pub(crate) fn set_epsilon_closure(&mut self, closure: StateSet) {
        self.epsilon_closure = closure;
    }

    /// Breadth-first walk over epsilon transitions starting at this state.
    ///
    /// `states` is the automaton's state table, where identifier `n` lives
    /// at index `n - 1`. The result never contains this state, even when an
    /// epsilon cycle leads back to it.
    pub fn compute_epsilon_closure(&self, states: &[State]) -> StateSet {
        let capacity = states.len() + 1;
        let mut closure = StateSet::with_capacity(capacity);
        let mut visited = StateSet::singleton(self.id, capacity);
        let mut queue = VecDeque::from([self.id]);

        while let Some(current) = queue.pop_front() {
            if current != self.id {
                closure.insert(current);
            }
            let Some(state) = (current as usize).checked_sub(1).and_then(|i| states.get(i)) else {
                continue;
            };
            for next in state.targets_for(EPSILON) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        closure
    }

    /// All outgoing transitions.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.outgoing.iter().flatten()
    }

    /// All outgoing transitions in display order.
    pub fn ordered_transitions(&self) -> Vec<Transition> {
        let mut ordered: Vec<Transition> = self.transitions().copied().collect();
        ordered.sort();
        ordered
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in self.ordered_transitions() {
            writeln!(f, "{transition}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: u32) -> Vec<State> {
        (1..=n).map(|id| State::new(id, n as usize + 1)).collect()
    }

    fn connect(states: &mut [State], source: StateId, target: StateId, label: char) {
        states[source as usize - 1].add_outgoing(Transition::new(source, target, label));
    }

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(7));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(500));
    }

    #[test]
    fn test_state_set_union() {
        let mut set1 = StateSet::with_capacity(4);
        set1.insert(1);
        set1.insert(3);

        let mut set2 = StateSet::with_capacity(10);
        set2.insert(2);
        set2.insert(9);

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3, 9]);
        assert_eq!(set2.to_vec(), vec![2, 9]);
    }

    #[test]
    fn test_state_set_intersects() {
        let a: StateSet = [1, 3, 5].into_iter().collect();
        let b: StateSet = [2, 4].into_iter().collect();
        let c: StateSet = [5].into_iter().collect();
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_targets_for_keeps_duplicate_labels() {
        let mut states = table(3);
        connect(&mut states, 1, 2, 'a');
        connect(&mut states, 1, 3, 'a');
        connect(&mut states, 1, 3, 'b');
        connect(&mut states, 1, 1, EPSILON);

        let on_a: Vec<StateId> = states[0].targets_for('a').collect();
        assert_eq!(on_a, vec![2, 3]);
        let on_eps: Vec<StateId> = states[0].targets_for(EPSILON).collect();
        assert_eq!(on_eps, vec![1]);
        assert_eq!(states[0].targets_for('c').count(), 0);
        assert_eq!(states[0].targets_for('#').count(), 0);
    }

    #[test]
    fn test_unknown_label_is_dropped() {
        let mut states = table(2);
        connect(&mut states, 1, 2, 'A');
        assert_eq!(states[0].transitions().count(), 0);
    }

    #[test]
    fn test_closure_excludes_self_on_cycle() {
        // 1 -ε-> 2 -ε-> 3 -ε-> 1, 3 -a-> 4
        let mut states = table(4);
        connect(&mut states, 1, 2, EPSILON);
        connect(&mut states, 2, 3, EPSILON);
        connect(&mut states, 3, 1, EPSILON);
        connect(&mut states, 3, 4, 'a');

        let closure = states[0].compute_epsilon_closure(&states);
        assert_eq!(closure.to_vec(), vec![2, 3]);
        let closure = states[3].compute_epsilon_closure(&states);
        assert!(closure.is_empty());
    }

    #[test]
    fn test_closure_with_self_loop() {
        let mut states = table(2);
        connect(&mut states, 1, 1, EPSILON);
        connect(&mut states, 1, 2, EPSILON);
        assert_eq!(states[0].compute_epsilon_closure(&states).to_vec(), vec![2]);
    }

    #[test]
    fn test_ordered_transitions_and_display() {
        let mut states = table(3);
        connect(&mut states, 2, 3, EPSILON);
        connect(&mut states, 2, 1, 'b');
        connect(&mut states, 2, 3, 'a');
        assert_eq!(states[1].to_string(), "(2, 1) b\n(2, 3) a\n(2, 3) ~\n");
    }
}
