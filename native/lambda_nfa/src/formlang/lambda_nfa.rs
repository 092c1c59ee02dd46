//! Non-deterministic finite automaton with lambda (ε) transitions.

use crate::formlang::error::{MIN_STATES, NfaError, Result};
use crate::formlang::state::{State, StateId, StateSet};
use crate::formlang::symbol::in_alphabet;
use crate::formlang::transition::Transition;
use indexmap::IndexMap;
use std::fmt;

/// A lambda-NFA over the fixed alphabet `'a'..='z'`.
///
/// States are numbered `1..=num_states` and owned here in a dense table;
/// transitions refer to them by identifier. Epsilon-closures are cached on
/// the states and recomputed for all states at once before the next query
/// after any transition was added.
///
/// Query words range over the same alphabet as transition labels. An
/// epsilon symbol in a word is consumed like any other character and
/// follows epsilon-labelled edges.
#[derive(Debug, Clone)]
pub struct LambdaNFA {
    /// State `n` lives at index `n - 1`
    states: Vec<State>,
    /// `None` if the requested start state was out of range
    start: Option<StateId>,
    accepting: StateSet,
    /// Set when a transition was added since the last closure computation
    dirty: bool,
}

impl LambdaNFA {
    /// Create an automaton with `num_states` states.
    ///
    /// Out-of-range `start` and `accepting` identifiers are ignored. Without
    /// a valid start state the automaton accepts nothing.
    pub fn new(num_states: usize, start: StateId, accepting: &[StateId]) -> Result<Self> {
        if num_states < MIN_STATES {
            return Err(NfaError::TooFewStates {
                requested: num_states,
            });
        }

        let capacity = num_states + 1;
        let mut nfa = Self {
            states: (1..=num_states)
                .map(|id| State::new(id as StateId, capacity))
                .collect(),
            start: None,
            accepting: StateSet::with_capacity(capacity),
            dirty: true,
        };
        nfa.set_start_state(start);
        for &state in accepting {
            nfa.add_accepting_state(state);
        }
        nfa.accepting = nfa.accepting_states();

        log::debug!(
            "built lambda-NFA with {} states, start {:?}, accepting {:?}",
            num_states,
            nfa.start,
            nfa.accepting_states()
        );
        Ok(nfa)
    }

    fn set_start_state(&mut self, state: StateId) {
        if self.is_within_bounds(state) {
            self.start = Some(state);
        } else {
            log::debug!("ignoring out-of-range start state {state}");
        }
    }

    fn add_accepting_state(&mut self, state: StateId) {
        match self.state_mut(state) {
            Some(s) => s.set_accepting(true),
            None => log::debug!("ignoring out-of-range accepting state {state}"),
        }
    }

    fn is_within_bounds(&self, state: StateId) -> bool {
        state >= 1 && (state as usize) <= self.states.len()
    }

    fn state_mut(&mut self, id: StateId) -> Option<&mut State> {
        (id as usize)
            .checked_sub(1)
            .and_then(|idx| self.states.get_mut(idx))
    }

    /// Get the number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Get the start state, if the one requested at construction was valid.
    pub fn start_state(&self) -> Option<StateId> {
        self.start
    }

    /// Look up a state by identifier.
    pub fn state(&self, id: StateId) -> Option<&State> {
        (id as usize).checked_sub(1).and_then(|idx| self.states.get(idx))
    }

    /// All states in ascending identifier order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn accepting_states(&self) -> StateSet {
        self.states
            .iter()
            .filter(|s| s.is_accepting())
            .map(State::id)
            .collect()
    }

    /// Whether closures are stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check whether `add_transition` would accept this request.
    pub fn is_valid_transition(&self, source: StateId, target: StateId, label: char) -> bool {
        self.is_within_bounds(source) && self.is_within_bounds(target) && in_alphabet(label)
    }

    /// Add a transition, reporting why it was refused.
    pub fn try_add_transition(&mut self, source: StateId, target: StateId, label: char) -> Result<()> {
        if !self.is_valid_transition(source, target, label) {
            return Err(NfaError::InvalidTransition {
                from: source,
                to: target,
                label,
            });
        }

        let transition = Transition::new(source, target, label);
        if let Some(state) = self.state_mut(source) {
            state.add_outgoing(transition);
        }
        self.dirty = true;
        log::trace!("added transition {transition}");
        Ok(())
    }

    /// Add a transition. Invalid requests leave the automaton untouched and
    /// return `false`.
    pub fn add_transition(&mut self, source: StateId, target: StateId, label: char) -> bool {
        match self.try_add_transition(source, target, label) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("refused: {err}");
                false
            }
        }
    }

    /// Recompute the epsilon-closure of every state if any transition was
    /// added since the last computation.
    pub fn compute_epsilon_closures(&mut self) {
        if !self.dirty {
            return;
        }

        let closures: Vec<StateSet> = self
            .states
            .iter()
            .map(|state| state.compute_epsilon_closure(&self.states))
            .collect();
        for (state, closure) in self.states.iter_mut().zip(closures) {
            state.set_epsilon_closure(closure);
        }
        self.dirty = false;
        log::debug!("recomputed epsilon-closures for {} states", self.states.len());
    }

    /// Insert `id` and its cached closure into `set`.
    fn expand_into(&self, set: &mut StateSet, id: StateId) {
        if let Some(state) = self.state(id) {
            set.insert(id);
            set.union_with(state.epsilon_closure());
        }
    }

    /// Active states before any input is consumed.
    fn initial_states(&self) -> StateSet {
        let mut active = StateSet::with_capacity(self.states.len() + 1);
        if let Some(start) = self.start {
            self.expand_into(&mut active, start);
        }
        active
    }

    /// Active states after consuming `symbol` from `active`.
    fn step(&self, active: &StateSet, symbol: char) -> StateSet {
        let mut next = StateSet::with_capacity(self.states.len() + 1);
        for id in active.iter() {
            let Some(state) = self.state(id) else {
                continue;
            };
            for target in state.targets_for(symbol) {
                if !next.contains(target) {
                    self.expand_into(&mut next, target);
                }
            }
        }
        next
    }

    fn any_accepting(&self, active: &StateSet) -> bool {
        active.intersects(&self.accepting)
    }

    fn is_query_word(word: &str) -> bool {
        word.chars().all(in_alphabet)
    }

    /// Check whether the whole of `word` is accepted.
    ///
    /// A word with a character that cannot label a transition is rejected.
    pub fn accepts(&mut self, word: &str) -> bool {
        if !Self::is_query_word(word) {
            log::trace!("rejecting malformed word {word:?}");
            return false;
        }
        self.compute_epsilon_closures();

        let mut active = self.initial_states();
        for symbol in word.chars() {
            if active.is_empty() {
                break;
            }
            active = self.step(&active, symbol);
        }

        let accepted = self.any_accepting(&active);
        log::trace!("accepts({word:?}) = {accepted}");
        accepted
    }

    /// Find the longest prefix of `word` that is accepted.
    ///
    /// Returns `Some("")` if only the empty word is accepted and `None` if no
    /// prefix is, or if `word` has a character that cannot label a
    /// transition.
    pub fn longest_accepted_prefix<'w>(&mut self, word: &'w str) -> Option<&'w str> {
        if !Self::is_query_word(word) {
            log::trace!("no prefix for malformed word {word:?}");
            return None;
        }
        self.compute_epsilon_closures();

        let mut active = self.initial_states();
        let mut longest = self.any_accepting(&active).then_some(0);
        for (pos, symbol) in word.char_indices() {
            if active.is_empty() {
                break;
            }
            active = self.step(&active, symbol);
            if self.any_accepting(&active) {
                longest = Some(pos + symbol.len_utf8());
            }
        }

        let prefix = longest.map(|end| &word[..end]);
        log::trace!("longest_accepted_prefix({word:?}) = {prefix:?}");
        prefix
    }

    /// Get all transitions as an iterator, state by state.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.states.iter().flat_map(State::transitions)
    }

    /// Ordered map representation: source -> label -> targets, in display order.
    pub fn to_transition_map(&self) -> IndexMap<StateId, IndexMap<char, Vec<StateId>>> {
        let mut map: IndexMap<StateId, IndexMap<char, Vec<StateId>>> = IndexMap::new();

        for state in &self.states {
            for transition in state.ordered_transitions() {
                map.entry(transition.source())
                    .or_default()
                    .entry(transition.label())
                    .or_default()
                    .push(transition.target());
            }
        }

        map
    }

    /// One `(source, target) label` line per transition, states ascending.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LambdaNFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self
            .states
            .iter()
            .flat_map(|state| state.ordered_transitions());
        if let Some(first) = lines.next() {
            write!(f, "{first}")?;
        }
        for transition in lines {
            write!(f, "\n{transition}")?;
        }
        Ok(())
    }
}
