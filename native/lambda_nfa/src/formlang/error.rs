//! Errors raised while building an automaton.

use crate::formlang::state::StateId;

/// Fewest states an automaton may have.
pub const MIN_STATES: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NfaError {
    #[error("cannot initialize with {requested} state(s), at least {} required", MIN_STATES)]
    TooFewStates { requested: usize },

    #[error("transition ({from}, {to}) {label:?} is out of range or not in the alphabet")]
    InvalidTransition {
        from: StateId,
        to: StateId,
        label: char,
    },
}

pub type Result<T> = std::result::Result<T, NfaError>;
