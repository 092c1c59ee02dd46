//! Lambda-NFA over a fixed character alphabet.
//!
//! This module provides:
//! - The alphabet and the epsilon symbol
//! - Epsilon-closure computation, cached per state and refreshed in bulk
//! - Membership and longest-accepted-prefix queries
//! - PyO3 bindings for Python interoperability (`python` feature)

mod error;
mod lambda_nfa;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
pub mod symbol;
mod transition;

pub use error::{MIN_STATES, NfaError, Result};
pub use lambda_nfa::LambdaNFA;
#[cfg(feature = "python")]
pub use python_bindings::formlang;
pub use state::{State, StateId, StateSet};
pub use symbol::{EPSILON, FIRST_SYMBOL, LAST_SYMBOL, in_alphabet, is_word};
pub use transition::Transition;
