//! PyO3 bindings for the formlang module.

use crate::formlang::lambda_nfa::LambdaNFA as RustLambdaNFA;
use crate::formlang::state::StateId;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Python ints that do not fit a state identifier map to 0, which is never
/// in range, so they are ignored like any other out-of-range identifier.
fn to_state_id(value: i64) -> StateId {
    StateId::try_from(value).unwrap_or(0)
}

/// A lambda-NFA over the alphabet `a`-`z`, with `~` as the lambda symbol.
#[pyclass(name = "LambdaNFA", module = "lambda_nfa.formlang")]
pub struct PyLambdaNFA {
    /// The underlying Rust NFA
    nfa: RustLambdaNFA,
}

#[pymethods]
impl PyLambdaNFA {
    #[new]
    #[pyo3(signature = (state_count, start, accepting = Vec::new()))]
    fn new(state_count: usize, start: i64, accepting: Vec<i64>) -> PyResult<Self> {
        let accepting: Vec<StateId> = accepting.into_iter().map(to_state_id).collect();
        RustLambdaNFA::new(state_count, to_state_id(start), &accepting)
            .map(|nfa| Self { nfa })
            .map_err(|err| PyValueError::new_err(err.to_string()))
    }

    /// Add a transition. Returns False and leaves the NFA unchanged if the
    /// request is invalid.
    fn add_transition(&mut self, source: i64, target: i64, label: char) -> bool {
        self.nfa
            .add_transition(to_state_id(source), to_state_id(target), label)
    }

    fn is_valid_transition(&self, source: i64, target: i64, label: char) -> bool {
        self.nfa
            .is_valid_transition(to_state_id(source), to_state_id(target), label)
    }

    /// Check whether the word is accepted. `None` is never accepted.
    #[pyo3(signature = (word))]
    fn accepts(&mut self, word: Option<String>) -> bool {
        word.is_some_and(|w| self.nfa.accepts(&w))
    }

    /// Longest accepted prefix of the word, or `None`.
    #[pyo3(signature = (word))]
    fn longest_prefix(&mut self, word: Option<String>) -> Option<String> {
        let word = word?;
        self.nfa.longest_accepted_prefix(&word).map(str::to_owned)
    }

    #[getter]
    fn num_states(&self) -> usize {
        self.nfa.num_states()
    }

    #[getter]
    fn start_state(&self) -> Option<StateId> {
        self.nfa.start_state()
    }

    /// Transitions as `{source: {label: [targets]}}` in display order.
    fn transitions<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (source, labels) in self.nfa.to_transition_map() {
            let inner = PyDict::new(py);
            for (label, targets) in labels {
                inner.set_item(label.to_string(), targets)?;
            }
            dict.set_item(source, inner)?;
        }
        Ok(dict)
    }

    fn render(&self) -> String {
        self.nfa.render()
    }

    fn __str__(&self) -> String {
        self.nfa.render()
    }

    fn __repr__(&self) -> String {
        format!(
            "LambdaNFA(states={}, start={:?})",
            self.nfa.num_states(),
            self.nfa.start_state()
        )
    }
}

/// Register the formlang classes on a module.
pub fn formlang(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLambdaNFA>()?;
    Ok(())
}
