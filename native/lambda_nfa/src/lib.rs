//! Nondeterministic finite automata with lambda transitions.
//!
//! The [`formlang`] module holds the automaton engine: membership tests and
//! longest-accepted-prefix search over the alphabet `'a'..='z'`, with `'~'`
//! labelling lambda transitions. The [`shell`] module is a line-oriented
//! command front end driving that engine.
//!
//! ```
//! use lambda_nfa::formlang::{EPSILON, LambdaNFA};
//!
//! let mut nfa = LambdaNFA::new(3, 1, &[3])?;
//! nfa.add_transition(1, 2, 'a');
//! nfa.add_transition(2, 3, 'b');
//! nfa.add_transition(1, 3, EPSILON);
//!
//! assert!(nfa.accepts("ab"));
//! assert!(nfa.accepts(""));
//! assert!(!nfa.accepts("a"));
//! assert_eq!(nfa.longest_accepted_prefix("abba"), Some("ab"));
//! # Ok::<(), lambda_nfa::formlang::NfaError>(())
//! ```

pub mod formlang;
pub mod shell;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn import_submodule<'py>(
    py: Python<'py>,
    m: &Bound<'py, PyModule>,
    package: &str,
    name: &str,
    import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let submodule = PyModule::new(py, name)?;
    import_func(&submodule)?;

    // Make `import lambda_nfa.formlang` work
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item(format!("{}.{}", package, name), submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pymodule]
fn lambda_nfa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    import_submodule(m.py(), m, "lambda_nfa", "formlang", formlang::formlang)?;
    Ok(())
}
