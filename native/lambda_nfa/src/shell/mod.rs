//! Line-oriented command shell for lambda-NFAs
//!
//! Reads commands such as `INIT 3`, `ADD 1 2 a`, `CHECK "ab"` and prints
//! the engine's answers. Errors are reported with an `Error! ` prefix and
//! never end the session.

pub mod command;
pub mod sample;

pub use command::Command;

use crate::formlang::{EPSILON, FIRST_SYMBOL, LAST_SYMBOL, LambdaNFA, StateId, is_word};
use anyhow::{Result, anyhow, bail};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Largest automaton INIT will build.
pub const MAX_STATES: usize = 10_000;

/// Shell configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Prompt string
    pub prompt: String,
    /// History file path
    pub history_file: Option<PathBuf>,
    /// Maximum history entries
    pub max_history: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "nfa> ".to_string(),
            history_file: dirs::home_dir().map(|home| home.join(".lambda_nfa_history")),
            max_history: 1000,
        }
    }
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print
    Silent,
    /// Print this text on its own line
    Print(String),
    /// End the session
    Quit,
}

/// Shell session state
#[derive(Debug)]
pub struct Shell {
    config: ShellConfig,
    nfa: Option<LambdaNFA>,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Self { config, nfa: None }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The current automaton, if INIT or GENERATE ran.
    pub fn automaton(&self) -> Option<&LambdaNFA> {
        self.nfa.as_ref()
    }

    fn automaton_mut(&mut self) -> Result<&mut LambdaNFA> {
        self.nfa
            .as_mut()
            .ok_or_else(|| anyhow!("Lambda automaton isn't initialized"))
    }

    /// Run a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        log::debug!("executing {command:?}");
        match command {
            Command::Init { size } => {
                let count = usize::try_from(size).unwrap_or(0);
                if count > MAX_STATES {
                    bail!("Cannot initialize with {size} states, at most {MAX_STATES} allowed");
                }
                let accepting = StateId::try_from(count)
                    .map_err(|_| anyhow!("Cannot initialize with {size} states"))?;
                self.nfa = Some(LambdaNFA::new(count, 1, &[accepting])?);
                Ok(Reply::Silent)
            }
            Command::Add {
                source,
                target,
                label,
            } => {
                let nfa = self.automaton_mut()?;
                let source = StateId::try_from(source).unwrap_or(0);
                let target = StateId::try_from(target).unwrap_or(0);
                if !nfa.add_transition(source, target, label) {
                    bail!("Transition couldn't be added");
                }
                Ok(Reply::Silent)
            }
            Command::Check { word } => {
                let nfa = self.automaton_mut()?;
                check_word(&word)?;
                let verdict = if nfa.accepts(&word) {
                    "In language."
                } else {
                    "Not in language."
                };
                Ok(Reply::Print(verdict.to_string()))
            }
            Command::Prefix { word } => {
                let nfa = self.automaton_mut()?;
                check_word(&word)?;
                let answer = match nfa.longest_accepted_prefix(&word) {
                    Some(prefix) => format!("\"{prefix}\""),
                    None => "No prefix in language.".to_string(),
                };
                Ok(Reply::Print(answer))
            }
            Command::Display => Ok(Reply::Print(self.automaton_mut()?.render())),
            Command::Generate => {
                self.nfa = Some(sample::sample_automaton()?);
                Ok(Reply::Silent)
            }
            Command::Help => Ok(Reply::Print(help_text())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    /// Parse and run one line, writing its output or error to `out`.
    ///
    /// Returns `false` once the session should end.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        match Command::parse(line).and_then(|command| self.execute(command)) {
            Ok(Reply::Silent) => Ok(true),
            Ok(Reply::Print(text)) => {
                writeln!(out, "{text}")?;
                Ok(true)
            }
            Ok(Reply::Quit) => Ok(false),
            Err(err) => {
                log::debug!("command failed: {err:#}");
                writeln!(out, "Error! {err}")?;
                Ok(true)
            }
        }
    }

    /// Run commands from `input` until QUIT or end of input, printing the
    /// prompt before each line.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            if !self.handle_line(&line?, out)? {
                return Ok(());
            }
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

fn check_word(word: &str) -> Result<()> {
    if is_word(word) {
        Ok(())
    } else {
        Err(anyhow!("String not in alphabet"))
    }
}

/// Usage text printed by HELP.
pub fn help_text() -> String {
    format!(
        "\
Lambda NFA
Notes:
  1. Commands are case-insensitive and may be shortened to their first letter.
  2. Commands do not accept additional text.
  3. Strings must be enclosed in double quotes.
  4. [{FIRST_SYMBOL}-{LAST_SYMBOL}] and {EPSILON} are allowed transition labels.
Abbreviations:
  s - string (see note 3)
  n - number of states
  i - number of a state
  j - number of a state
  c - transition label (see note 4)
Commands:
  INIT n    - initialize an automaton with n states (at most {MAX_STATES}), start 1, accepting n
  ADD i j c - add a transition from i to j labelled c
  CHECK s   - check whether s is in the language
  PREFIX s  - find the longest prefix of s in the language
  DISPLAY   - list all transitions in sorted order
  GENERATE  - load a built-in sample automaton
  HELP      - show this text
  QUIT      - leave the shell"
    )
}
