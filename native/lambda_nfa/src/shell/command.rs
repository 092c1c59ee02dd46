//! Command parsing
//!
//! A command is picked by the first letter of its first word, ignoring case,
//! so `DISPLAY`, `display` and `d` are the same command.

use anyhow::{Context, Result, anyhow, bail};

/// Shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an automaton: init <n>
    Init {
        /// Requested number of states
        size: i64,
    },
    /// Add a transition: add <i> <j> <c>
    Add {
        source: i64,
        target: i64,
        label: char,
    },
    /// Membership test: check "<word>"
    Check {
        /// Text between the quotes
        word: String,
    },
    /// Longest accepted prefix: prefix "<word>"
    Prefix {
        /// Text between the quotes
        word: String,
    },
    /// Print all transitions: display
    Display,
    /// Load the built-in sample automaton: generate
    Generate,
    /// Print usage: help
    Help,
    /// Leave the shell: quit
    Quit,
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let Some(first) = name.chars().next() else {
            bail!("No input!");
        };

        match first.to_ascii_lowercase() {
            'h' => no_args(&args).map(|()| Self::Help),
            'd' => no_args(&args).map(|()| Self::Display),
            'g' => no_args(&args).map(|()| Self::Generate),
            'q' => no_args(&args).map(|()| Self::Quit),
            'i' => Self::parse_init(&args),
            'a' => Self::parse_add(&args),
            'c' => Ok(Self::Check {
                word: quoted(rest, "CHECK")?,
            }),
            'p' => Ok(Self::Prefix {
                word: quoted(rest, "PREFIX")?,
            }),
            _ => Err(anyhow!("Invalid command")),
        }
    }

    fn parse_init(args: &[&str]) -> Result<Self> {
        let size = integer(args.first())?;
        no_args(&args[1..])?;
        Ok(Self::Init { size })
    }

    fn parse_add(args: &[&str]) -> Result<Self> {
        let source = integer(args.first())?;
        let target = integer(args.get(1))?;
        let Some(label) = args.get(2) else {
            bail!("More information is needed");
        };
        let mut chars = label.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            bail!("{label} is no valid char input");
        };
        no_args(&args[3..])?;
        Ok(Self::Add {
            source,
            target,
            label: c,
        })
    }
}

fn no_args(args: &[&str]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Program doesn't allow additional text."))
    }
}

fn integer(arg: Option<&&str>) -> Result<i64> {
    arg.ok_or_else(|| anyhow!("An integer is needed for this command"))?
        .parse::<i64>()
        .context("An integer is needed for this command")
}

/// Strip the surrounding double quotes from `text`; `""` is the empty word.
fn quoted(text: &str, command: &str) -> Result<String> {
    if text.is_empty() {
        bail!("A string is needed for the {command} command");
    }
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("Invalid string"))
}
