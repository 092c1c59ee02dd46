//! lambda-nfa - interactive shell for nondeterministic automata with lambda transitions

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use lambda_nfa::shell::{Shell, ShellConfig};
use log::LevelFilter;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Debug, Parser)]
#[command(name = "lambda-nfa", version, about)]
struct Cli {
    /// Run commands from a file instead of the interactive prompt
    #[arg(long, value_name = "PATH", conflicts_with = "batch")]
    script: Option<PathBuf>,

    /// Read commands from standard input without line editing
    #[arg(long)]
    batch: bool,

    /// Prompt shown before each command
    #[arg(long, default_value = "nfa> ")]
    prompt: String,

    /// History file for the interactive prompt
    #[arg(long, value_name = "PATH", conflicts_with = "no_history")]
    history: Option<PathBuf>,

    /// Do not load or save command history
    #[arg(long)]
    no_history: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn shell_config(&self) -> ShellConfig {
        let defaults = ShellConfig::default();
        let history_file = if self.no_history {
            None
        } else {
            self.history.clone().or(defaults.history_file)
        };
        ShellConfig {
            prompt: self.prompt.clone(),
            history_file,
            ..defaults
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut shell = Shell::new(cli.shell_config());
    let result = match (&cli.script, cli.batch) {
        (Some(path), _) => run_script(&mut shell, path),
        (None, true) => shell
            .run(io::stdin().lock(), &mut io::stdout().lock())
            .context("failed to run commands from standard input"),
        (None, false) => run_interactive(&mut shell),
    };

    if let Err(e) = result {
        eprintln!("Error! {e:#}");
        process::exit(1);
    }
}

fn run_script(shell: &mut Shell, path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    shell
        .run(BufReader::new(file), &mut io::stdout().lock())
        .with_context(|| format!("failed to run {}", path.display()))
}

fn run_interactive(shell: &mut Shell) -> Result<()> {
    let config = Config::builder()
        .max_history_size(shell.config().max_history)?
        .auto_add_history(true)
        .build();
    let mut editor = DefaultEditor::with_config(config)?;

    let history_file = shell.config().history_file.clone();
    if let Some(path) = &history_file {
        if editor.load_history(path).is_err() {
            log::debug!("no history loaded from {}", path.display());
        }
    }

    let prompt = shell.config().prompt.clone();
    let mut stdout = io::stdout();
    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                if !shell.handle_line(&line, &mut stdout)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &history_file {
        if let Err(err) = editor.save_history(path) {
            log::warn!("failed to save history to {}: {err}", path.display());
        }
    }
    Ok(())
}
