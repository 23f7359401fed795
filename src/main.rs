//! nvim-agent - drive a headless Neovim from the command line
//!
//! # Usage
//!
//! ```bash
//! nvim-agent repl --file notes.txt
//! nvim-agent count 'ciwfoo<Esc>'
//! nvim-agent golf list
//! nvim-agent golf eval 9v0066d89856 ':%s/ \(.*\)/T\1Z/<CR>'
//! ```

mod repl;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use nvim_agent::golf::{self, PROBLEMS};
use nvim_agent::keystrokes::count_keystrokes;
use nvim_agent::{SessionOptions, SessionOptionsBuilder};

/// Drive a headless Neovim with keystrokes
#[derive(Parser, Debug)]
#[command(name = "nvim-agent", version, about, long_about = None)]
struct Cli {
    /// Path to the nvim binary (overrides NVIM_AGENT_NVIM)
    #[arg(long, global = true, value_name = "PATH")]
    nvim: Option<PathBuf>,

    /// Milliseconds to wait for the editor to start
    #[arg(long, global = true, value_name = "MS")]
    startup_timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive loop: type keystrokes, inspect state
    Repl {
        /// Load this file into the buffer
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Count keystrokes in vim notation
    Count {
        /// Keystrokes, e.g. `iHello<Esc>`
        keys: String,
    },
    /// VimGolf challenges
    Golf {
        #[command(subcommand)]
        action: GolfAction,
    },
}

#[derive(Subcommand, Debug)]
enum GolfAction {
    /// List the built-in challenges
    List,
    /// Print the prompt for a challenge
    Prompt {
        /// Challenge id
        id: String,
    },
    /// Replay keystrokes against a challenge
    Eval {
        /// Challenge id
        id: String,
        /// Keystrokes in vim notation
        keys: String,
    },
}

impl Cli {
    /// Environment options with command-line overrides on top
    fn session_options(&self) -> Result<SessionOptionsBuilder> {
        let mut builder = SessionOptionsBuilder::from_options(
            SessionOptions::from_env().context("Invalid NVIM_AGENT_* environment")?,
        );
        if let Some(path) = &self.nvim {
            builder = builder.nvim_path(path);
        }
        if let Some(ms) = self.startup_timeout_ms {
            if ms == 0 {
                bail!("--startup-timeout-ms must be greater than zero");
            }
            builder = builder.startup_timeout(Duration::from_millis(ms));
        }
        Ok(builder)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Repl { file } => {
            let mut builder = cli.session_options()?;
            if let Some(path) = file {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                builder = builder.initial_text(text.strip_suffix('\n').unwrap_or(&text));
            }
            repl::run(builder.build()).await
        }
        Command::Count { keys } => {
            println!("{}", count_keystrokes(keys));
            Ok(())
        }
        Command::Golf { action } => run_golf(&cli, action).await,
    }
}

async fn run_golf(cli: &Cli, action: &GolfAction) -> Result<()> {
    match action {
        GolfAction::List => {
            for problem in PROBLEMS {
                println!("{:16} {}", problem.id, problem.title);
            }
            Ok(())
        }
        GolfAction::Prompt { id } => {
            let problem = find(id)?;
            println!("{}", golf::build_prompt(problem));
            Ok(())
        }
        GolfAction::Eval { id, keys } => {
            let problem = find(id)?;
            let options = cli.session_options()?.build();
            let result = golf::evaluate_solution(problem, keys, options).await?;

            println!("Problem:    {} ({})", problem.title, problem.id);
            println!("Keystrokes: {} ({})", result.keystrokes, result.keystroke_count);
            println!("Final mode: {}", result.final_mode);
            println!("Solved:     {}", if result.solved { "yes" } else { "no" });
            if !result.solved {
                println!("\nExpected:\n{}\n\nActual:\n{}", problem.end_text, result.final_text);
            }
            Ok(())
        }
    }
}

fn find(id: &str) -> Result<&'static golf::GolfProblem> {
    golf::find_problem(id)
        .with_context(|| format!("Unknown problem id '{id}' (see `nvim-agent golf list`)"))
}
