mod check;
mod completions;
mod print;

use std::io;

use check::CheckCommand;
use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use goprint_core::Mode;
use print::PrintCommand;
use tracing_subscriber::EnvFilter;

use crate::description::FileDescription;

/// Extension trait for exiting on description errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for crate::error::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Generation flags shared by commands that assemble output.
#[derive(Args, Debug, Clone)]
pub(crate) struct ModeArgs {
    /// Methods to generate, comma separated (overrides the description)
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Do not write the _test.go companion file
    #[arg(long)]
    no_tests: bool,
}

impl ModeArgs {
    /// Flags for `desc`: the command line wins, then the description, then
    /// every method plus tests.
    pub fn resolve(&self, desc: &FileDescription) -> Mode {
        let mode = self
            .mode
            .or(desc.mode())
            .unwrap_or_else(|| Mode::all_methods() | Mode::TEST);
        if self.no_tests {
            mode.without(Mode::TEST)
        } else {
            mode
        }
    }
}

#[derive(Parser)]
#[command(name = "goprint")]
#[command(version)]
#[command(about = "Write and format generated Go serialization code")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Install the log subscriber. `RUST_LOG` wins over the flags.
    pub fn init_tracing(&self) {
        let level = match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .with_ansi(false)
            .try_init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Print(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble, write and format the generated files for a description
    Print(PrintCommand),

    /// Validate a description and show what would be written
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
