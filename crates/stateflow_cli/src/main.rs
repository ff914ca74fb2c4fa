//! Command-line runner for workflow definition files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stateflow_cli::cli;

#[derive(Parser, Debug)]
#[command(
    name = "stateflow",
    about = "Validate, run, and inspect declarative state machine workflows"
)]
struct Cli {
    /// Widen log output to debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a workflow definition and report its shape
    Validate {
        /// Path to the workflow definition (JSON)
        spec: PathBuf,
    },
    /// Apply a sequence of transitions starting from the initial state
    Run {
        /// Path to the workflow definition (JSON)
        spec: PathBuf,
        /// Transition names to apply, in order
        #[arg(required = true)]
        transitions: Vec<String>,
    },
    /// Check whether a transition can proceed from a given state
    Check {
        /// Path to the workflow definition (JSON)
        spec: PathBuf,
        /// State to check from
        #[arg(long)]
        state: String,
        /// Transition name
        transition: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Validate { spec } => cli::validate::run(&spec),
        Command::Run { spec, transitions } => cli::run::run(&spec, &transitions),
        Command::Check {
            spec,
            state,
            transition,
        } => cli::check::run(&spec, &state, &transition),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stateflow=debug,stateflow_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stateflow=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
