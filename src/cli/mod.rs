//! # CLI
//!
//! `run` drives the scenarios against the live API; `validate` checks a
//! payload file offline. Both exit non-zero when something fails.

mod args;
mod commands;
mod errors;

use std::process::ExitCode;

pub use args::{Cli, Command, OutputFormat, RunArgs, ScenarioArg};
pub use commands::{render_report, render_validation};
pub use errors::{CliError, CliResult};

pub async fn execute(command: &Command) -> CliResult<ExitCode> {
    match command {
        Command::Run(args) => commands::run(args).await,
        Command::Validate { path, output } => commands::validate(path, *output),
    }
}
