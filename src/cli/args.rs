//! CLI argument definitions using clap
//!
//! Commands:
//! - balikobot-checks run [--scenario <name>] [--carrier <code>] [--iterations <n>]
//! - balikobot-checks validate <file>

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::scenarios::{RunOptions, Scenario};

/// End-to-end checks for the Balikobot parcel-shipping API
#[derive(Parser, Debug)]
#[command(name = "balikobot-checks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Load environment variables from this file instead of `.env`
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run scenarios against the live API
    Run(RunArgs),

    /// Validate an add/check request body stored in a JSON file
    Validate {
        /// Path to the JSON payload
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scenario to run
    #[arg(long, value_enum, default_value_t = ScenarioArg::All)]
    pub scenario: ScenarioArg,

    /// Carrier code used in endpoint paths
    #[arg(long, default_value = "cp")]
    pub carrier: String,

    /// How many times each scenario is repeated
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub iterations: u64,

    /// Packages per request
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=100))]
    pub packages: u64,

    /// Seed for the package generator
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Output format for reports.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioArg {
    All,
    Add,
    Check,
    InvalidAdd,
}

impl ScenarioArg {
    pub fn scenarios(self) -> Vec<Scenario> {
        match self {
            ScenarioArg::All => Scenario::ALL.to_vec(),
            ScenarioArg::Add => vec![Scenario::Add],
            ScenarioArg::Check => vec![Scenario::Check],
            ScenarioArg::InvalidAdd => vec![Scenario::InvalidAdd],
        }
    }
}

impl RunArgs {
    pub fn options(&self) -> RunOptions {
        RunOptions {
            scenarios: self.scenario.scenarios(),
            carrier: self.carrier.clone(),
            iterations: self.iterations,
            packages_per_request: self.packages as usize,
            seed: self.seed,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
