//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for round results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every candidate, the quorum verdict and the final answer
    Full,
    /// Only the final answer or unavailability notice
    Final,
    /// The round result as JSON
    Json,
}

impl From<OutputFormat> for braintrust_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => braintrust_domain::OutputFormat::Full,
            OutputFormat::Final => braintrust_domain::OutputFormat::Final,
            OutputFormat::Json => braintrust_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for braintrust
#[derive(Parser, Debug)]
#[command(name = "braintrust")]
#[command(author, version, about = "Quorum-gated multi-agent response aggregator")]
#[command(long_about = r#"
Braintrust sends one prompt to a small team of scout agents in parallel,
checks that enough of them took part and answered, and merges the usable
answers into one final reply. When the team falls short it returns a
"temporarily unavailable" notice instead of a weak answer.

A round has three steps:
1. Dispatch: solver, critic and researcher scouts answer concurrently
2. Quorum: participating and answering counts are checked against the minimums
3. Synthesis: a judge merges the answers, or the shortest answer wins (ties by id)

Configuration files are loaded from (in priority order):
1. BRAINTRUST_* environment variables
2. --config <path>            Explicit config file
3. ./braintrust.toml          Project-level config
4. ~/.config/braintrust/config.toml   Global config

Example:
  braintrust ask "What's the best way to handle errors in Rust?"
  braintrust ask --judge --output full "Compare async runtimes"
  braintrust command status
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one round for a prompt and print the result
    Ask {
        /// The prompt to send to the scouts
        prompt: String,

        /// Merge answers with the judge (needs a judge command or HTTP worker)
        #[arg(long)]
        judge: bool,

        /// Output format (defaults to the configured one, then "final")
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Override the configured team size (1-4)
        #[arg(long, value_name = "N")]
        team_size: Option<u64>,

        /// Override the configured per-scout timeout in seconds (10-300)
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },

    /// Run a host command: on, off, status or unavailable
    Command {
        /// Action to run; anything unrecognized shows the status
        action: Option<String>,
    },

    /// Print the context block a host would prepend for this prompt
    Context {
        /// The user prompt
        prompt: String,
    },
}
