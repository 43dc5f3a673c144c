//! CLI entrypoint for Braintrust
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use braintrust_application::{
    BraintrustAction, BraintrustController, HostMessage, JudgeExecutor, MessageContent,
    NoProgress, RoundProgressNotifier, RunRoundInput, RunRoundUseCase, WorkerExecutor,
};
use braintrust_domain::settings::{ConfigIssue, Severity, has_errors};
use braintrust_domain::{BraintrustSettings, OutputFormat, read_settings_with_issues};
use braintrust_infrastructure::{ConfigLoader, FileConfig, JsonlRoundLogger, WorkerKind};
use braintrust_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use clap::Parser;
use serde_json::Value;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Executors built from the `[worker]` section
struct Workers {
    worker: Arc<dyn WorkerExecutor>,
    judge: Option<Arc<dyn JudgeExecutor>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        for line in ConfigLoader::config_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("Warning: {}", issue.message),
            Severity::Error => eprintln!("Error: {}", issue.message),
        }
    }
    if has_errors(&issues) {
        bail!("Invalid configuration ({} error(s))", error_count(&issues));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Braintrust");

    let Some(command) = cli.command else {
        bail!("No command given. Run `braintrust --help` for usage.");
    };

    let progress: Box<dyn RoundProgressNotifier> = if cli.quiet || !config.output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    match command {
        Command::Ask {
            prompt,
            judge,
            output,
            team_size,
            timeout,
        } => {
            let settings = settings_with_overrides(&config, team_size, timeout);
            let Some(workers) = build_workers(&config)? else {
                bail!(
                    "No worker configured. Set worker.command or worker.kind = \"http\" in braintrust.toml."
                );
            };

            let mut round = round_use_case(&config, &workers);
            if judge {
                let Some(judge) = workers.judge.clone() else {
                    bail!("--judge needs worker.judge_command or worker.kind = \"http\"");
                };
                round = round.with_judge(judge);
            }

            let format = output
                .map(OutputFormat::from)
                .or(config.output.format)
                .unwrap_or_default();

            let input = RunRoundInput::new(prompt, settings);
            let result = round.execute_with_progress(input, progress.as_ref()).await?;

            let formatter: &dyn OutputFormatter = &ConsoleFormatter;
            let rendered = match format {
                OutputFormat::Full => formatter.format_full(&result),
                OutputFormat::Final => formatter.format_final(&result),
                OutputFormat::Json => formatter.format_json(&result),
            };
            println!("{}", rendered);
        }

        Command::Command { action } => {
            let controller = BraintrustController::new(config.settings());
            let action = BraintrustAction::parse(action.as_deref());
            println!("{}", controller.execute_action(action));
        }

        Command::Context { prompt } => {
            let mut controller = BraintrustController::new(config.settings());
            if let Some(workers) = build_workers(&config)? {
                let mut round = round_use_case(&config, &workers);
                if let Some(judge) = workers.judge.clone() {
                    round = round.with_judge(judge);
                }
                controller = controller.with_round(round);
            }

            let messages = [HostMessage {
                role: "user".to_string(),
                content: MessageContent::Text(prompt),
            }];
            match controller
                .prompt_context_with_progress(&messages, progress.as_ref())
                .await
            {
                Some(context) => println!("{}", context),
                None => println!("{}", controller.status_line()),
            }
        }
    }

    Ok(())
}

/// Number of fatal issues; warnings are only printed
fn error_count(issues: &[ConfigIssue]) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count()
}

/// Settings from the config file with CLI flags applied on top, so the
/// overrides go through the same clamping as file values.
fn settings_with_overrides(
    config: &FileConfig,
    team_size: Option<u64>,
    timeout: Option<u64>,
) -> BraintrustSettings {
    if team_size.is_none() && timeout.is_none() {
        return config.settings();
    }

    let mut raw = config.braintrust.to_raw();
    if let Some(team_size) = team_size {
        raw.insert("teamSize".to_string(), Value::from(team_size));
    }
    if let Some(timeout) = timeout {
        raw.insert("timeoutSeconds".to_string(), Value::from(timeout));
    }

    let (settings, issues) = read_settings_with_issues(Some(&raw));
    for issue in issues {
        warn!("{}", issue.message);
    }
    settings
}

/// Round use case with the configured refusal policy and round log
fn round_use_case(config: &FileConfig, workers: &Workers) -> RunRoundUseCase {
    let mut round = RunRoundUseCase::new(workers.worker.clone())
        .with_refusal_policy(config.worker.refusal_policy());

    if let Some(path) = &config.logging.round_log {
        match JsonlRoundLogger::new(path) {
            Some(logger) => round = round.with_logger(Arc::new(logger)),
            None => warn!("Could not open round log {}", path.display()),
        }
    }
    round
}

/// Build executors for the selected worker kind; `None` when the command
/// kind has no command configured.
fn build_workers(config: &FileConfig) -> Result<Option<Workers>> {
    let worker_config = &config.worker;
    match worker_config.kind {
        WorkerKind::Command => {
            use braintrust_infrastructure::CommandWorker;

            let Some(command) = &worker_config.command else {
                return Ok(None);
            };
            let judge = worker_config
                .judge_command
                .as_ref()
                .map(|c| Arc::new(CommandWorker::new(c.clone())) as Arc<dyn JudgeExecutor>);
            Ok(Some(Workers {
                worker: Arc::new(CommandWorker::new(command.clone())),
                judge,
            }))
        }

        #[cfg(feature = "http-worker")]
        WorkerKind::Http => {
            use anyhow::Context as _;
            use braintrust_infrastructure::HttpWorker;

            let base_url = worker_config
                .base_url
                .as_deref()
                .context("worker.base_url is required when worker.kind = \"http\"")?;
            let worker = Arc::new(HttpWorker::new(base_url, &worker_config.api_key_env)?);
            Ok(Some(Workers {
                worker: worker.clone(),
                judge: Some(worker as Arc<dyn JudgeExecutor>),
            }))
        }

        #[cfg(not(feature = "http-worker"))]
        WorkerKind::Http => {
            bail!("worker.kind = \"http\" needs the `http-worker` feature")
        }
    }
}
