//! Progress reporting for Braintrust rounds

use braintrust_application::RoundProgressNotifier;
use braintrust_domain::{Candidate, CandidateStatus, QuorumEvaluation};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a round with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn dispatch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bar) = guard.as_ref() {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn status_mark(status: CandidateStatus) -> colored::ColoredString {
    match status {
        CandidateStatus::Ok => "v".green(),
        CandidateStatus::Refusal => "-".yellow(),
        CandidateStatus::Timeout | CandidateStatus::Error => "x".red(),
    }
}

impl RoundProgressNotifier for ProgressReporter {
    fn on_dispatch_start(&self, total_scouts: usize) {
        let bar = ProgressBar::new(total_scouts as u64);
        bar.set_style(Self::dispatch_style());
        bar.set_prefix("Dispatch");
        bar.set_message("Starting...");

        *self.bar.lock().unwrap_or_else(|e| e.into_inner()) = Some(bar);
    }

    fn on_candidate_resolved(&self, candidate: &Candidate) {
        self.with_bar(|bar| {
            bar.set_message(format!(
                "{} {} ({})",
                status_mark(candidate.status),
                candidate.model,
                candidate.status
            ));
            bar.inc(1);
        });
    }

    fn on_quorum_evaluated(&self, evaluation: &QuorumEvaluation) {
        let message = if evaluation.meets_quorum {
            format!("{} {}", "quorum met".green(), evaluation.summary())
        } else {
            format!(
                "{} {}",
                "quorum not met".red(),
                evaluation.reason.as_deref().unwrap_or_default()
            )
        };
        self.with_bar(|bar| bar.set_message(message));
    }

    fn on_judge_start(&self, model: &str) {
        self.with_bar(|bar| bar.set_message(format!("judging with {}...", model)));
    }

    fn on_judge_fallback(&self, reason: &str) {
        self.with_bar(|bar| {
            bar.println(format!("{} judge failed: {}", "!".yellow(), reason));
        });
    }

    fn on_round_complete(&self, unavailable: bool) {
        if let Some(bar) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).take() {
            if unavailable {
                bar.finish_with_message(format!("{}", "unavailable".red()));
            } else {
                bar.finish_with_message(format!("{}", "complete!".green()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl RoundProgressNotifier for SimpleProgress {
    fn on_dispatch_start(&self, total_scouts: usize) {
        eprintln!(
            "{} {} ({} scouts)",
            "->".cyan(),
            "Dispatch".bold(),
            total_scouts
        );
    }

    fn on_candidate_resolved(&self, candidate: &Candidate) {
        eprintln!(
            "  {} {} {} ({}ms)",
            status_mark(candidate.status),
            candidate.id,
            candidate.model,
            candidate.latency_ms
        );
    }

    fn on_quorum_evaluated(&self, evaluation: &QuorumEvaluation) {
        match &evaluation.reason {
            None => eprintln!("{} {}", "Quorum met:".green(), evaluation.summary()),
            Some(reason) => eprintln!("{} {}", "Quorum not met:".red(), reason),
        }
    }

    fn on_judge_start(&self, model: &str) {
        eprintln!("{} {} {}", "->".cyan(), "Judge".bold(), model);
    }

    fn on_judge_fallback(&self, reason: &str) {
        eprintln!("{}", fallback_line(reason));
    }
}

fn fallback_line(reason: &str) -> String {
    format!(
        "  {} judge failed, shortest answer wins (ties by id): {}",
        "!".yellow(),
        reason
    )
}
