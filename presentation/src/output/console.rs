//! Console output formatter for round results

use crate::output::formatter::OutputFormatter;
use braintrust_application::RunRoundOutput;
use braintrust_domain::{Candidate, CandidateStatus};
use colored::Colorize;

/// Formats round results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete round: candidates, quorum and final answer
    pub fn format(output: &RunRoundOutput) -> String {
        let result = &output.result;
        let evaluation = &output.evaluation;
        let mut out = String::new();

        out.push_str(&Self::header("Braintrust Round"));
        out.push('\n');

        // Candidates
        out.push_str(&Self::section_header("Scouts"));
        for candidate in &result.candidates {
            out.push_str(&Self::candidate_block(candidate));
        }

        // Quorum
        out.push_str(&Self::section_header("Quorum"));
        let verdict = if evaluation.meets_quorum {
            "met".green().bold()
        } else {
            "not met".red().bold()
        };
        out.push_str(&format!("\n{} {}\n", "Quorum:".cyan().bold(), verdict));
        out.push_str(&format!("{}\n", evaluation.summary()));
        if let Some(reason) = &evaluation.reason {
            out.push_str(&format!("{} {}\n", "Reason:".yellow().bold(), reason));
        }

        // Final answer
        out.push_str(&Self::section_header("Final Answer"));
        if let Some(synthesis) = &result.synthesis {
            let provenance = match (&synthesis.judge_model, &synthesis.winner_id) {
                (Some(model), _) => format!("Judge: {}", model),
                (None, Some(id)) => format!("Winner: {}", id),
                (None, None) => String::new(),
            };
            if !provenance.is_empty() {
                out.push_str(&format!("\n{}\n", provenance.yellow().bold()));
            }
            if let Some(reason) = &synthesis.judge_fallback {
                out.push_str(&format!(
                    "{} {}\n",
                    "Judge fallback:".yellow().bold(),
                    reason
                ));
            }
        }
        out.push_str(&format!("\n{}\n", result.final_text));

        if let Some(telemetry) = &result.telemetry {
            out.push_str(&format!(
                "\n{}\n",
                format!("Total latency: {}ms", telemetry.total_latency_ms).dimmed()
            ));
        }

        out.push_str(&Self::footer());
        out
    }

    /// Format as JSON: the result object with its quorum evaluation
    pub fn format_json(output: &RunRoundOutput) -> String {
        let mut value = serde_json::to_value(&output.result).unwrap_or_default();
        if let (Some(map), Ok(quorum)) = (
            value.as_object_mut(),
            serde_json::to_value(&output.evaluation),
        ) {
            map.insert("quorum".to_string(), quorum);
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Final answer or unavailability notice only
    pub fn format_final(output: &RunRoundOutput) -> String {
        output.result.final_text.clone()
    }

    fn candidate_block(candidate: &Candidate) -> String {
        let role = candidate
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "scout".to_string());
        let title = format!(
            "── {} {} ({}) {} {}ms ──",
            candidate.id, role, candidate.model, candidate.status, candidate.latency_ms
        );

        match candidate.status {
            CandidateStatus::Ok => format!(
                "\n{}\n{}\n",
                title.yellow().bold(),
                candidate.text.as_deref().unwrap_or_default()
            ),
            CandidateStatus::Refusal => format!("\n{}\n", title.magenta().bold()),
            CandidateStatus::Timeout | CandidateStatus::Error => format!(
                "\n{}\nError: {}\n",
                title.red().bold(),
                candidate.error.as_deref().unwrap_or("Unknown")
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, output: &RunRoundOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &RunRoundOutput) -> String {
        Self::format_json(output)
    }

    fn format_final(&self, output: &RunRoundOutput) -> String {
        Self::format_final(output)
    }
}
