//! Prompt templates for scouts and the judge

use crate::scout::{Candidate, ScoutRole};

/// Templates for generating prompts at each stage of a round
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt sent with every scout call
    pub fn scout_system(role: ScoutRole) -> String {
        format!(
            "You are Braintrust {}. Respond with one concise candidate answer for the user prompt.",
            role
        )
    }

    /// System prompt for the judge
    pub fn judge_system() -> &'static str {
        "You are the Braintrust Judge. Merge scout outputs into one best answer."
    }

    /// Merge prompt embedding the user prompt and every usable candidate.
    ///
    /// Candidates that are not usable are skipped; each block is tagged with
    /// the scout's role (when known), model and id.
    pub fn judge_prompt(user_prompt: &str, candidates: &[Candidate]) -> String {
        let blocks: Vec<String> = candidates
            .iter()
            .filter_map(|c| c.usable_text().map(|text| (c, text)))
            .enumerate()
            .map(|(i, (candidate, text))| {
                let n = i + 1;
                let tag = match candidate.role {
                    Some(role) => format!("{}, {}, {}", role, candidate.model, candidate.id),
                    None => format!("{}, {}", candidate.model, candidate.id),
                };
                format!("--- Scout {n} ({tag}) ---\n{text}\n--- End Scout {n} ---")
            })
            .collect();

        format!(
            r#"You are the Braintrust Judge. You have received responses from multiple scout agents to the same user prompt.
Your job: synthesize the best parts of each response into ONE final answer.
Rules:
- Merge the strongest facts, reasoning, and details from all scouts.
- Resolve any contradictions by favoring the most well-supported claim.
- Do NOT mention the scouts, the panel, or this process in your answer.
- Output ONLY the final merged answer. No meta-commentary.

USER PROMPT: {}

SCOUT RESPONSES:
{}"#,
            user_prompt,
            blocks.join("\n\n")
        )
    }
}
