//! Deterministic synthesis: concise-bias winner selection.
//!
//! Usable candidates are ordered by trimmed text length, shortest first,
//! with ties broken by ascending candidate id. The first one wins. No model
//! call, no randomness: the same candidates always yield the same winner.

use super::output::SynthesisOutput;
use crate::core::text::char_len;
use crate::scout::Candidate;

/// Usable candidates paired with their trimmed text, in input order.
pub fn usable_candidates(candidates: &[Candidate]) -> Vec<(&Candidate, &str)> {
    candidates
        .iter()
        .filter_map(|c| c.usable_text().map(|text| (c, text)))
        .collect()
}

/// Pick the deterministic winner. Empty output when nothing is usable.
pub fn synthesize_deterministic(candidates: &[Candidate]) -> SynthesisOutput {
    let mut usable = usable_candidates(candidates);
    usable.sort_by(|(a, a_text), (b, b_text)| {
        char_len(a_text)
            .cmp(&char_len(b_text))
            .then_with(|| a.id.cmp(&b.id))
    });

    match usable.first() {
        Some((winner, text)) => SynthesisOutput::winner(winner.id.clone(), *text),
        None => SynthesisOutput::empty(),
    }
}
