//! Output formatter trait

use braintrust_application::RunRoundOutput;

/// Trait for formatting round results
pub trait OutputFormatter {
    /// Every candidate, the quorum verdict and the final answer
    fn format_full(&self, output: &RunRoundOutput) -> String;

    /// The result object plus its quorum evaluation as JSON
    fn format_json(&self, output: &RunRoundOutput) -> String;

    /// Final answer or unavailability notice only
    fn format_final(&self, output: &RunRoundOutput) -> String;
}
