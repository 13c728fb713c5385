//! Run Report Formatting
//!
//! Human-readable report text. Each example contributes a name line, a
//! source line and an execution line; a summary block closes the report.
//!
//! With `color` set, missing sources, failures and non-zero summary counts
//! are shown in red. The text is otherwise identical.

use super::{ExampleInfo, RunSummary};
use colored::Colorize;

fn alert(text: String, color: bool) -> String {
    if color {
        text.red().to_string()
    } else {
        text
    }
}

fn count(value: usize, color: bool) -> String {
    alert(value.to_string(), color && value > 0)
}

/// Name line, written before the example executes
pub fn format_example_header(example: &ExampleInfo) -> String {
    format!("{}:\n", example.name())
}

/// Source and execution lines, written once the example has executed
pub fn format_example_status(example: &ExampleInfo, color: bool) -> String {
    let source = if example.has_source_code() {
        "found.".to_string()
    } else {
        alert("cannot be found.".to_string(), color)
    };

    let execution = match example.error() {
        None => "successful.".to_string(),
        Some(error) => alert(format!("failed. Exception: {}", error), color),
    };

    format!("   Source code: {}\n   Execution: {}\n", source, execution)
}

/// Summary block, preceded by an empty line
pub fn format_summary(summary: &RunSummary, color: bool) -> String {
    format!(
        "\nNumber of examples: {}.\n   Number of examples with no source code: {}.\n   Number of failed examples: {}.\n",
        summary.total,
        count(summary.without_source, color),
        count(summary.failed, color)
    )
}
