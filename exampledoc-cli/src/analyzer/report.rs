//! JSON Run Report
//!
//! Machine-readable rendering of a run, for CI pipelines that track example
//! outcomes over time.

use super::{Analyzer, ExampleInfo, RunOutcome, RunSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReportMeta {
    /// exampledoc version
    pub version: String,
    /// UTC time of report generation
    pub timestamp: DateTime<Utc>,
    /// Discovery root
    pub code_base: String,
    /// Namespace prefix of the examples
    pub default_namespace: String,
}

/// One example in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleReport {
    /// Qualified name
    pub name: String,
    /// Resolved source file
    pub source_path: Option<String>,
    /// Source language name
    pub language: Option<String>,
    /// `0` on success, `-1` on failure
    pub exit_code: i32,
    /// Failure message
    pub error: Option<String>,
    /// Captured output
    pub output: String,
    /// Execution time in milliseconds
    pub duration_ms: f64,
}

impl From<&ExampleInfo> for ExampleReport {
    fn from(example: &ExampleInfo) -> Self {
        Self {
            name: example.name().to_string(),
            source_path: example.source_path().map(|p| p.display().to_string()),
            language: example.language().map(|l| l.name().to_string()),
            exit_code: example.exit_code(),
            error: example.error().map(str::to_string),
            output: example.output().to_string(),
            duration_ms: example.duration().as_secs_f64() * 1_000.0,
        }
    }
}

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run metadata
    pub meta: RunReportMeta,
    /// Examples in discovery order
    pub examples: Vec<ExampleReport>,
    /// Counters
    pub summary: RunSummary,
}

/// Build a report from a finished run
pub fn build_report(analyzer: &Analyzer, outcome: &RunOutcome) -> RunReport {
    RunReport {
        meta: RunReportMeta {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            code_base: analyzer.code_base().display().to_string(),
            default_namespace: analyzer.default_namespace().to_string(),
        },
        examples: outcome.examples.iter().map(ExampleReport::from).collect(),
        summary: outcome.summary,
    }
}

/// Generate a prettified JSON report
pub fn generate_json_report(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exampledoc_core::{Console, ExampleDef, ExampleResult};
    use tempfile::TempDir;

    fn greets(out: &mut Console) -> ExampleResult {
        out.println("hello");
        Ok(())
    }

    fn refuses(_: &mut Console) -> ExampleResult {
        Err("nope".into())
    }

    static GREETS: ExampleDef = ExampleDef {
        name: Some("Json.Examples.Greets"),
        item: "Greets",
        module_path: "unit",
        file: file!(),
        line: 1,
        runner_fn: greets,
    };

    static REFUSES: ExampleDef = ExampleDef {
        name: Some("Json.Examples.Refuses"),
        item: "Refuses",
        module_path: "unit",
        file: file!(),
        line: 2,
        runner_fn: refuses,
    };

    #[test]
    fn test_json_report_shape() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Greets.rs"), "fn greets() {}\n").unwrap();

        let analyzer = Analyzer::new(dir.path(), "Json.Examples").unwrap();
        let outcome = analyzer
            .run_examples([&GREETS, &REFUSES], &mut std::io::sink(), false)
            .unwrap();
        let report = build_report(&analyzer, &outcome);
        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["meta"]["default_namespace"], "Json.Examples");
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["without_source"], 1);
        assert_eq!(value["summary"]["failed"], 1);

        let examples = value["examples"].as_array().unwrap();
        assert_eq!(examples[0]["name"], "Json.Examples.Greets");
        assert_eq!(examples[0]["language"], "Rust");
        assert_eq!(examples[0]["exit_code"], 0);
        assert_eq!(examples[0]["output"], "hello\n");
        assert!(examples[0]["error"].is_null());

        assert_eq!(examples[1]["exit_code"], -1);
        assert_eq!(examples[1]["error"], "nope");
        assert!(examples[1]["source_path"].is_null());
    }

    #[test]
    fn test_report_round_trips_through_serde() {
        let dir = TempDir::new().unwrap();
        let analyzer = Analyzer::new(dir.path(), "Json.Examples").unwrap();
        let outcome = analyzer
            .run_examples([&REFUSES], &mut std::io::sink(), false)
            .unwrap();
        let json = generate_json_report(&build_report(&analyzer, &outcome)).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary, outcome.summary);
        assert_eq!(parsed.examples[0].error.as_deref(), Some("nope"));
    }
}
