//! Example Analyzer
//!
//! Discovers registered examples, runs them while capturing their output,
//! and writes source+output artifacts next to their source files.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExampleDef (registered via #[example])
//!       │
//!       ▼
//! ┌─────────────┐
//! │  discovery  │  Namespace filter, source path + language resolution
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  execution  │  Run entry operation, capture output and failures
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  artifact   │  <source>.txt with rewritten source and output
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Per-example lines and summary block
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`discovery`] - Code base validation and source resolution
//! - [`execution`] - Serialized, panic-contained execution harness
//! - [`artifact`] - Artifact rendering and writing
//! - [`formatting`] - Human-readable run report
//! - [`report`] - JSON run report

mod artifact;
mod discovery;
mod execution;
mod formatting;
mod report;

pub use artifact::{OUTPUT_HEADER, artifact_path, render_artifact, write_artifact};
pub use discovery::{resolve_module_source, resolve_source};
pub use execution::execute;
pub use formatting::{format_example_header, format_example_status, format_summary};
pub use report::{ExampleReport, RunReport, RunReportMeta, build_report, generate_json_report};

use crate::planner;
use exampledoc_core::{ExampleDef, ExampleStatus, Language, default_languages};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Errors raised by the analyzer
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The code base directory is missing or cannot be probed
    #[error(
        "The specified directory does not exist or an error occurred when trying to determine if the specified folder exists. Path: {}",
        path.display()
    )]
    CodeBaseNotFound {
        /// Offending path
        path: PathBuf,
    },

    /// No default namespace was provided
    #[error("A default namespace is required")]
    MissingNamespace,

    /// Reading a source or writing its artifact failed
    #[error("Failed to generate artifact for {}: {source}", path.display())]
    Artifact {
        /// Source or artifact path involved
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing the run report failed
    #[error("Failed to write run report: {0}")]
    Report(#[source] std::io::Error),
}

/// Where an example's source was found, and in which language it is written
#[derive(Debug, Clone)]
pub struct ExampleSource {
    /// Source file path
    pub path: PathBuf,
    /// Language whose extension matched
    pub language: Arc<dyn Language>,
}

/// Information about one discovered example and the result of running it
#[derive(Debug, Clone)]
pub struct ExampleInfo {
    def: &'static ExampleDef,
    name: String,
    source: Option<ExampleSource>,
    status: ExampleStatus,
    output: String,
    duration: Duration,
}

impl ExampleInfo {
    /// Create a record that has not been executed yet
    pub fn new(def: &'static ExampleDef, source: Option<ExampleSource>) -> Self {
        Self {
            def,
            name: def.qualified_name().into_owned(),
            source,
            status: ExampleStatus::Success,
            output: String::new(),
            duration: Duration::ZERO,
        }
    }

    /// Registered definition
    pub fn def(&self) -> &'static ExampleDef {
        self.def
    }

    /// Fully qualified, dot separated name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved source, if any
    pub fn source(&self) -> Option<&ExampleSource> {
        self.source.as_ref()
    }

    /// Source file path, present iff `language()` is present
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path.as_path())
    }

    /// Source language, present iff `source_path()` is present
    pub fn language(&self) -> Option<&dyn Language> {
        self.source.as_ref().map(|s| s.language.as_ref())
    }

    /// Whether a source file has been found
    pub fn has_source_code(&self) -> bool {
        self.source.is_some()
    }

    /// Execution status
    pub fn status(&self) -> &ExampleStatus {
        &self.status
    }

    /// `0` after a successful execution, `-1` after a failed one
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// Failure message, present iff `exit_code() != 0`
    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    /// Captured output
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Time spent running the entry operation
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of examples discovered
    pub total: usize,
    /// Number of examples whose source could not be found
    pub without_source: usize,
    /// Number of examples whose execution failed
    pub failed: usize,
}

impl RunSummary {
    /// Fold a set of executed examples into counters
    pub fn from_examples(examples: &[ExampleInfo]) -> Self {
        examples.iter().fold(Self::default(), |mut summary, example| {
            summary.record(example);
            summary
        })
    }

    fn record(&mut self, example: &ExampleInfo) {
        self.total += 1;
        if !example.has_source_code() {
            self.without_source += 1;
        }
        if !example.status().is_success() {
            self.failed += 1;
        }
    }
}

/// Result of a run: every example record plus the summary counters
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Examples in discovery order
    pub examples: Vec<ExampleInfo>,
    /// Counters
    pub summary: RunSummary,
}

impl RunOutcome {
    /// `false` iff any example failed
    pub fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    /// Successful, and every example has a source (and therefore an artifact)
    pub fn is_complete(&self) -> bool {
        self.is_success() && self.summary.without_source == 0
    }

    /// Look up an example by qualified name
    pub fn get(&self, name: &str) -> Option<&ExampleInfo> {
        self.examples.iter().find(|e| e.name() == name)
    }
}

/// Runs code examples and writes their outputs together with their source code
#[derive(Debug, Clone)]
pub struct Analyzer {
    code_base: PathBuf,
    default_namespace: String,
    languages: Vec<Arc<dyn Language>>,
    filter: Option<Regex>,
}

impl Analyzer {
    /// Create an analyzer for the examples stored under `code_base`.
    ///
    /// `code_base` is expected to contain the files of examples declared
    /// directly in `default_namespace`, with subdirectories mirroring the
    /// nested namespaces.
    pub fn new(
        code_base: impl Into<PathBuf>,
        default_namespace: impl Into<String>,
    ) -> Result<Self, AnalyzerError> {
        Self::try_new(code_base, Some(default_namespace.into()))
    }

    /// Like [`Analyzer::new`], with a namespace that may be absent.
    ///
    /// The code base is validated first; an absent namespace is reported
    /// as [`AnalyzerError::MissingNamespace`].
    pub fn try_new(
        code_base: impl Into<PathBuf>,
        default_namespace: Option<String>,
    ) -> Result<Self, AnalyzerError> {
        let code_base = code_base.into();
        discovery::validate_code_base(&code_base)?;
        let default_namespace = default_namespace.ok_or(AnalyzerError::MissingNamespace)?;

        Ok(Self {
            code_base,
            default_namespace,
            languages: default_languages(),
            filter: None,
        })
    }

    /// Replace the probed languages (probing follows the given order)
    pub fn with_languages(mut self, languages: Vec<Arc<dyn Language>>) -> Self {
        self.languages = languages;
        self
    }

    /// Only consider examples whose qualified name matches `filter`
    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Root of the example source tree
    pub fn code_base(&self) -> &Path {
        &self.code_base
    }

    /// Namespace prefix of the examples under `code_base`
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Languages probed when resolving sources
    pub fn languages(&self) -> &[Arc<dyn Language>] {
        &self.languages
    }

    /// Discover the examples among `defs` that belong to the default namespace
    pub fn discover(
        &self,
        defs: impl IntoIterator<Item = &'static ExampleDef>,
    ) -> Vec<ExampleInfo> {
        let defs: Vec<_> = defs.into_iter().collect();
        let single_modules = discovery::single_example_modules(&defs);
        let plan = planner::build_plan(defs, &self.default_namespace, self.filter.as_ref());

        let examples: Vec<_> = plan
            .examples
            .into_iter()
            .map(|(def, remainder)| {
                let source = match def.name {
                    Some(_) => resolve_source(&self.code_base, &remainder, &self.languages),
                    None if single_modules.contains(&def.module_path) => {
                        resolve_module_source(&self.code_base, &remainder, &self.languages)
                    }
                    None => None,
                };
                match &source {
                    Some(s) => debug!(
                        example = %def.qualified_name(),
                        path = %s.path.display(),
                        language = s.language.name(),
                        "source resolved"
                    ),
                    None => debug!(example = %def.qualified_name(), "no source found"),
                }
                ExampleInfo::new(def, source)
            })
            .collect();

        info!(
            count = examples.len(),
            namespace = %self.default_namespace,
            "discovered examples"
        );
        examples
    }

    /// Discover the registered examples without running them
    pub fn discover_registered(&self) -> Vec<ExampleInfo> {
        self.discover(inventory::iter::<ExampleDef>)
    }

    /// Run every registered example, reporting to standard output when `report` is set.
    ///
    /// Standard output stays unlocked between report writes, so examples may
    /// print to it from other threads. The report is colored on a terminal.
    pub fn run(&self, report: bool) -> Result<RunOutcome, AnalyzerError> {
        let mut stdout = std::io::stdout();
        let color = stdout.is_terminal();
        self.run_reporting(inventory::iter::<ExampleDef>, &mut stdout, report, color)
    }

    /// Run every registered example, reporting to `writer` when `report` is set
    pub fn run_with_writer<W: Write>(
        &self,
        writer: &mut W,
        report: bool,
    ) -> Result<RunOutcome, AnalyzerError> {
        self.run_examples(inventory::iter::<ExampleDef>, writer, report)
    }

    /// Run the examples among `defs`, reporting to `writer` when `report` is set.
    ///
    /// Examples run one at a time in discovery order. Successful examples
    /// with a source get an artifact. Failures are recorded, never raised.
    pub fn run_examples<W: Write>(
        &self,
        defs: impl IntoIterator<Item = &'static ExampleDef>,
        writer: &mut W,
        report: bool,
    ) -> Result<RunOutcome, AnalyzerError> {
        self.run_reporting(defs, writer, report, false)
    }

    fn run_reporting<W: Write>(
        &self,
        defs: impl IntoIterator<Item = &'static ExampleDef>,
        writer: &mut W,
        report: bool,
        color: bool,
    ) -> Result<RunOutcome, AnalyzerError> {
        let mut examples = self.discover(defs);
        let mut summary = RunSummary::default();

        for example in &mut examples {
            if report {
                writer
                    .write_all(format_example_header(example).as_bytes())
                    .map_err(AnalyzerError::Report)?;
            }

            execute(example);
            write_artifact(example)?;
            summary.record(example);

            if report {
                writer
                    .write_all(format_example_status(example, color).as_bytes())
                    .map_err(AnalyzerError::Report)?;
            }
        }

        if report {
            writer
                .write_all(format_summary(&summary, color).as_bytes())
                .map_err(AnalyzerError::Report)?;
            writer.flush().map_err(AnalyzerError::Report)?;
        }

        info!(
            total = summary.total,
            without_source = summary.without_source,
            failed = summary.failed,
            "run complete"
        );

        Ok(RunOutcome { examples, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exampledoc_core::{Console, ExampleResult};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn succeeds(out: &mut Console) -> ExampleResult {
        out.println("ok:output");
        Ok(())
    }

    fn fails(out: &mut Console) -> ExampleResult {
        out.println("partial");
        Err("ok:error".into())
    }

    static FOUND_OK: ExampleDef = ExampleDef {
        name: Some("Unit.Examples.FoundOk"),
        item: "FoundOk",
        module_path: "unit",
        file: file!(),
        line: 1,
        runner_fn: succeeds,
    };

    static MISSING_FAILS: ExampleDef = ExampleDef {
        name: Some("Unit.Examples.Nested.MissingFails"),
        item: "MissingFails",
        module_path: "unit",
        file: file!(),
        line: 2,
        runner_fn: fails,
    };

    static OTHER_NAMESPACE: ExampleDef = ExampleDef {
        name: Some("Elsewhere.Examples.FoundOk"),
        item: "FoundOk",
        module_path: "unit",
        file: file!(),
        line: 3,
        runner_fn: succeeds,
    };

    fn defs() -> Vec<&'static ExampleDef> {
        vec![&MISSING_FAILS, &OTHER_NAMESPACE, &FOUND_OK]
    }

    fn code_base() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("FoundOk.rs"), "fn main() {}\n").unwrap();
        dir
    }

    #[test]
    fn test_missing_code_base_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("1a793a0c-1178-42e3-a6bc-c23ca6d7289d");
        let err = Analyzer::new(&missing, "Unit.Examples").unwrap_err();
        assert!(matches!(err, AnalyzerError::CodeBaseNotFound { ref path } if path == &missing));
        assert!(err.to_string().starts_with(
            "The specified directory does not exist or an error occurred when trying to determine if the specified folder exists"
        ));
    }

    #[test]
    fn test_file_as_code_base_is_rejected() {
        let dir = code_base();
        let err = Analyzer::new(dir.path().join("FoundOk.rs"), "Unit.Examples").unwrap_err();
        assert!(matches!(err, AnalyzerError::CodeBaseNotFound { .. }));
    }

    #[test]
    fn test_missing_namespace_is_rejected() {
        let dir = code_base();
        let err = Analyzer::try_new(dir.path(), None).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingNamespace));
    }

    #[test]
    fn test_code_base_checked_before_namespace() {
        let err = Analyzer::try_new("/definitely/not/here/exampledoc", None).unwrap_err();
        assert!(matches!(err, AnalyzerError::CodeBaseNotFound { .. }));
    }

    #[test]
    fn test_accessors() {
        let dir = code_base();
        let analyzer = Analyzer::new(dir.path(), "Unit.Examples").unwrap();
        assert_eq!(analyzer.code_base(), dir.path());
        assert_eq!(analyzer.default_namespace(), "Unit.Examples");
        assert_eq!(analyzer.languages().len(), 2);
    }

    #[test]
    fn test_discover_filters_namespace_and_sorts() {
        let dir = code_base();
        let analyzer = Analyzer::new(dir.path(), "Unit.Examples").unwrap();
        let examples = analyzer.discover(defs());

        let names: Vec<_> = examples.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec!["Unit.Examples.FoundOk", "Unit.Examples.Nested.MissingFails"]
        );

        let found = &examples[0];
        assert_eq!(found.source_path(), Some(dir.path().join("FoundOk.rs").as_path()));
        assert_eq!(found.language().map(|l| l.name()), Some("Rust"));
        assert_eq!(found.exit_code(), 0);
        assert_eq!(found.output(), "");

        let missing = &examples[1];
        assert!(missing.source_path().is_none());
        assert!(missing.language().is_none());
    }

    #[test]
    fn test_run_examples_counts_and_artifacts() {
        let dir = code_base();
        let analyzer = Analyzer::new(dir.path(), "Unit.Examples").unwrap();
        let mut sink = Vec::new();
        let outcome = analyzer.run_examples(defs(), &mut sink, true).unwrap();

        assert_eq!(
            outcome.summary,
            RunSummary {
                total: 2,
                without_source: 1,
                failed: 1,
            }
        );
        assert!(!outcome.is_success());
        assert!(!outcome.is_complete());

        let failed = outcome.get("Unit.Examples.Nested.MissingFails").unwrap();
        assert_eq!(failed.exit_code(), -1);
        assert_eq!(failed.error(), Some("ok:error"));
        assert_eq!(failed.output(), "partial\n");

        assert!(dir.path().join("FoundOk.rs.txt").is_file());

        let report = String::from_utf8(sink).unwrap();
        assert_eq!(
            report,
            concat!(
                "Unit.Examples.FoundOk:\n",
                "   Source code: found.\n",
                "   Execution: successful.\n",
                "Unit.Examples.Nested.MissingFails:\n",
                "   Source code: cannot be found.\n",
                "   Execution: failed. Exception: ok:error\n",
                "\n",
                "Number of examples: 2.\n",
                "   Number of examples with no source code: 1.\n",
                "   Number of failed examples: 1.\n",
            )
        );
    }

    #[test]
    fn test_silent_run_writes_nothing() {
        let dir = code_base();
        let analyzer = Analyzer::new(dir.path(), "Unit.Examples").unwrap();
        let mut sink = Vec::new();
        let outcome = analyzer.run_examples(defs(), &mut sink, false).unwrap();
        assert!(sink.is_empty());
        assert_eq!(outcome.summary.total, 2);
    }

    #[test]
    fn test_filter_narrows_discovery() {
        let dir = code_base();
        let analyzer = Analyzer::new(dir.path(), "Unit.Examples")
            .unwrap()
            .with_filter(Regex::new("Nested").unwrap());
        let examples = analyzer.discover(defs());
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].name(), "Unit.Examples.Nested.MissingFails");
    }

    #[test]
    fn test_summary_fold_matches_run_counters() {
        let dir = code_base();
        let analyzer = Analyzer::new(dir.path(), "Unit.Examples").unwrap();
        let outcome = analyzer
            .run_examples(defs(), &mut std::io::sink(), false)
            .unwrap();
        assert_eq!(RunSummary::from_examples(&outcome.examples), outcome.summary);
    }
}
