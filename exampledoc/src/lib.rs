#![warn(missing_docs)]
//! # exampledoc
//!
//! Keeps documentation code examples and their documented output in sync.
//!
//! exampledoc discovers the examples registered in a binary, runs each one
//! with its output captured, and writes next to every example source an
//! artifact combining the cleaned-up source with the output it produced:
//! - **Explicit Registry**: `#[example]` registers functions, async functions and types
//! - **Captured Output**: examples write to an injected `Console`, never to stdout
//! - **Contained Failures**: errors and panics are recorded per example, the run goes on
//! - **Multi-Language Sources**: C# and Rust sources, located by namespace layout
//! - **CI Friendly**: human or JSON run reports, non-zero exit status on failure
//!
//! ## Quick Start
//!
//! ```ignore
//! use exampledoc::prelude::*;
//!
//! #[example(name = "demos.code_examples.Squaring")]
//! fn squaring(out: &mut Console) {
//!     writeln!(out, "4 squared is {}", 4 * 4);
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     exampledoc::run()
//! }
//! ```
//!
//! With `code_base = "src/code_examples"` and
//! `default_namespace = "demos.code_examples"` in `exampledoc.toml`, the run
//! writes `src/code_examples/Squaring.rs.txt`.
//!
//! ## Failing Examples
//!
//! ```ignore
//! #[example]
//! fn parsing(out: &mut Console) -> anyhow::Result<()> {
//!     let n: i32 = "not a number".parse()?;
//!     writeln!(out, "{}", n);
//!     Ok(())
//! }
//! ```
//!
//! ## Async Examples
//!
//! ```ignore
//! #[example(runtime = "multi_thread", worker_threads = 2)]
//! async fn waiting(out: &mut Console) {
//!     tokio::time::sleep(Duration::from_millis(1)).await;
//!     writeln!(out, "done");
//! }
//! ```

// Re-export core types
pub use exampledoc_core::{
    CSharpLanguage, Console, Example, ExampleDef, ExampleError, ExampleResult, ExampleStatus,
    IntoExampleResult, Language, RustLanguage, default_languages,
};

// Re-export macros
pub use exampledoc_macros::example;

// Re-export the analyzer
pub use exampledoc_cli::{
    Analyzer, AnalyzerError, DocConfig, ExampleInfo, ExampleSource, ReportFormat, RunOutcome,
    RunSummary, artifact_path, render_artifact,
};

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
    pub use tokio;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Console, Example, ExampleResult, example};
}

/// Run the exampledoc CLI harness.
///
/// Call this from your example binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     exampledoc::run()
/// }
/// ```
pub use exampledoc_cli::run;
