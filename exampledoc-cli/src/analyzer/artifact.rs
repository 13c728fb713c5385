//! Artifact Generation
//!
//! An artifact is `<source>.txt`: the example source with its registration
//! references removed, followed by the captured output as comment lines.

use super::{AnalyzerError, ExampleInfo};
use exampledoc_core::Language;
use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Comment line introducing the captured output
pub const OUTPUT_HEADER: &str = "Executing method Main() produces the following output:";

const BOM: char = '\u{feff}';

/// Path of the artifact generated for `source_path`
pub fn artifact_path(source_path: &Path) -> PathBuf {
    let mut path = OsString::from(source_path.as_os_str());
    path.push(".txt");
    PathBuf::from(path)
}

/// Render artifact text from raw source code and captured output
pub fn render_artifact(source: &str, language: &dyn Language, output: &str) -> String {
    let comment = language.comment_symbol();
    let rewritten = language.remove_example_references(source);

    let mut text = String::with_capacity(rewritten.len() + output.len() + 128);
    for line in rewritten.lines() {
        text.push_str(line);
        text.push('\n');
    }
    text.push('\n');
    let _ = writeln!(text, "{}{}", comment, OUTPUT_HEADER);
    text.push_str(comment.trim_end());
    text.push('\n');
    for line in output.lines() {
        let _ = writeln!(text, "{}{}", comment, line);
    }
    text
}

/// Write the artifact of a successful example with a source.
///
/// Returns the written path, or `None` when the example failed or has no
/// source. An existing artifact is overwritten.
pub fn write_artifact(example: &ExampleInfo) -> Result<Option<PathBuf>, AnalyzerError> {
    let source = match example.source() {
        Some(source) if example.status().is_success() => source,
        _ => return Ok(None),
    };

    let bytes = std::fs::read(&source.path).map_err(|e| AnalyzerError::Artifact {
        path: source.path.clone(),
        source: e,
    })?;
    let code = String::from_utf8_lossy(&bytes);
    let code = code.strip_prefix(BOM).unwrap_or(&code);

    let text = render_artifact(code, source.language.as_ref(), example.output());
    let path = artifact_path(&source.path);
    std::fs::write(&path, text).map_err(|e| AnalyzerError::Artifact {
        path: path.clone(),
        source: e,
    })?;

    debug!(example = %example.name(), path = %path.display(), "artifact written");
    Ok(Some(path))
}
