//! Source Discovery
//!
//! Maps an example's namespace remainder onto the code base directory tree
//! and probes each known language's file extension.

use super::{AnalyzerError, ExampleSource};
use exampledoc_core::{ExampleDef, Language};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Ensure `code_base` exists and is a directory.
///
/// Any failure to probe the path counts as "not found".
pub(crate) fn validate_code_base(code_base: &Path) -> Result<(), AnalyzerError> {
    match std::fs::metadata(code_base) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(AnalyzerError::CodeBaseNotFound {
            path: code_base.to_path_buf(),
        }),
    }
}

/// Find the source file of an example.
///
/// `remainder` is the qualified name with the default namespace removed
/// (e.g. `Advanced.CodeExample4`). Each segment but the last is a
/// directory; the last is the file stem. Languages are probed in order and
/// the first existing file wins.
pub fn resolve_source(
    code_base: &Path,
    remainder: &str,
    languages: &[Arc<dyn Language>],
) -> Option<ExampleSource> {
    let stem = code_base.join(remainder.split('.').collect::<PathBuf>());

    languages.iter().find_map(|language| {
        let mut candidate = stem.clone().into_os_string();
        candidate.push(language.file_extension());
        let path = PathBuf::from(candidate);

        path.is_file().then(|| ExampleSource {
            path,
            language: Arc::clone(language),
        })
    })
}

/// Module paths declaring exactly one example with a derived name.
///
/// A derived name ends in the item identifier, which never names a file.
/// Such an example is resolved through its module file instead, as long as
/// no other derived example shares that file and its artifact.
pub(crate) fn single_example_modules(defs: &[&'static ExampleDef]) -> Vec<&'static str> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for def in defs.iter().filter(|def| def.name.is_none()) {
        *counts.entry(def.module_path).or_default() += 1;
    }
    counts
        .into_iter()
        .filter_map(|(module, count)| (count == 1).then_some(module))
        .collect()
}

/// Resolve the module file holding a derived-name example.
///
/// `remainder` is the derived name relative to the namespace, so its last
/// segment is the item identifier. Both `a/b.rs` and `a/b/mod.rs` layouts
/// are probed, in that order. Items declared directly in the namespace
/// module have no module file under the code base.
pub fn resolve_module_source(
    code_base: &Path,
    remainder: &str,
    languages: &[Arc<dyn Language>],
) -> Option<ExampleSource> {
    let (module, _item) = remainder.rsplit_once('.')?;
    resolve_source(code_base, module, languages)
        .or_else(|| resolve_source(code_base, &format!("{}.mod", module), languages))
}
