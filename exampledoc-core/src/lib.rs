#![warn(missing_docs)]
//! exampledoc Core - Example Registry
//!
//! This crate provides the building blocks shared by the macros and the analyzer:
//! - `ExampleDef` registered via `#[example]` and collected with `inventory`
//! - `Console`, the output sink handed to every example
//! - `ExampleStatus` and the conversion of example return values into outcomes
//! - `Language` descriptors used to locate and rewrite example sources

mod console;
mod language;
mod outcome;

pub use console::Console;
pub use language::{CSharpLanguage, Language, RustLanguage, default_languages};
pub use outcome::{
    Example, ExampleError, ExampleResult, ExampleStatus, IntoExampleResult, innermost_message,
    panic_message,
};

use std::borrow::Cow;

/// Example definition registered via `#[example]`
#[derive(Debug, Clone)]
pub struct ExampleDef {
    /// Explicit qualified name (`name = "..."` attribute), dot separated
    pub name: Option<&'static str>,
    /// Identifier of the annotated item (function or struct)
    pub item: &'static str,
    /// Module path of the annotated item
    pub module_path: &'static str,
    /// Source file path, as reported by `file!()`
    pub file: &'static str,
    /// Source line number
    pub line: u32,
    /// Instantiates the example and invokes its entry operation
    pub runner_fn: fn(&mut Console) -> ExampleResult,
}

impl ExampleDef {
    /// Fully qualified, dot separated name of the example.
    ///
    /// Falls back to the module path (with `::` turned into `.`) followed by
    /// the item identifier when no explicit name was given. The analyzer
    /// locates the source of such an example through its module file.
    pub fn qualified_name(&self) -> Cow<'static, str> {
        match self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!(
                "{}.{}",
                self.module_path.replace("::", "."),
                self.item
            )),
        }
    }
}

// Collect all registered examples
inventory::collect!(ExampleDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<ExampleDef> {}
};
