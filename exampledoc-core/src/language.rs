//! Language Descriptors
//!
//! A language descriptor tells the analyzer how example sources written in
//! one language are named on disk, how comments are introduced, and how the
//! example-registration artifacts are stripped from a source before it is
//! published as documentation.
//!
//! All rewrite rules are regex substitutions. They are idempotent and do not
//! depend on each other's order.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A source language in which examples can be written
pub trait Language: Send + Sync + fmt::Debug {
    /// Human-readable language name
    fn name(&self) -> &str;

    /// File extension, including the leading dot (e.g. `".cs"`)
    fn file_extension(&self) -> &str;

    /// Prefix that turns a line into a comment (e.g. `"// "`)
    fn comment_symbol(&self) -> &str;

    /// Remove references to the example contract from `code`
    fn remove_example_references(&self, code: &str) -> String;
}

/// Languages probed by default, in probing order
pub fn default_languages() -> Vec<Arc<dyn Language>> {
    vec![
        Arc::new(CSharpLanguage::new()),
        Arc::new(RustLanguage::new()),
    ]
}

const DEFAULT_CONTRACT_NAMESPACE: &str = "ExampleDoc.CodeExamples";
const DEFAULT_CONTRACT_NAME: &str = "ICodeExample";
const CSHARP_MAIN_PROTOTYPE: &str = "public void Main()";

/// C# sources.
///
/// Examples implement an interface (the contract, `ICodeExample` by default)
/// declared in a dedicated namespace. Rewriting drops the interface from the
/// base list, drops the `using` directive for the contract namespace and
/// normalizes the `Main` signature.
#[derive(Debug, Clone)]
pub struct CSharpLanguage {
    contract_re: Regex,
    using_re: Regex,
    main_re: Regex,
}

impl CSharpLanguage {
    /// C# with the default example contract
    pub fn new() -> Self {
        Self::with_contract(DEFAULT_CONTRACT_NAMESPACE, DEFAULT_CONTRACT_NAME)
            .expect("default contract patterns are valid")
    }

    /// C# with a custom contract interface `name` declared in `namespace`
    pub fn with_contract(namespace: &str, name: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            contract_re: Regex::new(&format!(
                r":[\t\r\n\s.\w]*{}",
                regex::escape(name)
            ))?,
            using_re: Regex::new(&format!(
                r"using[\t\r\n\s]*{}[\t\r\n\s]*;[\t\r\n\s]*",
                regex::escape(namespace)
            ))?,
            main_re: Regex::new(r"public[\t\r\n\s]*void[\t\r\n\s]*Main[\t\r\n\s]*[(][\t\r\n\s]*[)]")?,
        })
    }
}

impl Default for CSharpLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl Language for CSharpLanguage {
    fn name(&self) -> &str {
        "C#"
    }

    fn file_extension(&self) -> &str {
        ".cs"
    }

    fn comment_symbol(&self) -> &str {
        "// "
    }

    fn remove_example_references(&self, code: &str) -> String {
        let code = self.contract_re.replace_all(code, " ");
        let code = self.using_re.replace_all(&code, "");
        self.main_re
            .replace_all(&code, CSHARP_MAIN_PROTOTYPE)
            .into_owned()
    }
}

/// Rust sources.
///
/// Rewriting drops `#[example]` attributes and `use exampledoc...;` imports,
/// and normalizes entry signatures taking the console sink to
/// `fn name(out: &mut Console)`.
#[derive(Debug, Clone)]
pub struct RustLanguage {
    attribute_re: Regex,
    use_re: Regex,
    signature_re: Regex,
}

impl RustLanguage {
    /// Rust with the `exampledoc` registration attribute
    pub fn new() -> Self {
        Self {
            attribute_re: Regex::new(
                r#"#\[\s*(?:\w+\s*::\s*)*example\s*(?:\((?:"(?:[^"\\]|\\.)*"|[^"\]])*\))?\s*\]\s*"#,
            )
            .expect("attribute pattern is valid"),
            use_re: Regex::new(
                r"(?:\bpub(?:\s*\([^)]*\))?\s+)?\buse\s+exampledoc(?:_core)?\b[^;]*;\s*",
            )
            .expect("use pattern is valid"),
            signature_re: Regex::new(
                r"fn\s+(\w+)\s*\(\s*(\w+)\s*:\s*&\s*mut\s+(?:\w+\s*::\s*)*Console\s*\)",
            )
            .expect("signature pattern is valid"),
        }
    }
}

impl Default for RustLanguage {
    fn default() -> Self {
        Self::new()
    }
}

impl Language for RustLanguage {
    fn name(&self) -> &str {
        "Rust"
    }

    fn file_extension(&self) -> &str {
        ".rs"
    }

    fn comment_symbol(&self) -> &str {
        "// "
    }

    fn remove_example_references(&self, code: &str) -> String {
        let code = self.attribute_re.replace_all(code, "");
        let code = self.use_re.replace_all(&code, "");
        self.signature_re
            .replace_all(&code, "fn ${1}(${2}: &mut Console)")
            .into_owned()
    }
}
