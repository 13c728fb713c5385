//! Configuration loading from exampledoc.toml
//!
//! exampledoc configuration can be specified in an `exampledoc.toml` file in
//! the project root. The configuration is automatically discovered by
//! walking up from the current directory. Relative paths in the file are
//! resolved against the directory holding it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "exampledoc.toml";

/// exampledoc configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocConfig {
    /// Analyzer configuration
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,
    /// Directory the configuration was loaded from
    #[serde(skip)]
    pub root: Option<PathBuf>,
}

/// Analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyzerConfig {
    /// Root directory of the example sources
    #[serde(default)]
    pub code_base: Option<String>,
    /// Namespace prefix of the examples stored under `code_base`
    #[serde(default)]
    pub default_namespace: Option<String>,
    /// Regex restricting the examples by qualified name
    #[serde(default)]
    pub filter: Option<String>,
    /// Treat examples without a source file as a failed run
    #[serde(default)]
    pub require_source: bool,
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Write the run report
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Report format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            format: default_format(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_format() -> String {
    "human".to_string()
}

/// Run report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Per-example lines and summary block
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(ReportFormat::Human),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

impl DocConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.root = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(dir)
    }

    /// Try to discover and load configuration by walking up from `dir`
    pub fn discover_from(dir: impl Into<PathBuf>) -> Option<Self> {
        let mut dir = dir.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid configuration");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Resolve a path from the configuration against its directory
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }

    /// Configured code base, resolved against the configuration directory
    pub fn code_base(&self) -> Option<PathBuf> {
        self.analyzer
            .code_base
            .as_deref()
            .map(|p| self.resolve_path(p))
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# exampledoc Configuration

[analyzer]
# Root directory of the example sources, relative to this file.
# Subdirectories mirror the namespaces nested below default_namespace.
code_base = "src/code_examples"

# Namespace prefix of the examples stored directly under code_base
default_namespace = "code_examples"

# Only run examples whose qualified name matches (uncomment to enable)
# filter = "Advanced"

# Fail the run when an example has no source file
require_source = false

[report]
# Write the run report
enabled = true

# Report format: human or json
format = "human"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DocConfig::default();
        assert!(config.analyzer.code_base.is_none());
        assert!(config.analyzer.default_namespace.is_none());
        assert!(!config.analyzer.require_source);
        assert!(config.report.enabled);
        assert_eq!(config.report.format, "human");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [analyzer]
            code_base = "docs/examples"
            default_namespace = "demos.code_examples"

            [report]
            enabled = false
        "#;

        let config: DocConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analyzer.code_base.as_deref(), Some("docs/examples"));
        assert_eq!(
            config.analyzer.default_namespace.as_deref(),
            Some("demos.code_examples")
        );
        assert!(!config.report.enabled);
        assert_eq!(config.report.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: DocConfig = toml::from_str(&DocConfig::default_toml()).unwrap();
        assert_eq!(config.analyzer.code_base.as_deref(), Some("src/code_examples"));
        assert_eq!(
            config.analyzer.default_namespace.as_deref(),
            Some("code_examples")
        );
        assert!(config.analyzer.filter.is_none());
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("Human".parse::<ReportFormat>(), Ok(ReportFormat::Human));
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_discover_walks_up_and_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analyzer]\ncode_base = \"examples_src\"\ndefault_namespace = \"ns\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = DocConfig::discover_from(&nested).unwrap();
        assert_eq!(config.root.as_deref(), Some(dir.path()));
        assert_eq!(config.code_base(), Some(dir.path().join("examples_src")));
    }

    #[test]
    fn test_invalid_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[analyzer\n").unwrap();
        assert!(DocConfig::discover_from(dir.path()).is_none());
    }
}
