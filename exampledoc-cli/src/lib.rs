#![warn(missing_docs)]
//! exampledoc CLI Library
//!
//! This module provides the analyzer and the CLI infrastructure for example
//! binaries. Use `exampledoc::run()` (or `exampledoc_cli::run()`) in your
//! main function to run, list or clean your registered examples.
//!
//! # Example
//!
//! ```ignore
//! use exampledoc::prelude::*;
//!
//! #[example(name = "demos.code_examples.Greeting")]
//! fn greeting(out: &mut Console) {
//!     writeln!(out, "Hello");
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     exampledoc::run()
//! }
//! ```

mod analyzer;
mod config;
mod planner;

pub use analyzer::*;
pub use config::*;

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// exampledoc CLI arguments
#[derive(Parser, Debug)]
#[command(name = "exampledoc")]
#[command(
    author,
    version,
    about = "exampledoc - run code examples and publish their output next to their sources"
)]
pub struct Cli {
    /// Optional subcommand (Run, List, Clean, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter examples by regex pattern on their qualified names
    pub filter: Option<String>,

    /// Root directory of the example sources
    #[arg(long)]
    pub code_base: Option<PathBuf>,

    /// Namespace prefix of the examples stored under the code base
    #[arg(long)]
    pub namespace: Option<String>,

    /// Do not write the run report
    #[arg(short, long)]
    pub quiet: bool,

    /// Report format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Report file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail the run when an example has no source file
    #[arg(long)]
    pub strict: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run examples and write their artifacts (default)
    Run,
    /// List discovered examples and where their sources were found
    List,
    /// Remove the artifacts of discovered examples
    Clean,
    /// Write a default exampledoc.toml in the current directory
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}

/// Settings of one invocation: configuration file values overridden by flags
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Root directory of the example sources
    pub code_base: PathBuf,
    /// Namespace prefix, if any was given
    pub default_namespace: Option<String>,
    /// Regex on qualified names
    pub filter: Option<String>,
    /// Whether the run report is written
    pub report: bool,
    /// Report format
    pub format: ReportFormat,
    /// Whether a missing source fails the run
    pub require_source: bool,
}

impl RunSettings {
    /// Layer CLI flags over the configuration file
    pub fn resolve(cli: &Cli, config: &DocConfig) -> anyhow::Result<Self> {
        let code_base = cli
            .code_base
            .clone()
            .or_else(|| config.code_base())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No code base: pass --code-base or set analyzer.code_base in {}",
                    CONFIG_FILE_NAME
                )
            })?;

        let format: ReportFormat = cli
            .format
            .as_deref()
            .unwrap_or(&config.report.format)
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        Ok(Self {
            code_base,
            default_namespace: cli
                .namespace
                .clone()
                .or_else(|| config.analyzer.default_namespace.clone()),
            filter: cli.filter.clone().or_else(|| config.analyzer.filter.clone()),
            report: config.report.enabled && !cli.quiet,
            format,
            require_source: cli.strict || config.analyzer.require_source,
        })
    }

    /// Build the analyzer these settings describe
    pub fn analyzer(&self) -> anyhow::Result<Analyzer> {
        let mut analyzer = Analyzer::try_new(&self.code_base, self.default_namespace.clone())?;
        if let Some(pattern) = &self.filter {
            let re = Regex::new(pattern)
                .with_context(|| format!("Invalid filter pattern: {}", pattern))?;
            analyzer = analyzer.with_filter(re);
        }
        Ok(analyzer)
    }
}

/// Run the exampledoc CLI with the process arguments.
/// This is the main entry point for example binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
/// Exits the process with status 1 when an example fails.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the exampledoc CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if let Some(Commands::Init { force }) = cli.command {
        return init_config(force);
    }

    let config = match &cli.config {
        Some(path) => DocConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => DocConfig::discover().unwrap_or_default(),
    };
    let settings = RunSettings::resolve(&cli, &config)?;

    match cli.command {
        Some(Commands::List) => list_examples(&settings),
        Some(Commands::Clean) => clean_artifacts(&settings),
        Some(Commands::Run) | None => run_examples(&cli, &settings),
        Some(Commands::Init { .. }) => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "exampledoc=debug,exampledoc_cli=debug"
    } else {
        "exampledoc=info,exampledoc_cli=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed by the host binary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_examples(cli: &Cli, settings: &RunSettings) -> anyhow::Result<()> {
    let analyzer = settings.analyzer()?;

    let outcome = match (settings.format, &cli.output) {
        (ReportFormat::Human, None) => analyzer.run(settings.report)?,
        (ReportFormat::Human, Some(path)) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let outcome = analyzer.run_with_writer(&mut file, settings.report)?;
            if settings.report {
                println!("Report written to: {}", path.display());
            }
            outcome
        }
        (ReportFormat::Json, output) => {
            let outcome = analyzer.run_with_writer(&mut std::io::sink(), false)?;
            if settings.report {
                let json = generate_json_report(&build_report(&analyzer, &outcome))?;
                match output {
                    Some(path) => {
                        let mut file = std::fs::File::create(path)
                            .with_context(|| format!("Failed to create {}", path.display()))?;
                        file.write_all(json.as_bytes())?;
                        println!("Report written to: {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
            outcome
        }
    };

    let missing_source = settings.require_source && outcome.summary.without_source > 0;
    if !outcome.is_success() || missing_source {
        if !outcome.is_success() {
            eprintln!("\n{} example(s) failed", outcome.summary.failed);
        }
        if missing_source {
            eprintln!(
                "\n{} example(s) without source code",
                outcome.summary.without_source
            );
        }
        std::process::exit(1);
    }

    Ok(())
}

fn list_examples(settings: &RunSettings) -> anyhow::Result<()> {
    let analyzer = settings.analyzer()?;
    let examples = analyzer.discover_registered();

    println!("exampledoc Plan:");
    println!("├── namespace: {}", analyzer.default_namespace());
    for example in &examples {
        let def = example.def();
        let source = match (example.source_path(), example.language()) {
            (Some(path), Some(language)) => format!("{} [{}]", path.display(), language.name()),
            _ => "cannot be found".to_string(),
        };
        println!("│   ├── {} ({}:{})", example.name(), def.file, def.line);
        println!("│   │   └── source: {}", source);
    }
    println!("{} examples found.", examples.len());

    Ok(())
}

fn clean_artifacts(settings: &RunSettings) -> anyhow::Result<()> {
    let analyzer = settings.analyzer()?;

    let mut removed = 0;
    for example in analyzer.discover_registered() {
        let Some(source) = example.source_path() else {
            continue;
        };
        let path = artifact_path(source);
        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            println!("Removed {}", path.display());
            removed += 1;
        }
    }
    println!("{} artifact(s) removed.", removed);

    Ok(())
}

fn init_config(force: bool) -> anyhow::Result<()> {
    let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(&path, DocConfig::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("exampledoc").chain(args.iter().copied())).unwrap()
    }

    fn config_with(code_base: &str, namespace: &str) -> DocConfig {
        let mut config = DocConfig::default();
        config.analyzer.code_base = Some(code_base.to_string());
        config.analyzer.default_namespace = Some(namespace.to_string());
        config
    }

    #[test]
    fn test_cli_defaults_to_run() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(cli.filter.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_subcommands_and_flags() {
        let cli = parse(&["--namespace", "ns", "--quiet", "--format", "json", "list"]);
        assert!(matches!(cli.command, Some(Commands::List)));
        assert_eq!(cli.namespace.as_deref(), Some("ns"));
        assert!(cli.quiet);

        let cli = parse(&["init", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));

        let cli = parse(&["Advanced"]);
        assert_eq!(cli.filter.as_deref(), Some("Advanced"));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().to_string_lossy().to_string();
        let config = config_with(&base, "from.config");

        let settings = RunSettings::resolve(&parse(&[]), &config).unwrap();
        assert_eq!(settings.code_base, dir.path());
        assert_eq!(settings.default_namespace.as_deref(), Some("from.config"));
        assert_eq!(settings.format, ReportFormat::Human);
        assert!(settings.report);
        assert!(!settings.require_source);

        let cli = parse(&["--namespace", "from.cli", "--quiet", "--strict", "--format", "json"]);
        let settings = RunSettings::resolve(&cli, &config).unwrap();
        assert_eq!(settings.default_namespace.as_deref(), Some("from.cli"));
        assert_eq!(settings.format, ReportFormat::Json);
        assert!(!settings.report);
        assert!(settings.require_source);
    }

    #[test]
    fn test_missing_code_base_is_reported() {
        let err = RunSettings::resolve(&parse(&[]), &DocConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--code-base"));
    }

    #[test]
    fn test_unknown_format_is_reported() {
        let config = config_with(".", "ns");
        assert!(RunSettings::resolve(&parse(&["--format", "xml"]), &config).is_err());
    }

    #[test]
    fn test_analyzer_from_settings() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().to_string_lossy().to_string();

        let settings = RunSettings::resolve(&parse(&["Advanced"]), &config_with(&base, "ns")).unwrap();
        let analyzer = settings.analyzer().unwrap();
        assert_eq!(analyzer.default_namespace(), "ns");

        let settings = RunSettings::resolve(&parse(&["("]), &config_with(&base, "ns")).unwrap();
        assert!(settings.analyzer().is_err());

        let mut config = config_with(&base, "ns");
        config.analyzer.default_namespace = None;
        let settings = RunSettings::resolve(&parse(&[]), &config).unwrap();
        let err = settings.analyzer().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalyzerError>(),
            Some(AnalyzerError::MissingNamespace)
        ));
    }
}
