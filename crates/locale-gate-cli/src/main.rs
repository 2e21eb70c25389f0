// crates/locale-gate-cli/src/main.rs
// ============================================================================
// Module: Locale Gate CLI Entry Point
// Description: Command dispatcher for catalog checking, scanning, resolving.
// Purpose: Surface the consistency checker as a build/CI gate.
// Dependencies: clap, locale-gate-core, locale-gate-loader, serde_json, tokio
// ============================================================================

//! ## Overview
//! The Locale Gate CLI wraps the catalog loader and consistency checker for
//! use in CI pipelines and manual verification passes. `check` diffs key
//! sets across locale tables, `scan` hunts for foreign-script leakage in
//! source files, and `resolve` performs a one-off lookup against a loaded
//! catalog. Any reported issue or finding exits non-zero so pipelines can
//! gate on it.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use locale_gate_core::Catalog;
use locale_gate_core::Finding;
use locale_gate_core::KeyPath;
use locale_gate_core::LanguageTag;
use locale_gate_core::ParityIssue;
use locale_gate_core::ParityIssueKind;
use locale_gate_core::ResolutionRequest;
use locale_gate_core::latin_expected;
use locale_gate_core::resolve;
use locale_gate_core::scan_for_foreign_script;
use locale_gate_loader::CatalogLoader;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Localization catalog consistency gate.
#[derive(Debug, Parser)]
#[command(name = "locale-gate", version, about = "Locale catalog parity and leakage checks")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Check key-set parity of every locale table against the default.
    Check(CheckArgs),
    /// Scan source files for text outside the expected script ranges.
    Scan(ScanArgs),
    /// Resolve one key against a loaded catalog.
    Resolve(ResolveArgs),
}

/// Arguments for `check`.
#[derive(Debug, Args)]
struct CheckArgs {
    /// Directory holding one `<tag>.json` document per language.
    #[arg(long)]
    locales: PathBuf,
    /// Default (source-of-truth) language tag.
    #[arg(long, default_value = "en")]
    default_lang: String,
    /// Language to check; repeatable. All documents in the directory are
    /// checked when omitted.
    #[arg(long = "lang")]
    languages: Vec<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `scan`.
#[derive(Debug, Args)]
struct ScanArgs {
    /// Literal run to allow even though it is out of range; repeatable.
    #[arg(long = "allow")]
    allow: Vec<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Files to scan.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

/// Arguments for `resolve`.
#[derive(Debug, Args)]
struct ResolveArgs {
    /// Directory holding one `<tag>.json` document per language.
    #[arg(long)]
    locales: PathBuf,
    /// Default (source-of-truth) language tag.
    #[arg(long, default_value = "en")]
    default_lang: String,
    /// Language to resolve in.
    #[arg(long)]
    lang: String,
    /// Named substitution as `name=value`; repeatable.
    #[arg(long = "param")]
    params: Vec<String>,
    /// Literal fallback when the key exists in no table.
    #[arg(long)]
    fallback: Option<String>,
    /// Dotted key path to resolve.
    key: String,
}

/// Output rendering formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// JSON array of report entries.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Terminal CLI failure with a user-facing message.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct CliError {
    /// Message emitted to stderr.
    message: String,
}

impl CliError {
    /// Wraps a user-facing message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => emit_error(&err.message),
    }
}

/// Installs the stderr tracing subscriber honoring `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Dispatches the parsed command.
async fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check(args) => run_check(args).await,
        Command::Scan(args) => run_scan(&args),
        Command::Resolve(args) => run_resolve(args).await,
    }
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Loads the catalog and reports parity issues.
async fn run_check(args: CheckArgs) -> CliResult<ExitCode> {
    let catalog = load_catalog(&args.locales, &args.default_lang, &args.languages).await?;
    let issues = catalog.check_parity();
    match args.format {
        OutputFormat::Json => {
            let body = serde_json::to_string(&issues)
                .map_err(|err| CliError::new(format!("failed to render JSON output: {err}")))?;
            write_stdout_line(&body)?;
        }
        OutputFormat::Text => {
            for issue in &issues {
                write_stdout_line(&format_parity_line(issue))?;
            }
            if issues.is_empty() {
                write_stdout_line(&format!(
                    "Parity OK across {} languages.",
                    catalog.languages().len()
                ))?;
            } else {
                write_stdout_line(&format!("{} parity issues found.", issues.len()))?;
            }
        }
    }
    Ok(gate_exit(issues.is_empty()))
}

/// Formats one parity issue as a report line.
fn format_parity_line(issue: &ParityIssue) -> String {
    let kind = match issue.kind {
        ParityIssueKind::Missing => "missing",
        ParityIssueKind::Extra => "extra",
    };
    format!("{}: {kind} {}", issue.language, issue.key)
}

// ============================================================================
// SECTION: Scan Command
// ============================================================================

/// Scans the given files and reports out-of-range runs.
fn run_scan(args: &ScanArgs) -> CliResult<ExitCode> {
    let findings = scan_paths(&args.paths, &args.allow)?;
    match args.format {
        OutputFormat::Json => {
            let body = serde_json::to_string(&findings)
                .map_err(|err| CliError::new(format!("failed to render JSON output: {err}")))?;
            write_stdout_line(&body)?;
        }
        OutputFormat::Text => {
            for finding in &findings {
                write_stdout_line(&format_finding_line(finding))?;
            }
            if findings.is_empty() {
                write_stdout_line(&format!("No foreign-script text in {} files.", args.paths.len()))?;
            } else {
                write_stdout_line(&format!("{} findings.", findings.len()))?;
            }
        }
    }
    Ok(gate_exit(findings.is_empty()))
}

/// Reads and scans each path against the Latin expected set.
fn scan_paths(paths: &[PathBuf], allow: &[String]) -> CliResult<Vec<Finding>> {
    let expected = latin_expected();
    let allowlist: Vec<&str> = allow.iter().map(String::as_str).collect();
    let mut findings = Vec::new();
    for path in paths {
        let text = std::fs::read_to_string(path)
            .map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
        let source = path.display().to_string();
        findings.extend(scan_for_foreign_script(&source, &text, &expected, &allowlist));
    }
    Ok(findings)
}

/// Formats one finding as a `file:line:column` report line.
fn format_finding_line(finding: &Finding) -> String {
    format!("{}:{}:{}: {}", finding.source, finding.line, finding.column, finding.text)
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Loads the catalog and resolves a single key.
async fn run_resolve(args: ResolveArgs) -> CliResult<ExitCode> {
    let catalog = load_catalog(&args.locales, &args.default_lang, &[]).await?;
    let lang = parse_tag(&args.lang)?;
    let key = KeyPath::parse(&args.key)
        .map_err(|err| CliError::new(format!("invalid key path '{}': {err}", args.key)))?;
    let params = parse_params(&args.params)?;
    let borrowed: Vec<(&str, &str)> =
        params.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect();
    let request = ResolutionRequest {
        key: &key,
        params: &borrowed,
        literal_fallback: args.fallback.as_deref(),
    };
    let resolution = resolve(&catalog, &lang, &request);
    write_stdout_line(&resolution.text)?;
    Ok(ExitCode::SUCCESS)
}

/// Parses repeated `name=value` arguments.
fn parse_params(raw: &[String]) -> CliResult<Vec<(String, String)>> {
    raw.iter()
        .map(|entry| {
            entry.split_once('=').map(|(name, value)| (name.to_string(), value.to_string())).ok_or_else(
                || CliError::new(format!("invalid --param '{entry}': expected name=value")),
            )
        })
        .collect()
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Loads a catalog from a locales directory.
///
/// Languages are discovered from the directory when `languages` is empty.
async fn load_catalog(
    locales: &Path,
    default_lang: &str,
    languages: &[String],
) -> CliResult<Catalog> {
    let default_language = parse_tag(default_lang)?;
    let loader = CatalogLoader::new(locales, default_language);
    let loaded = if languages.is_empty() {
        loader.load_discovered().await
    } else {
        let tags = languages.iter().map(|raw| parse_tag(raw)).collect::<CliResult<Vec<_>>>()?;
        loader.load(&tags).await
    };
    loaded.map_err(|err| CliError::new(format!("failed to load catalog: {err}")))
}

/// Parses one language tag argument.
fn parse_tag(raw: &str) -> CliResult<LanguageTag> {
    LanguageTag::parse(raw)
        .map_err(|err| CliError::new(format!("invalid language tag '{raw}': {err}")))
}

/// Maps a gate outcome to an exit code: clean passes, anything found fails.
fn gate_exit(clean: bool) -> ExitCode {
    if clean { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
