//! CLI entry point for r19guard.
//!
//! This module is thin: it handles argument parsing, output, and exit codes.
//! All business logic lives in the `r19guard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use r19guard_app::{
    ApplyOutcome, CheckerConfig, DependencyCompatibilityChecker, ExplainOutput, build_envelope,
    decode_fixes, format_explanation, format_not_found, verdict_exit_code,
};
use r19guard_types::ReportEnvelope;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "r19guard",
    version,
    about = "Check an npm project's dependencies for React 19 incompatibilities"
)]
struct Cli {
    /// Project directory (containing package.json).
    #[arg(long, default_value = ".", global = true)]
    project_path: Utf8PathBuf,

    /// Emit debug diagnostics on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check React and dependency versions against the knowledge base.
    Check {
        /// Also write the JSON report envelope to this file.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Output format on stdout.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Apply the suggested fixes after checking.
        #[arg(long)]
        fix: bool,

        /// Print GitHub Actions annotations after the report.
        #[arg(long)]
        annotations: bool,
    },

    /// Apply the fixes from a saved JSON report.
    Apply {
        /// Path to a report written by `check --report-out`.
        #[arg(long)]
        report: Utf8PathBuf,
    },

    /// Show what the knowledge base knows about a package.
    Explain {
        /// npm package name (e.g. "antd").
        package: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let checker = DependencyCompatibilityChecker::new(CheckerConfig {
        verbose: cli.verbose,
        project_path: cli.project_path.clone(),
    });

    let result = match cli.cmd {
        Commands::Check {
            report_out,
            format,
            fix,
            annotations,
        } => cmd_check(&checker, report_out.as_deref(), format, fix, annotations),
        Commands::Apply { report } => cmd_apply(&checker, &report),
        Commands::Explain { package } => cmd_explain(&checker, &package),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("r19guard error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(
    checker: &DependencyCompatibilityChecker,
    report_out: Option<&Utf8Path>,
    format: Format,
    fix: bool,
    annotations: bool,
) -> anyhow::Result<i32> {
    let started_at = OffsetDateTime::now_utc();
    let report = checker.check()?;
    let finished_at = OffsetDateTime::now_utc();
    let envelope = build_envelope(
        checker.project_path().as_str(),
        report,
        started_at,
        finished_at,
    );

    if let Some(path) = report_out {
        write_report_file(path, &envelope).context("write report json")?;
    }

    match format {
        Format::Text => print!("{}", r19guard_render::render_text(&envelope.report)),
        Format::Json => print!("{}", serialize_envelope(&envelope)?),
        Format::Markdown => print!("{}", r19guard_render::render_markdown(&envelope.report)),
    }

    if annotations {
        for line in r19guard_render::render_github_annotations(&envelope.report) {
            println!("{line}");
        }
    }

    if fix {
        let outcome = checker.apply_fixes(&envelope.report.fixes)?;
        report_outcome(&outcome);
    }

    Ok(verdict_exit_code(&envelope.report))
}

fn cmd_apply(checker: &DependencyCompatibilityChecker, report_path: &Utf8Path) -> anyhow::Result<i32> {
    let text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let doc: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parse report: {report_path}"))?;
    let fixes = decode_fixes(&doc)?;
    tracing::debug!(fixes = fixes.len(), "decoded fixes");

    let outcome = checker.apply_fixes(&fixes)?;
    report_outcome(&outcome);
    Ok(0)
}

fn cmd_explain(checker: &DependencyCompatibilityChecker, package: &str) -> anyhow::Result<i32> {
    match checker.explain(package)? {
        ExplainOutput::Found(rule) => {
            print!("{}", format_explanation(&rule));
            Ok(0)
        }
        ExplainOutput::NotFound { package, known } => {
            eprint!("{}", format_not_found(&package, &known));
            Ok(1)
        }
    }
}

/// Status goes to stderr so `--format json` output stays parseable.
fn report_outcome(outcome: &ApplyOutcome) {
    if outcome.npmrc_updated {
        eprintln!("updated .npmrc");
    }
    if outcome.manifest_updated {
        eprintln!("updated package.json overrides");
    }
    if outcome.files_changed() == 0 {
        eprintln!("no file changes needed");
    }
    for command in &outcome.commands {
        eprintln!("run: {command}");
    }
}

fn serialize_envelope(envelope: &ReportEnvelope) -> anyhow::Result<String> {
    let mut data = serde_json::to_string_pretty(envelope).context("serialize report")?;
    data.push('\n');
    Ok(data)
}

fn write_report_file(path: &Utf8Path, envelope: &ReportEnvelope) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_envelope(envelope)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
