//! Company Inspector CLI
//!
//! Reads an employee CSV and prints salary-band and reporting-depth findings.
//!
//! # Usage
//!
//! ```bash
//! # Text report
//! company-inspector data/company.csv
//!
//! # JSON report with a custom policy
//! company-inspector --format json --policy policy.yaml data/company.csv
//!
//! # Verbose logging (stderr)
//! RUST_LOG=company_inspector=debug company-inspector data/company.csv
//! ```

use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum};
use company_inspector::{
    AnalyzerPolicy, CsvEmployeeSource, HierarchyAnalyzer, Inspector, ReportFormat, RunOutcome,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "company-inspector")]
#[command(version)]
#[command(about = "Report managers paid outside their expected band and overly long reporting lines")]
struct Cli {
    /// Employee CSV file (Id,firstName,lastName,salary,managerId)
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    format: OutputFormat,

    /// YAML file overriding the salary ratios and depth threshold
    #[arg(long, env = "COMPANY_INSPECTOR_POLICY")]
    policy: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(file) = cli
        .file
        .filter(|f| !f.as_os_str().to_string_lossy().trim().is_empty())
    else {
        tracing::warn!("no employee file given");
        eprintln!("Please provide employee information csv");
        eprintln!("{}", Cli::command().render_usage());
        return Ok(());
    };

    let analyzer = match &cli.policy {
        Some(path) => {
            let policy = AnalyzerPolicy::from_file(path)
                .with_context(|| format!("Failed to load policy file: {}", path.display()))?;
            HierarchyAnalyzer::new(policy)
        }
        None => HierarchyAnalyzer::default(),
    };

    let inspector = Inspector::new(
        CsvEmployeeSource,
        analyzer,
        ReportFormat::from(cli.format).presenter(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match inspector.run(Some(file.as_path()), &mut out)? {
        RunOutcome::Completed {
            employees,
            findings,
        } => {
            tracing::debug!(employees, findings, "inspection finished");
        }
        RunOutcome::LoadFailed(err) => {
            tracing::debug!(code = err.code(), "inspection aborted");
        }
        RunOutcome::MissingInput => {}
    }

    Ok(())
}
