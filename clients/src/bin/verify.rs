//! `bsq-verify`: runs a sweep of existence proofs and reports the outcome.
//!
//! **Usage:**
//! ```text
//! bsq-verify [--config <file>] [--verbose] [--table <file>] [--json <file>] [--strict]
//! ```
//!
//! Without `--config` the built-in four-run study is used. Log output goes to
//! stderr and honours `RUST_LOG`. Exits non-zero on I/O or configuration
//! errors, and with `--strict` when some run is not verified.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use bsq_sweep::{run_sweep, write_latex_table, Outcome, SweepConfig, SweepReport};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verify periodic orbits with self-consistent bounds.
#[derive(Parser)]
#[command(
    name = "bsq-verify",
    about = "Rigorously verify periodic solutions over a sweep of parameter sets"
)]
struct Args {
    /// TOML sweep file (default: the built-in study).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-mode isolation diagnostics; raises the default log level to debug.
    #[arg(long)]
    verbose: bool,

    /// Write a LaTeX table of the verified runs to this file.
    #[arg(long)]
    table: Option<PathBuf>,

    /// Write the full report as JSON to this file.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Exit non-zero unless every run is verified.
    #[arg(long)]
    strict: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn print_report(report: &SweepReport) {
    println!("Self-consistent Bounds Report");
    println!("=============================");
    println!();

    for result in &report.results {
        let status = match result.outcome {
            Outcome::Verified => "PASS",
            Outcome::NotVerified => "FAIL",
        };
        println!("[{}] {} - {}", status, result.name, result.message);
        for detail in &result.details {
            println!("       {}", detail);
        }
    }

    println!();
    println!(
        "Summary: {} verified, {} not verified",
        report.verified_count(),
        report.failure_count()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::builtin(),
    };
    config.verbose |= args.verbose;

    let report = run_sweep(&config);
    print_report(&report);

    if let Some(path) = &args.table {
        write_latex_table(&report, path)?;
    }
    if let Some(path) = &args.json {
        let json = report.to_json().context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "json report written");
    }

    if args.strict && !report.all_verified() {
        eprintln!(
            "Verification FAILED: {} run(s) not verified.",
            report.failure_count()
        );
        process::exit(1);
    }
    Ok(())
}
