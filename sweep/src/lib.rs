//! Parameter sweeps over the `bsq` verifier.
//!
//! A sweep runs a list of parameter sets one after the other and collects a
//! [`SweepReport`]. A run that is rejected or does not converge is recorded
//! and the sweep moves on.
//!
//! # Entry Point
//!
//! ```no_run
//! use bsq_sweep::{run_sweep, SweepConfig};
//!
//! let report = run_sweep(&SweepConfig::builtin());
//! for result in &report.results {
//!     println!("{}: {}", result.name, result.message);
//! }
//! ```

#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs, clippy::missing_errors_doc)]

pub mod config;
pub mod report;
pub mod table;

pub use config::{Bound, ConfigError, RunConfig, SweepConfig, MAX_EXTRA_ROUNDS, MAX_SMOOTHNESS};
pub use report::{Outcome, RunResult, SweepReport};
pub use table::{latex_escape, render_latex_table, write_latex_table};

use bsq::{ProofDriver, TracingSink};

/// Verifies one parameter set with the sweep's schedule.
pub fn run_one(config: &SweepConfig, run: &RunConfig) -> RunResult {
    let span = tracing::info_span!("run", name = %run.name);
    let _guard = span.enter();

    let driver = ProofDriver::new(config.schedule());
    let driver = if config.verbose {
        driver.with_sink(&TracingSink)
    } else {
        driver
    };
    let outcome = driver.run(&run.parameters(), run.min_smoothness);
    let summary = format!(
        "M = {}, m = {}, min smoothness = {}, final state = {:?}",
        run.modes, run.low_mode_cutoff, run.min_smoothness, outcome.state
    );

    match outcome.result {
        Ok(certificate) => {
            tracing::info!(
                smoothness = certificate.smoothness(),
                rounds = certificate.rounds(),
                "run verified"
            );
            RunResult::verified(&run.name, certificate).with_detail(summary)
        }
        Err(error) => {
            tracing::warn!(error = %error, "run not verified");
            RunResult::not_verified(&run.name, &error).with_detail(summary)
        }
    }
}

/// Runs every parameter set of `config` in order.
pub fn run_sweep(config: &SweepConfig) -> SweepReport {
    let mut report = SweepReport::new();
    for run in &config.runs {
        report.push(run_one(config, run));
    }
    tracing::info!(
        runs = report.results.len(),
        verified = report.verified_count(),
        "sweep finished"
    );
    report
}
