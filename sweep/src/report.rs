//! Sweep report types: per-run results and aggregation.

use bsq::{BoundsError, ExistenceCertificate};
use serde::Serialize;

/// Whether a run produced a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Isolation held; a certificate is attached.
    Verified,
    /// Rejected parameters, or the round budget ran out.
    NotVerified,
}

/// The result of one parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Run name from the configuration.
    pub name: String,
    /// Verified or not.
    pub outcome: Outcome,
    /// One-line summary.
    pub message: String,
    /// Additional detail lines.
    pub details: Vec<String>,
    /// Present iff `outcome` is [`Outcome::Verified`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<ExistenceCertificate>,
}

impl RunResult {
    /// A verified run.
    pub fn verified(name: impl Into<String>, certificate: ExistenceCertificate) -> Self {
        let message = format!(
            "verified with s = {} after {} rounds",
            certificate.smoothness(),
            certificate.rounds()
        );
        let details = vec![
            format!("tail constant C = {:e}", certificate.tail_constant()),
            format!(
                "|u|_C0 <= {:e}, |u|_L2 <= {:e}",
                certificate.norms().c0,
                certificate.norms().l2
            ),
        ];
        Self {
            name: name.into(),
            outcome: Outcome::Verified,
            message,
            details,
            certificate: Some(certificate),
        }
    }

    /// A run that ended without a certificate.
    pub fn not_verified(name: impl Into<String>, error: &BoundsError) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::NotVerified,
            message: error.to_string(),
            details: vec![format!("kind: {}", error.kind())],
            certificate: None,
        }
    }

    /// Adds a detail line.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    /// Returns true if this run produced a certificate.
    pub fn is_verified(&self) -> bool {
        self.outcome == Outcome::Verified
    }
}

/// Aggregated results of a sweep, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// One entry per configured run.
    pub results: Vec<RunResult>,
}

impl SweepReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result.
    pub fn push(&mut self, result: RunResult) {
        self.results.push(result);
    }

    /// Looks up a run by name.
    pub fn get(&self, name: &str) -> Option<&RunResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Verified runs, in order.
    pub fn verified(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(|r| r.is_verified())
    }

    /// Number of runs with a certificate.
    pub fn verified_count(&self) -> usize {
        self.verified().count()
    }

    /// Number of runs without one.
    pub fn failure_count(&self) -> usize {
        self.results.len() - self.verified_count()
    }

    /// Returns true if every run verified.
    pub fn all_verified(&self) -> bool {
        self.failure_count() == 0
    }

    /// Pretty-printed JSON of the whole report.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in JSON (a non-finite
    /// bound is written as `null`, so in practice never).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
