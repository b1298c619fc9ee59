//! Sweep configuration: which parameter sets to verify, read from TOML.
//!
//! ```toml
//! verbose = false
//! extra_rounds = 5
//! initial_smoothness = 4
//!
//! [[run]]
//! name = "beta1-forcingA"
//! beta = 1.5                # a number, or [lo, hi]
//! sigma = 3.0
//! eps = [-0.01, 0.01]       # or 0.01, read as [-0.01, 0.01]
//! forcing = [1.0]
//! modes = 22
//! min_smoothness = 10
//! low_mode_cutoff = 0       # optional
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use bsq::arith::{Interval, Rigorous};
use bsq::{Parameters, Schedule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration that parsed but cannot be run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The file names no runs.
    #[error("sweep configuration contains no [[run]] entries")]
    NoRuns,
    /// A run has an empty name.
    #[error("run #{index} has an empty name")]
    EmptyName {
        /// Zero-based position in the file.
        index: usize,
    },
    /// Two runs share a name.
    #[error("run name `{0}` is used more than once")]
    DuplicateName(String),
    /// An interval endpoint is NaN or infinite.
    #[error("run `{run}`: {field} has a non-finite endpoint")]
    NonFinite {
        /// Run name.
        run: String,
        /// Offending field.
        field: &'static str,
    },
    /// `eps` is a range that is not symmetric about zero.
    #[error("run `{run}`: eps = [{lo}, {hi}] must be symmetric about zero")]
    AsymmetricEps {
        /// Run name.
        run: String,
        /// Lower endpoint as given.
        lo: f64,
        /// Upper endpoint as given.
        hi: f64,
    },
    /// A smoothness or round count outside the supported range.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Offending field.
        field: String,
        /// Value as given.
        value: usize,
        /// Smallest accepted value.
        min: usize,
        /// Largest accepted value.
        max: usize,
    },
}

/// Largest tail exponent a sweep may start from or require.
pub const MAX_SMOOTHNESS: u32 = 64;

/// Largest number of rounds a sweep may add beyond the minimum.
pub const MAX_EXTRA_ROUNDS: usize = 64;

/// A real parameter: a single number or interval endpoints `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    /// The degenerate interval `[x, x]`.
    Point(f64),
    /// The interval spanned by the two endpoints.
    Range([f64; 2]),
}

impl Bound {
    /// The enclosing interval.
    pub fn to_interval(self) -> Interval {
        match self {
            Self::Point(x) => Interval::point(x),
            Self::Range([a, b]) => Interval::hull(a, b),
        }
    }

    /// `[-|x|, |x|]` for a point; ranges are kept as given, so
    /// [`SweepConfig::validate`] rejects a lopsided `eps` range.
    pub fn symmetric(self) -> Self {
        match self {
            Self::Point(x) => Self::Range([-x.abs(), x.abs()]),
            range => range,
        }
    }

    fn is_finite(self) -> bool {
        match self {
            Self::Point(x) => x.is_finite(),
            Self::Range([a, b]) => a.is_finite() && b.is_finite(),
        }
    }
}

/// One parameter set of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Label used in reports and table headers.
    pub name: String,
    /// Dissipation `beta`.
    pub beta: Bound,
    /// Nonlinearity weight `sigma`.
    pub sigma: Bound,
    /// Forcing amplitude `eps`; a single number `e` means `[-e, e]`.
    pub eps: Bound,
    /// Forcing profile `f(1), f(2), ...`.
    pub forcing: Vec<f64>,
    /// Truncation order `M`.
    pub modes: usize,
    /// Required tail exponent.
    pub min_smoothness: u32,
    /// Modes `1..=m` kept at their initial guess.
    #[serde(default)]
    pub low_mode_cutoff: usize,
}

impl RunConfig {
    /// The interval parameters for the verifier.
    pub fn parameters(&self) -> Parameters {
        Parameters::new(
            self.beta.to_interval(),
            self.sigma.to_interval(),
            self.eps.symmetric().to_interval(),
            self.forcing.iter().copied().map(Interval::point).collect(),
            self.modes,
        )
        .with_low_mode_cutoff(self.low_mode_cutoff)
    }
}

fn default_extra_rounds() -> usize {
    Schedule::default().extra_rounds
}

fn default_initial_smoothness() -> u32 {
    Schedule::default().initial_smoothness
}

/// A whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Per-mode isolation diagnostics at debug level.
    #[serde(default)]
    pub verbose: bool,
    /// Refinement rounds allowed beyond the minimum.
    #[serde(default = "default_extra_rounds")]
    pub extra_rounds: usize,
    /// Tail exponent of the initial guess.
    #[serde(default = "default_initial_smoothness")]
    pub initial_smoothness: u32,
    /// Parameter sets, in execution order.
    #[serde(rename = "run", default)]
    pub runs: Vec<RunConfig>,
}

impl SweepConfig {
    /// Reads and validates a TOML sweep file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid TOML for this schema,
    /// or does not pass [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sweep config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("invalid sweep config {}", path.display()))?;
        tracing::debug!(path = %path.display(), runs = config.runs.len(), "sweep config loaded");
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Fails on TOML or schema errors and on [`ConfigError`]s.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("failed to parse sweep TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// The four runs of the reference study: `sigma = 3`, forcing profiles
    /// `[1]` and `[1, 1, 1, 1]`, for `beta = 1.5` (`eps = ±0.01`, `M = 22`,
    /// `s ≥ 10`) and `beta = 1.75` (`eps = ±0.3`, `M = 19`, `s ≥ 6`).
    pub fn builtin() -> Self {
        let forcing_a = vec![1.0];
        let forcing_b = vec![1.0; 4];
        let mut runs = Vec::with_capacity(4);
        for (tag, beta, eps, modes, min_smoothness) in
            [("beta1", 1.5, 0.01, 22, 10), ("beta2", 1.75, 0.3, 19, 6)]
        {
            for (profile, forcing) in [("A", &forcing_a), ("B", &forcing_b)] {
                runs.push(RunConfig {
                    name: format!("{tag}-forcing{profile}"),
                    beta: Bound::Point(beta),
                    sigma: Bound::Point(3.0),
                    eps: Bound::Range([-eps, eps]),
                    forcing: forcing.clone(),
                    modes,
                    min_smoothness,
                    low_mode_cutoff: 0,
                });
            }
        }
        Self {
            verbose: false,
            extra_rounds: default_extra_rounds(),
            initial_smoothness: default_initial_smoothness(),
            runs,
        }
    }

    /// Structural checks that do not need the verifier.
    ///
    /// Mathematical assumptions (`beta·(m+1)² > 1`, forcing length) are left
    /// to the verifier, which reports them per run. `eps` must be symmetric
    /// and smoothness values must lie in `3..=MAX_SMOOTHNESS`.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs.is_empty() {
            return Err(ConfigError::NoRuns);
        }
        check_range(
            "initial_smoothness",
            self.initial_smoothness as usize,
            3,
            MAX_SMOOTHNESS as usize,
        )?;
        check_range("extra_rounds", self.extra_rounds, 0, MAX_EXTRA_ROUNDS)?;
        let mut seen = HashSet::new();
        for (index, run) in self.runs.iter().enumerate() {
            if run.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            if !seen.insert(run.name.as_str()) {
                return Err(ConfigError::DuplicateName(run.name.clone()));
            }
            for (field, bound) in [("beta", run.beta), ("sigma", run.sigma), ("eps", run.eps)] {
                if !bound.is_finite() {
                    return Err(ConfigError::NonFinite {
                        run: run.name.clone(),
                        field,
                    });
                }
            }
            if run.forcing.iter().any(|f| !f.is_finite()) {
                return Err(ConfigError::NonFinite {
                    run: run.name.clone(),
                    field: "forcing",
                });
            }
            if let Bound::Range([lo, hi]) = run.eps.symmetric() {
                if lo != -hi {
                    return Err(ConfigError::AsymmetricEps {
                        run: run.name.clone(),
                        lo,
                        hi,
                    });
                }
            }
            check_range(
                &format!("run `{}`: min_smoothness", run.name),
                run.min_smoothness as usize,
                0,
                MAX_SMOOTHNESS as usize,
            )?;
        }
        Ok(())
    }

    /// The verifier's round budget.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            initial_smoothness: self.initial_smoothness,
            extra_rounds: self.extra_rounds,
        }
    }
}

fn check_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}
