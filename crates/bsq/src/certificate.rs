//! Existence certificates: the extracted result of a verified run.
//!
//! An [`ExistenceCertificate`] bundles what a successful isolation test
//! establishes about the periodic solution:
//!
//! - **Coefficient bounds**: right endpoints of `ulr(1..=M)`
//! - **Tail constant**: `C`, with `|coefficient(k)| ≤ 2C/k^s` for `k > M`
//! - **Smoothness**: the tail exponent `s` reached
//! - **Norm bounds**: sup and L2 norms of the solution and its derivative
//!
//! The flat sequence [`bounds`](ExistenceCertificate::bounds) has `M + 1`
//! entries: the `M` coefficient bounds followed by `C`. This is the row
//! layout the table export consumes.
//!
//! # Examples
//!
//! ```
//! use bsq::arith::{Interval, Rigorous};
//! use bsq::{verify_existence, Parameters};
//!
//! let params = Parameters::new(
//!     Interval::point(1.5),
//!     Interval::point(3.0),
//!     Interval::new(-0.05, 0.05),
//!     vec![Interval::point(1.0)],
//!     6,
//! );
//! let cert = verify_existence(&params, 6, false).expect("scenario verifies");
//! assert_eq!(cert.bounds().len(), 7);
//! assert!(cert.smoothness() >= 6);
//! ```

use crate::arith::Rigorous;
use crate::bounds::BoundState;

/// Upper bounds on norms of the certified solution `u` over one period.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormBounds {
    /// `sup |u|`.
    pub c0: f64,
    /// `‖u‖_L2`.
    pub l2: f64,
    /// `sup |u'|`.
    pub c0_derivative: f64,
    /// `‖u'‖_L2`.
    pub l2_derivative: f64,
}

/// The certificate produced by a verified run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExistenceCertificate {
    modes: usize,
    low_mode_cutoff: usize,
    smoothness: u32,
    rounds: usize,
    bounds: Vec<f64>,
    norms: NormBounds,
}

impl ExistenceCertificate {
    /// Reads the certificate off a state whose isolation test succeeded after
    /// `rounds` refinements.
    pub(crate) fn extract<R: Rigorous>(state: &BoundState<R>, rounds: usize) -> Self {
        let modes = state.modes();
        let mut bounds: Vec<f64> = state.enclosures()[..modes]
            .iter()
            .map(Rigorous::right)
            .collect();
        bounds.push(state.tail_constant());
        Self {
            modes,
            low_mode_cutoff: state.low_mode_cutoff(),
            smoothness: state.smoothness(),
            rounds,
            bounds,
            norms: NormBounds {
                c0: state.c0_norm(),
                l2: state.l2_norm(),
                c0_derivative: state.c0_der_norm(),
                l2_derivative: state.l2_der_norm(),
            },
        }
    }

    /// Truncation order `M`.
    #[inline]
    pub fn modes(&self) -> usize {
        self.modes
    }

    /// Low-mode cutoff `m` the run used.
    #[inline]
    pub fn low_mode_cutoff(&self) -> usize {
        self.low_mode_cutoff
    }

    /// Tail exponent `s` reached.
    #[inline]
    pub fn smoothness(&self) -> u32 {
        self.smoothness
    }

    /// Number of refinements before the isolation test held.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// `M + 1` upper bounds: coefficients `1..=M`, then `C`.
    #[inline]
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// The `M` coefficient bounds.
    #[inline]
    pub fn coefficient_bounds(&self) -> &[f64] {
        &self.bounds[..self.modes]
    }

    /// Bound on coefficient `k`, `1 ≤ k ≤ M`.
    pub fn coefficient_bound(&self, k: usize) -> Option<f64> {
        if k == 0 {
            return None;
        }
        self.coefficient_bounds().get(k - 1).copied()
    }

    /// Tail constant `C`.
    #[inline]
    pub fn tail_constant(&self) -> f64 {
        self.bounds[self.modes]
    }

    /// Norm bounds of the solution.
    #[inline]
    pub fn norms(&self) -> &NormBounds {
        &self.norms
    }

    /// Consumes the certificate, returning the `M + 1` bounds.
    pub fn into_bounds(self) -> Vec<f64> {
        self.bounds
    }

    /// Structural sanity: `M + 1` finite, non-negative bounds and finite
    /// norms.
    pub fn well_formed(&self) -> bool {
        self.bounds.len() == self.modes + 1
            && self.bounds.iter().all(|b| b.is_finite() && *b >= 0.0)
            && [
                self.norms.c0,
                self.norms.l2,
                self.norms.c0_derivative,
                self.norms.l2_derivative,
            ]
            .iter()
            .all(|n| n.is_finite())
    }
}
