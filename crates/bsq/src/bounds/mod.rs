//! Self-consistent bounds on Fourier coefficients.
//!
//! A [`BoundState`] holds, for a truncation order `M`, symmetric enclosures
//! `ulr(1..=2M)` of the coefficients of a candidate periodic solution and a
//! tail law `C / k^s` covering every mode `k > M`. Magnitudes are
//! `2·|ulr(k)|`; entries `M+1..=2M` are always the tail law itself and are
//! re-derived whenever `(C, s)` change.
//!
//! ```text
//! index   1 ........ m | m+1 ........ M | M+1 ........ 2M | 2M+1 ...
//!         fixed guess  | refined, checked | tail law (stored) | tail law (analytic)
//! ```
//!
//! The query operations (convolution sums, tail interaction bounds, the
//! nonlinearity constants `D1`, `D2`, `D`) live in `queries`; rigorous norm
//! bounds of the represented function live in `norms`. Refinement and the
//! isolation predicates are in [`crate::refine`].

mod norms;
mod params;
mod queries;

pub use params::Parameters;

use crate::arith::{Interval, Rigorous};
use crate::error::BoundsError;

/// Initial enclosure magnitudes of modes `1..=10`, in units of `|eps|`.
pub const INITIAL_GUESS: [f64; 10] = [
    1.0, 0.5, 0.25, 0.12, 0.06, 0.03, 0.015, 0.008, 0.004, 0.002,
];

/// The self-consistent bound record of one verification attempt.
#[derive(Debug, Clone)]
pub struct BoundState<R: Rigorous = Interval> {
    m: usize,
    modes: usize,
    c: f64,
    s: u32,
    /// Index 0 is unused and held at zero.
    ulr: Vec<R>,
    beta: R,
    sigma: R,
    eps: R,
    /// Zero-padded to length `M + 1`; index 0 unused.
    forcing: Vec<R>,
    verbose: bool,
}

impl<R: Rigorous> BoundState<R> {
    /// Builds the initial state for `params` with tail exponent `s_init`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::ParameterDomain`] if `M = 0`, `m ≥ M`, `s_init < 3`,
    /// the forcing profile is longer than `M`, `eps` is not symmetric about
    /// zero, or `beta·(m+1)² > 1` cannot be established rigorously.
    pub fn new(params: &Parameters<R>, s_init: u32, verbose: bool) -> Result<Self, BoundsError> {
        let modes = params.modes;
        let m = params.low_mode_cutoff;
        if modes == 0 {
            return Err(BoundsError::parameter("truncation order M must be at least 1"));
        }
        if m >= modes {
            return Err(BoundsError::parameter(format!(
                "low-mode cutoff m = {m} must be below the truncation order M = {modes}"
            )));
        }
        if s_init < 3 {
            return Err(BoundsError::parameter(format!(
                "initial smoothness s = {s_init} must be at least 3"
            )));
        }
        if params.forcing.len() > modes {
            return Err(BoundsError::parameter(format!(
                "forcing profile has {} modes, more than the truncation order M = {modes}",
                params.forcing.len()
            )));
        }
        // Enclosures stay symmetric only if the forcing term is.
        if params.eps.left() != -params.eps.right() {
            return Err(BoundsError::parameter(format!(
                "forcing amplitude eps = {:?} must be symmetric about zero",
                params.eps
            )));
        }
        let contraction = params.beta * R::from_index(m + 1).powi(2) - R::one();
        if !(contraction.left() > 0.0) {
            return Err(BoundsError::parameter(format!(
                "beta·(m+1)² > 1 fails for beta = {:?}, m = {m}",
                params.beta
            )));
        }

        let mut forcing = vec![R::zero(); modes + 1];
        forcing[1..=params.forcing.len()].copy_from_slice(&params.forcing);

        // Two-phase construction: the guessed prefix, then the tail law.
        let scale = R::point(params.eps.abs().right());
        let prefix = INITIAL_GUESS.len().min(modes);
        let mut ulr = vec![R::zero(); 2 * modes + 1];
        for (k, g) in INITIAL_GUESS.iter().take(prefix).enumerate() {
            ulr[k + 1] = (R::point(*g) * scale).symmetric();
        }
        let c = (R::point(INITIAL_GUESS[INITIAL_GUESS.len() - 1])
            * scale
            * R::from_index(INITIAL_GUESS.len() + 1).powi(s_init))
        .right();

        let mut state = Self {
            m,
            modes,
            c,
            s: s_init,
            ulr,
            beta: params.beta,
            sigma: params.sigma,
            eps: params.eps,
            forcing,
            verbose,
        };
        state.fill_tail(prefix + 1);
        Ok(state)
    }

    /// Overwrites `ulr(from..=2M)` with the current tail law.
    pub(crate) fn fill_tail(&mut self, from: usize) {
        for k in from..=2 * self.modes {
            self.ulr[k] = self.tail_law(k);
        }
    }

    /// `[-1, 1] · C / k^s`.
    pub fn tail_law(&self, k: usize) -> R {
        (R::point(self.c) / R::from_index(k).powi(self.s)).symmetric()
    }

    /// Low-mode cutoff `m`.
    #[inline]
    pub fn low_mode_cutoff(&self) -> usize {
        self.m
    }

    /// Truncation order `M`.
    #[inline]
    pub fn modes(&self) -> usize {
        self.modes
    }

    /// Tail-law exponent `s`.
    #[inline]
    pub fn smoothness(&self) -> u32 {
        self.s
    }

    /// Tail-law constant `C`.
    #[inline]
    pub fn tail_constant(&self) -> f64 {
        self.c
    }

    /// Enclosure `ulr(k)` for `1 ≤ k ≤ 2M`.
    pub fn enclosure(&self, k: usize) -> Option<R> {
        if (1..=2 * self.modes).contains(&k) {
            Some(self.ulr[k])
        } else {
            None
        }
    }

    /// All enclosures `ulr(1..=2M)`.
    pub fn enclosures(&self) -> &[R] {
        &self.ulr[1..]
    }

    /// Forcing coefficient `f(k)`, zero beyond the profile's support.
    pub fn forcing(&self, k: usize) -> R {
        self.forcing.get(k).copied().unwrap_or_else(R::zero)
    }

    /// Dissipation parameter `beta`.
    #[inline]
    pub fn beta(&self) -> R {
        self.beta
    }

    /// Nonlinearity weight `sigma`.
    #[inline]
    pub fn sigma(&self) -> R {
        self.sigma
    }

    /// Forcing amplitude `eps`.
    #[inline]
    pub fn eps(&self) -> R {
        self.eps
    }

    /// Whether isolation diagnostics are routed to the trace sink.
    #[inline]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub(crate) fn set_tail_law(&mut self, c: f64, s: u32) {
        self.c = c;
        self.s = s;
        self.fill_tail(self.modes + 1);
    }

    pub(crate) fn set_enclosure(&mut self, k: usize, value: R) {
        self.ulr[k] = value;
    }

    /// `|ulr(k)|`, the caller guarantees `k ≤ 2M`.
    #[inline]
    fn mag(&self, k: usize) -> R {
        self.ulr[k].abs()
    }

    fn check_index(&self, k: usize) -> Result<(), BoundsError> {
        if k > 2 * self.modes {
            return Err(BoundsError::OutOfRange {
                k,
                min: 1,
                max: 2 * self.modes,
            });
        }
        Ok(())
    }
}
