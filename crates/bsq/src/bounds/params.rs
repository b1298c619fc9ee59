use crate::arith::{Interval, Rigorous};

/// Caller-supplied parameters of one verification attempt.
///
/// # Example
///
/// ```
/// use bsq::arith::{Interval, Rigorous};
/// use bsq::bounds::Parameters;
///
/// let p = Parameters::new(
///     Interval::point(1.5),
///     Interval::point(3.0),
///     Interval::new(-0.05, 0.05),
///     vec![Interval::point(1.0)],
///     6,
/// );
/// assert_eq!(p.low_mode_cutoff, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Parameters<R: Rigorous = Interval> {
    /// Dissipation coefficient `beta`.
    pub beta: R,
    /// Nonlinearity weight `sigma`.
    pub sigma: R,
    /// Forcing amplitude `eps`; must be symmetric about zero.
    pub eps: R,
    /// Forcing profile `f(1), f(2), ...`; at most `modes` entries.
    pub forcing: Vec<R>,
    /// Truncation order `M`.
    pub modes: usize,
    /// Low-mode cutoff `m`: modes `1..=m` are neither refined nor checked.
    pub low_mode_cutoff: usize,
}

impl<R: Rigorous> Parameters<R> {
    /// Parameters with low-mode cutoff `m = 0`.
    pub fn new(beta: R, sigma: R, eps: R, forcing: Vec<R>, modes: usize) -> Self {
        Self {
            beta,
            sigma,
            eps,
            forcing,
            modes,
            low_mode_cutoff: 0,
        }
    }

    /// Sets the low-mode cutoff `m`.
    pub fn with_low_mode_cutoff(mut self, m: usize) -> Self {
        self.low_mode_cutoff = m;
        self
    }
}
