//! The fixed-point map and its isolation tests.
//!
//! For `1 ≤ k ≤ M` the map sends the current enclosures to
//!
//! ```text
//! T(k) = (sigma·G(k) − eps·f(k)/k²) / (2·(beta·k² − 1)),   G(k) = 2·IS(k) + FS(k)
//! ```
//!
//! and for `k > M` it sends the tail law `C/k^s` to `C'/k^(s+1)` with
//!
//! ```text
//! C' = sigma·D / (2·(beta − (M+1)^-2))
//! ```
//!
//! A state is self-consistent when every `T(k)`, `k = m+1..=M`, lies in the
//! strict interior of `ulr(k)` and `C > C'/(M+1)`.

use crate::arith::Rigorous;
use crate::bounds::BoundState;
use crate::error::BoundsError;
use crate::trace::TraceSink;

impl<R: Rigorous> BoundState<R> {
    /// The fixed-point map at mode `k`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::OutOfRange`] unless `1 ≤ k ≤ M`.
    pub fn map_value(&self, k: usize) -> Result<R, BoundsError> {
        if k == 0 || k > self.modes() {
            return Err(BoundsError::OutOfRange {
                k,
                min: 1,
                max: self.modes(),
            });
        }
        let g = R::point(2.0) * self.is_bound(k)? + self.fs(k)?;
        let k2 = R::from_index(k).powi(2);
        let numerator = self.sigma() * g - self.eps() * self.forcing(k) / k2;
        let denominator = R::point(2.0) * (self.beta() * k2 - R::one());
        Ok(numerator / denominator)
    }

    /// `sigma·D / (2·(beta − (M+1)^-2))`, the tail constant the map produces.
    pub fn tail_threshold(&self) -> Result<R, BoundsError> {
        let first_tail = R::from_index(self.modes() + 1).powi(2);
        let denominator = R::point(2.0) * (self.beta() - R::one() / first_tail);
        Ok(self.sigma() * R::point(self.d()?) / denominator)
    }

    /// One self-consistent-bound iterate.
    ///
    /// Computes `D` on the current state, raises `s` by one, sets
    /// `C = right(tail_threshold)`, re-derives the stored tail entries and
    /// replaces `ulr(m+1..=M)` by the map's values. All map values are
    /// evaluated before any of them is written.
    ///
    /// # Errors
    ///
    /// Propagates [`BoundsError::OutOfRange`] from the bound queries.
    pub fn refine_bounds(&mut self) -> Result<(), BoundsError> {
        let c = self.tail_threshold()?.right();
        self.set_tail_law(c, self.smoothness() + 1);

        let first = self.low_mode_cutoff() + 1;
        let images = (first..=self.modes())
            .map(|k| self.map_value(k))
            .collect::<Result<Vec<_>, _>>()?;
        for (offset, image) in images.into_iter().enumerate() {
            self.set_enclosure(first + offset, image);
        }
        Ok(())
    }

    /// True iff the map's value at `k` lies strictly inside `ulr(k)`.
    pub fn check_isolation(&self, k: usize) -> Result<bool, BoundsError> {
        let image = self.map_value(k)?;
        Ok(image.is_subset_interior(&self.enclosures()[k - 1]))
    }

    /// Right endpoint of `tail_threshold / (M+1)`.
    fn far_tail_threshold(&self) -> Result<f64, BoundsError> {
        let inv = R::one() / R::from_index(self.modes() + 1);
        Ok((inv * self.tail_threshold()?).right())
    }

    /// True iff `C` exceeds the tail constant the map would produce,
    /// rescaled to the current exponent.
    pub fn check_far_tail(&self) -> Result<bool, BoundsError> {
        Ok(R::point(self.tail_constant()).left() > self.far_tail_threshold()?)
    }

    /// Far tail and isolation of every mode `m+1..=M`.
    pub fn verify_bounds(&self) -> Result<bool, BoundsError> {
        if !self.check_far_tail()? {
            return Ok(false);
        }
        for k in self.low_mode_cutoff() + 1..=self.modes() {
            if !self.check_isolation(k)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Same verdict as [`verify_bounds`](Self::verify_bounds); when the state
    /// is verbose every mode and the far-tail comparison are reported to
    /// `sink`.
    pub fn isolation_test(&self, sink: &dyn TraceSink) -> Result<bool, BoundsError> {
        if !self.verbose() {
            return self.verify_bounds();
        }
        let threshold = self.far_tail_threshold()?;
        let c = self.tail_constant();
        let far = R::point(c).left() > threshold;
        sink.far_tail(c, threshold, far);

        let mut isolated = far;
        for k in self.low_mode_cutoff() + 1..=self.modes() {
            let image = self.map_value(k)?;
            let current = self.enclosures()[k - 1];
            let ok = image.is_subset_interior(&current);
            sink.mode(
                k,
                (image.left(), image.right()),
                (current.left(), current.right()),
                ok,
            );
            isolated &= ok;
        }
        Ok(isolated)
    }
}
