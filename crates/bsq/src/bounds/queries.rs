//! Convolution and tail bounds on the quadratic nonlinearity.
//!
//! With magnitudes `b(k) = 2·|ulr(k)|`, the nonlinearity at mode `k` splits
//! into the part with both factors at positive modes,
//!
//! ```text
//! FS(k) = Σ_{k1=1}^{k-1} b(k1)·b(k-k1)
//! ```
//!
//! and the part pairing mode `j` with mode `j + k` (negative/positive
//! interaction), `IS(k) = Σ_{j≥1} b(j)·b(j+k)`, which enters twice. Modes
//! above `M` are bounded by the tail law, and sums over them by the integral
//! estimate `Σ_{j>N} 1/j^p ≤ 1/((p-1)·N^(p-1))`.

use super::BoundState;
use crate::arith::Rigorous;
use crate::error::BoundsError;

impl<R: Rigorous> BoundState<R> {
    /// `Σ 4·|ulr(k1)|·|ulr(k1+k)|` for `k1 ∈ [lo, hi]`; zero for an empty
    /// window.
    ///
    /// # Errors
    ///
    /// [`BoundsError::OutOfRange`] if `hi + k` exceeds `2M`.
    pub fn convolution(&self, k: usize, lo: usize, hi: usize) -> Result<R, BoundsError> {
        if lo > hi {
            return Ok(R::zero());
        }
        self.check_index(hi + k)?;
        let four = R::point(4.0);
        let mut acc = R::zero();
        for k1 in lo.max(1)..=hi {
            acc = acc + four * self.mag(k1) * self.mag(k1 + k);
        }
        Ok(acc)
    }

    /// `Σ 2·|ulr(k1)|` for `k1 ∈ [lo, hi]`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::OutOfRange`] if `hi` exceeds `2M`.
    pub fn u_sum(&self, lo: usize, hi: usize) -> Result<R, BoundsError> {
        if lo > hi {
            return Ok(R::zero());
        }
        self.check_index(hi)?;
        let two = R::point(2.0);
        let mut acc = R::zero();
        for k1 in lo.max(1)..=hi {
            acc = acc + two * self.mag(k1);
        }
        Ok(acc)
    }

    /// Bound on `Σ_{j>M} b(j)`: `2C / ((s-1)·M^(s-1))`.
    pub fn tail_mass(&self) -> R {
        let s = self.smoothness();
        R::point(2.0) * R::point(self.tail_constant())
            / (R::from_index(s as usize - 1) * R::from_index(self.modes()).powi(s - 1))
    }

    /// Bound on the interaction-with-tail sum `IS(k)`, as `[-1,1]·magnitude`.
    ///
    /// For `k ≤ M` the sum is evaluated over the stored enclosures (the cross
    /// window `M-k+1..=M` reaches the stored tail entries `M+1..=M+k`) plus
    /// the tail-tail remainder `4C²/((2s-1)·M^(2s-1))`. For `k > M` it is
    /// purely analytic: `(2C/k^s)·(u_sum(1,M) + tail_mass)`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::OutOfRange`] for `k = 0`.
    pub fn is_bound(&self, k: usize) -> Result<R, BoundsError> {
        if k == 0 {
            return Err(BoundsError::OutOfRange {
                k,
                min: 1,
                max: usize::MAX,
            });
        }
        let big_m = self.modes();
        let s = self.smoothness();
        let c = R::point(self.tail_constant());
        let magnitude = if k > big_m {
            R::point(2.0) * c / R::from_index(k).powi(s) * (self.u_sum(1, big_m)? + self.tail_mass())
        } else {
            let local = self.convolution(k, 1, big_m - k)?;
            let cross = self.convolution(k, big_m - k + 1, big_m)?;
            let p = 2 * s - 1;
            let tail_tail = R::point(4.0) * c * c
                / (R::from_index(p as usize) * R::from_index(big_m).powi(p));
            local + cross + tail_tail
        };
        Ok(magnitude.symmetric())
    }

    /// Exact convolution bound `Σ_{k1=1}^{k-1} 4·|ulr(k1)|·|ulr(k-k1)|`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::OutOfRange`] unless `1 ≤ k ≤ 2M`.
    pub fn fs(&self, k: usize) -> Result<R, BoundsError> {
        if k == 0 || k > 2 * self.modes() {
            return Err(BoundsError::OutOfRange {
                k,
                min: 1,
                max: 2 * self.modes(),
            });
        }
        let four = R::point(4.0);
        let mut acc = R::zero();
        for k1 in 1..k {
            acc = acc + four * self.mag(k1) * self.mag(k - k1);
        }
        Ok(acc.symmetric())
    }

    /// Analytic bound on `FS(k)` for `k > 2M`:
    /// `(4C/k^s)·(ρ^s·u_sum(1,M) + 2^s·tail_mass)` with `ρ = k/(k-M)`.
    ///
    /// Pairs with one index `≤ M` put the other above `k - M`; pairs with
    /// both indices above `M` have the larger one above `k/2`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::OutOfRange`] unless `k > 2M`.
    pub fn fs_bound(&self, k: usize) -> Result<R, BoundsError> {
        let big_m = self.modes();
        if k <= 2 * big_m {
            return Err(BoundsError::OutOfRange {
                k,
                min: 2 * big_m + 1,
                max: usize::MAX,
            });
        }
        let s = self.smoothness();
        let kk = R::from_index(k);
        let rho = kk / R::from_index(k - big_m);
        let magnitude = R::point(4.0) * R::point(self.tail_constant()) / kk.powi(s)
            * (rho.powi(s) * self.u_sum(1, big_m)? + R::point(2.0).powi(s) * self.tail_mass());
        Ok(magnitude.symmetric())
    }

    /// `k^(s-1)·|fs_bound(k)|` at `k = 2M+1`.
    ///
    /// The normalized bound `2C·(ρ^s·u_sum + 2^s·tail_mass)·4/(2k)` decreases
    /// in `k` (both `ρ = k/(k-M)` and `1/k` do), so its value at the first
    /// analytic mode dominates every `k > 2M`.
    pub fn fs_bound_normalized(&self) -> Result<R, BoundsError> {
        let k = 2 * self.modes() + 1;
        Ok(R::from_index(k).powi(self.smoothness() - 1) * self.fs_bound(k)?.abs())
    }

    /// Smallest `D1` with `|FS(k)| ≤ D1 / k^(s-1)` for every `k > M`: exact
    /// over `M+1..=2M`, analytic beyond.
    pub fn d1(&self) -> Result<f64, BoundsError> {
        let exponent = self.smoothness() - 1;
        let mut d1 = self.fs_bound_normalized()?.right();
        for k in self.modes() + 1..=2 * self.modes() {
            let scaled = R::from_index(k).powi(exponent) * self.fs(k)?.abs();
            d1 = d1.max(scaled.right());
        }
        Ok(d1)
    }

    /// Smallest `D2` with `|IS(k)| ≤ D2 / k^(s-1)` for every `k > M`.
    ///
    /// `k^(s-1)·IS_bound(k)` carries a `1/k` factor, so `k = M+1` is the
    /// worst case.
    pub fn d2(&self) -> Result<f64, BoundsError> {
        let k = self.modes() + 1;
        let scaled = R::from_index(k).powi(self.smoothness() - 1) * self.is_bound(k)?.abs();
        Ok(scaled.right())
    }

    /// Combined nonlinearity constant `D1 + 2·D2`.
    pub fn d(&self) -> Result<f64, BoundsError> {
        Ok((R::point(self.d1()?) + R::point(2.0) * R::point(self.d2()?)).right())
    }
}
