//! Rigorous norm bounds of the represented periodic function.
//!
//! For `u(x) = Σ_{k≠0} u_k e^{ikx}` with `|u_k| ≤ b(k) = 2·|ulr(k)|` and
//! `b(k) ≤ 2C/k^s` beyond `N = 2M`:
//!
//! ```text
//! ‖u‖_C0   ≤ 2·Σ b(k)                 + 2·2C/((s-1)·N^(s-1))
//! ‖u‖_L2²  ≤ 4π·(Σ b(k)²              + 4C²/((2s-1)·N^(2s-1)))
//! ‖u'‖_C0  ≤ 2·Σ k·b(k)               + 2·2C/((s-2)·N^(s-2))
//! ‖u'‖_L2² ≤ 4π·(Σ k²·b(k)²           + 4C²/((2s-3)·N^(2s-3)))
//! ```
//!
//! Finite sums run over `k = 1..=N`. Construction guarantees `s ≥ 3`.

use super::BoundState;
use crate::arith::Rigorous;

impl<R: Rigorous> BoundState<R> {
    /// `Σ_{k>N} 1/k^p ≤ 1/((p-1)·N^(p-1))`.
    fn tail_integral(&self, p: u32) -> R {
        let n = 2 * self.modes();
        R::one() / (R::from_index(p as usize - 1) * R::from_index(n).powi(p - 1))
    }

    /// `b(k)^2 · k^(2·weight)` summed over `1..=2M`, or the linear sum when
    /// `squared` is false.
    fn weighted_sum(&self, weight: u32, squared: bool) -> R {
        let two = R::point(2.0);
        let mut acc = R::zero();
        for k in 1..=2 * self.modes() {
            let b = two * self.mag(k);
            let term = if squared { b * b } else { b };
            let w = R::from_index(k).powi(if squared { 2 * weight } else { weight });
            acc = acc + w * term;
        }
        acc
    }

    /// Upper bound on the sup norm of the solution.
    pub fn c0_norm(&self) -> f64 {
        let c = R::point(self.tail_constant());
        let two = R::point(2.0);
        let tail = two * c * self.tail_integral(self.smoothness());
        (two * (self.weighted_sum(0, false) + tail)).right()
    }

    /// Upper bound on the L2 norm over one period.
    pub fn l2_norm(&self) -> f64 {
        let c = R::point(self.tail_constant());
        let tail = R::point(4.0) * c * c * self.tail_integral(2 * self.smoothness());
        (R::point(4.0) * R::pi() * (self.weighted_sum(0, true) + tail))
            .sqrt()
            .right()
    }

    /// Upper bound on the sup norm of the derivative.
    pub fn c0_der_norm(&self) -> f64 {
        let c = R::point(self.tail_constant());
        let two = R::point(2.0);
        let tail = two * c * self.tail_integral(self.smoothness() - 1);
        (two * (self.weighted_sum(1, false) + tail)).right()
    }

    /// Upper bound on the L2 norm of the derivative over one period.
    pub fn l2_der_norm(&self) -> f64 {
        let c = R::point(self.tail_constant());
        let tail = R::point(4.0) * c * c * self.tail_integral(2 * self.smoothness() - 2);
        (R::point(4.0) * R::pi() * (self.weighted_sum(1, true) + tail))
            .sqrt()
            .right()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::state_a;

    #[test]
    fn norms_are_finite_and_positive() {
        let s = state_a();
        for v in [s.c0_norm(), s.l2_norm(), s.c0_der_norm(), s.l2_der_norm()] {
            assert!(v.is_finite() && v > 0.0, "{v}");
        }
    }

    #[test]
    fn c0_dominates_coefficient_mass() {
        let s = state_a();
        // 2·Σ 2·|ulr(k)| over the stored modes is a lower bound for the C0 bound.
        let mass: f64 = s.enclosures().iter().map(|u| 4.0 * u.hi()).sum();
        assert!(s.c0_norm() >= mass * (1.0 - 1e-12));
    }

    #[test]
    fn derivative_weights_raise_the_bound() {
        let s = state_a();
        assert!(s.c0_der_norm() >= s.c0_norm());
        assert!(s.l2_der_norm() >= s.l2_norm());
    }

    #[test]
    fn l2_is_below_c0_times_root_two_pi() {
        // ‖u‖_L2 ≤ √(2π)·‖u‖_C0 holds for the true function; the bounds
        // built from the same coefficients respect it too.
        let s = state_a();
        let root_two_pi = (2.0 * core::f64::consts::PI).sqrt();
        assert!(s.l2_norm() <= root_two_pi * s.c0_norm());
    }
}
