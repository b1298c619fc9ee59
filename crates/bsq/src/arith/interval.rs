//! `f64` intervals with one-ulp outward rounding.
//!
//! Hardware arithmetic rounds to nearest, so the computed endpoint is within
//! half an ulp of the exact one. Moving each endpoint one ulp outward after
//! every operation therefore yields a rigorous enclosure without touching the
//! FPU rounding mode.
//!
//! Any NaN produced along the way (`∞ − ∞`, `0 · ∞`, `∞ / ∞`) collapses the
//! result to [`Interval::ENTIRE`]. Containment tests against an entire
//! interval always fail, which is the safe outcome for a proof.

use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use super::Rigorous;

/// A closed interval `[lo, hi]` of reals with `f64` endpoints.
#[derive(Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// The whole real line.
    pub const ENTIRE: Self = Self {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    /// Creates `[lo, hi]`.
    ///
    /// A NaN endpoint or `lo > hi` yields [`Interval::ENTIRE`], in every build
    /// profile. Use [`Rigorous::hull`] to order endpoints of unknown order.
    #[inline]
    pub fn new(lo: f64, hi: f64) -> Self {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Self::ENTIRE;
        }
        Self { lo, hi }
    }

    /// Lower endpoint.
    #[inline]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper endpoint.
    #[inline]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// `hi - lo`, rounded up.
    #[inline]
    pub fn width(&self) -> f64 {
        next_up(self.hi - self.lo)
    }

    /// True iff `x ∈ [lo, hi]`.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// True iff `lo == -hi`.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.lo == -self.hi
    }

    /// Widens rounded-to-nearest endpoints by one ulp each.
    #[inline]
    fn outward(lo: f64, hi: f64) -> Self {
        if lo.is_nan() || hi.is_nan() {
            return Self::ENTIRE;
        }
        Self {
            lo: next_down(lo),
            hi: next_up(hi),
        }
    }

    /// Outward hull of four candidate endpoints (products or quotients).
    #[inline]
    fn outward_of(c: [f64; 4]) -> Self {
        if c.iter().any(|x| x.is_nan()) {
            return Self::ENTIRE;
        }
        let lo = c.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = c.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::outward(lo, hi)
    }
}

/// Smallest `f64` strictly greater than `x` (identity on `+∞` and NaN).
#[inline]
fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Largest `f64` strictly less than `x` (identity on `-∞` and NaN).
#[inline]
fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

impl Rigorous for Interval {
    #[inline]
    fn point(x: f64) -> Self {
        Self::new(x, x)
    }

    #[inline]
    fn hull(lo: f64, hi: f64) -> Self {
        Self::new(lo.min(hi), lo.max(hi))
    }

    #[inline]
    fn pi() -> Self {
        Self {
            lo: next_down(core::f64::consts::PI),
            hi: next_up(core::f64::consts::PI),
        }
    }

    #[inline]
    fn left(&self) -> f64 {
        self.lo
    }

    #[inline]
    fn right(&self) -> f64 {
        self.hi
    }

    fn abs(&self) -> Self {
        if self.lo >= 0.0 {
            *self
        } else if self.hi <= 0.0 {
            -*self
        } else {
            Self {
                lo: 0.0,
                hi: self.hi.max(-self.lo),
            }
        }
    }

    /// Repeated multiplication. For zero-straddling bases the even powers are
    /// over-approximated (the left endpoint may be negative), which is still
    /// an enclosure.
    fn powi(&self, n: u32) -> Self {
        let mut acc = Self::one();
        for _ in 0..n {
            acc = acc * *self;
        }
        acc
    }

    fn sqrt(&self) -> Self {
        if self.hi < 0.0 {
            return Self::ENTIRE;
        }
        let lo = self.lo.max(0.0);
        Self {
            lo: next_down(lo.sqrt()).max(0.0),
            hi: next_up(self.hi.sqrt()),
        }
    }

    #[inline]
    fn is_subset_interior(&self, other: &Self) -> bool {
        other.lo < self.lo && self.hi < other.hi
    }
}

impl Add for Interval {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::outward(self.lo + rhs.lo, self.hi + rhs.hi)
    }
}

impl Sub for Interval {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::outward(self.lo - rhs.hi, self.hi - rhs.lo)
    }
}

impl Mul for Interval {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::outward_of([
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ])
    }
}

impl Div for Interval {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        if rhs.lo <= 0.0 && rhs.hi >= 0.0 {
            return Self::ENTIRE;
        }
        Self::outward_of([
            self.lo / rhs.lo,
            self.lo / rhs.hi,
            self.hi / rhs.lo,
            self.hi / rhs.hi,
        ])
    }
}

impl Neg for Interval {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:e}, {:e}]", self.lo, self.hi)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
