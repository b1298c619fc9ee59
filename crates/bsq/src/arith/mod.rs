//! Rigorous arithmetic capability.
//!
//! Every numeric operation of the bound engine goes through [`Rigorous`].
//! An implementation must return, for each operation, a set that contains
//! the exact real result for every choice of real operands inside the input
//! sets. The engine never looks at the representation, only at endpoints
//! (`left`/`right`) and at the strict-containment predicate.
//!
//! # Required Operations
//!
//! ```text
//! + − × ÷ neg      outward-rounded field operations
//! abs              |x| as a set
//! powi(n)          integer power (exponents are always integers here)
//! sqrt             square root of the non-negative part
//! pi()             an enclosure of π
//! is_subset_interior(other)
//! ```
//!
//! [`Interval`] is the implementation shipped with the crate.

mod interval;

pub use interval::Interval;

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Outward-rounded set arithmetic over the reals.
///
/// # Example
///
/// ```
/// use bsq::arith::{Interval, Rigorous};
///
/// let third = Interval::point(1.0) / Interval::point(3.0);
/// assert!(third.left() <= 1.0 / 3.0 && 1.0 / 3.0 <= third.right());
/// assert!(third.is_subset_interior(&Interval::hull(0.3, 0.4)));
/// ```
pub trait Rigorous:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The degenerate set `{x}`.
    fn point(x: f64) -> Self;

    /// The smallest representable set containing `lo` and `hi`.
    fn hull(lo: f64, hi: f64) -> Self;

    /// An enclosure of π.
    fn pi() -> Self;

    /// Left (lower) endpoint.
    fn left(&self) -> f64;

    /// Right (upper) endpoint.
    fn right(&self) -> f64;

    /// `{ |x| : x ∈ self }`.
    fn abs(&self) -> Self;

    /// `self^n` for a non-negative integer exponent.
    fn powi(&self, n: u32) -> Self;

    /// Square root of the non-negative part of `self`.
    fn sqrt(&self) -> Self;

    /// True iff `self` lies in the strict interior of `other`.
    fn is_subset_interior(&self, other: &Self) -> bool;

    /// The exact enclosure of a mode or summation index.
    #[inline]
    fn from_index(k: usize) -> Self {
        Self::point(k as f64)
    }

    /// `{0}`.
    #[inline]
    fn zero() -> Self {
        Self::point(0.0)
    }

    /// `{1}`.
    #[inline]
    fn one() -> Self {
        Self::point(1.0)
    }

    /// `[-1, 1]`.
    #[inline]
    fn unit_ball() -> Self {
        Self::hull(-1.0, 1.0)
    }

    /// `[-1, 1] · |self|`: the symmetric set with the same magnitude.
    #[inline]
    fn symmetric(&self) -> Self {
        Self::unit_ball() * self.abs()
    }
}
