//! Self-consistent bounds for periodic solutions of a forced dissipative
//! Fourier-mode equation.
//!
//! The crate proves, with outward-rounded interval arithmetic, that a forced
//! Boussinesq-type equation has a periodic solution whose Fourier
//! coefficients lie inside explicit enclosures. Coefficients `1..=M` get
//! individual enclosures; every mode above `M` is bounded by a single tail
//! law `C / k^s`.
//!
//! # Method
//!
//! ```text
//! guess (ulr, C, s)  ──► isolation test ──► pass at round ≥ min  ──► certificate
//!         ▲                    │
//!         └── refine (s += 1) ◄┘ fail, rounds left
//! ```
//!
//! The isolation test maps every enclosure through the fixed-point form of
//! the equation and asks for the image to land strictly inside the current
//! enclosure, plus a far-tail inequality on `C`. When both hold, a
//! Schauder-type argument yields a true solution inside the enclosures.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`arith`] | the [`Rigorous`](arith::Rigorous) capability and [`Interval`](arith::Interval) |
//! | [`bounds`] | [`BoundState`], bound queries, norm bounds |
//! | [`proof`] | the [`ProofDriver`] state machine and [`verify_existence`] |
//! | [`certificate`] | [`ExistenceCertificate`] |
//! | [`trace`] | diagnostic sinks for the isolation test |
//! | [`error`] | [`BoundsError`] |
//!
//! # Example
//!
//! ```
//! use bsq::arith::{Interval, Rigorous};
//! use bsq::{verify_existence, BoundsError, Parameters};
//!
//! let params = Parameters::new(
//!     Interval::point(1.5),
//!     Interval::point(3.0),
//!     Interval::new(-0.05, 0.05),
//!     vec![Interval::point(1.0)],
//!     6,
//! );
//! let cert = verify_existence(&params, 6, false)?;
//! assert!(cert.coefficient_bound(1).is_some_and(|b| b > 0.05));
//! # Ok::<(), BoundsError>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ExistenceCertificate`] and
//!   [`NormBounds`].

#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::missing_errors_doc
    )
)]
#![warn(missing_docs)]

pub mod arith;
pub mod bounds;
pub mod certificate;
pub mod error;
pub mod proof;
pub mod trace;

// Fixed-point map, refinement and isolation predicates on BoundState
mod refine;

pub use bounds::{BoundState, Parameters, INITIAL_GUESS};
pub use certificate::{ExistenceCertificate, NormBounds};
pub use error::BoundsError;
pub use proof::{verify_existence, ProofDriver, ProofRun, ProofState, Schedule};
pub use trace::{NoopSink, TraceSink, TracingSink};
