//! Property-based tests for bound states and the refinement step.
//!
//! Parameters are drawn from the region where construction succeeds, apart
//! from the `eps` draws that check its rejection; the properties hold whether
//! or not a run would eventually verify.

use bsq::arith::{Interval, Rigorous};
use bsq::{BoundState, BoundsError, Parameters};
use proptest::prelude::*;

fn arb_params() -> impl Strategy<Value = Parameters> {
    (1.05f64..3.0, 0.5f64..4.0, 0.001f64..0.2, 3usize..10)
        .prop_flat_map(|(beta, sigma, eps, modes)| {
            let forcing = prop::collection::vec(-1.0f64..1.0, 1..=modes.min(4));
            (Just((beta, sigma, eps, modes)), forcing, 0usize..2)
        })
        .prop_map(|((beta, sigma, eps, modes), forcing, m)| {
            Parameters::new(
                Interval::point(beta),
                Interval::point(sigma),
                Interval::new(-eps, eps),
                forcing.into_iter().map(Interval::point).collect(),
                modes,
            )
            .with_low_mode_cutoff(m)
        })
}

/// `eps` endpoints drawn independently, so most draws are lopsided.
fn arb_eps() -> impl Strategy<Value = Interval> {
    prop_oneof![
        (0.001f64..0.2).prop_map(|e| Interval::new(-e, e)),
        (-0.2f64..0.2, 0.0f64..0.2).prop_map(|(lo, width)| Interval::new(lo, lo + width)),
    ]
}

fn refined(params: &Parameters, rounds: usize) -> BoundState {
    let mut state = BoundState::new(params, 4, false).unwrap();
    for _ in 0..rounds {
        state.refine_bounds().unwrap();
    }
    state
}

// =============================================================================
// Refinement invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Every enclosure stays symmetric about zero.
    #[test]
    fn prop_enclosures_stay_symmetric(p in arb_params(), rounds in 0usize..5) {
        let state = refined(&p, rounds);
        for (i, u) in state.enclosures().iter().enumerate() {
            prop_assert!(u.is_symmetric(), "ulr({}) = {:?}", i + 1, u);
        }
    }

    /// Each refinement raises s by exactly one and leaves M and m alone.
    #[test]
    fn prop_smoothness_is_monotone(p in arb_params(), rounds in 1usize..5) {
        let mut state = BoundState::new(&p, 4, false).unwrap();
        for r in 1..=rounds {
            state.refine_bounds().unwrap();
            prop_assert_eq!(state.smoothness(), 4 + r as u32);
            prop_assert_eq!(state.modes(), p.modes);
            prop_assert_eq!(state.low_mode_cutoff(), p.low_mode_cutoff);
        }
    }

    /// Modes at or below the cutoff are never touched.
    #[test]
    fn prop_cutoff_modes_are_frozen(p in arb_params(), rounds in 1usize..4) {
        let initial = BoundState::new(&p, 4, false).unwrap();
        let state = refined(&p, rounds);
        for k in 1..=p.low_mode_cutoff {
            prop_assert_eq!(state.enclosure(k), initial.enclosure(k));
        }
    }
}

// =============================================================================
// Forcing amplitude
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// Construction accepts `eps` exactly when it is symmetric, and accepted
    /// states keep symmetric enclosures through refinement.
    #[test]
    fn prop_only_symmetric_eps_is_accepted(p in arb_params(), eps in arb_eps()) {
        let mut p = p;
        p.eps = eps;
        match BoundState::new(&p, 4, false) {
            Ok(mut state) => {
                prop_assert!(eps.is_symmetric(), "accepted eps = {:?}", eps);
                for _ in 0..2 {
                    state.refine_bounds().unwrap();
                }
                for u in state.enclosures() {
                    prop_assert!(u.is_symmetric(), "{:?}", u);
                }
            }
            Err(err) => {
                prop_assert!(!eps.is_symmetric(), "rejected eps = {:?}: {}", eps, err);
                prop_assert!(matches!(err, BoundsError::ParameterDomain { .. }), "unexpected error: {:?}", err);
            }
        }
    }
}

// =============================================================================
// Query contracts
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// fs is defined exactly on 1..=2M and is symmetric there.
    #[test]
    fn prop_fs_range(p in arb_params(), rounds in 0usize..3) {
        let state = refined(&p, rounds);
        let two_m = 2 * p.modes;
        prop_assert!(
            matches!(state.fs(0), Err(BoundsError::OutOfRange { .. })),
            "fs(0) accepted"
        );
        prop_assert!(
            matches!(state.fs(two_m + 1), Err(BoundsError::OutOfRange { .. })),
            "fs(2M+1) accepted"
        );
        for k in 1..=two_m {
            let v = state.fs(k).unwrap();
            prop_assert!(v.is_symmetric(), "fs({}) = {:?}", k, v);
        }
    }

    /// The isolation test has no side effects.
    #[test]
    fn prop_isolation_is_idempotent(p in arb_params(), rounds in 0usize..4) {
        let state = refined(&p, rounds);
        let first = state.verify_bounds();
        let second = state.verify_bounds();
        prop_assert_eq!(first.clone(), second);
        prop_assert_eq!(state.isolation_test(&bsq::NoopSink), first);
    }

    /// The far-tail check is the threshold comparison, bit for bit.
    #[test]
    fn prop_far_tail_is_threshold_comparison(p in arb_params(), rounds in 0usize..4) {
        let state = refined(&p, rounds);
        let threshold = state.tail_threshold().unwrap();
        let scaled = (Interval::one() / Interval::from_index(p.modes + 1) * threshold).hi();
        prop_assert_eq!(
            state.check_far_tail().unwrap(),
            state.tail_constant() > scaled
        );
    }
}

// =============================================================================
// Interval enclosure
// =============================================================================

proptest! {
    /// Field operations on points enclose the rounded-to-nearest result.
    #[test]
    fn prop_point_ops_enclose(a in -1e6f64..1e6, b in 1e-3f64..1e6) {
        let (x, y) = (Interval::point(a), Interval::point(b));
        prop_assert!((x + y).contains(a + b));
        prop_assert!((x - y).contains(a - b));
        prop_assert!((x * y).contains(a * b));
        prop_assert!((x / y).contains(a / b));
    }

    /// Outward rounding always leaves room around the exact result.
    #[test]
    fn prop_results_are_strict_supersets(a in 1e-3f64..1e3, b in 1e-3f64..1e3) {
        let r = Interval::point(a) * Interval::point(b);
        prop_assert!(r.lo() < a * b && a * b < r.hi());
    }
}
