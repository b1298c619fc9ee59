//! End-to-end verification runs through the public API.

use bsq::arith::{Interval, Rigorous};
use bsq::{verify_existence, BoundState, BoundsError, Parameters, ProofDriver, ProofState};

fn params(beta: f64, eps: f64, forcing: &[f64], modes: usize) -> Parameters {
    Parameters::new(
        Interval::point(beta),
        Interval::point(3.0),
        Interval::new(-eps, eps),
        forcing.iter().copied().map(Interval::point).collect(),
        modes,
    )
}

fn scenario_a() -> Parameters {
    params(1.5, 0.05, &[1.0], 6)
}

fn scenario_b() -> Parameters {
    params(1.5, 0.05, &[1.0, 1.0, 1.0, 1.0], 6)
}

// -- Verified runs --

#[test]
fn scenario_a_single_mode_forcing() {
    let cert = verify_existence(&scenario_a(), 6, false).unwrap();
    assert_eq!(cert.bounds().len(), 7);
    assert!(cert.smoothness() >= 6);
    assert!(cert.well_formed());
    // The forced mode carries at least the linear response eps / (2(beta-1)).
    assert!(cert.coefficient_bound(1).unwrap() > 0.05);
    // Enclosures shrink with the mode index.
    let b = cert.coefficient_bounds();
    assert!(b.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn scenario_b_four_mode_forcing() {
    let a = verify_existence(&scenario_a(), 6, false).unwrap();
    let b = verify_existence(&scenario_b(), 6, false).unwrap();
    assert_eq!(b.bounds().len(), 7);
    assert!(b.smoothness() >= 6);
    assert_ne!(a.bounds(), b.bounds());
    // Extra forced modes enlarge their enclosures.
    for k in 2..=4 {
        assert!(b.coefficient_bound(k).unwrap() > a.coefficient_bound(k).unwrap());
    }
}

#[test]
fn verbose_run_gives_the_same_certificate() {
    let quiet = verify_existence(&scenario_a(), 6, false).unwrap();
    let loud = verify_existence(&scenario_a(), 6, true).unwrap();
    assert_eq!(quiet, loud);
}

#[test]
fn low_mode_cutoff_keeps_the_guess() {
    let p = scenario_a().with_low_mode_cutoff(1);
    let cert = verify_existence(&p, 6, false).unwrap();
    assert_eq!(cert.low_mode_cutoff(), 1);
    let initial = BoundState::new(&p, 4, false).unwrap();
    assert_eq!(cert.coefficient_bound(1), initial.enclosure(1).map(|u| u.hi()));
}

#[test]
fn larger_beta_verifies_with_smaller_bounds() {
    let a = verify_existence(&scenario_a(), 6, false).unwrap();
    let strong = verify_existence(&params(2.0, 0.05, &[1.0], 6), 6, false).unwrap();
    assert!(strong.coefficient_bound(1).unwrap() < a.coefficient_bound(1).unwrap());
    assert!(strong.norms().c0 < a.norms().c0);
}

#[test]
fn twenty_two_mode_runs_verify() {
    for forcing in [&[1.0][..], &[1.0, 1.0, 1.0, 1.0][..]] {
        let cert = verify_existence(&params(1.5, 0.01, forcing, 22), 10, false).unwrap();
        assert_eq!(cert.bounds().len(), 23);
        assert!(cert.smoothness() >= 10);
        assert!(cert.norms().c0.is_finite());
    }
}

// -- Rejected and failed runs --

#[test]
fn scenario_c_small_beta_is_rejected() {
    let err = verify_existence(&params(0.5, 0.05, &[1.0], 6), 6, false).unwrap_err();
    assert!(matches!(err, BoundsError::ParameterDomain { .. }));
    assert!(err.to_string().contains("beta"));
}

#[test]
fn scenario_d_fs_beyond_two_m_is_out_of_range() {
    let state = BoundState::new(&scenario_a(), 4, false).unwrap();
    assert!(matches!(
        state.fs(13),
        Err(BoundsError::OutOfRange { k: 13, max: 12, .. })
    ));
    assert!(state.fs(12).is_ok());
}

#[test]
fn large_forcing_diverges() {
    let run = ProofDriver::default().run(&params(1.75, 0.3, &[1.0], 19), 6);
    assert_eq!(run.state, ProofState::Exhausted);
    assert!(matches!(
        run.result,
        Err(BoundsError::ConvergenceFailure {
            rounds: 8,
            required: 3,
            ..
        })
    ));
}

#[test]
fn forcing_longer_than_truncation_is_rejected() {
    let err = verify_existence(&params(1.5, 0.05, &[1.0; 7], 6), 6, false).unwrap_err();
    assert_eq!(err.kind(), "parameter-domain");
}
