//! The verification driver.
//!
//! A [`ProofDriver`] walks one parameter set through
//!
//! ```text
//! Constructing ──► Iterating { round } ──► Verified
//!       │                  │          └──► Exhausted
//!       └──────────────────┴─────────────► ParameterRejected
//! ```
//!
//! Each round runs the isolation test; success only counts once the round
//! index reaches [`Schedule::min_rounds`], which is the number of refinements
//! needed to lift the tail exponent from its initial value to the requested
//! smoothness. Every other round refines, up to [`Schedule::max_rounds`].

use crate::arith::{Interval, Rigorous};
use crate::bounds::{BoundState, Parameters};
use crate::certificate::ExistenceCertificate;
use crate::error::BoundsError;
use crate::trace::{NoopSink, TraceSink, TracingSink};

/// Smoothness and refinement budget of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Tail-law exponent of the initial guess.
    pub initial_smoothness: u32,
    /// Rounds allowed beyond the minimum.
    pub extra_rounds: usize,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_smoothness: 4,
            extra_rounds: 5,
        }
    }
}

impl Schedule {
    /// First round at which a passing isolation test is accepted.
    ///
    /// # Errors
    ///
    /// [`BoundsError::ParameterDomain`] if `min_smoothness` is below the
    /// initial smoothness.
    pub fn min_rounds(&self, min_smoothness: u32) -> Result<usize, BoundsError> {
        if min_smoothness < self.initial_smoothness {
            return Err(BoundsError::parameter(format!(
                "minimum smoothness {min_smoothness} is below the initial smoothness {}",
                self.initial_smoothness
            )));
        }
        Ok((min_smoothness - self.initial_smoothness) as usize + 1)
    }

    /// Last round; the state is refined at most this many times.
    ///
    /// # Errors
    ///
    /// As [`min_rounds`](Self::min_rounds).
    pub fn max_rounds(&self, min_smoothness: u32) -> Result<usize, BoundsError> {
        Ok(self.min_rounds(min_smoothness)? + self.extra_rounds)
    }
}

/// Where a driver is, or where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofState {
    /// Building the initial bound state.
    Constructing,
    /// Isolation test and refinement loop.
    Iterating {
        /// Refinements performed so far.
        round: usize,
    },
    /// Isolation held at an admissible round.
    Verified,
    /// The round budget ran out.
    Exhausted,
    /// The parameters violate a construction-time assumption.
    ParameterRejected,
}

impl ProofState {
    /// `true` for the three final states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Verified | Self::Exhausted | Self::ParameterRejected
        )
    }
}

/// The outcome of [`ProofDriver::run`].
#[derive(Debug, Clone)]
pub struct ProofRun {
    /// Terminal state reached.
    pub state: ProofState,
    /// The certificate, or why there is none.
    pub result: Result<ExistenceCertificate, BoundsError>,
}

/// Single-use driver for one verification attempt.
pub struct ProofDriver<'a> {
    schedule: Schedule,
    sink: &'a dyn TraceSink,
    verbose: bool,
    state: ProofState,
}

impl Default for ProofDriver<'_> {
    fn default() -> Self {
        Self::new(Schedule::default())
    }
}

impl<'a> ProofDriver<'a> {
    /// A quiet driver with the given budget.
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            sink: &NoopSink,
            verbose: false,
            state: ProofState::Constructing,
        }
    }

    /// Routes per-mode isolation diagnostics to `sink`.
    pub fn with_sink(mut self, sink: &'a dyn TraceSink) -> Self {
        self.sink = sink;
        self.verbose = true;
        self
    }

    /// Current state; [`ProofState::Constructing`] until `run` is called.
    pub fn state(&self) -> ProofState {
        self.state
    }

    /// The configured budget.
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Runs the attempt to a terminal state.
    pub fn run<R: Rigorous>(mut self, params: &Parameters<R>, min_smoothness: u32) -> ProofRun {
        let result = self.drive(params, min_smoothness);
        tracing::info!(
            state = ?self.state,
            modes = params.modes,
            min_smoothness,
            verified = result.is_ok(),
            "verification finished"
        );
        ProofRun {
            state: self.state,
            result,
        }
    }

    fn drive<R: Rigorous>(
        &mut self,
        params: &Parameters<R>,
        min_smoothness: u32,
    ) -> Result<ExistenceCertificate, BoundsError> {
        let (min_rounds, max_rounds, mut bounds) = match self.construct(params, min_smoothness) {
            Ok(ok) => ok,
            Err(e) => {
                self.state = ProofState::ParameterRejected;
                return Err(e);
            }
        };

        match self.iterate(&mut bounds, min_rounds, max_rounds) {
            Ok(Some(round)) => {
                self.state = ProofState::Verified;
                Ok(ExistenceCertificate::extract(&bounds, round))
            }
            Ok(None) => {
                self.state = ProofState::Exhausted;
                Err(BoundsError::ConvergenceFailure {
                    rounds: max_rounds,
                    required: min_rounds,
                    smoothness: bounds.smoothness(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "bound query failed during iteration");
                self.state = ProofState::Exhausted;
                Err(e)
            }
        }
    }

    fn construct<R: Rigorous>(
        &self,
        params: &Parameters<R>,
        min_smoothness: u32,
    ) -> Result<(usize, usize, BoundState<R>), BoundsError> {
        let min_rounds = self.schedule.min_rounds(min_smoothness)?;
        let max_rounds = self.schedule.max_rounds(min_smoothness)?;
        let state = BoundState::new(params, self.schedule.initial_smoothness, self.verbose)?;
        Ok((min_rounds, max_rounds, state))
    }

    /// Returns the round at which isolation was accepted, if any.
    fn iterate<R: Rigorous>(
        &mut self,
        bounds: &mut BoundState<R>,
        min_rounds: usize,
        max_rounds: usize,
    ) -> Result<Option<usize>, BoundsError> {
        for round in 0..=max_rounds {
            self.state = ProofState::Iterating { round };
            let isolated = bounds.isolation_test(self.sink)?;
            tracing::debug!(
                round,
                smoothness = bounds.smoothness(),
                tail_constant = bounds.tail_constant(),
                isolated,
                "isolation test"
            );
            if isolated && round >= min_rounds {
                return Ok(Some(round));
            }
            if round < max_rounds {
                bounds.refine_bounds()?;
            }
        }
        Ok(None)
    }
}

/// Attempts to verify a periodic solution for `params` whose tail decays at
/// least like `k^-min_smoothness`, with the default [`Schedule`].
///
/// With `verbose`, per-mode isolation diagnostics go to `tracing` at debug
/// level under the `bsq::isolation` target.
///
/// # Errors
///
/// - [`BoundsError::ParameterDomain`] if the parameters or `min_smoothness`
///   violate a construction assumption.
/// - [`BoundsError::ConvergenceFailure`] if isolation is not reached within
///   the round budget.
pub fn verify_existence(
    params: &Parameters<Interval>,
    min_smoothness: u32,
    verbose: bool,
) -> Result<ExistenceCertificate, BoundsError> {
    let driver = ProofDriver::default();
    let driver = if verbose {
        driver.with_sink(&TracingSink)
    } else {
        driver
    };
    driver.run(params, min_smoothness).result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::tests::scenario_a;
    use crate::trace::tests::RecordingSink;

    // -- Schedule --

    #[test]
    fn schedule_counts_rounds_from_initial_smoothness() {
        let s = Schedule::default();
        assert_eq!(s.min_rounds(6), Ok(3));
        assert_eq!(s.max_rounds(6), Ok(8));
        assert_eq!(s.min_rounds(4), Ok(1));
        assert!(s.min_rounds(3).is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(!ProofState::Constructing.is_terminal());
        assert!(!ProofState::Iterating { round: 2 }.is_terminal());
        assert!(ProofState::Verified.is_terminal());
        assert!(ProofState::Exhausted.is_terminal());
        assert!(ProofState::ParameterRejected.is_terminal());
    }

    // -- Driver --

    #[test]
    fn scenario_a_verifies_at_round_four() {
        let driver = ProofDriver::default();
        assert_eq!(driver.state(), ProofState::Constructing);
        let run = driver.run(&scenario_a(), 6);
        assert_eq!(run.state, ProofState::Verified);
        let cert = run.result.unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cert.rounds(), 4);
        assert_eq!(cert.smoothness(), 8);
        assert_eq!(cert.bounds().len(), 7);
    }

    #[test]
    fn success_before_min_rounds_does_not_count() {
        // Isolation holds at round 4, but s ≥ 9 only admits rounds 6..=11,
        // where the far-tail test no longer passes for M = 6.
        let run = ProofDriver::default().run(&scenario_a(), 9);
        assert_eq!(run.state, ProofState::Exhausted);
        assert_eq!(
            run.result.err(),
            Some(BoundsError::ConvergenceFailure {
                rounds: 11,
                required: 6,
                smoothness: 15,
            })
        );
    }

    #[test]
    fn min_smoothness_seven_accepts_the_first_isolated_round() {
        let run = ProofDriver::default().run(&scenario_a(), 7);
        let cert = run.result.unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((cert.rounds(), cert.smoothness()), (4, 8));
    }

    #[test]
    fn low_min_smoothness_is_rejected() {
        let run = ProofDriver::default().run(&scenario_a(), 3);
        assert_eq!(run.state, ProofState::ParameterRejected);
        assert!(matches!(
            run.result,
            Err(BoundsError::ParameterDomain { .. })
        ));
    }

    #[test]
    fn bad_beta_never_iterates() {
        let mut p = scenario_a();
        p.beta = Interval::point(0.5);
        let sink = RecordingSink::default();
        let run = ProofDriver::default().with_sink(&sink).run(&p, 6);
        assert_eq!(run.state, ProofState::ParameterRejected);
        assert!(sink.far_tail.borrow().is_empty());
    }

    #[test]
    fn zero_extra_rounds_exhausts() {
        // min_rounds(4) = 1, but isolation needs four refinements.
        let schedule = Schedule {
            initial_smoothness: 4,
            extra_rounds: 0,
        };
        let run = ProofDriver::new(schedule).run(&scenario_a(), 4);
        assert_eq!(run.state, ProofState::Exhausted);
        assert_eq!(
            run.result.err(),
            Some(BoundsError::ConvergenceFailure {
                rounds: 1,
                required: 1,
                smoothness: 5,
            })
        );
    }

    #[test]
    fn sink_sees_one_far_tail_event_per_round() {
        let sink = RecordingSink::default();
        let run = ProofDriver::default().with_sink(&sink).run(&scenario_a(), 6);
        assert_eq!(run.state, ProofState::Verified);
        // rounds 0..=4
        assert_eq!(sink.far_tail.borrow().len(), 5);
        assert_eq!(sink.modes.borrow().len(), 5 * 6);
    }

    #[test]
    fn verify_existence_matches_driver() {
        let direct = verify_existence(&scenario_a(), 6, false);
        let verbose = verify_existence(&scenario_a(), 6, true);
        assert_eq!(direct, verbose);
        assert!(direct.is_ok());
    }
}
