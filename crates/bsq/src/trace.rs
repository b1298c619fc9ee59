//! Diagnostic sinks for the isolation test.
//!
//! The bound and refinement code never logs on its own. Callers that want
//! per-mode diagnostics pass a [`TraceSink`]; [`NoopSink`] discards
//! everything and [`TracingSink`] forwards to `tracing` at debug level.

/// Receiver of isolation-test diagnostics.
///
/// All methods default to doing nothing, so a sink only overrides what it
/// cares about.
pub trait TraceSink {
    /// One mode of the isolation test: `image` is the fixed-point map value,
    /// `current` the enclosure it must fall strictly inside. Both are given
    /// as `(left, right)` endpoints.
    fn mode(&self, k: usize, image: (f64, f64), current: (f64, f64), isolated: bool) {
        let _ = (k, image, current, isolated);
    }

    /// The far-tail comparison `C > threshold`.
    fn far_tail(&self, tail_constant: f64, threshold: f64, holds: bool) {
        let _ = (tail_constant, threshold, holds);
    }
}

/// Discards all diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Emits diagnostics as `tracing` debug events under the `bsq::isolation`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn mode(&self, k: usize, image: (f64, f64), current: (f64, f64), isolated: bool) {
        tracing::debug!(
            target: "bsq::isolation",
            k,
            image_lo = image.0,
            image_hi = image.1,
            bound_lo = current.0,
            bound_hi = current.1,
            isolated,
            "mode isolation"
        );
    }

    fn far_tail(&self, tail_constant: f64, threshold: f64, holds: bool) {
        tracing::debug!(
            target: "bsq::isolation",
            tail_constant,
            threshold,
            holds,
            "far tail"
        );
    }
}
