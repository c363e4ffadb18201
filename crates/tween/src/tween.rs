//! Single start → end interpolation.

use crate::{Lerp, Step};

/// Tolerance applied when comparing accumulated time against the duration.
///
/// Summing `f32` deltas drifts by a few ULPs; without the tolerance a tween of
/// 0.3 s stepped three times by 0.1 s could need a fourth step.
pub const COMPLETION_EPSILON: f32 = 1e-4;

/// Interpolates from `start` to `end` over `duration` seconds.
///
/// The tween carries no reference to where its values go; the owner delivers
/// each [`Step`] to its sink. Time only moves forward through [`Tween::step`].
///
/// # Semantics
///
/// - Each step first adds `dt` to the elapsed time, then samples
/// - While `elapsed < duration` the sample is `lerp(start, end, elapsed / duration)`
/// - Once `elapsed >= duration` the step is `Finished(end)`, exactly once per poll
/// - `duration <= 0` (or NaN) finishes on the first step without dividing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<V> {
    start: V,
    end: V,
    duration: f32,
    elapsed: f32,
}

impl<V: Lerp> Tween<V> {
    /// Creates a tween without touching the endpoint.
    pub fn new(start: V, end: V, duration: f32) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn start(&self) -> V {
        self.start
    }

    pub fn end(&self) -> V {
        self.end
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.is_instant() {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Returns `true` once the next step would deliver the end value.
    pub fn is_finished(&self) -> bool {
        self.is_instant() || self.elapsed >= self.duration - COMPLETION_EPSILON
    }

    /// Advances the tween by `dt` seconds and samples it.
    ///
    /// Non-finite or negative deltas count as zero.
    pub fn step(&mut self, dt: f32) -> Step<V> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }

        if self.is_finished() {
            Step::Finished(self.end)
        } else {
            Step::Running(self.start.lerp(self.end, self.elapsed / self.duration))
        }
    }

    fn is_instant(&self) -> bool {
        // `!(x > 0)` also catches NaN
        !(self.duration > 0.0)
    }
}

impl Tween<f32> {
    /// Creates a blend-weight tween; the endpoint is clamped to `[0, 1]`.
    ///
    /// A NaN endpoint is treated as zero.
    pub fn weight(start: f32, end: f32, duration: f32) -> Self {
        let end = if end.is_nan() { 0.0 } else { end.clamp(0.0, 1.0) };
        Self::new(start, end, duration)
    }
}
