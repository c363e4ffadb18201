//! Value produced by advancing a tween.

/// The result of advancing a [`Tween`](crate::Tween) by one tick.
///
/// Both variants carry the value the sink should receive this tick, so a
/// caller can deliver first and then decide whether to keep polling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<V> {
    /// The interpolation is still in progress.
    Running(V),

    /// The interpolation is complete and carries the exact end value.
    ///
    /// Stepping a finished tween keeps producing `Finished` with the same
    /// value.
    Finished(V),
}

impl<V> Step<V> {
    /// Returns `true` if this step completed the tween.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }

    /// Returns `true` if the tween needs further steps.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Step::Running(_))
    }

    /// Consumes the step and returns the carried value.
    #[inline]
    pub fn value(self) -> V {
        match self {
            Step::Running(value) | Step::Finished(value) => value,
        }
    }

    /// Maps the carried value while keeping the variant.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Step<U> {
        match self {
            Step::Running(value) => Step::Running(f(value)),
            Step::Finished(value) => Step::Finished(f(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_available_on_both_variants() {
        assert_eq!(Step::Running(0.5_f32).value(), 0.5);
        assert_eq!(Step::Finished(1.0_f32).value(), 1.0);
    }

    #[test]
    fn map_preserves_variant() {
        let step = Step::Running(2).map(|v| v * 3);
        assert_eq!(step, Step::Running(6));
        assert!(Step::Finished(()).map(|_| 1).is_finished());
    }
}
