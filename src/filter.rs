// src/filter.rs

//! Measurement smoothing helpers used by profiles that define them.

use crate::Number;

/// Exponential filter over a three-axis measurement.
///
/// `alpha` weights the previous output: `y = alpha * y_prev + (1 - alpha) * x`.
/// The first sample after a reset passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpFilter<T> {
    alpha: T,
    value: Option<(T, T, T)>,
}

impl<T: Number> ExpFilter<T> {
    /// Creates a filter with the given history weight.
    pub fn new(alpha: T) -> Self {
        Self { alpha, value: None }
    }

    /// Feeds one sample and returns the filtered value.
    pub fn apply(&mut self, sample: (T, T, T)) -> (T, T, T) {
        let filtered = match self.value {
            Some(previous) => (
                self.blend(previous.0, sample.0),
                self.blend(previous.1, sample.1),
                self.blend(previous.2, sample.2),
            ),
            None => sample,
        };
        self.value = Some(filtered);
        filtered
    }

    /// Forgets the filter history.
    pub fn reset(&mut self) {
        self.value = None;
    }

    fn blend(&self, previous: T, sample: T) -> T {
        self.alpha * previous + (T::one() - self.alpha) * sample
    }
}

/// Returns `measurement` when the error is inside the dead zone, so the
/// controller sees zero error, and `set_point` otherwise.
pub fn apply_deadzone<T: Number>(set_point: T, measurement: T, deadzone: T) -> T {
    if (set_point - measurement).magnitude() <= deadzone {
        measurement
    } else {
        set_point
    }
}

/// Moves `previous` toward `target` by at most `max_step`.
pub fn slew<T: Number>(previous: T, target: T, max_step: T) -> T {
    previous + (target - previous).clamp_abs(max_step)
}
