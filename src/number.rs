// src/number.rs

//! Numeric abstraction shared by every controller stage.
//!
//! All stages are generic over [`Number`], so the same cascade runs on
//! `f32` or on fixed-point types such as `fixed::types::I16F16`.

use num_traits::ToPrimitive;
use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber + ToPrimitive {
    /// Clamps generic PartialOrd values within a given range.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }

    /// Clamps to the symmetric range `[-limit, limit]`.
    fn clamp_abs(self, limit: Self) -> Self {
        Number::clamp(self, -limit, limit)
    }

    /// Absolute value using only ordering and negation.
    fn magnitude(self) -> Self {
        if self < Self::zero() {
            -self
        } else {
            self
        }
    }

    /// `true` when the value is strictly positive. NaN is not positive.
    fn is_positive(self) -> bool {
        Self::zero() < self
    }

    /// `false` for NaN and infinities. Fixed-point values are always finite.
    fn is_finite(self) -> bool {
        self.to_f64().is_some_and(f64::is_finite)
    }
}

impl<T: PiddiyNumber + ToPrimitive> Number for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_abs_is_symmetric() {
        assert_eq!(Number::clamp_abs(5.0_f32, 2.0), 2.0);
        assert_eq!(Number::clamp_abs(-5.0_f32, 2.0), -2.0);
        assert_eq!(Number::clamp_abs(1.5_f32, 2.0), 1.5);
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Number::magnitude(-3.0_f32), 3.0);
        assert_eq!(Number::magnitude(3.0_f32), 3.0);
    }

    #[test]
    fn test_nan_is_not_positive() {
        assert!(!Number::is_positive(f32::NAN));
        assert!(!Number::is_positive(0.0_f32));
        assert!(Number::is_positive(0.001_f32));
    }

    #[test]
    fn test_is_finite() {
        assert!(Number::is_finite(-3.5_f32));
        assert!(!Number::is_finite(f32::NAN));
        assert!(!Number::is_finite(f32::NEG_INFINITY));
    }
}
