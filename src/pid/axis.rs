// src/pid/axis.rs

//! # Axis PID Compute Module
//!
//! This module provides the compute callback and control data structure
//! shared by every axis of the cascade. Each axis runs the same textbook
//! PID; only the gains and the integral limit differ.

use crate::Number;
use piddiy::PidController;

/// Control data for the axis PID compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisControlData<T> {
    /// The measured value of the controlled quantity.
    pub measurement: T,
    /// The time delta since the last computation. Must be positive.
    pub dt: T,
    /// The maximum magnitude of the integral term. Zero disables it.
    pub integral_limit: T,
}

/// Axis PID compute callback.
///
/// Returns `(error, integral, derivative)`; the derivative is taken against
/// the error stored in `pid` by the previous computation.
pub fn compute_axis<T: Number>(
    pid: &mut PidController<T, AxisControlData<T>>,
    data: AxisControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.measurement;
    let integral = if data.integral_limit.is_positive() {
        (pid.integral + error * data.dt).clamp_abs(data.integral_limit)
    } else {
        T::zero()
    };
    let derivative = (error - pid.error) / data.dt;

    (error, integral, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn controller(set_point: f32) -> PidController<f32, AxisControlData<f32>> {
        let mut pid = PidController::new();
        pid.compute_fn(compute_axis)
            .set_point(set_point)
            .kp(1.0)
            .ki(1.0)
            .kd(1.0);
        pid
    }

    /// Test that the integral term is clamped to the specified limit.
    #[test]
    fn test_axis_integral_clamping() {
        let mut pid = controller(50.0);
        let data = AxisControlData {
            measurement: 0.0,
            dt: 1.0,
            integral_limit: 100.0,
        };

        for _ in 0..10 {
            let _ = pid.compute(data);
        }

        let (_, integral, _) = compute_axis(&mut pid, data);
        assert!(
            value_close(100.0, integral),
            "Integral should be clamped to 100."
        );
    }

    /// Test that a zero limit keeps the integral at zero.
    #[test]
    fn test_axis_zero_limit_disables_integral() {
        let mut pid = controller(50.0);
        let data = AxisControlData {
            measurement: 0.0,
            dt: 1.0,
            integral_limit: 0.0,
        };

        for _ in 0..5 {
            let _ = pid.compute(data);
            assert!(value_close(0.0, pid.integral), "Integral should stay zero.");
        }
    }

    /// Test the terms for a measurement below the set point.
    #[test]
    fn test_axis_specific_terms() {
        let mut pid = controller(10.0);
        let data = AxisControlData {
            measurement: 7.0,
            dt: 0.5,
            integral_limit: 100.0,
        };

        let (error, integral, derivative) = compute_axis(&mut pid, data);
        assert!(value_close(3.0, error), "Error should be 3.");
        assert!(value_close(1.5, integral), "Integral should be error * dt.");
        assert!(
            value_close(6.0, derivative),
            "Derivative should be measured from the zero initial error."
        );
    }
}
