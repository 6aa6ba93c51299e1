// src/pid/evaluator.rs

//! # PID Evaluator
//!
//! [`update`] is a pure function: it takes the gains, the previous state and
//! one sample, and returns the output together with the next state. The
//! caller owns the state. [`PidEvaluator`] is the usual owner, one per axis.

use super::{compute_axis, AxisControlData};
use crate::config::GainSet;
use crate::{ControlError, Number};
use piddiy::PidController;
use serde::{Deserialize, Serialize};

/// Integrator and derivative memory of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidState<T> {
    /// Accumulated integral, always within the axis integration limit.
    pub integral: T,
    /// Error seen by the previous update, `None` right after a reset.
    pub previous_error: Option<T>,
    /// Sum of every `dt` accepted since the evaluator was created.
    pub last_timestamp: T,
}

impl<T: Number> PidState<T> {
    /// A freshly reset state.
    pub fn new() -> Self {
        Self {
            integral: T::zero(),
            previous_error: None,
            last_timestamp: T::zero(),
        }
    }

    /// Clears the integral and derivative memory. The timestamp is kept.
    pub fn reset(&mut self) {
        self.integral = T::zero();
        self.previous_error = None;
    }

    /// `true` until the first update after a reset.
    pub fn is_reset(&self) -> bool {
        self.previous_error.is_none()
    }
}

impl<T: Number> Default for PidState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes one PID step.
///
/// The first update after a reset uses the current error as the previous
/// one, so no derivative kick is produced. Fails with
/// [`ControlError::InvalidTimestep`] when `dt` is not positive, and with
/// [`ControlError::NonFiniteInput`] when the setpoint or measurement is NaN
/// or infinite, so the integral never picks up a NaN.
pub fn update<T: Number>(
    gains: &GainSet<T>,
    state: &PidState<T>,
    set_point: T,
    measurement: T,
    dt: T,
) -> Result<(T, PidState<T>), ControlError> {
    if !dt.is_positive() {
        return Err(ControlError::InvalidTimestep);
    }
    if !set_point.is_finite() || !measurement.is_finite() {
        return Err(ControlError::NonFiniteInput);
    }

    let mut pid: PidController<T, AxisControlData<T>> = PidController::new();
    pid.compute_fn(compute_axis)
        .set_point(set_point)
        .kp(gains.kp)
        .ki(gains.ki)
        .kd(gains.kd);
    pid.integral = state.integral;
    pid.error = state.previous_error.unwrap_or(set_point - measurement);

    let output = pid.compute(AxisControlData {
        measurement,
        dt,
        integral_limit: gains.integration_limit,
    });

    let next = PidState {
        integral: pid.integral,
        previous_error: Some(pid.error),
        last_timestamp: state.last_timestamp + dt,
    };
    Ok((output, next))
}

/// Owns the gains and the state of a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidEvaluator<T> {
    gains: GainSet<T>,
    state: PidState<T>,
}

impl<T: Number> PidEvaluator<T> {
    /// Creates an evaluator in the reset state.
    pub fn new(gains: GainSet<T>) -> Self {
        Self {
            gains,
            state: PidState::new(),
        }
    }

    /// Runs one step. On error the state is left untouched.
    pub fn update(&mut self, set_point: T, measurement: T, dt: T) -> Result<T, ControlError> {
        let (output, state) = update(&self.gains, &self.state, set_point, measurement, dt)?;
        self.state = state;
        Ok(output)
    }

    /// Clears integral and derivative memory.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Copy of the current state.
    pub fn state(&self) -> PidState<T> {
        self.state
    }

    /// The gains this evaluator runs with.
    pub fn gains(&self) -> &GainSet<T> {
        &self.gains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Axis, AGGRESSIVE, SMOOTH};
    use crate::test_utils::*;

    fn unit_gains(integration_limit: f32) -> GainSet<f32> {
        GainSet::new(1.0, 1.0, 1.0, integration_limit)
    }

    /// Aggressive roll rate, first tick from a zero state.
    #[test]
    fn test_aggressive_roll_rate_first_tick() {
        let gains = *AGGRESSIVE.profile.gains(Axis::RollRate);
        let (output, state) =
            update(&gains, &PidState::new(), 0.0, 10.0, 0.002).expect("valid timestep");

        let proportional = output - gains.ki * state.integral;
        assert!(
            value_close_within(-2500.0, proportional, 1e-3),
            "Proportional term should be 250 * (0 - 10)."
        );
        assert!(
            value_close(-0.02, state.integral),
            "Integral should be error * dt."
        );
        assert!(
            value_close_within(-2500.66, output, 1e-3),
            "Output should add the small integral term and no derivative."
        );
    }

    /// A zero integration limit removes the integral term for any sequence.
    #[test]
    fn test_zero_limit_has_no_integral_contribution() {
        for axis in [Axis::PositionX, Axis::PositionY, Axis::PositionZ, Axis::Altitude] {
            for config in [AGGRESSIVE, SMOOTH] {
                let gains = GainSet {
                    ki: 5.0,
                    ..*config.profile.gains(axis)
                };
                let mut state = PidState::new();
                let measurements = [0.0, 3.0, -2.5, 10.0, 10.0, -7.25, 0.5];
                for (i, measurement) in measurements.iter().enumerate() {
                    let dt = 0.01 * (i as f32 + 1.0);
                    let (output, next) =
                        update(&gains, &state, 1.0, *measurement, dt).expect("valid timestep");
                    let error = 1.0 - measurement;
                    let derivative = match state.previous_error {
                        Some(previous) => (error - previous) / dt,
                        None => 0.0,
                    };
                    assert_eq!(next.integral, 0.0, "Integral should stay zero.");
                    assert!(
                        value_close(gains.kp * error + gains.kd * derivative, output),
                        "Output should only contain P and D terms."
                    );
                    state = next;
                }
            }
        }
    }

    /// Constant error drives the integral monotonically into the limit.
    #[test]
    fn test_integral_converges_monotonically_to_limit() {
        let gains = unit_gains(2.0);
        let mut state = PidState::new();
        let mut previous = 0.0;
        for _ in 0..100 {
            let (_, next) = update(&gains, &state, 5.0, 0.0, 0.1).expect("valid timestep");
            assert!(next.integral >= previous, "Integral should never decrease.");
            assert!(next.integral <= 2.0, "Integral should never overshoot.");
            previous = next.integral;
            state = next;
        }
        assert!(value_close(2.0, state.integral), "Integral should clamp.");

        let mut state = PidState::new();
        for _ in 0..100 {
            state = update(&gains, &state, -5.0, 0.0, 0.1).expect("valid timestep").1;
            assert!(state.integral >= -2.0, "Integral should never undershoot.");
        }
        assert!(value_close(-2.0, state.integral), "Integral should clamp.");
    }

    /// The first update after a reset produces no derivative kick.
    #[test]
    fn test_no_derivative_kick_after_reset() {
        let gains = GainSet::new(0.0, 0.0, 1.0, 0.0);
        let mut evaluator = PidEvaluator::new(gains);

        let first = evaluator.update(10.0, 0.0, 0.01).expect("valid timestep");
        assert!(value_close(0.0, first), "First update should have no derivative.");

        let second = evaluator.update(10.0, 1.0, 0.01).expect("valid timestep");
        assert!(
            value_close_within(-100.0, second, 1e-3),
            "Derivative should follow the error change."
        );

        evaluator.reset();
        let after_reset = evaluator.update(-50.0, 20.0, 0.01).expect("valid timestep");
        assert!(
            value_close(0.0, after_reset),
            "Stale previous error should not be used after a reset."
        );
    }

    /// Test PID specific response with non-zero values.
    #[test]
    fn test_specific_output() {
        let mut evaluator = PidEvaluator::new(unit_gains(100.0));

        let output = evaluator.update(10.0, 7.0, 1.0).expect("valid timestep");
        assert!(value_close(6.0, output), "Output should be P + I.");
        assert!(value_close(3.0, evaluator.state().integral));

        let output = evaluator.update(10.0, 7.0, 1.0).expect("valid timestep");
        assert!(value_close(9.0, output), "Integral should accumulate to 6.");
    }

    /// Non-positive timesteps are rejected without touching the state.
    #[test]
    fn test_invalid_timestep() {
        let mut evaluator = PidEvaluator::new(unit_gains(10.0));
        evaluator.update(1.0, 0.0, 0.1).expect("valid timestep");
        let before = evaluator.state();

        for dt in [0.0, -0.01, f32::NAN] {
            assert_eq!(
                evaluator.update(1.0, 0.0, dt),
                Err(ControlError::InvalidTimestep)
            );
            assert_eq!(evaluator.state(), before, "State should be untouched.");
        }
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let mut evaluator = PidEvaluator::new(unit_gains(10.0));
        evaluator.update(1.0, 0.0, 0.1).expect("valid timestep");
        let before = evaluator.state();

        for (set_point, measurement) in [(1.0, f32::NAN), (f32::INFINITY, 0.0)] {
            assert_eq!(
                evaluator.update(set_point, measurement, 0.1),
                Err(ControlError::NonFiniteInput)
            );
            assert_eq!(evaluator.state(), before, "State should be untouched.");
        }
        let output = evaluator.update(1.0, 0.0, 0.1).expect("valid timestep");
        assert!(output.is_finite());
    }

    /// The timestamp accumulates accepted timesteps and survives a reset.
    #[test]
    fn test_timestamp_accumulates() {
        let mut evaluator = PidEvaluator::new(unit_gains(10.0));
        for _ in 0..4 {
            evaluator.update(0.0, 0.0, 0.25).expect("valid timestep");
        }
        assert!(value_close(1.0, evaluator.state().last_timestamp));

        evaluator.reset();
        assert!(evaluator.state().is_reset());
        assert!(value_close(1.0, evaluator.state().last_timestamp));
    }

    /// Zero error from a zero state gives zero output.
    #[test]
    fn test_zero_conditions() {
        let (output, state) =
            update(&unit_gains(10.0), &PidState::new(), 0.0, 0.0, 1.0).expect("valid timestep");
        assert!(value_close(0.0, output), "Output should be zero.");
        assert!(value_close(0.0, state.integral), "Integral should be zero.");
    }
}
