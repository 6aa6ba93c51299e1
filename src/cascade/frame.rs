// src/cascade/frame.rs

//! Inputs and outputs of one control tick.

use super::{FlightMode, MotorCommands};
use crate::config::Axis;
use crate::pid::PidState;
use crate::safety::BatteryStatus;
use crate::{ControlError, Number};

/// Sensor estimates sampled for one tick.
///
/// Angles are degrees, rates degrees per second, velocity meters per
/// second, position meters, in the heading-aligned frame with z up.
/// Heading is expected unwrapped (continuous across full turns).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame<T> {
    /// Time the estimates were sampled, seconds.
    pub timestamp: T,
    /// (roll, pitch, yaw) attitude.
    pub attitude: (T, T, T),
    /// (roll rate, pitch rate, yaw rate) from the gyroscope.
    pub gyro_rate: (T, T, T),
    /// (x, y, z) velocity estimate.
    pub velocity: (T, T, T),
    /// (x, y, z) position estimate.
    pub position: (T, T, T),
    /// Battery voltage, volts.
    pub battery_voltage: T,
}

/// Commanded targets. The active mode decides which fields are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint<T> {
    /// (x, y, z) target, read in [`FlightMode::PositionHold`].
    pub position: (T, T, T),
    /// (x, y, z) target, read in [`FlightMode::VelocityHold`].
    pub velocity: (T, T, T),
    /// (roll, pitch, yaw) target, read in [`FlightMode::AngleHold`]. The
    /// yaw component is also the heading target of the velocity and
    /// position modes.
    pub attitude: (T, T, T),
    /// (roll, pitch, yaw) rate target, read in [`FlightMode::RateOnly`].
    pub rate: (T, T, T),
    /// Collective PWM for [`FlightMode::RateOnly`] and
    /// [`FlightMode::AngleHold`].
    pub thrust: T,
    /// Altitude target that replaces `thrust` in [`FlightMode::AngleHold`].
    pub altitude: Option<T>,
}

impl<T: Number> Setpoint<T> {
    /// All targets zero, no altitude hold.
    pub fn new() -> Self {
        let zero = (T::zero(), T::zero(), T::zero());
        Self {
            position: zero,
            velocity: zero,
            attitude: zero,
            rate: zero,
            thrust: T::zero(),
            altitude: None,
        }
    }
}

impl<T: Number> Default for Setpoint<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one control tick, for the actuator and flight-mode layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Clamped motor commands to apply.
    pub motors: MotorCommands,
    /// Mode after the tick.
    pub mode: FlightMode,
    /// Battery classification of this tick's sample.
    pub battery: BatteryStatus,
    /// `true` while the emergency descent overrides the setpoint.
    pub emergency_landing: bool,
    /// Safety breach or recovered fault raised during the tick.
    pub fault: Option<ControlError>,
}

/// Copy of the controller state for telemetry readers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSnapshot<T> {
    /// Current mode.
    pub mode: FlightMode,
    /// Whether the emergency descent is latched.
    pub emergency_landing: bool,
    /// Last battery classification.
    pub battery: BatteryStatus,
    /// Consecutive ticks rejected for an invalid timestep or non-finite input.
    pub input_faults: u8,
    /// Last motor commands.
    pub motors: MotorCommands,
    /// Timestamp of the last sensor frame.
    pub timestamp: T,
    pid: [PidState<T>; Axis::COUNT],
}

impl<T> ControlSnapshot<T> {
    pub(crate) fn new(
        mode: FlightMode,
        emergency_landing: bool,
        battery: BatteryStatus,
        input_faults: u8,
        motors: MotorCommands,
        timestamp: T,
        pid: [PidState<T>; Axis::COUNT],
    ) -> Self {
        Self {
            mode,
            emergency_landing,
            battery,
            input_faults,
            motors,
            timestamp,
            pid,
        }
    }

    /// PID state of one axis.
    pub fn pid_state(&self, axis: Axis) -> &PidState<T> {
        &self.pid[axis.index()]
    }
}
