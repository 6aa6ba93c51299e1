// src/config/gains.rs

//! # Gain Table
//!
//! Per-axis PID gain tuples and the profile that maps every control axis to
//! one of them.

use crate::Number;
use serde::{Deserialize, Serialize};

/// PID gains for a single control axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GainSet<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain.
    pub kd: T,
    /// Symmetric bound on the accumulated integral. Zero disables the
    /// integral term for this axis.
    pub integration_limit: T,
}

impl<T: Number> GainSet<T> {
    /// Creates a gain set.
    pub const fn new(kp: T, ki: T, kd: T, integration_limit: T) -> Self {
        Self {
            kp,
            ki,
            kd,
            integration_limit,
        }
    }

    /// `true` when the integral term contributes nothing.
    pub fn integral_disabled(&self) -> bool {
        !self.integration_limit.is_positive()
    }
}

/// Control axes of the cascade, outermost last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Roll rate loop, degrees per second.
    RollRate,
    /// Pitch rate loop, degrees per second.
    PitchRate,
    /// Yaw rate loop, degrees per second.
    YawRate,
    /// Roll angle loop, degrees.
    RollAngle,
    /// Pitch angle loop, degrees.
    PitchAngle,
    /// Yaw angle loop, degrees.
    YawAngle,
    /// Velocity loop along x, meters per second.
    VelocityX,
    /// Velocity loop along y, meters per second.
    VelocityY,
    /// Velocity loop along z, meters per second.
    VelocityZ,
    /// Position loop along x, meters.
    PositionX,
    /// Position loop along y, meters.
    PositionY,
    /// Position loop along z, meters.
    PositionZ,
    /// Altitude hold loop, meters.
    Altitude,
}

impl Axis {
    /// Number of axes.
    pub const COUNT: usize = 13;

    /// Every axis, ordered by [`Axis::index`].
    pub const ALL: [Axis; Axis::COUNT] = [
        Axis::RollRate,
        Axis::PitchRate,
        Axis::YawRate,
        Axis::RollAngle,
        Axis::PitchAngle,
        Axis::YawAngle,
        Axis::VelocityX,
        Axis::VelocityY,
        Axis::VelocityZ,
        Axis::PositionX,
        Axis::PositionY,
        Axis::PositionZ,
        Axis::Altitude,
    ];

    /// Stable index of the axis, suitable for array storage.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in configuration records.
    pub const fn name(self) -> &'static str {
        match self {
            Axis::RollRate => "roll_rate",
            Axis::PitchRate => "pitch_rate",
            Axis::YawRate => "yaw_rate",
            Axis::RollAngle => "roll_angle",
            Axis::PitchAngle => "pitch_angle",
            Axis::YawAngle => "yaw_angle",
            Axis::VelocityX => "velocity_x",
            Axis::VelocityY => "velocity_y",
            Axis::VelocityZ => "velocity_z",
            Axis::PositionX => "position_x",
            Axis::PositionY => "position_y",
            Axis::PositionZ => "position_z",
            Axis::Altitude => "altitude",
        }
    }

    /// Looks an axis up by its snake-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

/// Gain sets for every axis of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerProfile<T> {
    /// Roll rate gains.
    pub roll_rate: GainSet<T>,
    /// Pitch rate gains.
    pub pitch_rate: GainSet<T>,
    /// Yaw rate gains.
    pub yaw_rate: GainSet<T>,
    /// Roll angle gains.
    pub roll_angle: GainSet<T>,
    /// Pitch angle gains.
    pub pitch_angle: GainSet<T>,
    /// Yaw angle gains.
    pub yaw_angle: GainSet<T>,
    /// Velocity x gains.
    pub velocity_x: GainSet<T>,
    /// Velocity y gains.
    pub velocity_y: GainSet<T>,
    /// Velocity z gains.
    pub velocity_z: GainSet<T>,
    /// Position x gains.
    pub position_x: GainSet<T>,
    /// Position y gains.
    pub position_y: GainSet<T>,
    /// Position z gains.
    pub position_z: GainSet<T>,
    /// Altitude hold gains.
    pub altitude: GainSet<T>,
}

impl<T> ControllerProfile<T> {
    /// Gains for one axis.
    pub fn gains(&self, axis: Axis) -> &GainSet<T> {
        match axis {
            Axis::RollRate => &self.roll_rate,
            Axis::PitchRate => &self.pitch_rate,
            Axis::YawRate => &self.yaw_rate,
            Axis::RollAngle => &self.roll_angle,
            Axis::PitchAngle => &self.pitch_angle,
            Axis::YawAngle => &self.yaw_angle,
            Axis::VelocityX => &self.velocity_x,
            Axis::VelocityY => &self.velocity_y,
            Axis::VelocityZ => &self.velocity_z,
            Axis::PositionX => &self.position_x,
            Axis::PositionY => &self.position_y,
            Axis::PositionZ => &self.position_z,
            Axis::Altitude => &self.altitude,
        }
    }
}

impl<T: Number> ControllerProfile<T> {
    /// Checks that every integration limit is non-negative.
    pub fn validate(&self) -> Result<(), crate::ControlError> {
        for axis in Axis::ALL {
            if self.gains(axis).integration_limit < T::zero() {
                return Err(crate::ControlError::InvalidConfig(
                    "integration limit must be non-negative",
                ));
            }
        }
        Ok(())
    }
}
