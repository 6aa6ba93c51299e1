// src/safety.rs

//! # Limiter and Safety Gate
//!
//! Final clamp on motor commands and battery voltage classification. The
//! gate is read-only after construction and can be shared freely.

use crate::config::SafetyLimits;
use crate::Number;

/// Battery classification, ordered from healthy to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryStatus {
    /// Above every threshold.
    Normal,
    /// At or below the low threshold. Warning only.
    Low,
    /// At or below the critical threshold. Forces a disarm.
    Critical,
    /// At or below the emergency threshold. Forces a descent.
    EmergencyLanding,
}

impl BatteryStatus {
    /// Numeric severity, `0` for [`BatteryStatus::Normal`].
    pub const fn severity(self) -> u8 {
        self as u8
    }

    /// `true` for the statuses that override pilot input.
    pub const fn is_breach(self) -> bool {
        matches!(self, Self::Critical | Self::EmergencyLanding)
    }
}

/// Clamps actuator commands and classifies battery voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyGate<T> {
    limits: SafetyLimits<T>,
}

impl<T: Number> SafetyGate<T> {
    /// Creates a gate over the given limits.
    pub fn new(limits: SafetyLimits<T>) -> Self {
        Self { limits }
    }

    /// The limits this gate enforces.
    pub fn limits(&self) -> &SafetyLimits<T> {
        &self.limits
    }

    /// Clamps a PWM command to the motor range.
    ///
    /// Commands within the deadband of the zero-thrust command
    /// (`motor_pwm_min`) are forced onto it so motors do not chatter at idle.
    /// `clamp(clamp(x)) == clamp(x)` for every `x`.
    pub fn clamp(&self, pwm: i32) -> i32 {
        let min = self.limits.motor_pwm_min;
        let pwm = Ord::clamp(pwm, min, self.limits.motor_pwm_max);
        // abs_diff: the span of a wide PWM range does not fit in i32.
        if pwm.abs_diff(min) <= self.limits.motor_pwm_deadband.unsigned_abs() {
            min
        } else {
            pwm
        }
    }

    /// Converts a loop output to a clamped PWM command.
    ///
    /// Values that cannot be represented (NaN, out of `i32` range) collapse
    /// onto the nearest bound; NaN becomes zero thrust.
    pub fn clamp_output(&self, command: T) -> i32 {
        let pwm = match command.to_i32() {
            Some(pwm) => pwm,
            None if command.is_positive() => self.limits.motor_pwm_max,
            None => self.limits.motor_pwm_min,
        };
        self.clamp(pwm)
    }

    /// Classifies a battery voltage sample, checking the most severe
    /// threshold first.
    pub fn check_battery(&self, voltage: T) -> BatteryStatus {
        if voltage <= self.limits.emergency_landing_v {
            BatteryStatus::EmergencyLanding
        } else if voltage <= self.limits.battery_critical_v {
            BatteryStatus::Critical
        } else if voltage <= self.limits.battery_low_v {
            BatteryStatus::Low
        } else {
            BatteryStatus::Normal
        }
    }
}
