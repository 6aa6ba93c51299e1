// src/config/limits.rs

//! Stage limits, smoothing settings and actuator safety bounds.

use crate::{ControlError, Number};
use serde::{Deserialize, Serialize};

/// Bounds applied between cascade stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightLimits<T> {
    /// Roll angle setpoint bound emitted by the velocity loop, degrees.
    pub max_roll_angle_deg: T,
    /// Pitch angle setpoint bound emitted by the velocity loop, degrees.
    pub max_pitch_angle_deg: T,
    /// Yaw rate setpoint bound emitted by the yaw angle loop, degrees per second.
    pub max_yaw_rate_deg_s: T,
    /// Velocity setpoint bound emitted by the position loop, meters per second.
    pub max_velocity_ms: T,
    /// Largest change of the velocity setpoint per second.
    pub max_acceleration_ms2: T,
    /// Bounds on the rate loop input, if the profile limits it.
    pub rate_limits: Option<RateLimits<T>>,
}

/// Rate loop input bounds, degrees per second.
///
/// Unlike [`FlightLimits::max_yaw_rate_deg_s`], these clamp every rate
/// setpoint entering the rate loop, including pilot rate commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimits<T> {
    /// Roll rate bound.
    pub max_roll_rate_deg_s: T,
    /// Pitch rate bound.
    pub max_pitch_rate_deg_s: T,
    /// Yaw rate bound.
    pub max_yaw_rate_deg_s: T,
}

/// Optional measurement filtering and attitude dead zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smoothing<T> {
    /// Exponential filter weights, if the profile filters measurements.
    pub filters: Option<FilterWeights<T>>,
    /// Attitude error dead zones, if the profile uses them.
    pub deadzones: Option<Deadzones<T>>,
}

/// Weights of the previous filtered value in the exponential filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterWeights<T> {
    /// Velocity estimate filter weight.
    pub velocity_alpha: T,
    /// Position estimate filter weight.
    pub position_alpha: T,
    /// Attitude estimate filter weight.
    pub attitude_alpha: T,
}

/// Angle errors smaller than these are treated as zero, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deadzones<T> {
    /// Roll dead zone.
    pub roll_deg: T,
    /// Pitch dead zone.
    pub pitch_deg: T,
    /// Yaw dead zone.
    pub yaw_deg: T,
}

/// Motor PWM bounds and battery thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyLimits<T> {
    /// Lowest PWM command, also the zero-thrust command.
    pub motor_pwm_min: i32,
    /// Highest PWM command.
    pub motor_pwm_max: i32,
    /// Commands within this distance of `motor_pwm_min` collapse onto it.
    pub motor_pwm_deadband: i32,
    /// Battery low warning threshold, volts.
    pub battery_low_v: T,
    /// Battery critical threshold, volts.
    pub battery_critical_v: T,
    /// Emergency landing threshold, volts.
    pub emergency_landing_v: T,
}

/// Conversion from loop outputs to collective thrust.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixerConfig<T> {
    /// Collective PWM that holds a hover.
    pub hover_thrust_pwm: T,
    /// PWM added per unit of vertical velocity loop output.
    pub thrust_scale: T,
}

/// Fixed setpoint used while landing on a depleted battery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingConfig<T> {
    /// Descent speed, meters per second, positive down.
    pub descent_velocity_ms: T,
}

impl<T: Number> FlightLimits<T> {
    /// Checks that every bound is non-negative.
    pub fn validate(&self) -> Result<(), ControlError> {
        let zero = T::zero();
        if self.max_roll_angle_deg < zero
            || self.max_pitch_angle_deg < zero
            || self.max_yaw_rate_deg_s < zero
            || self.max_velocity_ms < zero
            || self.max_acceleration_ms2 < zero
        {
            return Err(ControlError::InvalidConfig("flight limits must be non-negative"));
        }
        if let Some(rates) = self.rate_limits {
            if rates.max_roll_rate_deg_s < zero
                || rates.max_pitch_rate_deg_s < zero
                || rates.max_yaw_rate_deg_s < zero
            {
                return Err(ControlError::InvalidConfig("rate limits must be non-negative"));
            }
        }
        Ok(())
    }
}

impl<T: Number> Smoothing<T> {
    /// Checks filter weights lie in `[0, 1)` and dead zones are non-negative.
    pub fn validate(&self) -> Result<(), ControlError> {
        let zero = T::zero();
        if let Some(filters) = self.filters {
            for alpha in [
                filters.velocity_alpha,
                filters.position_alpha,
                filters.attitude_alpha,
            ] {
                if alpha < zero || !(alpha < T::one()) {
                    return Err(ControlError::InvalidConfig("filter weight must be in [0, 1)"));
                }
            }
        }
        if let Some(zones) = self.deadzones {
            if zones.roll_deg < zero || zones.pitch_deg < zero || zones.yaw_deg < zero {
                return Err(ControlError::InvalidConfig("dead zones must be non-negative"));
            }
        }
        Ok(())
    }
}

impl<T: Number> SafetyLimits<T> {
    /// Checks PWM ordering and threshold ordering.
    pub fn validate(&self) -> Result<(), ControlError> {
        if self.motor_pwm_min > self.motor_pwm_max {
            return Err(ControlError::InvalidConfig("motor_pwm_min exceeds motor_pwm_max"));
        }
        if self.motor_pwm_deadband < 0 {
            return Err(ControlError::InvalidConfig("motor_pwm_deadband must be non-negative"));
        }
        if self.emergency_landing_v > self.battery_critical_v
            || self.battery_critical_v > self.battery_low_v
        {
            return Err(ControlError::InvalidConfig(
                "battery thresholds must satisfy emergency <= critical <= low",
            ));
        }
        Ok(())
    }
}

impl<T: Number> LandingConfig<T> {
    /// Checks the descent speed is positive.
    pub fn validate(&self) -> Result<(), ControlError> {
        if !self.descent_velocity_ms.is_positive() {
            return Err(ControlError::InvalidConfig("descent velocity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{AGGRESSIVE, SMOOTH};

    #[test]
    fn test_builtin_limits_are_valid() {
        for config in [AGGRESSIVE, SMOOTH] {
            assert_eq!(config.limits.validate(), Ok(()));
            assert_eq!(config.safety.validate(), Ok(()));
            assert_eq!(config.landing.validate(), Ok(()));
        }
    }

    #[test]
    fn test_smooth_yaw_rate_bounds_are_distinct() {
        let limits = SMOOTH.limits;
        let rates = limits.rate_limits.expect("smooth profile limits rates");
        assert_eq!(limits.max_yaw_rate_deg_s, 150.0);
        assert_eq!(rates.max_yaw_rate_deg_s, 100.0);
    }

    #[test]
    fn test_inverted_pwm_bounds_rejected() {
        let mut safety = AGGRESSIVE.safety;
        safety.motor_pwm_min = 70000;
        assert!(safety.validate().is_err());
    }

    #[test]
    fn test_unordered_battery_thresholds_rejected() {
        let mut safety = AGGRESSIVE.safety;
        safety.emergency_landing_v = 3.6;
        assert!(safety.validate().is_err());
    }

    #[test]
    fn test_filter_weight_of_one_rejected() {
        let mut smoothing = SMOOTH.smoothing.expect("smooth profile filters");
        if let Some(filters) = smoothing.filters.as_mut() {
            filters.position_alpha = 1.0;
        }
        assert!(smoothing.validate().is_err());
    }
}
