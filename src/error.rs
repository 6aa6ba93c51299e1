// src/error.rs

//! Error kinds reported by the control core.

use core::fmt;

use crate::cascade::FlightMode;
use crate::safety::BatteryStatus;

/// Errors raised while loading configuration or running the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// No profile with the requested name exists. Fatal at load time.
    UnknownProfile,
    /// A configuration record violates one of its invariants.
    InvalidConfig(&'static str),
    /// A PID update was requested with `dt <= 0` (or NaN).
    InvalidTimestep,
    /// A setpoint or measurement was NaN or infinite.
    NonFiniteInput,
    /// The battery gate classified the supply as unsafe for normal flight.
    SafetyBreach(BatteryStatus),
    /// The requested mode change is not allowed from the current mode.
    InvalidModeTransition {
        /// Mode the controller was in.
        from: FlightMode,
        /// Mode that was requested.
        to: FlightMode,
    },
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProfile => f.write_str("unknown controller profile"),
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            Self::InvalidTimestep => f.write_str("timestep must be positive"),
            Self::NonFiniteInput => f.write_str("setpoint or measurement is not finite"),
            Self::SafetyBreach(status) => write!(f, "safety breach: battery {:?}", status),
            Self::InvalidModeTransition { from, to } => {
                write!(f, "mode transition {:?} -> {:?} not allowed", from, to)
            }
        }
    }
}

impl core::error::Error for ControlError {}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_display_names_the_fault() {
        assert_eq!(
            ControlError::InvalidTimestep.to_string(),
            "timestep must be positive"
        );
        assert_eq!(
            ControlError::SafetyBreach(BatteryStatus::Critical).to_string(),
            "safety breach: battery Critical"
        );
        assert_eq!(
            ControlError::InvalidModeTransition {
                from: FlightMode::Disarmed,
                to: FlightMode::Disarmed,
            }
            .to_string(),
            "mode transition Disarmed -> Disarmed not allowed"
        );
    }
}
