// src/cascade/mode.rs

//! Flight modes of the cascade.

use crate::config::Axis;

/// Which stage of the cascade the setpoint enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlightMode {
    /// Motors stopped, no loop runs.
    #[default]
    Disarmed,
    /// Pilot commands body rates and collective thrust.
    RateOnly,
    /// Pilot commands attitude and either thrust or an altitude.
    AngleHold,
    /// Setpoint is a velocity.
    VelocityHold,
    /// Setpoint is a position.
    PositionHold,
}

impl FlightMode {
    /// `true` for every mode except [`FlightMode::Disarmed`].
    pub const fn is_armed(self) -> bool {
        !matches!(self, FlightMode::Disarmed)
    }

    /// `true` when the loop for `axis` keeps its state across a switch
    /// between armed modes. Only the innermost loop does.
    pub const fn keeps_state_on_switch(axis: Axis) -> bool {
        matches!(axis, Axis::RollRate | Axis::PitchRate | Axis::YawRate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_modes() {
        assert!(!FlightMode::Disarmed.is_armed());
        for mode in [
            FlightMode::RateOnly,
            FlightMode::AngleHold,
            FlightMode::VelocityHold,
            FlightMode::PositionHold,
        ] {
            assert!(mode.is_armed());
        }
        assert_eq!(FlightMode::default(), FlightMode::Disarmed);
    }

    #[test]
    fn test_only_rate_loops_keep_state() {
        let kept = Axis::ALL
            .iter()
            .filter(|axis| FlightMode::keeps_state_on_switch(**axis))
            .count();
        assert_eq!(kept, 3);
        assert!(!FlightMode::keeps_state_on_switch(Axis::RollAngle));
    }
}
