// src/config/swarm.rs

//! Radio and swarm parameters.
//!
//! The control core never reads these. They travel with the profile so the
//! radio and swarm collaborators are configured from the same record.

use serde::{Deserialize, Serialize};

/// Radio link data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Datarate {
    /// 250 kbit/s.
    Kbps250 = 0,
    /// 1 Mbit/s.
    Mbps1 = 1,
    /// 2 Mbit/s.
    Mbps2 = 2,
}

impl Datarate {
    /// Radio register code for this rate.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Rate for a radio register code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Kbps250),
            1 => Some(Self::Mbps1),
            2 => Some(Self::Mbps2),
            _ => None,
        }
    }
}

/// Collision avoidance tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionAvoidance<T> {
    /// Whether the swarm layer runs collision avoidance.
    pub enabled: bool,
    /// Minimum distance kept between vehicles, meters.
    pub min_separation_m: T,
    /// Distance at which avoidance starts reacting, meters.
    pub range_m: T,
}

/// Formation flight tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formation<T> {
    /// Whether the swarm layer flies formations.
    pub enabled: bool,
    /// Accepted position error inside a formation, meters.
    pub tolerance_m: T,
    /// Formation speed cap, meters per second.
    pub max_speed_ms: T,
}

/// Parameters handed unchanged to the radio and swarm layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwarmParameters<T> {
    /// Radio channel.
    pub radio_channel: u8,
    /// Radio data rate.
    pub radio_datarate: Datarate,
    /// Transmit power setting, 0 is the strongest.
    pub radio_power: u8,
    /// Largest distance from the swarm origin, meters.
    pub swarm_max_distance_m: T,
    /// Collision avoidance tolerances.
    pub collision: CollisionAvoidance<T>,
    /// Formation tolerances.
    pub formation: Formation<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datarate_codes() {
        for rate in [Datarate::Kbps250, Datarate::Mbps1, Datarate::Mbps2] {
            assert_eq!(Datarate::from_code(rate.code()), Some(rate));
        }
        assert_eq!(Datarate::from_code(3), None);
        assert_eq!(Datarate::Mbps2.code(), 2);
    }
}
