// src/config.rs

//! # Vehicle Configuration
//!
//! Configuration records injected into the controller at construction.
//! Nothing here is global: each controller owns a copy of its
//! [`VehicleConfig`], so vehicles with different profiles can share a
//! process. Every record derives `serde` traits so profiles can be loaded
//! from structured data at runtime instead of being compiled in.

pub mod builtin;
pub use builtin::*;
pub mod gains;
pub use gains::*;
pub mod limits;
pub use limits::*;
pub mod swarm;
pub use swarm::*;
pub mod table;
pub use table::*;

use crate::{ControlError, Number};
use serde::{Deserialize, Serialize};

/// Everything a profile defines for one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig<T> {
    /// Per-axis PID gains.
    pub profile: ControllerProfile<T>,
    /// Bounds between cascade stages.
    pub limits: FlightLimits<T>,
    /// Measurement filters and dead zones, if any.
    pub smoothing: Option<Smoothing<T>>,
    /// Motor PWM bounds and battery thresholds.
    pub safety: SafetyLimits<T>,
    /// Thrust mapping for the mixer.
    pub mixer: MixerConfig<T>,
    /// Emergency descent setpoint.
    pub landing: LandingConfig<T>,
    /// Radio and swarm parameters, passed through untouched.
    pub swarm: SwarmParameters<T>,
}

impl<T: Number> VehicleConfig<T> {
    /// Checks every invariant of the contained records.
    pub fn validate(&self) -> Result<(), ControlError> {
        self.profile.validate()?;
        self.limits.validate()?;
        if let Some(smoothing) = &self.smoothing {
            smoothing.validate()?;
        }
        self.safety.validate()?;
        self.landing.validate()
    }
}
