// src/lib.rs

//! # Cascaded PID Flight Controller
//!
//! This crate provides a `no_std`, no-alloc cascaded PID flight controller
//! for small quad-X vehicles. Position, velocity, angle and rate loops run
//! in series, each bounded by the active tuning profile, and the rate loop
//! output is mixed onto four motors behind a PWM limiter and a battery
//! safety gate.
//!
//! Two tuning presets ship with the crate, `"aggressive"` and `"smooth"`,
//! available through [`load_profile`]. Every stage is generic over
//! [`Number`], so the same code runs on `f32` or fixed-point types.
//!
//! Logging goes through `defmt` when the `defmt` feature is enabled.

#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod cascade;
pub mod config;
pub mod error;
pub mod filter;
pub mod number;
pub mod pid;
pub mod safety;

#[doc(inline)]
pub use cascade::*;
#[doc(inline)]
pub use config::{load_profile, Axis, GainSet, VehicleConfig};
pub use error::ControlError;
pub use number::Number;
pub use safety::{BatteryStatus, SafetyGate};

#[cfg(test)]
mod test_utils;
