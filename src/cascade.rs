// src/cascade.rs

//! # Cascade Control Module
//!
//! Composes the per-axis evaluators into the position, velocity, angle and
//! rate loops, mixes the rate loop output onto four motors and enforces the
//! safety gate.

pub mod controller;
pub use controller::*;
pub mod frame;
pub use frame::*;
pub mod mixer;
pub use mixer::*;
pub mod mode;
pub use mode::*;
