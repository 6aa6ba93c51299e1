// src/pid.rs

//! # PID Control Module
//!
//! This module provides the compute callback, the per-axis state and the
//! evaluator used by every stage of the cascade.

pub mod axis;
pub use axis::*;
pub mod evaluator;
pub use evaluator::*;
