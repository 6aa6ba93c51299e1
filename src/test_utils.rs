// src/test_utils.rs

//! This module contains utilities for testing.

use crate::cascade::SensorFrame;

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
pub fn value_close(target: f32, value: f32) -> bool {
    value_close_within(target, value, TEST_TOLERANCE)
}

/// Checks if two floating point numbers differ by less than `tolerance`.
/// Used where the magnitudes involved make `TEST_TOLERANCE` too strict.
pub fn value_close_within(target: f32, value: f32, tolerance: f32) -> bool {
    (target - value).abs() < tolerance
}

/// Checks if each of the components in a vector is close enough to
/// be considered equal.
pub fn vector_close(target: (f32, f32, f32), value: (f32, f32, f32)) -> bool {
    value_close(target.0, value.0)
        && value_close(target.1, value.1)
        && value_close(target.2, value.2)
}

/// A vehicle hovering level at the origin on a healthy battery.
pub fn hover_frame() -> SensorFrame<f32> {
    SensorFrame {
        timestamp: 0.0,
        attitude: (0.0, 0.0, 0.0),
        gyro_rate: (0.0, 0.0, 0.0),
        velocity: (0.0, 0.0, 0.0),
        position: (0.0, 0.0, 0.0),
        battery_voltage: 4.1,
    }
}

/// [`hover_frame`] with the given battery voltage.
pub fn frame_with_voltage(battery_voltage: f32) -> SensorFrame<f32> {
    SensorFrame {
        battery_voltage,
        ..hover_frame()
    }
}
