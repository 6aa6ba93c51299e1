// src/cascade/mixer.rs

//! Quad-X motor mixing.
//!
//! ```text
//!   FL (cw)    FR (ccw)
//!        \    /
//!         \  /   +x forward, +y right
//!         /  \
//!        /    \
//!   AL (ccw)   AR (cw)
//! ```
//!
//! A positive roll command raises the left pair, a positive pitch command
//! raises the aft pair, and a positive yaw command speeds up the clockwise
//! pair. Half of each roll and pitch command goes to each side.

use crate::safety::SafetyGate;
use crate::Number;

/// Rotor positions, in the order of [`MotorCommands::pwm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RotorPosition {
    /// Front left, clockwise.
    FrontLeft = 0,
    /// Front right, counter-clockwise.
    FrontRight = 1,
    /// Aft right, clockwise.
    AftRight = 2,
    /// Aft left, counter-clockwise.
    AftLeft = 3,
}

/// PWM commands for the four motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommands {
    /// Commands indexed by [`RotorPosition`].
    pub pwm: [i32; 4],
}

impl MotorCommands {
    /// Every motor off.
    pub const STOPPED: Self = Self { pwm: [0; 4] };

    /// Command for one rotor.
    pub fn get(&self, rotor: RotorPosition) -> i32 {
        self.pwm[rotor as usize]
    }

    /// `true` when every motor is off.
    pub fn is_stopped(&self) -> bool {
        self.pwm.iter().all(|pwm| *pwm == 0)
    }
}

/// Mixes collective thrust and rate loop commands onto the four rotors,
/// before clamping.
pub fn mix_quad_x<T: Number>(thrust: T, roll: T, pitch: T, yaw: T) -> [T; 4] {
    let two = T::one() + T::one();
    let half_roll = roll / two;
    let half_pitch = pitch / two;

    [
        thrust + half_roll - half_pitch + yaw,
        thrust - half_roll - half_pitch - yaw,
        thrust - half_roll + half_pitch + yaw,
        thrust + half_roll + half_pitch - yaw,
    ]
}

/// Mixes and passes every rotor through the limiter.
pub fn mix_clamped<T: Number>(
    gate: &SafetyGate<T>,
    thrust: T,
    roll: T,
    pitch: T,
    yaw: T,
) -> MotorCommands {
    let mixed = mix_quad_x(thrust, roll, pitch, yaw);
    MotorCommands {
        pwm: mixed.map(|command| gate.clamp_output(command)),
    }
}
