// src/config/builtin.rs

//! Built-in flight tuning presets.

use super::{
    CollisionAvoidance, ControllerProfile, Datarate, Deadzones, FilterWeights, FlightLimits,
    Formation, GainSet, LandingConfig, MixerConfig, NamedProfile, RateLimits, SafetyLimits,
    Smoothing, SwarmParameters, VehicleConfig,
};

const fn gains(kp: f32, ki: f32, kd: f32, integration_limit: f32) -> GainSet<f32> {
    GainSet {
        kp,
        ki,
        kd,
        integration_limit,
    }
}

// Crazyflie 2.x collective that holds a hover.
const HOVER_THRUST_PWM: f32 = 36000.0;
const THRUST_SCALE: f32 = 1000.0;

/// High-performance tuning for fast maneuvers.
pub const AGGRESSIVE: VehicleConfig<f32> = VehicleConfig {
    profile: ControllerProfile {
        roll_rate: gains(250.0, 33.0, 0.0, 33.3),
        pitch_rate: gains(250.0, 33.0, 0.0, 33.3),
        yaw_rate: gains(120.0, 16.7, 0.0, 166.7),
        roll_angle: gains(6.0, 3.0, 0.0, 20.0),
        pitch_angle: gains(6.0, 3.0, 0.0, 20.0),
        yaw_angle: gains(6.0, 1.0, 0.35, 360.0),
        velocity_x: gains(2.0, 0.5, 0.0, 1.0),
        velocity_y: gains(2.0, 0.5, 0.0, 1.0),
        velocity_z: gains(2.0, 0.5, 0.0, 1.0),
        position_x: gains(1.0, 0.0, 0.0, 0.0),
        position_y: gains(1.0, 0.0, 0.0, 0.0),
        position_z: gains(1.0, 0.0, 0.0, 0.0),
        altitude: gains(1.0, 0.0, 0.0, 0.0),
    },
    limits: FlightLimits {
        max_roll_angle_deg: 30.0,
        max_pitch_angle_deg: 30.0,
        max_yaw_rate_deg_s: 200.0,
        max_velocity_ms: 1.0,
        max_acceleration_ms2: 2.0,
        rate_limits: None,
    },
    smoothing: None,
    safety: SafetyLimits {
        motor_pwm_min: 10000,
        motor_pwm_max: 60000,
        motor_pwm_deadband: 1000,
        battery_low_v: 3.7,
        battery_critical_v: 3.5,
        emergency_landing_v: 3.3,
    },
    mixer: MixerConfig {
        hover_thrust_pwm: HOVER_THRUST_PWM,
        thrust_scale: THRUST_SCALE,
    },
    landing: LandingConfig {
        descent_velocity_ms: 0.3,
    },
    swarm: SwarmParameters {
        radio_channel: 80,
        radio_datarate: Datarate::Mbps2,
        radio_power: 0,
        swarm_max_distance_m: 50.0,
        collision: CollisionAvoidance {
            enabled: true,
            min_separation_m: 0.3,
            range_m: 2.0,
        },
        formation: Formation {
            enabled: true,
            tolerance_m: 0.1,
            max_speed_ms: 0.5,
        },
    },
};

/// Conservative tuning for stable flight and precise positioning.
pub const SMOOTH: VehicleConfig<f32> = VehicleConfig {
    profile: ControllerProfile {
        roll_rate: gains(200.0, 25.0, 0.0, 25.0),
        pitch_rate: gains(200.0, 25.0, 0.0, 25.0),
        yaw_rate: gains(100.0, 10.0, 0.0, 100.0),
        roll_angle: gains(4.0, 2.0, 0.0, 15.0),
        pitch_angle: gains(4.0, 2.0, 0.0, 15.0),
        yaw_angle: gains(4.0, 0.5, 0.2, 180.0),
        velocity_x: gains(1.5, 0.3, 0.0, 0.8),
        velocity_y: gains(1.5, 0.3, 0.0, 0.8),
        velocity_z: gains(1.5, 0.3, 0.0, 0.8),
        position_x: gains(0.8, 0.0, 0.0, 0.0),
        position_y: gains(0.8, 0.0, 0.0, 0.0),
        position_z: gains(0.8, 0.0, 0.0, 0.0),
        altitude: gains(0.8, 0.0, 0.0, 0.0),
    },
    limits: FlightLimits {
        max_roll_angle_deg: 20.0,
        max_pitch_angle_deg: 20.0,
        max_yaw_rate_deg_s: 150.0,
        max_velocity_ms: 0.5,
        max_acceleration_ms2: 1.0,
        rate_limits: Some(RateLimits {
            max_roll_rate_deg_s: 100.0,
            max_pitch_rate_deg_s: 100.0,
            max_yaw_rate_deg_s: 100.0,
        }),
    },
    smoothing: Some(Smoothing {
        filters: Some(FilterWeights {
            velocity_alpha: 0.8,
            position_alpha: 0.9,
            attitude_alpha: 0.95,
        }),
        deadzones: Some(Deadzones {
            roll_deg: 0.5,
            pitch_deg: 0.5,
            yaw_deg: 1.0,
        }),
    }),
    safety: SafetyLimits {
        motor_pwm_min: 10000,
        motor_pwm_max: 50000,
        motor_pwm_deadband: 1000,
        battery_low_v: 3.7,
        battery_critical_v: 3.5,
        emergency_landing_v: 3.3,
    },
    mixer: MixerConfig {
        hover_thrust_pwm: HOVER_THRUST_PWM,
        thrust_scale: THRUST_SCALE,
    },
    landing: LandingConfig {
        descent_velocity_ms: 0.2,
    },
    swarm: SwarmParameters {
        radio_channel: 80,
        radio_datarate: Datarate::Mbps2,
        radio_power: 0,
        swarm_max_distance_m: 30.0,
        collision: CollisionAvoidance {
            enabled: true,
            min_separation_m: 0.5,
            range_m: 1.5,
        },
        formation: Formation {
            enabled: true,
            tolerance_m: 0.05,
            max_speed_ms: 0.3,
        },
    },
};

/// The presets available through [`load_profile`](super::load_profile).
pub static BUILTIN_PROFILES: [NamedProfile<'static, f32>; 2] = [
    NamedProfile {
        name: "aggressive",
        config: AGGRESSIVE,
    },
    NamedProfile {
        name: "smooth",
        config: SMOOTH,
    },
];
