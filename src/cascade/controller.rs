// src/cascade/controller.rs

//! # Cascade Flight Controller
//!
//! Runs the position, velocity, angle and rate loops for one vehicle.
//!
//! ## Overview
//!
//! Every tick starts with the safety gate. A critical battery disarms at
//! once; an emergency-landing battery latches a fixed descent setpoint that
//! replaces pilot input until the vehicle is disarmed. The cascade then
//! enters at the stage selected by the [`FlightMode`] and runs outer to
//! inner: each stage's output is the next stage's setpoint, bounded by the
//! profile's [`FlightLimits`](crate::config::FlightLimits). The rate loop
//! output is mixed onto four motors and clamped by the limiter.
//!
//! A tick with an invalid timestep, or with a NaN or infinite setpoint or
//! measurement, holds the previous motor output. Three such ticks in a row
//! disarm the vehicle.
//!
//! ## State
//!
//! Configuration is copied in at construction and never changes. Loop state
//! is only touched through `&mut self`; telemetry should read
//! [`CascadeController::snapshot`] copies.

use super::{
    mix_clamped, ControlSnapshot, FlightMode, MotorCommands, SensorFrame, Setpoint, TickReport,
};
use crate::config::{load_profile, Axis, VehicleConfig};
use crate::filter::{apply_deadzone, slew, ExpFilter};
use crate::pid::PidEvaluator;
use crate::safety::{BatteryStatus, SafetyGate};
use crate::{ControlError, Number};

/// Consecutive rejected ticks tolerated before a forced disarm.
pub const MAX_INPUT_FAULTS: u8 = 3;

/// Cascaded PID controller for a quad-X vehicle.
pub struct CascadeController<T: Number> {
    config: VehicleConfig<T>,
    gate: SafetyGate<T>,
    pids: [PidEvaluator<T>; Axis::COUNT],
    mode: FlightMode,
    emergency_landing: bool,
    battery: BatteryStatus,
    input_faults: u8,
    last_motors: MotorCommands,
    timestamp: T,
    // Slewed velocity setpoint, `None` until the velocity loop first runs.
    velocity_command: Option<(T, T, T)>,
    attitude_filter: Option<ExpFilter<T>>,
    velocity_filter: Option<ExpFilter<T>>,
    position_filter: Option<ExpFilter<T>>,
}

impl<T: Number> CascadeController<T> {
    /// Creates a disarmed controller, rejecting invalid configuration.
    pub fn with_config(config: VehicleConfig<T>) -> Result<Self, ControlError> {
        config.validate()?;

        let pids =
            core::array::from_fn(|i| PidEvaluator::new(*config.profile.gains(Axis::ALL[i])));
        let filters = config.smoothing.and_then(|smoothing| smoothing.filters);

        Ok(Self {
            config,
            gate: SafetyGate::new(config.safety),
            pids,
            mode: FlightMode::Disarmed,
            emergency_landing: false,
            battery: BatteryStatus::Normal,
            input_faults: 0,
            last_motors: MotorCommands::STOPPED,
            timestamp: T::zero(),
            velocity_command: None,
            attitude_filter: filters.map(|f| ExpFilter::new(f.attitude_alpha)),
            velocity_filter: filters.map(|f| ExpFilter::new(f.velocity_alpha)),
            position_filter: filters.map(|f| ExpFilter::new(f.position_alpha)),
        })
    }

    /// The configuration this controller runs with.
    pub fn config(&self) -> &VehicleConfig<T> {
        &self.config
    }

    /// The limiter and battery gate.
    pub fn gate(&self) -> &SafetyGate<T> {
        &self.gate
    }

    /// Current mode.
    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// `true` while the emergency descent overrides the setpoint.
    pub fn is_emergency_landing(&self) -> bool {
        self.emergency_landing
    }

    /// Evaluator of one axis.
    pub fn pid(&self, axis: Axis) -> &PidEvaluator<T> {
        &self.pids[axis.index()]
    }

    /// Arms into `mode`, starting every loop from a reset state.
    ///
    /// Only allowed from [`FlightMode::Disarmed`] into an armed mode, and
    /// refused while the last battery sample was a breach.
    pub fn arm(&mut self, mode: FlightMode) -> Result<(), ControlError> {
        if self.mode.is_armed() || !mode.is_armed() {
            return Err(ControlError::InvalidModeTransition {
                from: self.mode,
                to: mode,
            });
        }
        if self.battery.is_breach() {
            warn!("arm refused, battery {}", self.battery);
            return Err(ControlError::SafetyBreach(self.battery));
        }

        for pid in self.pids.iter_mut() {
            pid.reset();
        }
        self.reset_smoothing();
        self.emergency_landing = false;
        self.input_faults = 0;
        self.mode = mode;
        info!("armed in {}", mode);
        Ok(())
    }

    /// Switches between armed modes. Loops outside the rate loop restart
    /// from a reset state. Switching to [`FlightMode::Disarmed`] disarms.
    pub fn set_mode(&mut self, mode: FlightMode) -> Result<(), ControlError> {
        if !mode.is_armed() {
            self.disarm();
            return Ok(());
        }
        if !self.mode.is_armed() {
            return Err(ControlError::InvalidModeTransition {
                from: self.mode,
                to: mode,
            });
        }
        if mode != self.mode {
            for axis in Axis::ALL {
                if !FlightMode::keeps_state_on_switch(axis) {
                    self.pids[axis.index()].reset();
                }
            }
            self.velocity_command = None;
            info!("mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
        Ok(())
    }

    /// Stops the motors. Also the emergency stop.
    pub fn disarm(&mut self) {
        if self.mode.is_armed() {
            info!("disarmed from {}", self.mode);
        }
        self.mode = FlightMode::Disarmed;
        self.emergency_landing = false;
        self.last_motors = MotorCommands::STOPPED;
    }

    /// Runs one control period.
    pub fn tick(&mut self, setpoint: &Setpoint<T>, sensors: &SensorFrame<T>, dt: T) -> TickReport {
        self.timestamp = sensors.timestamp;
        let mut fault = self.check_battery(sensors.battery_voltage);

        let motors = if !self.mode.is_armed() {
            MotorCommands::STOPPED
        } else {
            match self.run_cascade(setpoint, sensors, dt) {
                Ok(motors) => {
                    self.input_faults = 0;
                    motors
                }
                Err(err) => {
                    fault = fault.or(Some(err));
                    self.hold_after_fault()
                }
            }
        };
        self.last_motors = motors;

        TickReport {
            motors,
            mode: self.mode,
            battery: self.battery,
            emergency_landing: self.emergency_landing,
            fault,
        }
    }

    /// Copy of the controller state for telemetry.
    pub fn snapshot(&self) -> ControlSnapshot<T> {
        ControlSnapshot::new(
            self.mode,
            self.emergency_landing,
            self.battery,
            self.input_faults,
            self.last_motors,
            self.timestamp,
            core::array::from_fn(|i| self.pids[i].state()),
        )
    }

    fn check_battery(&mut self, voltage: T) -> Option<ControlError> {
        let mut status = self.gate.check_battery(voltage);
        if self.emergency_landing {
            // The descent stays latched until disarm.
            status = BatteryStatus::EmergencyLanding;
        }
        let previous = core::mem::replace(&mut self.battery, status);

        match status {
            BatteryStatus::Normal => None,
            BatteryStatus::Low => {
                if previous != BatteryStatus::Low {
                    warn!("battery low");
                }
                None
            }
            BatteryStatus::Critical => {
                if self.mode.is_armed() {
                    error!("battery critical, forcing disarm");
                    self.disarm();
                }
                Some(ControlError::SafetyBreach(status))
            }
            BatteryStatus::EmergencyLanding => {
                if self.mode.is_armed() && !self.emergency_landing {
                    error!("battery exhausted, emergency landing");
                    self.emergency_landing = true;
                    self.velocity_command = None;
                }
                Some(ControlError::SafetyBreach(status))
            }
        }
    }

    fn hold_after_fault(&mut self) -> MotorCommands {
        self.input_faults = self.input_faults.saturating_add(1);
        if self.input_faults >= MAX_INPUT_FAULTS {
            error!("{} consecutive rejected ticks, forcing disarm", self.input_faults);
            self.disarm();
            MotorCommands::STOPPED
        } else {
            warn!("tick rejected, holding output");
            self.last_motors
        }
    }

    fn reset_smoothing(&mut self) {
        self.velocity_command = None;
        for filter in [
            &mut self.attitude_filter,
            &mut self.velocity_filter,
            &mut self.position_filter,
        ]
        .into_iter()
        .flatten()
        {
            filter.reset();
        }
    }

    fn step(&mut self, axis: Axis, set_point: T, measurement: T, dt: T) -> Result<T, ControlError> {
        self.pids[axis.index()].update(set_point, measurement, dt)
    }

    fn run_cascade(
        &mut self,
        setpoint: &Setpoint<T>,
        sensors: &SensorFrame<T>,
        dt: T,
    ) -> Result<MotorCommands, ControlError> {
        if !dt.is_positive() {
            return Err(ControlError::InvalidTimestep);
        }
        // Checked before the filters and the slew so no NaN is remembered.
        if !sensors_finite(sensors) || !setpoint_finite(setpoint) {
            return Err(ControlError::NonFiniteInput);
        }

        let attitude = match self.attitude_filter.as_mut() {
            Some(filter) => filter.apply(sensors.attitude),
            None => sensors.attitude,
        };
        let velocity = match self.velocity_filter.as_mut() {
            Some(filter) => filter.apply(sensors.velocity),
            None => sensors.velocity,
        };
        let position = match self.position_filter.as_mut() {
            Some(filter) => filter.apply(sensors.position),
            None => sensors.position,
        };
        let max_velocity = self.config.limits.max_velocity_ms;

        let (rate_set_point, thrust) = if self.emergency_landing {
            let descent = (
                T::zero(),
                T::zero(),
                -self.config.landing.descent_velocity_ms,
            );
            // Hold the current heading on the way down.
            let (attitude_set_point, thrust) =
                self.velocity_stage(descent, velocity, attitude.2, dt)?;
            (self.angle_stage(attitude_set_point, attitude, dt)?, thrust)
        } else {
            match self.mode {
                FlightMode::Disarmed => return Ok(MotorCommands::STOPPED),
                FlightMode::RateOnly => (setpoint.rate, setpoint.thrust),
                FlightMode::AngleHold => {
                    let limits = self.config.limits;
                    let attitude_set_point = (
                        setpoint.attitude.0.clamp_abs(limits.max_roll_angle_deg),
                        setpoint.attitude.1.clamp_abs(limits.max_pitch_angle_deg),
                        setpoint.attitude.2,
                    );
                    let thrust = match setpoint.altitude {
                        Some(altitude) => {
                            let climb = self
                                .step(Axis::Altitude, altitude, position.2, dt)?
                                .clamp_abs(max_velocity);
                            self.collective(climb, velocity.2, dt)?
                        }
                        None => setpoint.thrust,
                    };
                    (self.angle_stage(attitude_set_point, attitude, dt)?, thrust)
                }
                FlightMode::VelocityHold => {
                    let target = (
                        setpoint.velocity.0.clamp_abs(max_velocity),
                        setpoint.velocity.1.clamp_abs(max_velocity),
                        setpoint.velocity.2.clamp_abs(max_velocity),
                    );
                    let (attitude_set_point, thrust) =
                        self.velocity_stage(target, velocity, setpoint.attitude.2, dt)?;
                    (self.angle_stage(attitude_set_point, attitude, dt)?, thrust)
                }
                FlightMode::PositionHold => {
                    let target = (
                        self.step(Axis::PositionX, setpoint.position.0, position.0, dt)?
                            .clamp_abs(max_velocity),
                        self.step(Axis::PositionY, setpoint.position.1, position.1, dt)?
                            .clamp_abs(max_velocity),
                        self.step(Axis::PositionZ, setpoint.position.2, position.2, dt)?
                            .clamp_abs(max_velocity),
                    );
                    let (attitude_set_point, thrust) =
                        self.velocity_stage(target, velocity, setpoint.attitude.2, dt)?;
                    (self.angle_stage(attitude_set_point, attitude, dt)?, thrust)
                }
            }
        };

        let (roll, pitch, yaw) = self.rate_stage(rate_set_point, sensors.gyro_rate, dt)?;
        Ok(mix_clamped(&self.gate, thrust, roll, pitch, yaw))
    }

    /// Velocity setpoint to (attitude setpoint, collective thrust).
    fn velocity_stage(
        &mut self,
        target: (T, T, T),
        velocity: (T, T, T),
        heading: T,
        dt: T,
    ) -> Result<((T, T, T), T), ControlError> {
        let limits = self.config.limits;
        let max_step = limits.max_acceleration_ms2 * dt;
        let previous = self.velocity_command.unwrap_or(velocity);
        let command = (
            slew(previous.0, target.0, max_step),
            slew(previous.1, target.1, max_step),
            slew(previous.2, target.2, max_step),
        );
        self.velocity_command = Some(command);

        let pitch = self
            .step(Axis::VelocityX, command.0, velocity.0, dt)?
            .clamp_abs(limits.max_pitch_angle_deg);
        let roll = self
            .step(Axis::VelocityY, command.1, velocity.1, dt)?
            .clamp_abs(limits.max_roll_angle_deg);
        let thrust = self.collective(command.2, velocity.2, dt)?;

        Ok(((roll, pitch, heading), thrust))
    }

    /// Vertical velocity setpoint to collective thrust.
    fn collective(&mut self, climb: T, vertical_velocity: T, dt: T) -> Result<T, ControlError> {
        let mixer = self.config.mixer;
        let output = self.step(Axis::VelocityZ, climb, vertical_velocity, dt)?;
        Ok(mixer.hover_thrust_pwm + output * mixer.thrust_scale)
    }

    /// Attitude setpoint to rate setpoint.
    fn angle_stage(
        &mut self,
        target: (T, T, T),
        attitude: (T, T, T),
        dt: T,
    ) -> Result<(T, T, T), ControlError> {
        let target = match self.config.smoothing.and_then(|s| s.deadzones) {
            Some(zones) => (
                apply_deadzone(target.0, attitude.0, zones.roll_deg),
                apply_deadzone(target.1, attitude.1, zones.pitch_deg),
                apply_deadzone(target.2, attitude.2, zones.yaw_deg),
            ),
            None => target,
        };

        let roll_rate = self.step(Axis::RollAngle, target.0, attitude.0, dt)?;
        let pitch_rate = self.step(Axis::PitchAngle, target.1, attitude.1, dt)?;
        let yaw_rate = self
            .step(Axis::YawAngle, target.2, attitude.2, dt)?
            .clamp_abs(self.config.limits.max_yaw_rate_deg_s);

        Ok((roll_rate, pitch_rate, yaw_rate))
    }

    /// Rate setpoint to raw (roll, pitch, yaw) actuator commands.
    fn rate_stage(
        &mut self,
        target: (T, T, T),
        gyro_rate: (T, T, T),
        dt: T,
    ) -> Result<(T, T, T), ControlError> {
        let target = match self.config.limits.rate_limits {
            Some(rates) => (
                target.0.clamp_abs(rates.max_roll_rate_deg_s),
                target.1.clamp_abs(rates.max_pitch_rate_deg_s),
                target.2.clamp_abs(rates.max_yaw_rate_deg_s),
            ),
            None => target,
        };

        Ok((
            self.step(Axis::RollRate, target.0, gyro_rate.0, dt)?,
            self.step(Axis::PitchRate, target.1, gyro_rate.1, dt)?,
            self.step(Axis::YawRate, target.2, gyro_rate.2, dt)?,
        ))
    }
}

fn all_finite<T: Number>(v: (T, T, T)) -> bool {
    v.0.is_finite() && v.1.is_finite() && v.2.is_finite()
}

fn sensors_finite<T: Number>(sensors: &SensorFrame<T>) -> bool {
    all_finite(sensors.attitude)
        && all_finite(sensors.gyro_rate)
        && all_finite(sensors.velocity)
        && all_finite(sensors.position)
}

fn setpoint_finite<T: Number>(setpoint: &Setpoint<T>) -> bool {
    all_finite(setpoint.position)
        && all_finite(setpoint.velocity)
        && all_finite(setpoint.attitude)
        && all_finite(setpoint.rate)
        && setpoint.thrust.is_finite()
        && setpoint.altitude.map_or(true, Number::is_finite)
}

impl CascadeController<f32> {
    /// Creates a disarmed controller from a built-in preset.
    pub fn from_profile(name: &str) -> Result<Self, ControlError> {
        Self::with_config(load_profile(name)?)
    }
}
