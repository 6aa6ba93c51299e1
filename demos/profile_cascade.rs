// demos/profile_cascade.rs

use cascade_flight_control::{CascadeController, FlightMode, SensorFrame, Setpoint};

fn main() {
    // Load the conservative preset and arm straight into angle hold.
    let mut controller = CascadeController::from_profile("smooth").expect("built-in profile");
    controller.arm(FlightMode::AngleHold).expect("arm");

    // Hold 1 m altitude with a 10 degree roll.
    let setpoint = Setpoint {
        attitude: (10.0, 0.0, 0.0),
        altitude: Some(1.0),
        ..Setpoint::new()
    };

    // Simulated vehicle, level on the ground with a healthy battery.
    let mut frame = SensorFrame {
        timestamp: 0.0,
        attitude: (0.0, 0.0, 0.0),
        gyro_rate: (0.0, 0.0, 0.0),
        velocity: (0.0, 0.0, 0.0),
        position: (0.0, 0.0, 0.0),
        battery_voltage: 4.1,
    };
    let dt = 0.01; // 100 Hz control loop

    println!("                       FL,      FR,      AR,      AL");
    for step in 0..=20 {
        let report = controller.tick(&setpoint, &frame, dt);
        let [fl, fr, ar, al] = report.motors.pwm;

        // print results
        if step % 2 == 0 {
            println!("t = {:.3}, mode = {:?}", frame.timestamp, report.mode);
            println!(
                "    Attitude:     {:-8.3}, {:-8.3}, {:-8.3}",
                frame.attitude.0, frame.attitude.1, frame.attitude.2
            );
            println!("    Altitude:     {:-8.3}", frame.position.2);
            println!("    Motors:       {:8}, {:8}, {:8}, {:8}", fl, fr, ar, al);
        }

        // simulate response: differential thrust rolls, collective climbs
        let roll_torque = ((fl + al) - (fr + ar)) as f32 * 1.0e-3;
        let collective = (fl + fr + ar + al) as f32 / 4.0;
        frame.gyro_rate.0 += roll_torque * dt;
        frame.attitude.0 += frame.gyro_rate.0 * dt;
        frame.velocity.2 += (collective - 36000.0) * 1.0e-3 * dt;
        frame.position.2 += frame.velocity.2 * dt;
        frame.timestamp += dt;
    }

    let snapshot = controller.snapshot();
    println!("final battery = {:?}, faults = {}", snapshot.battery, snapshot.input_faults);
}
