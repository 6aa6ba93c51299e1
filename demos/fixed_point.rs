// demos/fixed_point.rs

use cascade_flight_control::config::GainSet;
use cascade_flight_control::pid::PidEvaluator;
use fixed::types::I16F16;

fn main() {
    // Angle loop gains of the smooth preset in 16.16 fixed point.
    let gains = GainSet::new(
        I16F16::from_num(4.0),
        I16F16::from_num(2.0),
        I16F16::from_num(0.0),
        I16F16::from_num(15.0),
    );
    let mut roll = PidEvaluator::new(gains);

    let set_point = I16F16::from_num(10.0); // desired roll, degrees
    let mut attitude = I16F16::from_num(0.0); // current roll, degrees
    let dt = I16F16::from_num(0.01); // time step
    let response = I16F16::from_num(0.05); // fraction of the command applied per step

    println!("                 Roll,  Rate cmd");
    let mut t = I16F16::from_num(0.0);
    for _ in 0..=10 {
        // Perform the control computation
        let rate = match roll.update(set_point, attitude, dt) {
            Ok(rate) => rate,
            Err(err) => {
                println!("update failed: {}", err);
                return;
            }
        };

        // print results
        println!("t = {:.3}: {:-8.3}, {:-8.3}", t, attitude, rate);

        // simulate response
        attitude += rate * response;
        t += dt;
    }

    let state = roll.state();
    println!("integral = {:.4}, elapsed = {:.3}", state.integral, state.last_timestamp);
}
