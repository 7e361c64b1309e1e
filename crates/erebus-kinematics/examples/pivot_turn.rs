use erebus_kinematics::*;

fn main() {
    let wheel_radius = 0.0205;
    let axle_length = 0.052;
    let max_wheel_velocity = 6.28;

    let kinematics = match DifferentialDrive::new(wheel_radius, axle_length, max_wheel_velocity) {
        Ok(kinematics) => kinematics,
        Err(e) => {
            eprintln!("Failed to initialize kinematics: {}", e);
            return;
        }
    };

    let mut current_pose = Pose::new(0.0, 0.0, Angle::from_degrees(350.0));
    let dt = 0.032;
    let num_steps = 20;

    println!("Pivoting in place with {}", kinematics);
    println!("  Initial pose: {}", current_pose);

    // Left wheel forward, right wheel backward: clockwise in the arena frame.
    let wheel_speeds = kinematics.wheel_speeds_from_ratios(0.3, -0.3);
    for i in 0..num_steps {
        match kinematics.update_pose_from_wheel_speeds(current_pose, wheel_speeds, dt) {
            Ok(new_pose) => {
                current_pose = new_pose;
                println!("Step {:>2}: Pose: {}", i + 1, current_pose);
            }
            Err(e) => {
                eprintln!("Error during simulation step {}: {}", i + 1, e);
                break;
            }
        }
    }

    println!("Final Pose: {}", current_pose);
}
