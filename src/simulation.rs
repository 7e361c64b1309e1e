//! Headless stand-in for the arena simulator: two motors, a GPS and a compass.

use erebus_kinematics::{DifferentialDrive, KinematicsError, Pose, Position2D};
use erebus_motion::Wheel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A motor that remembers its last commanded ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulatedWheel {
    velocity: f64,
}

impl Wheel for SimulatedWheel {
    fn set_velocity(&mut self, ratio: f64) {
        self.velocity = ratio.clamp(-1.0, 1.0);
    }

    fn velocity(&self) -> f64 {
        self.velocity
    }
}

/// Integrates the true pose from wheel ratios and reports a noisy sensed pose.
#[derive(Debug)]
pub struct Simulator {
    kinematics: DifferentialDrive,
    pose: Pose,
    gps_noise: f64,
    rng: StdRng,
}

impl Simulator {
    pub fn new(kinematics: DifferentialDrive, start: Pose, gps_noise: f64, seed: u64) -> Self {
        Simulator {
            kinematics,
            pose: start,
            gps_noise: gps_noise.abs(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Ground-truth pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Pose as the robot's sensors report it. The compass is exact; each GPS
    /// coordinate is off by up to `gps_noise`.
    pub fn sense(&mut self) -> Pose {
        if self.gps_noise == 0.0 {
            return self.pose;
        }
        let noise = self.gps_noise;
        let position = Position2D::new(
            self.pose.position.x + self.rng.random_range(-noise..=noise),
            self.pose.position.y + self.rng.random_range(-noise..=noise),
        );
        Pose { position, heading: self.pose.heading }
    }

    /// Advances the true pose by `dt` seconds with the wheels' current ratios.
    pub fn step<W: Wheel>(&mut self, left: &W, right: &W, dt: f64) -> Result<Pose, KinematicsError> {
        let speeds = self
            .kinematics
            .wheel_speeds_from_ratios(left.velocity(), right.velocity());
        self.pose = self
            .kinematics
            .update_pose_from_wheel_speeds(self.pose, speeds, dt)?;
        Ok(self.pose)
    }
}
