#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library of heading/position value types and differential-drive kinematics."]
#![doc = ""]
#![doc = "Positions and headings live in the arena frame reported by the simulator's GPS:"]
#![doc = "x grows to the right and y grows downwards, so headings grow clockwise when the"]
#![doc = "arena is seen from above. A robot with heading θ driving forward moves along"]
#![doc = "`(cos θ, sin θ)`, and a left wheel faster than the right one increases θ."]

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod angle;
pub mod error;
pub mod vectors;

pub use angle::{Angle, Unit};
pub use error::KinematicsError;
pub use vectors::{Position2D, Vector2D};

/// A 2‑D pose: arena position in meters and heading.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Arena position (m).
    pub position: Position2D,
    /// Heading, normalized to one turn.
    pub heading: Angle,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: Arena x position in meters.
    /// * `y`: Arena y position in meters.
    /// * `heading`: Heading of the robot.
    pub fn new(x: f64, y: f64, heading: Angle) -> Self {
        Pose {
            position: Position2D::new(x, y),
            heading,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, θ: {})", self.position, self.heading)
    }
}

/// Left and right wheel angular velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    /// Left wheel angular velocity (rad/s).
    pub omega_l: f64,
    /// Right wheel angular velocity (rad/s).
    pub omega_r: f64,
}

impl WheelSpeeds {
    /// Construct wheel speeds.
    ///
    /// # Arguments
    ///
    /// * `omega_l`: Left wheel angular velocity (rad/s).
    /// * `omega_r`: Right wheel angular velocity (rad/s).
    pub const fn new(omega_l: f64, omega_r: f64) -> Self {
        WheelSpeeds { omega_l, omega_r }
    }
}

impl fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ωL: {:.2} rad/s, ωR: {:.2} rad/s)", self.omega_l, self.omega_r)
    }
}

/// Linear and angular chassis velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (m/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s), clockwise positive.
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.3} m/s, ω: {:.3} rad/s)", self.v, self.omega)
    }
}

/// Differential‑drive kinematics helper.
///
/// Holds the physical parameters of a two-wheeled robot and converts
/// normalized wheel velocity ratios into chassis motion.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Wheel radius (m).
    wheel_radius: f64,
    /// Axle length (m).
    axle_length: f64,
    /// Wheel angular velocity commanded by a ratio of 1.0 (rad/s).
    max_wheel_velocity: f64,
}

impl DifferentialDrive {
    /// Construct a new differential‑drive kinematics helper.
    ///
    /// # Arguments
    ///
    /// * `wheel_radius`: The radius of the robot's wheels in meters.
    /// * `axle_length`: The distance between the centers of the two drive wheels in meters.
    /// * `max_wheel_velocity`: Wheel angular velocity at a velocity ratio of 1.0, in rad/s.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelRadius)` if `wheel_radius` is not positive.
    /// Returns `Err(KinematicsError::InvalidAxleLength)` if `axle_length` is not positive.
    /// Returns `Err(KinematicsError::InvalidMaxWheelVelocity)` if `max_wheel_velocity` is not positive.
    pub const fn new(
        wheel_radius: f64,
        axle_length: f64,
        max_wheel_velocity: f64,
    ) -> Result<Self, KinematicsError> {
        if wheel_radius <= 0.0 {
            return Err(KinematicsError::InvalidWheelRadius("must be positive"));
        }
        if axle_length <= 0.0 {
            return Err(KinematicsError::InvalidAxleLength("must be positive"));
        }
        if max_wheel_velocity <= 0.0 {
            return Err(KinematicsError::InvalidMaxWheelVelocity("must be positive"));
        }
        Ok(DifferentialDrive {
            wheel_radius,
            axle_length,
            max_wheel_velocity,
        })
    }

    /// Returns the wheel radius.
    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    /// Returns the axle length.
    pub fn axle_length(&self) -> f64 {
        self.axle_length
    }

    /// Returns the wheel angular velocity at full ratio.
    pub fn max_wheel_velocity(&self) -> f64 {
        self.max_wheel_velocity
    }

    /// Converts normalized velocity ratios into wheel angular velocities.
    ///
    /// Ratios are clamped to `[-1, 1]` first.
    pub fn wheel_speeds_from_ratios(&self, left: f64, right: f64) -> WheelSpeeds {
        WheelSpeeds::new(
            left.clamp(-1.0, 1.0) * self.max_wheel_velocity,
            right.clamp(-1.0, 1.0) * self.max_wheel_velocity,
        )
    }

    /// Calculates the robot's chassis speeds from the wheel speeds.
    ///
    /// A faster left wheel turns the robot clockwise, which is a positive
    /// angular speed in the arena frame.
    pub fn forward_kinematics(&self, wheel_speeds: WheelSpeeds) -> ChassisSpeeds {
        let v_l = wheel_speeds.omega_l * self.wheel_radius;
        let v_r = wheel_speeds.omega_r * self.wheel_radius;

        let v = (v_r + v_l) / 2.0;
        let omega = (v_l - v_r) / self.axle_length;

        ChassisSpeeds::new(v, omega)
    }

    /// Updates the robot's pose given its current pose, chassis speeds, and time delta.
    ///
    /// Integrates the chassis speeds over `dt` assuming they stay constant
    /// during the interval. The resulting heading is normalized.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative.
    pub fn update_pose(
        &self,
        current_pose: Pose,
        chassis_speeds: ChassisSpeeds,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        if dt < 0.0 {
            return Err(KinematicsError::NegativeTimeDelta("must be non-negative"));
        }

        let displacement = Vector2D::from_polar(current_pose.heading, chassis_speeds.v * dt);
        let delta_theta = chassis_speeds.omega * dt;

        Ok(Pose {
            position: current_pose.position + displacement,
            heading: Angle::from_radians(current_pose.heading.radians() + delta_theta),
        })
    }

    /// Convenience function to update pose directly from wheel speeds and dt.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative (propagated from `update_pose`).
    pub fn update_pose_from_wheel_speeds(
        &self,
        current_pose: Pose,
        wheel_speeds: WheelSpeeds,
        dt: f64,
    ) -> Result<Pose, KinematicsError> {
        let chassis_speeds = self.forward_kinematics(wheel_speeds);
        self.update_pose(current_pose, chassis_speeds, dt)
    }
}

impl fmt::Display for DifferentialDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DifferentialDrive (r: {:.4} m, L: {:.4} m, ωmax: {:.2} rad/s)",
            self.wheel_radius, self.axle_length, self.max_wheel_velocity
        )
    }
}
