//! Error types for the kinematics library.
//!
//! Raised when a differential-drive model is built from physically
//! meaningless parameters or asked to integrate backwards in time.

use core::fmt;

/// Errors that can occur in kinematic calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Returned when a wheel radius is provided that is not positive.
    InvalidWheelRadius(&'static str),
    /// Returned when the distance between the wheels is not positive.
    InvalidAxleLength(&'static str),
    /// Returned when the wheel speed at full ratio is not positive.
    InvalidMaxWheelVelocity(&'static str),
    /// Returned when a negative time delta is used for pose updates.
    NegativeTimeDelta(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelRadius(msg) => write!(f, "Invalid wheel radius: {}", msg),
            KinematicsError::InvalidAxleLength(msg) => write!(f, "Invalid axle length: {}", msg),
            KinematicsError::InvalidMaxWheelVelocity(msg) => {
                write!(f, "Invalid maximum wheel velocity: {}", msg)
            }
            KinematicsError::NegativeTimeDelta(msg) => write!(f, "Negative time delta: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
