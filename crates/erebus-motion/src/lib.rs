//! Tick-driven motion control for a two-wheeled differential-drive robot.
//!
//! Nothing in this crate blocks or sleeps. An external loop refreshes the
//! sensed pose on a [`DriveBase`] once per control tick, calls
//! [`DriveBase::rotate_to_angle`] or [`DriveBase::move_to_position`], and
//! repeats the same call on later ticks until it returns `true`.

pub mod config;
pub mod drive_base;
pub mod error;
pub mod movement;
pub mod rotation;
pub mod shaping;
pub mod wheel;

pub use config::{MotionConfig, RotationTuning, TranslationTuning};
pub use drive_base::DriveBase;
pub use error::MotionError;
pub use movement::MovementToCoordinatesManager;
pub use rotation::{Criteria, RotationManager, RotationSession};
pub use shaping::map_range;
pub use wheel::{Direction, Wheel, WheelCommand};

pub use erebus_kinematics::{Angle, Position2D};
