//! Drive-base facade.
//!
//! [`DriveBase`] owns the two wheels and both controllers. It is the only
//! surface the behaviour executor talks to: each control tick the executor
//! feeds the sensed pose ([`DriveBase::set_position`],
//! [`DriveBase::sync_heading`]), calls one control operation, and reads the
//! returned completion flag to decide whether to repeat it next tick.

use erebus_kinematics::{Angle, Position2D};

use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::movement::MovementToCoordinatesManager;
use crate::rotation::{Criteria, RotationManager};
use crate::wheel::{Wheel, WheelCommand};

/// A differential drive base: two wheels, a heading controller and a position
/// controller.
///
/// The position controller carries its own heading controller, independent
/// of the standalone one, so a translation's alignment phase never disturbs a
/// rotation session in progress (and vice versa).
#[derive(Debug)]
pub struct DriveBase<W: Wheel> {
    left_wheel: W,
    right_wheel: W,
    rotation_manager: RotationManager,
    movement_manager: MovementToCoordinatesManager,
}

impl<W: Wheel> DriveBase<W> {
    /// Builds a drive base over two wheels.
    ///
    /// # Errors
    ///
    /// Returns the [`MotionError`] from [`MotionConfig::validate`] if the
    /// tuning cannot produce bounded velocities.
    pub fn new(left_wheel: W, right_wheel: W, config: MotionConfig) -> Result<Self, MotionError> {
        config.validate()?;
        Ok(DriveBase {
            left_wheel,
            right_wheel,
            rotation_manager: RotationManager::new(config.rotation),
            movement_manager: MovementToCoordinatesManager::new(
                config.translation,
                config.rotation,
            ),
        })
    }

    /// Commands both wheels directly, bypassing the controllers.
    pub fn move_wheels(&mut self, left_ratio: f64, right_ratio: f64) {
        self.left_wheel.set_velocity(left_ratio);
        self.right_wheel.set_velocity(right_ratio);
    }

    /// One heading-control tick. Returns true once the heading is within tolerance.
    pub fn rotate_to_angle(&mut self, angle: Angle, criteria: Criteria) -> bool {
        let command = self.rotation_manager.rotate_to_angle(angle, criteria);
        self.apply(command);
        self.rotation_manager.finished_rotating()
    }

    /// One position-control tick. Returns true once the target is within the error margin.
    ///
    /// The wheels are left untouched on the tick that reports arrival.
    pub fn move_to_position(&mut self, position: Position2D) -> bool {
        if let Some(command) = self.movement_manager.move_to_position(position) {
            self.apply(command);
        }
        self.movement_manager.finished_moving()
    }

    /// Sensed position, as held by the position controller.
    pub fn position(&self) -> Position2D {
        self.movement_manager.current_position()
    }

    /// Feeds the sensed position to the position controller.
    pub fn set_position(&mut self, position: Position2D) {
        self.movement_manager.set_current_position(position);
    }

    /// Sensed heading, as held by the standalone heading controller.
    pub fn orientation(&self) -> Angle {
        self.rotation_manager.current_angle()
    }

    /// Feeds the sensed heading to every heading controller.
    ///
    /// Writes the standalone heading controller and the one inside the
    /// position controller, so both observe the same heading this tick.
    pub fn sync_heading(&mut self, angle: Angle) {
        self.rotation_manager.set_current_angle(angle);
        self.movement_manager.set_current_angle(angle);
    }

    /// Average of the last commanded wheel ratios.
    ///
    /// Exactly zero when the ratios cancel out, which is the case both when
    /// idle and when turning in place.
    pub fn wheel_direction(&self) -> f64 {
        let sum = self.left_wheel.velocity() + self.right_wheel.velocity();
        if sum == 0.0 {
            return 0.0;
        }
        sum / 2.0
    }

    /// Left wheel actuator.
    pub fn left_wheel(&self) -> &W {
        &self.left_wheel
    }

    /// Right wheel actuator.
    pub fn right_wheel(&self) -> &W {
        &self.right_wheel
    }

    /// The standalone heading controller.
    pub fn rotation_manager(&self) -> &RotationManager {
        &self.rotation_manager
    }

    /// The position controller.
    pub fn movement_manager(&self) -> &MovementToCoordinatesManager {
        &self.movement_manager
    }

    fn apply(&mut self, command: WheelCommand) {
        self.left_wheel.set_velocity(command.left);
        self.right_wheel.set_velocity(command.right);
    }
}
