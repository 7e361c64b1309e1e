//! Closed-loop position controller.
//!
//! Every tick re-decides between turning and driving: if the robot already
//! faces the bearing to the target it drives straight with a velocity that
//! ramps down on approach, otherwise it delegates to its own
//! [`RotationManager`] and does not move forward. Forward motion that knocks
//! the heading out of tolerance is corrected on the next tick.

use erebus_kinematics::{Angle, Position2D};
use tracing::{debug, info};

use crate::config::{RotationTuning, TranslationTuning};
use crate::rotation::{Criteria, RotationManager};
use crate::shaping::{cap, map_range};
use crate::wheel::WheelCommand;

/// Drives the robot to a coordinate, rotating in place whenever it is misaligned.
#[derive(Debug, Clone)]
pub struct MovementToCoordinatesManager {
    tuning: TranslationTuning,
    current_position: Position2D,
    rotation_manager: RotationManager,
    finished_moving: bool,
}

impl MovementToCoordinatesManager {
    /// Creates a controller with its own heading controller.
    pub fn new(tuning: TranslationTuning, rotation_tuning: RotationTuning) -> Self {
        MovementToCoordinatesManager {
            tuning,
            current_position: Position2D::default(),
            rotation_manager: RotationManager::new(rotation_tuning),
            finished_moving: false,
        }
    }

    /// Tuning the controller was built with.
    pub fn tuning(&self) -> &TranslationTuning {
        &self.tuning
    }

    /// Latest sensed position.
    pub fn current_position(&self) -> Position2D {
        self.current_position
    }

    /// Feeds the latest sensed position.
    pub fn set_current_position(&mut self, position: Position2D) {
        self.current_position = position;
    }

    /// Latest sensed heading, as seen by the internal heading controller.
    pub fn current_angle(&self) -> Angle {
        self.rotation_manager.current_angle()
    }

    /// Feeds the latest sensed heading to the internal heading controller.
    pub fn set_current_angle(&mut self, angle: Angle) {
        self.rotation_manager.set_current_angle(angle);
    }

    /// The heading controller used to align with the bearing to the target.
    pub fn rotation_manager(&self) -> &RotationManager {
        &self.rotation_manager
    }

    /// True once the last tick found the robot within `error_margin` of its target.
    pub fn finished_moving(&self) -> bool {
        self.finished_moving
    }

    /// Advances the controller by one tick towards `target_position`.
    ///
    /// Returns `None` when the target is already reached: no wheel command is
    /// issued on that tick and the wheels keep their last command.
    pub fn move_to_position(&mut self, target_position: Position2D) -> Option<WheelCommand> {
        let dist = self.current_position.distance_to(target_position).abs();

        if dist < self.tuning.error_margin {
            if !self.finished_moving {
                info!(position = %self.current_position, target = %target_position, "Arrived at target");
            }
            self.finished_moving = true;
            return None;
        }

        self.finished_moving = false;
        let bearing = self.current_position.angle_to(target_position);

        if self.rotation_manager.is_at_angle(bearing) {
            let velocity = self.straight_velocity(dist);
            debug!(
                position = %self.current_position,
                target = %target_position,
                dist,
                velocity,
                "Driving straight"
            );
            Some(WheelCommand::straight(velocity))
        } else {
            debug!(
                heading = %self.rotation_manager.current_angle(),
                %bearing,
                dist,
                "Aligning with bearing"
            );
            Some(self.rotation_manager.rotate_to_angle(bearing, Criteria::Closest))
        }
    }

    /// Straight-line velocity for a distance to target.
    ///
    /// Maps `[0, deceleration_start]` onto `[min_velocity, max_velocity]`, so the
    /// robot is slowest next to the target. Always within
    /// `[min_velocity_cap, max_velocity_cap]`.
    pub fn straight_velocity(&self, dist: f64) -> f64 {
        let velocity = map_range(
            dist,
            0.0,
            self.tuning.deceleration_start,
            self.tuning.min_velocity,
            self.tuning.max_velocity,
        );
        cap(velocity, self.tuning.min_velocity_cap, self.tuning.max_velocity_cap)
    }
}

impl Default for MovementToCoordinatesManager {
    fn default() -> Self {
        Self::new(TranslationTuning::default(), RotationTuning::default())
    }
}
