//! Closed-loop heading controller.
//!
//! [`RotationManager`] turns the robot in place towards a target heading, one
//! control tick per call. The caller refreshes the sensed heading with
//! [`RotationManager::set_current_angle`] before every tick and keeps calling
//! [`RotationManager::rotate_to_angle`] until
//! [`RotationManager::finished_rotating`] is true.
//!
//! Each tick:
//!
//! 1. On the first tick of a session the current heading is latched as the
//!    session's initial heading.
//! 2. If the heading error is under `accuracy`, the session ends and both
//!    wheels stop.
//! 3. Otherwise the error is mapped from `[accuracy, full_speed_error]` onto
//!    `[min_velocity, max_velocity]`, scaled down inside the reduction
//!    threshold, capped, and turned into an in-place turn in the direction the
//!    [`Criteria`] selects.

use erebus_kinematics::Angle;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::RotationTuning;
use crate::shaping::{cap, map_range};
use crate::wheel::{Direction, WheelCommand};

/// Which way to turn while closing a heading error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criteria {
    /// Always turn left.
    Left,
    /// Always turn right.
    Right,
    /// Take the shorter arc from the live heading.
    #[default]
    Closest,
    /// Take the longer arc, decided from the heading the session started at.
    Farthest,
}

/// Rotation session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSession {
    /// No rotation in progress. The next call latches a new initial heading.
    Idle,
    /// A rotation has started and not yet reached tolerance.
    Active,
}

/// In-place heading controller for a differential drive.
#[derive(Debug, Clone)]
pub struct RotationManager {
    tuning: RotationTuning,
    accuracy: Angle,
    velocity_reduction_threshold: Angle,
    initial_angle: Angle,
    current_angle: Angle,
    session: RotationSession,
}

impl RotationManager {
    /// Creates an idle controller. The tuning is expected to be validated.
    pub fn new(tuning: RotationTuning) -> Self {
        RotationManager {
            tuning,
            accuracy: Angle::from_degrees(tuning.accuracy_deg),
            velocity_reduction_threshold: Angle::from_degrees(
                tuning.velocity_reduction_threshold_deg,
            ),
            initial_angle: Angle::ZERO,
            current_angle: Angle::ZERO,
            session: RotationSession::Idle,
        }
    }

    /// Tuning the controller was built with.
    pub fn tuning(&self) -> &RotationTuning {
        &self.tuning
    }

    /// Latest sensed heading.
    pub fn current_angle(&self) -> Angle {
        self.current_angle
    }

    /// Feeds the latest sensed heading.
    pub fn set_current_angle(&mut self, angle: Angle) {
        self.current_angle = angle;
    }

    /// Heading latched when the current (or last) session started.
    pub fn initial_angle(&self) -> Angle {
        self.initial_angle
    }

    /// Whether a rotation is in progress.
    pub fn session(&self) -> RotationSession {
        self.session
    }

    /// True when no rotation session is in progress.
    pub fn finished_rotating(&self) -> bool {
        self.session == RotationSession::Idle
    }

    /// True if the sensed heading is within `accuracy` of `angle`.
    pub fn is_at_angle(&self, angle: Angle) -> bool {
        self.current_angle.absolute_distance_to(angle) < self.accuracy
    }

    /// Advances the controller by one tick towards `target_angle`.
    ///
    /// Returns the command for both wheels: [`WheelCommand::STOP`] on the tick
    /// the heading error falls under `accuracy`, an in-place turn otherwise.
    pub fn rotate_to_angle(&mut self, target_angle: Angle, criteria: Criteria) -> WheelCommand {
        if self.session == RotationSession::Idle {
            self.initial_angle = self.current_angle;
            self.session = RotationSession::Active;
            info!(
                initial = %self.initial_angle,
                target = %target_angle,
                ?criteria,
                "Rotation session started"
            );
        }

        let absolute_difference = self.current_angle.absolute_distance_to(target_angle);

        if absolute_difference < self.accuracy {
            self.session = RotationSession::Idle;
            info!(heading = %self.current_angle, target = %target_angle, "Rotation finished");
            return WheelCommand::STOP;
        }

        let velocity = self.turn_velocity(absolute_difference);
        let direction = self.turn_direction(target_angle, criteria);
        debug!(
            heading = %self.current_angle,
            target = %target_angle,
            error = %absolute_difference,
            velocity,
            ?direction,
            "Rotation tick"
        );
        WheelCommand::turn(direction, velocity)
    }

    /// Turn velocity for an unsigned heading error.
    ///
    /// Always within `[min_velocity_cap, max_velocity_cap]`.
    pub fn turn_velocity(&self, absolute_difference: Angle) -> f64 {
        let mut velocity = map_range(
            absolute_difference.degrees(),
            self.tuning.accuracy_deg,
            self.tuning.full_speed_error_deg,
            self.tuning.min_velocity,
            self.tuning.max_velocity,
        );

        if absolute_difference < self.velocity_reduction_threshold {
            velocity *= self.tuning.fine_approach_factor;
        }

        cap(velocity, self.tuning.min_velocity_cap, self.tuning.max_velocity_cap)
    }

    /// Resolves which way to turn towards `target_angle` under `criteria`.
    ///
    /// `Closest` compares the live heading with the target; `Farthest` uses the
    /// heading latched at session start and picks the other side.
    pub fn turn_direction(&self, target_angle: Angle, criteria: Criteria) -> Direction {
        match criteria {
            Criteria::Left => Direction::Left,
            Criteria::Right => Direction::Right,
            Criteria::Closest => {
                if shorter_arc_is_right(self.current_angle - target_angle) {
                    Direction::Right
                } else {
                    Direction::Left
                }
            }
            Criteria::Farthest => {
                if shorter_arc_is_right(self.initial_angle - target_angle) {
                    Direction::Left
                } else {
                    Direction::Right
                }
            }
        }
    }
}

impl Default for RotationManager {
    fn default() -> Self {
        Self::new(RotationTuning::default())
    }
}

/// Strict bounds: a difference of exactly ±180° is not "right".
fn shorter_arc_is_right(difference: Angle) -> bool {
    let degrees = difference.degrees();
    (degrees > 0.0 && degrees < 180.0) || degrees < -180.0
}
