//! Wheel actuator capability and the commands the controllers produce.

use core::fmt;

/// A single drive wheel.
///
/// Implemented by the host: a motor driver on the robot, a simulated motor in
/// tests. The controllers never talk to wheels directly; they return
/// [`WheelCommand`]s that the [`DriveBase`](crate::DriveBase) applies.
pub trait Wheel {
    /// Command a normalized velocity ratio in `[-1, 1]`.
    fn set_velocity(&mut self, ratio: f64);

    /// The last commanded velocity ratio.
    fn velocity(&self) -> f64;
}

impl<W: Wheel + ?Sized> Wheel for Box<W> {
    fn set_velocity(&mut self, ratio: f64) {
        (**self).set_velocity(ratio)
    }

    fn velocity(&self) -> f64 {
        (**self).velocity()
    }
}

/// Side to turn towards during an in-place rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left wheel forward, right wheel backward.
    Left,
    /// Left wheel backward, right wheel forward.
    Right,
}

/// Velocity ratios for the left and right wheel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelCommand {
    /// Left wheel ratio.
    pub left: f64,
    /// Right wheel ratio.
    pub right: f64,
}

impl WheelCommand {
    /// Both wheels stopped.
    pub const STOP: WheelCommand = WheelCommand { left: 0.0, right: 0.0 };

    /// Construct a command from two ratios.
    pub const fn new(left: f64, right: f64) -> Self {
        WheelCommand { left, right }
    }

    /// Both wheels at the same ratio.
    pub const fn straight(velocity: f64) -> Self {
        WheelCommand { left: velocity, right: velocity }
    }

    /// Equal and opposite ratios, a pure in-place turn.
    pub fn turn(direction: Direction, velocity: f64) -> Self {
        match direction {
            Direction::Right => WheelCommand::new(-velocity, velocity),
            Direction::Left => WheelCommand::new(velocity, -velocity),
        }
    }
}

impl fmt::Display for WheelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(L: {:.3}, R: {:.3})", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_signs() {
        assert_eq!(WheelCommand::turn(Direction::Left, 0.4), WheelCommand::new(0.4, -0.4));
        assert_eq!(WheelCommand::turn(Direction::Right, 0.4), WheelCommand::new(-0.4, 0.4));
    }

    #[test]
    fn test_straight_and_stop() {
        assert_eq!(WheelCommand::straight(0.8), WheelCommand::new(0.8, 0.8));
        assert_eq!(WheelCommand::STOP, WheelCommand::default());
    }
}
