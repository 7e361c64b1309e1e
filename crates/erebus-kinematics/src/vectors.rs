//! 2D positions and displacement vectors in the arena frame.

use core::fmt;
use core::ops::{Add, Sub};

use libm::{atan2, cos, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// A point in the arena, in meters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position2D {
    /// Arena x coordinate (m).
    pub x: f64,
    /// Arena y coordinate (m), pointing down.
    pub y: f64,
}

impl Position2D {
    /// Construct a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Position2D { x, y }
    }

    /// Euclidean distance to `other`. Symmetric and never negative.
    pub fn distance_to(&self, other: Position2D) -> f64 {
        (other - *self).length()
    }

    /// Bearing from `self` to `other`: the heading to face in order to drive
    /// straight there. Not symmetric, `b.angle_to(a)` is the opposite heading.
    pub fn angle_to(&self, other: Position2D) -> Angle {
        (other - *self).angle()
    }
}

impl fmt::Display for Position2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.3}, y: {:.3})", self.x, self.y)
    }
}

/// A displacement between two positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    /// x component (m).
    pub x: f64,
    /// y component (m).
    pub y: f64,
}

impl Vector2D {
    /// Construct a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Vector of the given length pointing along `direction`.
    pub fn from_polar(direction: Angle, length: f64) -> Self {
        Vector2D {
            x: cos(direction.radians()) * length,
            y: sin(direction.radians()) * length,
        }
    }

    /// Length of the vector.
    pub fn length(&self) -> f64 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Direction the vector points in. The zero vector points at 0.
    pub fn angle(&self) -> Angle {
        Angle::from_radians(atan2(self.y, self.x))
    }
}

impl Sub for Position2D {
    type Output = Vector2D;

    fn sub(self, rhs: Position2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector2D> for Position2D {
    type Output = Position2D;

    fn add(self, rhs: Vector2D) -> Position2D {
        Position2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Position2D::new(0.1, -0.4);
        let b = Position2D::new(-0.2, 0.0);
        assert!((a.distance_to(b) - 0.5).abs() < EPSILON);
        assert!((b.distance_to(a) - 0.5).abs() < EPSILON);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_angle_to_is_bearing() {
        let origin = Position2D::default();
        assert!((origin.angle_to(Position2D::new(1.0, 0.0)).degrees() - 0.0).abs() < EPSILON);
        assert!((origin.angle_to(Position2D::new(0.0, 1.0)).degrees() - 90.0).abs() < EPSILON);
        assert!((origin.angle_to(Position2D::new(-1.0, 0.0)).degrees() - 180.0).abs() < EPSILON);
        assert!((origin.angle_to(Position2D::new(0.0, -1.0)).degrees() - 270.0).abs() < EPSILON);
    }

    #[test]
    fn test_angle_to_is_not_symmetric() {
        let a = Position2D::new(0.0, 0.0);
        let b = Position2D::new(1.0, 1.0);
        let there = a.angle_to(b);
        let back = b.angle_to(a);
        assert!((there.absolute_distance_to(back).degrees() - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_polar_round_trip() {
        let v = Vector2D::from_polar(Angle::from_degrees(30.0), 2.0);
        assert!((v.length() - 2.0).abs() < EPSILON);
        assert!((v.angle().degrees() - 30.0).abs() < 1e-6);
        let p = Position2D::new(1.0, 1.0) + v;
        assert!((Position2D::new(1.0, 1.0).distance_to(p) - 2.0).abs() < EPSILON);
    }
}
