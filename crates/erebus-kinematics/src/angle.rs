//! Wraparound-aware heading type.
//!
//! Headings built through the constructors are kept in `[0°, 360°)`, so 0° and
//! 360° are the same value. The value is stored in degrees, so headings built
//! from whole or half degrees subtract without rounding error. Subtracting two
//! angles keeps the raw signed difference; call [`Angle::normalized`] when a
//! canonical value is needed.

use core::fmt;
use core::ops::Sub;

use libm::{fabs, fmod};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const FULL_TURN: f64 = 360.0;
const HALF_TURN: f64 = 180.0;

/// Unit an angle value is expressed in.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    /// Degrees, one turn is 360.
    #[default]
    Degrees,
    /// Radians, one turn is 2π.
    Radians,
}

/// A heading about the robot's vertical axis.
///
/// Ordering compares the stored value directly. It is meant for comparing
/// distance-like angles (for example the result of
/// [`absolute_distance_to`](Angle::absolute_distance_to)) against a tolerance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// The zero heading.
    pub const ZERO: Angle = Angle { degrees: 0.0 };

    /// Construct an angle from a value in the given unit, normalized to one turn.
    pub fn new(value: f64, unit: Unit) -> Self {
        match unit {
            Unit::Degrees => Self::from_degrees(value),
            Unit::Radians => Self::from_radians(value),
        }
    }

    /// Construct an angle from radians, normalized to `[0, 2π)`.
    pub fn from_radians(radians: f64) -> Self {
        Self::from_degrees(radians.to_degrees())
    }

    /// Construct an angle from degrees, normalized to `[0, 360)`.
    pub fn from_degrees(degrees: f64) -> Self {
        Angle { degrees: normalize(degrees) }
    }

    /// Stored value in radians.
    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// Stored value in degrees.
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// The same heading brought back into `[0°, 360°)`.
    pub fn normalized(&self) -> Self {
        Self::from_degrees(self.degrees)
    }

    /// Shortest unsigned angular distance to `other`, in `[0°, 180°]`.
    ///
    /// Symmetric: `a.absolute_distance_to(b) == b.absolute_distance_to(a)`.
    pub fn absolute_distance_to(&self, other: Angle) -> Angle {
        let diff = fabs(normalize(self.degrees) - normalize(other.degrees));
        let degrees = if diff > HALF_TURN { FULL_TURN - diff } else { diff };
        Angle { degrees }
    }
}

/// Bring a value in degrees into `[0, 360)`.
fn normalize(degrees: f64) -> f64 {
    let a = fmod(degrees, FULL_TURN);
    let a = if a < 0.0 { a + FULL_TURN } else { a };
    // A tiny negative remainder rounds up to a full turn once shifted.
    if a >= FULL_TURN { 0.0 } else { a }
}

/// Raw signed difference, not normalized.
impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle { degrees: self.degrees - rhs.degrees }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_degree_differences_are_exact() {
        for c in 0..360 {
            let heading = Angle::from_degrees(c as f64);
            let opposite = Angle::from_degrees(((c + 180) % 360) as f64);
            assert_eq!((heading - opposite).degrees().abs(), 180.0);
            assert_eq!(heading.absolute_distance_to(opposite).degrees(), 180.0);
        }
    }

    #[test]
    fn test_radians_round_trip() {
        let a = Angle::new(FRAC_PI_2, Unit::Radians);
        assert!((a.degrees() - 90.0).abs() < EPSILON);
        assert!((a.radians() - FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_constructors_wrap_around() {
        assert!((Angle::from_degrees(360.0).degrees() - 0.0).abs() < EPSILON);
        assert!((Angle::from_degrees(-90.0).degrees() - 270.0).abs() < EPSILON);
        assert!((Angle::from_degrees(725.0).degrees() - 5.0).abs() < EPSILON);
        assert!((Angle::new(-PI, Unit::Radians).radians() - PI).abs() < EPSILON);
        assert!(Angle::from_degrees(0.0).absolute_distance_to(Angle::from_degrees(360.0)).degrees() < EPSILON);
    }

    #[test]
    fn test_subtraction_keeps_sign() {
        let d = Angle::from_degrees(0.0) - Angle::from_degrees(90.0);
        assert!((d.degrees() - (-90.0)).abs() < EPSILON);
        let d = Angle::from_degrees(10.0) - Angle::from_degrees(350.0);
        assert!((d.degrees() - (-340.0)).abs() < EPSILON);
        assert!((d.normalized().degrees() - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_absolute_distance_across_zero() {
        let a = Angle::from_degrees(350.0);
        let b = Angle::from_degrees(10.0);
        assert!((a.absolute_distance_to(b).degrees() - 20.0).abs() < EPSILON);
        assert!((b.absolute_distance_to(a).degrees() - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_absolute_distance_is_symmetric_and_bounded() {
        for i in 0..72 {
            for j in 0..72 {
                let a = Angle::from_degrees(i as f64 * 5.0 + 0.3);
                let b = Angle::from_degrees(j as f64 * 5.0 - 0.7);
                let ab = a.absolute_distance_to(b).degrees();
                let ba = b.absolute_distance_to(a).degrees();
                assert!((ab - ba).abs() < 1e-6);
                assert!((0.0..=180.0 + 1e-9).contains(&ab));
            }
        }
    }

    #[test]
    fn test_antipodal_distance() {
        let d = Angle::from_degrees(45.0).absolute_distance_to(Angle::from_degrees(225.0));
        assert!((d.degrees() - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_ordering_against_tolerance() {
        let accuracy = Angle::from_degrees(2.0);
        let close = Angle::from_degrees(10.0).absolute_distance_to(Angle::from_degrees(11.0));
        assert!(close < accuracy);
        let far = Angle::from_degrees(10.0).absolute_distance_to(Angle::from_degrees(13.0));
        assert!(far >= accuracy);
    }
}
