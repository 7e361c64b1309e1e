//! Velocity shaping shared by the heading and position controllers.

/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values at or outside the domain clamp to the nearest end of the range, so
/// the result is a piecewise-linear ramp. An empty domain never divides.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if value <= in_min {
        return out_min;
    }
    if value >= in_max {
        return out_max;
    }
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Caps `velocity` to `[min_cap, max_cap]`, upper bound first.
pub fn cap(velocity: f64, min_cap: f64, max_cap: f64) -> f64 {
    velocity.min(max_cap).max(min_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_map_range_interpolates() {
        assert!((map_range(46.0, 2.0, 90.0, 0.2, 1.0) - 0.6).abs() < EPSILON);
        assert!((map_range(0.03, 0.0, 0.06, 0.1, 1.0) - 0.55).abs() < EPSILON);
    }

    #[test]
    fn test_map_range_clamps_outside_domain() {
        assert_eq!(map_range(-5.0, 0.0, 10.0, 0.2, 1.0), 0.2);
        assert_eq!(map_range(0.0, 0.0, 10.0, 0.2, 1.0), 0.2);
        assert_eq!(map_range(10.0, 0.0, 10.0, 0.2, 1.0), 1.0);
        assert_eq!(map_range(180.0, 2.0, 90.0, 0.2, 1.0), 1.0);
    }

    #[test]
    fn test_map_range_empty_domain() {
        assert_eq!(map_range(1.0, 1.0, 1.0, 0.2, 1.0), 0.2);
        assert_eq!(map_range(2.0, 1.0, 1.0, 0.2, 1.0), 1.0);
        assert!(map_range(0.5, 1.0, 1.0, 0.2, 1.0).is_finite());
    }

    #[test]
    fn test_cap() {
        assert_eq!(cap(0.1, 0.2, 1.0), 0.2);
        assert_eq!(cap(1.5, 0.2, 1.0), 1.0);
        assert_eq!(cap(0.5, 0.2, 1.0), 0.5);
    }
}
