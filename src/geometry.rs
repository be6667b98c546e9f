//! Planar geometry utilities shared by the planner and controller

use crate::types::Point;
use std::f64::consts::PI;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Angle of the vector from `a` to `b`, in radians.
///
/// Uses `atan2` semantics, so the result is in (-π, π]. Coincident points
/// yield 0.0 rather than an error; the control law must always get a value.
pub fn bearing(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Signed difference `first - second` in degrees, normalized to (-180, 180].
///
/// Uses floored modulo (`rem_euclid`) so the wrap is correct for negative
/// inputs as well; truncated `%` would flip the sign near the boundary.
pub fn angle_diff_deg(first: f64, second: f64) -> f64 {
    let wrapped = (first - second + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid lands a ±180° difference on -180; keep the +180 side
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Normalize an angle in radians to (-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    // rem_euclid maps +π to -π; keep the +π side of the open interval
    if wrapped == -PI { PI } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_basics() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
        assert_eq!(distance(Point::new(1.5, -2.0), Point::new(1.5, -2.0)), 0.0);
    }

    #[test]
    fn bearing_follows_atan2() {
        let origin = Point::new(0.0, 0.0);
        assert!((bearing(origin, Point::new(1.0, 0.0))).abs() < EPS);
        assert!((bearing(origin, Point::new(0.0, 1.0)) - PI / 2.0).abs() < EPS);
        assert!((bearing(origin, Point::new(-1.0, 0.0)) - PI).abs() < EPS);
        assert!((bearing(origin, Point::new(0.0, -1.0)) + PI / 2.0).abs() < EPS);
    }

    #[test]
    fn bearing_of_coincident_points_is_defined() {
        let p = Point::new(2.0, 3.0);
        assert_eq!(bearing(p, p), 0.0);
    }

    #[test]
    fn angle_diff_identity() {
        for a in [-720.0, -180.0, -45.0, 0.0, 90.0, 179.9, 360.0, 1234.5] {
            assert!(angle_diff_deg(a, a).abs() < EPS, "angle_diff({a}, {a}) != 0");
        }
    }

    #[test]
    fn angle_diff_stays_in_half_open_range() {
        let mut a = -400.0;
        while a < 400.0 {
            let mut b = -400.0;
            while b < 400.0 {
                let d = angle_diff_deg(a, b);
                assert!(d > -180.0 && d <= 180.0, "diff({a}, {b}) = {d}");
                b += 37.0;
            }
            a += 41.0;
        }
    }

    #[test]
    fn angle_diff_antisymmetry() {
        // Holds away from the ±180 boundary, where both directions map to +180
        assert!((angle_diff_deg(30.0, 10.0) + angle_diff_deg(10.0, 30.0)).abs() < EPS);
        assert!((angle_diff_deg(-170.0, 170.0) - 20.0).abs() < EPS);
        assert!((angle_diff_deg(170.0, -170.0) + 20.0).abs() < EPS);
    }

    #[test]
    fn angle_diff_wraps_with_floored_modulo() {
        // Negative inputs must not flip sign near the wrap
        assert!((angle_diff_deg(-190.0, 0.0) - 170.0).abs() < EPS);
        assert!((angle_diff_deg(180.0, -180.0)).abs() < EPS);
        assert!((angle_diff_deg(540.0, 0.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn normalize_angle_range() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < EPS);
        assert!((normalize_angle(-PI) - PI).abs() < EPS);
        assert!((normalize_angle(0.5) - 0.5).abs() < EPS);
        assert!((normalize_angle(2.0 * PI)).abs() < EPS);
    }
}
