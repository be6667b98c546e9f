//! Carrot planner: pick the next target point on the path
//!
//! The robot steers toward a short-horizon "carrot" point rather than
//! stopping at every waypoint. When the waypoint after the current target is
//! at roughly the same distance and bearing from the robot as the target
//! itself, the robot is already effectively aimed at both, so the planner
//! skips ahead. This flattens the stair-stepping a dense recorded path would
//! otherwise cause.

use crate::config::PlannerConfig;
use crate::geometry::{angle_diff_deg, bearing, distance};
use crate::path::Path;
use crate::types::{Point, Pose};

/// A selected target and the cursor that now points at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carrot {
    pub target: Point,
    pub cursor: usize,
}

/// Select the next target for the given cursor, skipping ahead where the
/// path allows.
///
/// Returns `None` exactly when `cursor` is at or past the last waypoint —
/// there is no further target and the traversal is over. Otherwise the
/// returned target is always at least the waypoint after `cursor`, so the
/// selection never falls behind the cursor. The caller owns the cursor and
/// continues from `Carrot::cursor` once the target is reached.
pub fn select_target(
    pose: &Pose,
    path: &Path,
    cursor: usize,
    config: &PlannerConfig,
) -> Option<Carrot> {
    if cursor + 1 >= path.len() {
        return None;
    }

    let mut target_idx = cursor + 1;
    while target_idx + 1 < path.len() {
        let current = path.waypoint(target_idx)?;
        let next = path.waypoint(target_idx + 1)?;
        if !should_skip(pose, current, next, config) {
            break;
        }
        target_idx += 1;
    }

    Some(Carrot {
        target: path.waypoint(target_idx)?,
        cursor: target_idx,
    })
}

/// Both skip conditions: the two waypoints are about as far from the robot
/// and in about the same direction.
fn should_skip(pose: &Pose, current: Point, next: Point, config: &PlannerConfig) -> bool {
    let robot = pose.point();

    let current_dist = distance(robot, current);
    let next_dist = distance(robot, next);
    if (current_dist - next_dist).abs() >= config.max_dist_to_next {
        return false;
    }

    let current_bearing = bearing(robot, current).to_degrees();
    let next_bearing = bearing(robot, next).to_degrees();
    angle_diff_deg(current_bearing, next_bearing).abs() < config.max_angle_to_next_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(points: &[(f64, f64)]) -> Path {
        Path::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn returns_none_at_or_past_last_waypoint() {
        let path = path_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let pose = Pose::new(0.0, 0.0, 0.0);
        let config = PlannerConfig::default();

        assert!(select_target(&pose, &path, 2, &config).is_none());
        assert!(select_target(&pose, &path, 5, &config).is_none());

        let single = path_of(&[(0.0, 0.0)]);
        assert!(select_target(&pose, &single, 0, &config).is_none());
    }

    #[test]
    fn skips_collinear_waypoints_to_the_last_in_one_call() {
        // Far-away robot sees three collinear, closely spaced waypoints at
        // nearly identical distance and bearing
        let path = path_of(&[(10.0, 0.0), (10.2, 0.0), (10.4, 0.0)]);
        let pose = Pose::new(0.0, 0.0, 0.0);
        let config = PlannerConfig::default();

        let carrot = select_target(&pose, &path, 0, &config).unwrap();
        assert_eq!(carrot.target, Point::new(10.4, 0.0));
        assert_eq!(carrot.cursor, 2);
    }

    #[test]
    fn no_skip_when_distance_delta_is_large() {
        let path = path_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let pose = Pose::new(0.0, 0.0, 0.0);
        let config = PlannerConfig::default();

        // |d(p1) - d(p2)| = 1.0 >= 0.5: take the next waypoint, no skip
        let carrot = select_target(&pose, &path, 0, &config).unwrap();
        assert_eq!(carrot.target, Point::new(1.0, 0.0));
        assert_eq!(carrot.cursor, 1);
    }

    #[test]
    fn no_skip_when_bearing_delta_is_large() {
        // Equidistant waypoints in very different directions
        let path = path_of(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        let pose = Pose::new(0.0, 0.0, 0.0);
        let config = PlannerConfig::default();

        // p1 at 0°, p2 at 90°: bearing delta 90° >= 50°
        let carrot = select_target(&pose, &path, 0, &config).unwrap();
        assert_eq!(carrot.cursor, 1);
    }

    #[test]
    fn target_is_never_behind_the_cursor() {
        let path = path_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let config = PlannerConfig::default();

        for cursor in 0..path.len() {
            let pose = Pose::new(-5.0, 2.0, 1.0);
            if let Some(carrot) = select_target(&pose, &path, cursor, &config) {
                assert!(carrot.cursor > cursor);
            }
        }
    }
}
