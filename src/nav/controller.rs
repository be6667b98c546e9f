//! Motion controller: heading-error-driven proportional drive law
//!
//! Purely reactive: every cycle recomputes the command from a fresh pose, so
//! transient overshoot corrects itself on the next cycle. No integral or
//! derivative terms, no curvature lookahead beyond the carrot selection.

use crate::config::ControllerConfig;
use crate::geometry::{angle_diff_deg, bearing};
use crate::types::{DriveCommand, Point, Pose};

/// Converts (pose, target) into a drive command.
pub struct MotionController {
    config: ControllerConfig,
}

impl MotionController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// Compute the drive command for one cycle.
    ///
    /// Linear speed follows a downward parabola in heading error, peaking at
    /// zero error and cut to zero beyond ±90° — the robot does not drive
    /// forward while pointed away from the target. Angular speed is
    /// proportional to the heading error, signed to reduce it.
    pub fn compute(&self, pose: &Pose, target: Point) -> DriveCommand {
        let target_bearing = bearing(pose.point(), target).to_degrees();
        let heading_error = angle_diff_deg(pose.heading_degrees(), target_bearing);

        let linear = if heading_error.abs() > 90.0 {
            0.0
        } else {
            self.config.speed_falloff * heading_error * heading_error + 1.0
        };

        let angular = -self.config.turn_gain * heading_error.to_radians();

        DriveCommand::new(
            linear.clamp(0.0, self.config.max_linear_vel),
            angular.clamp(-self.config.max_angular_vel, self.config.max_angular_vel),
        )
    }
}
