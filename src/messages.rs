//! Typed wire messages exchanged with the robot
//!
//! The robot endpoint speaks a request/reply protocol over TCP with
//! length-prefixed JSON frames (see [`crate::client`]). Payloads are decoded
//! into these structures exactly once, at the boundary; the navigation core
//! never touches raw key-value data.

use crate::geometry::normalize_angle;
use crate::types::{Pose, RangeScan};
use serde::{Deserialize, Serialize};

/// Requests sent to the robot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Request {
    /// Ask for the current localization estimate
    GetPose,
    /// Ask for the latest range-scanner sweep
    GetScan,
    /// Ask for the scanner geometry (beam layout)
    GetLaserProperties,
    /// Set the differential-drive velocities. Fire-and-forget: the robot
    /// sends no reply, a transport error is the only failure signal.
    Drive { linear: f64, angular: f64 },
}

/// Replies received from the robot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Reply {
    Pose(PoseMsg),
    Scan(ScanMsg),
    LaserProperties(LaserPropertiesMsg),
}

/// Position in the world frame, meters
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PositionMsg {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Orientation as a unit quaternion
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OrientationMsg {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Localization snapshot as it arrives on the wire
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PoseMsg {
    pub position: PositionMsg,
    pub orientation: OrientationMsg,
    pub timestamp_ms: u64,
}

impl PoseMsg {
    /// Heading about the vertical axis, in radians normalized to (-π, π].
    ///
    /// The robot moves in the plane, so the orientation quaternion is a pure
    /// z-rotation: heading = 2·atan2(z, w).
    pub fn heading(&self) -> f64 {
        normalize_angle(2.0 * self.orientation.z.atan2(self.orientation.w))
    }

    /// Decode to the planar pose the navigation core works with.
    pub fn to_pose(&self) -> Pose {
        Pose::new(self.position.x, self.position.y, self.heading())
    }
}

/// One range-scanner sweep as it arrives on the wire
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScanMsg {
    /// Distance per beam, in meters; negative marks a beam with no return
    pub echoes: Vec<f64>,
    pub timestamp_ms: u64,
}

impl ScanMsg {
    pub fn to_scan(self) -> RangeScan {
        RangeScan::new(self.echoes, self.timestamp_ms)
    }
}

/// Range-scanner geometry
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LaserPropertiesMsg {
    /// Angle of the first beam, radians, relative to the robot's forward axis
    pub start_angle: f64,
    /// Angle of the last beam, radians
    pub end_angle: f64,
    /// Angular spacing between adjacent beams, radians
    pub angle_increment: f64,
}

impl LaserPropertiesMsg {
    /// Number of beams implied by the angular span.
    pub fn beam_count(&self) -> usize {
        if self.angle_increment <= 0.0 {
            return 0;
        }
        (((self.end_angle - self.start_angle) / self.angle_increment).round() as usize) + 1
    }

    /// Angle of beam `index`, radians.
    pub fn beam_angle(&self, index: usize) -> f64 {
        self.start_angle + self.angle_increment * index as f64
    }
}
