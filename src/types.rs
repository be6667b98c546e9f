//! Core navigation types: points, poses, scans, and drive commands

/// A 2D point in the world frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Robot pose: position plus heading.
///
/// Heading is in radians, normalized to (-π, π], measured from the world
/// x-axis with counter-clockwise positive. A pose is an immutable snapshot;
/// each control cycle fetches a fresh one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Position component of the pose.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Heading in degrees.
    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }
}

/// One sweep of the range scanner.
///
/// Samples are ordered by beam index; the beam-to-angle mapping is
/// sensor-specific (see [`crate::messages::LaserPropertiesMsg`]). A sample
/// that is negative or non-finite means the beam got no return. Scans are
/// snapshots, discarded after one collision-guard evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeScan {
    pub echoes: Vec<f64>,
    pub timestamp_ms: u64,
}

impl RangeScan {
    pub fn new(echoes: Vec<f64>, timestamp_ms: u64) -> Self {
        Self { echoes, timestamp_ms }
    }

    /// Number of beams in the scan.
    pub fn len(&self) -> usize {
        self.echoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.echoes.is_empty()
    }

    /// Distance measured by beam `index`, or `None` for a no-return sample
    /// or an index outside the scan.
    pub fn echo(&self, index: usize) -> Option<f64> {
        match self.echoes.get(index) {
            Some(&d) if d.is_finite() && d >= 0.0 => Some(d),
            _ => None,
        }
    }
}

/// Differential-drive velocity command.
///
/// `linear` is in m/s, positive forward. `angular` is in rad/s,
/// counter-clockwise positive, consistent with the heading convention.
/// Commands are transient: sent once per cycle, then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCommand {
    pub linear: f64,
    pub angular: f64,
}

impl DriveCommand {
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// The stop command.
    pub fn zero() -> Self {
        Self {
            linear: 0.0,
            angular: 0.0,
        }
    }
}
