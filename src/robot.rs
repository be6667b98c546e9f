//! Robot interface traits and a mock implementation for tests
//!
//! The control loop talks to its collaborators only through these traits;
//! the TCP client implements all three, and tests substitute scripted or
//! simulated robots. Every call is blocking and fallible — a failure aborts
//! the traversal, there are no retries.

use crate::error::{MargaError, Result};
use crate::types::{DriveCommand, Pose, RangeScan};

/// Source of localization snapshots.
pub trait PoseSource {
    fn pose(&mut self) -> Result<Pose>;
}

/// Source of range-scanner sweeps.
pub trait ScanSource {
    fn scan(&mut self) -> Result<RangeScan>;
}

/// Sink for differential-drive commands.
pub trait CommandSink {
    fn send_command(&mut self, command: &DriveCommand) -> Result<()>;
}

/// Mock robot for unit testing
///
/// Poses and scans are served from scripted queues (the last entry repeats
/// once a queue runs dry); every sent command is recorded for inspection.
#[derive(Default)]
pub struct MockRobot {
    poses: Vec<Pose>,
    scans: Vec<RangeScan>,
    pose_index: usize,
    scan_index: usize,
    pub sent: Vec<DriveCommand>,
    /// When set, the n-th pose request fails instead of answering
    pub fail_pose_at: Option<usize>,
    /// When set, the n-th command send fails
    pub fail_send_at: Option<usize>,
}

impl MockRobot {
    pub fn new(poses: Vec<Pose>, scans: Vec<RangeScan>) -> Self {
        Self {
            poses,
            scans,
            ..Default::default()
        }
    }
}

impl PoseSource for MockRobot {
    fn pose(&mut self) -> Result<Pose> {
        if self.fail_pose_at == Some(self.pose_index) {
            return Err(MargaError::Protocol("scripted pose failure".to_string()));
        }
        let pose = self
            .poses
            .get(self.pose_index)
            .or_else(|| self.poses.last())
            .copied()
            .ok_or_else(|| MargaError::Protocol("mock has no poses".to_string()))?;
        self.pose_index += 1;
        Ok(pose)
    }
}

impl ScanSource for MockRobot {
    fn scan(&mut self) -> Result<RangeScan> {
        let scan = self
            .scans
            .get(self.scan_index)
            .or_else(|| self.scans.last())
            .cloned()
            .ok_or_else(|| MargaError::Protocol("mock has no scans".to_string()))?;
        self.scan_index += 1;
        Ok(scan)
    }
}

impl CommandSink for MockRobot {
    fn send_command(&mut self, command: &DriveCommand) -> Result<()> {
        if self.fail_send_at == Some(self.sent.len()) {
            return Err(MargaError::Protocol("scripted send failure".to_string()));
        }
        self.sent.push(*command);
        Ok(())
    }
}
