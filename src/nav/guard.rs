//! Collision guard: last-line reactive override on the drive command
//!
//! Inspects the forward sector of each fresh scan. If any beam reports an
//! obstacle inside the safety distance, the draft command is replaced by a
//! fixed escape turn away from the side the robot was steering into, at
//! creep speed. The guard is stateless: each scan is judged on its own, with
//! no latching between cycles.

use crate::config::GuardConfig;
use crate::types::{DriveCommand, RangeScan};

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No obstacle in the sector; the command passed through unchanged
    Clear,
    /// An obstacle breached the safety distance; the command was overridden
    Obstructed,
}

/// Applies the safety override to draft commands.
pub struct CollisionGuard {
    config: GuardConfig,
}

impl CollisionGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Check the forward sector of `scan` and override `command` if an
    /// obstacle is too close.
    ///
    /// The escape turn goes opposite to the commanded angular direction —
    /// away from the side the robot was about to swing into. No-return
    /// beams are ignored; only measured echoes can trigger the override.
    pub fn apply(&self, scan: &RangeScan, command: DriveCommand) -> (DriveCommand, GuardState) {
        let end = self.config.sector_end.min(scan.len());

        for index in self.config.sector_start..end {
            let Some(echo) = scan.echo(index) else {
                continue;
            };
            if echo < self.config.safety_distance {
                tracing::debug!(
                    "Obstacle at beam {}: {:.2}m < {:.2}m",
                    index,
                    echo,
                    self.config.safety_distance
                );
                let escape = if command.angular > 0.0 {
                    -self.config.escape_turn_speed
                } else {
                    self.config.escape_turn_speed
                };
                return (
                    DriveCommand::new(self.config.creep_speed, escape),
                    GuardState::Obstructed,
                );
            }
        }

        (command, GuardState::Clear)
    }
}
