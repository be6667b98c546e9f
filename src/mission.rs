//! The traversal control loop
//!
//! One `Mission` drives one path traversal, strictly sequentially: fetch a
//! pose, select a carrot, drive toward it at a fixed tick until close
//! enough, advance the cursor, re-check the goal condition. The mission owns
//! the cursor for the whole traversal; the planner only ever sees it as an
//! argument and hands back the advanced value.
//!
//! Any sensing or actuation failure aborts the traversal after a
//! best-effort stop command — there is no retry or checkpointing.

use crate::config::{MargaConfig, MissionConfig, PlannerConfig};
use crate::error::{MargaError, Result};
use crate::geometry::distance;
use crate::nav::{select_target, CollisionGuard, GuardState, MotionController};
use crate::path::Path;
use crate::robot::{CommandSink, PoseSource, ScanSource};
use crate::types::{DriveCommand, Point, Pose};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Summary of one traversal.
#[derive(Debug, Clone)]
pub struct MissionReport {
    /// True when the traversal ran to the end of the path or the goal
    /// condition; false when it was cancelled
    pub completed: bool,
    /// Waypoint targets reached
    pub waypoints_reached: usize,
    /// Total drive cycles executed
    pub cycles: u64,
    /// Wall-clock duration of the traversal
    pub elapsed: Duration,
}

/// Outcome of the drive sub-loop toward one carrot.
enum DriveOutcome {
    Reached(Pose),
    Cancelled,
}

/// Drives one robot along one path.
pub struct Mission<R> {
    robot: R,
    controller: MotionController,
    guard: CollisionGuard,
    planner_config: PlannerConfig,
    config: MissionConfig,
    cancel: Arc<AtomicBool>,
}

impl<R: PoseSource + ScanSource + CommandSink> Mission<R> {
    /// Build a mission from the configuration and an already-connected robot.
    ///
    /// The cancel flag is checked at the top of every cycle; setting it stops
    /// the traversal cleanly after one final stop command.
    pub fn new(config: &MargaConfig, robot: R, cancel: Arc<AtomicBool>) -> Self {
        Self {
            robot,
            controller: MotionController::new(config.controller.clone()),
            guard: CollisionGuard::new(config.guard.clone()),
            planner_config: config.planner.clone(),
            config: config.mission.clone(),
            cancel,
        }
    }

    /// Consume the mission and hand back the robot, e.g. to inspect a
    /// simulated robot after a run.
    pub fn into_robot(self) -> R {
        self.robot
    }

    /// Run one full traversal of `path`.
    ///
    /// On success the robot has been stopped and the report describes the
    /// run. On error the traversal is over as well: a best-effort stop has
    /// been attempted before the error is returned.
    pub fn run(&mut self, path: &Path) -> Result<MissionReport> {
        let started = Instant::now();

        let result = self.traverse(path, started);

        // Terminal state either way: one stop command, then hand back
        match result {
            Ok(report) => {
                self.robot.send_command(&DriveCommand::zero())?;
                info!(
                    "Traversal {} after {:.1}s: {} waypoints, {} cycles",
                    if report.completed { "finished" } else { "cancelled" },
                    report.elapsed.as_secs_f64(),
                    report.waypoints_reached,
                    report.cycles
                );
                Ok(report)
            }
            Err(e) => {
                if self.robot.send_command(&DriveCommand::zero()).is_err() {
                    warn!("Best-effort stop after failure was not delivered");
                }
                Err(e)
            }
        }
    }

    fn traverse(&mut self, path: &Path, started: Instant) -> Result<MissionReport> {
        let mut cursor = 0usize;
        let mut waypoints_reached = 0usize;
        let mut cycles = 0u64;
        let mut completed = true;

        info!("Following path with {} waypoints", path.len());

        loop {
            if self.cancelled() {
                completed = false;
                break;
            }

            let pose = self.robot.pose()?;
            let Some(carrot) = select_target(&pose, path, cursor, &self.planner_config) else {
                // Cursor at the end of the path: traversal is done
                break;
            };

            debug!(
                "Carrot at ({:.2}, {:.2}), cursor {} -> {}",
                carrot.target.x, carrot.target.y, cursor, carrot.cursor
            );

            let arrival = match self.drive_to(carrot.target, cursor, &mut cycles)? {
                DriveOutcome::Reached(pose) => pose,
                DriveOutcome::Cancelled => {
                    completed = false;
                    break;
                }
            };

            cursor = carrot.cursor;
            waypoints_reached += 1;

            if goal_reached(&arrival, path, cursor, &self.config) {
                info!("Goal reached at waypoint cursor {}/{}", cursor, path.len());
                break;
            }

            if cursor >= path.len() {
                break;
            }
        }

        Ok(MissionReport {
            completed,
            waypoints_reached,
            cycles,
            elapsed: started.elapsed(),
        })
    }

    /// Drive toward one target until within `min_dist_to_target`.
    ///
    /// Tick-paced by the monotonic clock and bounded by
    /// `max_cycles_per_target` so an unreachable target cannot livelock the
    /// traversal.
    fn drive_to(&mut self, target: Point, cursor: usize, cycles: &mut u64) -> Result<DriveOutcome> {
        let tick = Duration::from_millis(self.config.tick_ms);

        for _ in 0..self.config.max_cycles_per_target {
            if self.cancelled() {
                return Ok(DriveOutcome::Cancelled);
            }

            let cycle_started = Instant::now();
            let pose = self.robot.pose()?;

            if distance(pose.point(), target) <= self.config.min_dist_to_target {
                return Ok(DriveOutcome::Reached(pose));
            }

            let draft = self.controller.compute(&pose, target);
            let scan = self.robot.scan()?;
            let (command, state) = self.guard.apply(&scan, draft);
            if state == GuardState::Obstructed {
                debug!("Collision guard override near waypoint {}", cursor);
            }

            self.robot.send_command(&command)?;
            *cycles += 1;

            let spent = cycle_started.elapsed();
            if spent < tick {
                std::thread::sleep(tick - spent);
            }
        }

        Err(MargaError::TargetTimeout { cursor })
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Goal condition: close to the final waypoint AND most of the path behind
/// the cursor. The progress gate keeps a loop path (start ≈ goal) from
/// terminating on the spot.
fn goal_reached(pose: &Pose, path: &Path, cursor: usize, config: &MissionConfig) -> bool {
    distance(pose.point(), path.goal()) <= config.dist_to_goal
        && cursor as f64 > config.goal_progress_fraction * path.len() as f64
}
