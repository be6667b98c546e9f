//! End-to-end traversal tests against a simulated robot
//!
//! The simulator integrates unicycle kinematics from the last drive command
//! each time the mission asks for a pose, so the full chain — planner,
//! controller, guard, control loop — is exercised without a network.

use marga_nav::config::MargaConfig;
use marga_nav::error::{MargaError, Result};
use marga_nav::geometry::normalize_angle;
use marga_nav::mission::Mission;
use marga_nav::path::Path;
use marga_nav::robot::{CommandSink, PoseSource, ScanSource};
use marga_nav::types::{DriveCommand, Point, Pose, RangeScan};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const BEAMS: usize = 271;
const SIM_DT: f64 = 0.05;

/// Differential-drive simulator implementing the robot interfaces.
struct SimRobot {
    pose: Pose,
    command: DriveCommand,
    /// Commands recorded in send order
    sent: Vec<DriveCommand>,
    /// Scans to serve before the scanner reads clear
    obstructed_scans: usize,
    scans_served: usize,
}

impl SimRobot {
    fn new(start: Pose) -> Self {
        Self {
            pose: start,
            command: DriveCommand::zero(),
            sent: Vec::new(),
            obstructed_scans: 0,
            scans_served: 0,
        }
    }

    fn step(&mut self) {
        let heading = self.pose.heading + self.command.angular * SIM_DT;
        let heading = normalize_angle(heading);
        self.pose = Pose::new(
            self.pose.x + self.command.linear * heading.cos() * SIM_DT,
            self.pose.y + self.command.linear * heading.sin() * SIM_DT,
            heading,
        );
    }
}

impl PoseSource for SimRobot {
    fn pose(&mut self) -> Result<Pose> {
        self.step();
        Ok(self.pose)
    }
}

impl ScanSource for SimRobot {
    fn scan(&mut self) -> Result<RangeScan> {
        self.scans_served += 1;
        let mut echoes = vec![10.0; BEAMS];
        if self.scans_served <= self.obstructed_scans {
            echoes[135] = 0.3;
        }
        Ok(RangeScan::new(echoes, self.scans_served as u64))
    }
}

impl CommandSink for SimRobot {
    fn send_command(&mut self, command: &DriveCommand) -> Result<()> {
        self.command = *command;
        self.sent.push(*command);
        Ok(())
    }
}

fn unpaced_config() -> MargaConfig {
    let mut config = MargaConfig::default();
    config.mission.tick_ms = 0;
    config.mission.max_cycles_per_target = 5000;
    config
}

fn straight_path() -> Path {
    Path::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    ])
    .unwrap()
}

#[test]
fn drives_a_straight_path_to_the_goal() {
    let robot = SimRobot::new(Pose::new(0.0, 0.0, 0.0));
    let config = unpaced_config();
    let mut mission = Mission::new(&config, robot, Arc::new(AtomicBool::new(false)));

    let report = mission.run(&straight_path()).unwrap();
    assert!(report.completed);
    assert!(report.waypoints_reached >= 1);
    assert!(report.cycles > 0);
}

#[test]
fn final_command_is_zero_and_robot_ends_near_the_goal() {
    let robot = SimRobot::new(Pose::new(0.0, 0.0, 0.0));
    let config = unpaced_config();
    let goal_tolerance = config.mission.dist_to_goal;
    let mut mission = Mission::new(&config, robot, Arc::new(AtomicBool::new(false)));

    mission.run(&straight_path()).unwrap();

    // Reach into the simulator the mission consumed
    let robot = mission.into_robot();
    assert_eq!(robot.sent.last(), Some(&DriveCommand::zero()));

    let goal = Point::new(2.0, 0.0);
    let dist = ((robot.pose.x - goal.x).powi(2) + (robot.pose.y - goal.y).powi(2)).sqrt();
    assert!(
        dist <= goal_tolerance,
        "robot stopped {dist:.2}m from the goal"
    );
}

#[test]
fn follows_a_turning_path() {
    let path = Path::new(vec![
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ])
    .unwrap();

    let robot = SimRobot::new(Pose::new(0.0, 0.0, 0.0));
    let config = unpaced_config();
    let mut mission = Mission::new(&config, robot, Arc::new(AtomicBool::new(false)));

    let report = mission.run(&path).unwrap();
    assert!(report.completed);

    let robot = mission.into_robot();
    let dist = ((robot.pose.x - 0.0).powi(2) + (robot.pose.y - 2.0).powi(2)).sqrt();
    assert!(dist <= config.mission.dist_to_goal + config.mission.min_dist_to_target);
}

#[test]
fn guard_overrides_while_the_scanner_sees_an_obstacle() {
    let mut robot = SimRobot::new(Pose::new(0.0, 0.0, 0.0));
    robot.obstructed_scans = 5;
    let config = unpaced_config();
    let creep = config.guard.creep_speed;
    let escape = config.guard.escape_turn_speed;
    let mut mission = Mission::new(&config, robot, Arc::new(AtomicBool::new(false)));

    let report = mission.run(&straight_path()).unwrap();
    assert!(report.completed);

    let robot = mission.into_robot();
    let overridden: Vec<_> = robot
        .sent
        .iter()
        .filter(|c| c.linear == creep && c.angular.abs() == escape)
        .collect();
    assert_eq!(overridden.len(), 5, "one override per obstructed scan");
    // First override comes before any unguarded command takes effect
    assert_eq!(robot.sent[0].linear, creep);
}

#[test]
fn empty_scan_robot_still_completes() {
    // A scanner that returns no echoes at all must not stop the traversal
    struct NoScanRobot(SimRobot);
    impl PoseSource for NoScanRobot {
        fn pose(&mut self) -> Result<Pose> {
            self.0.pose()
        }
    }
    impl ScanSource for NoScanRobot {
        fn scan(&mut self) -> Result<RangeScan> {
            Ok(RangeScan::new(Vec::new(), 0))
        }
    }
    impl CommandSink for NoScanRobot {
        fn send_command(&mut self, command: &DriveCommand) -> Result<()> {
            self.0.send_command(command)
        }
    }

    let robot = NoScanRobot(SimRobot::new(Pose::new(0.0, 0.0, 0.0)));
    let config = unpaced_config();
    let mut mission = Mission::new(&config, robot, Arc::new(AtomicBool::new(false)));
    assert!(mission.run(&straight_path()).unwrap().completed);
}

#[test]
fn send_failure_aborts_the_traversal() {
    struct FailingSink(SimRobot, usize);
    impl PoseSource for FailingSink {
        fn pose(&mut self) -> Result<Pose> {
            self.0.pose()
        }
    }
    impl ScanSource for FailingSink {
        fn scan(&mut self) -> Result<RangeScan> {
            self.0.scan()
        }
    }
    impl CommandSink for FailingSink {
        fn send_command(&mut self, command: &DriveCommand) -> Result<()> {
            if self.0.sent.len() >= self.1 {
                return Err(MargaError::Protocol("drive rejected".to_string()));
            }
            self.0.send_command(command)
        }
    }

    let robot = FailingSink(SimRobot::new(Pose::new(0.0, 0.0, 0.0)), 3);
    let config = unpaced_config();
    let mut mission = Mission::new(&config, robot, Arc::new(AtomicBool::new(false)));

    let err = mission.run(&straight_path()).unwrap_err();
    assert!(matches!(err, MargaError::Protocol(_)));
}
