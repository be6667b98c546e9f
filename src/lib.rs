//! MargaNav - Waypoint navigation controller for a differential-drive robot
//!
//! MargaNav connects to a robot (or simulator) over TCP, loads a recorded
//! path of waypoints, and drives the robot along it using carrot-chasing
//! waypoint selection, a proportional heading/speed control law, and a
//! reactive collision guard fed by the laser range scanner.
//!
//! The control loop is strictly sequential: sense, decide, act, repeat, at a
//! fixed tick. The transport, path loading, and configuration live at the
//! edges; the navigation core only sees typed poses, scans, and commands.

pub mod client;
pub mod config;
pub mod error;
pub mod geometry;
pub mod messages;
pub mod mission;
pub mod nav;
pub mod path;
pub mod robot;
pub mod types;

// Re-export commonly used types
pub use config::MargaConfig;
pub use error::{MargaError, Result};
pub use mission::{Mission, MissionReport};
pub use types::{DriveCommand, Point, Pose, RangeScan};
