//! Loading and validation of recorded waypoint paths
//!
//! A path file is a JSON array of recorded pose snapshots, in the format the
//! localization stack writes when a run is recorded: each entry carries a
//! `Pose` with a `Position` (and an orientation the follower does not need).
//! The records are decoded to plain waypoints once, here at the boundary.

use crate::error::{MargaError, Result};
use crate::types::Point;
use serde::Deserialize;

/// An ordered, immutable sequence of waypoints.
///
/// Index 0 is the start, the last index the goal. Loaded once per traversal
/// and never mutated; an empty path is rejected at construction.
#[derive(Debug, Clone)]
pub struct Path {
    waypoints: Vec<Point>,
}

impl Path {
    /// Build a path from waypoints, rejecting an empty sequence.
    pub fn new(waypoints: Vec<Point>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(MargaError::Path("path contains no waypoints".to_string()));
        }
        Ok(Self { waypoints })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoint(&self, index: usize) -> Option<Point> {
        self.waypoints.get(index).copied()
    }

    /// The final waypoint.
    pub fn goal(&self) -> Point {
        // non-empty by construction
        *self.waypoints.last().unwrap()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.waypoints.iter()
    }
}

#[derive(Debug, Deserialize)]
struct PathRecord {
    #[serde(rename = "Pose")]
    pose: RecordedPose,
}

#[derive(Debug, Deserialize)]
struct RecordedPose {
    #[serde(rename = "Position")]
    position: RecordedPosition,
}

#[derive(Debug, Deserialize)]
struct RecordedPosition {
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
}

/// Parse a recorded path from its JSON text.
pub fn parse_path(json: &str) -> Result<Path> {
    let records: Vec<PathRecord> =
        serde_json::from_str(json).map_err(|e| MargaError::Path(e.to_string()))?;

    let waypoints = records
        .iter()
        .map(|r| Point::new(r.pose.position.x, r.pose.position.y))
        .collect();

    Path::new(waypoints)
}

/// Load a recorded path from a file.
pub fn load_path(file: &std::path::Path) -> Result<Path> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| MargaError::Path(format!("Failed to read {:?}: {}", file, e)))?;
    parse_path(&content)
}
