//! Configuration loading for MargaNav

use crate::error::{MargaError, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub path: PathConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub mission: MissionConfig,
}

/// Network connection settings
#[derive(Clone, Debug, Deserialize)]
pub struct ConnectionConfig {
    /// Robot host address (default: 127.0.0.1 for a local simulator)
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port number (default: 50000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Connect/read timeout in milliseconds (default: 5000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// Path file settings
#[derive(Clone, Debug, Deserialize)]
pub struct PathConfig {
    /// Recorded path file to follow
    #[serde(default = "default_path_file")]
    pub file: String,
}

/// Carrot planner thresholds
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    /// Maximum distance delta for skipping ahead to the next waypoint (meters)
    #[serde(default = "default_max_dist_to_next")]
    pub max_dist_to_next: f64,

    /// Maximum bearing delta for skipping ahead to the next waypoint (degrees)
    #[serde(default = "default_max_angle_to_next")]
    pub max_angle_to_next_deg: f64,
}

/// Motion controller gains and limits
#[derive(Clone, Debug, Deserialize)]
pub struct ControllerConfig {
    /// Quadratic falloff of linear speed with heading error, per degree².
    /// The default puts speed at 1.0 for zero error and 0.0 at ±90°.
    #[serde(default = "default_speed_falloff")]
    pub speed_falloff: f64,

    /// Proportional gain from heading error (radians) to angular speed
    #[serde(default = "default_turn_gain")]
    pub turn_gain: f64,

    /// Maximum linear velocity in m/s
    #[serde(default = "default_max_linear")]
    pub max_linear_vel: f64,

    /// Maximum angular velocity in rad/s
    #[serde(default = "default_max_angular")]
    pub max_angular_vel: f64,
}

/// Collision guard sector and speeds
#[derive(Clone, Debug, Deserialize)]
pub struct GuardConfig {
    /// An echo below this distance inside the sector triggers the override (meters)
    #[serde(default = "default_safety_distance")]
    pub safety_distance: f64,

    /// First beam index of the forward sector (inclusive)
    #[serde(default = "default_sector_start")]
    pub sector_start: usize,

    /// End beam index of the forward sector (exclusive)
    #[serde(default = "default_sector_end")]
    pub sector_end: usize,

    /// Linear speed while obstructed (m/s)
    #[serde(default = "default_creep_speed")]
    pub creep_speed: f64,

    /// Fixed turning speed while obstructed (rad/s)
    #[serde(default = "default_escape_turn_speed")]
    pub escape_turn_speed: f64,
}

/// Control loop thresholds and pacing
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// A waypoint counts as reached within this distance (meters)
    #[serde(default = "default_min_dist_to_target")]
    pub min_dist_to_target: f64,

    /// Goal proximity threshold (meters)
    #[serde(default = "default_dist_to_goal")]
    pub dist_to_goal: f64,

    /// Fraction of the path the cursor must have passed before goal
    /// proximity counts; guards against start ≈ goal false positives
    #[serde(default = "default_goal_progress_fraction")]
    pub goal_progress_fraction: f64,

    /// Control cycle period in milliseconds; 0 runs unpaced
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Upper bound on drive cycles per waypoint before aborting
    #[serde(default = "default_max_cycles_per_target")]
    pub max_cycles_per_target: u64,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    50000
}
fn default_timeout() -> u64 {
    5000
}
fn default_path_file() -> String {
    "paths/demo-loop.json".to_string()
}
fn default_max_dist_to_next() -> f64 {
    0.5
}
fn default_max_angle_to_next() -> f64 {
    50.0
}
fn default_speed_falloff() -> f64 {
    // speed = falloff * err² + 1 reaches 0.0 at ±90°
    -1.0 / 8100.0
}
fn default_turn_gain() -> f64 {
    2.0
}
fn default_max_linear() -> f64 {
    1.0
}
fn default_max_angular() -> f64 {
    4.0
}
fn default_safety_distance() -> f64 {
    0.7
}
fn default_sector_start() -> usize {
    120
}
fn default_sector_end() -> usize {
    150
}
fn default_creep_speed() -> f64 {
    0.2
}
fn default_escape_turn_speed() -> f64 {
    1.4
}
fn default_min_dist_to_target() -> f64 {
    0.8
}
fn default_dist_to_goal() -> f64 {
    1.0
}
fn default_goal_progress_fraction() -> f64 {
    0.8
}
fn default_tick_ms() -> u64 {
    50
}
fn default_max_cycles_per_target() -> u64 {
    2000
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_ms: default_timeout(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            file: default_path_file(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_dist_to_next: default_max_dist_to_next(),
            max_angle_to_next_deg: default_max_angle_to_next(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            speed_falloff: default_speed_falloff(),
            turn_gain: default_turn_gain(),
            max_linear_vel: default_max_linear(),
            max_angular_vel: default_max_angular(),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            safety_distance: default_safety_distance(),
            sector_start: default_sector_start(),
            sector_end: default_sector_end(),
            creep_speed: default_creep_speed(),
            escape_turn_speed: default_escape_turn_speed(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            min_dist_to_target: default_min_dist_to_target(),
            dist_to_goal: default_dist_to_goal(),
            goal_progress_fraction: default_goal_progress_fraction(),
            tick_ms: default_tick_ms(),
            max_cycles_per_target: default_max_cycles_per_target(),
        }
    }
}

impl Default for MargaConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            path: PathConfig::default(),
            planner: PlannerConfig::default(),
            controller: ControllerConfig::default(),
            guard: GuardConfig::default(),
            mission: MissionConfig::default(),
        }
    }
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: MargaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the full address string for connection
    pub fn address(&self) -> String {
        format!("{}:{}", self.connection.host, self.connection.port)
    }

    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.guard.sector_start >= self.guard.sector_end {
            return Err(MargaError::Config(format!(
                "guard sector is empty: {}..{}",
                self.guard.sector_start, self.guard.sector_end
            )));
        }
        if self.mission.min_dist_to_target <= 0.0 {
            return Err(MargaError::Config(
                "mission.min_dist_to_target must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mission.goal_progress_fraction) {
            return Err(MargaError::Config(
                "mission.goal_progress_fraction must be within 0..=1".to_string(),
            ));
        }
        if self.mission.max_cycles_per_target == 0 {
            return Err(MargaError::Config(
                "mission.max_cycles_per_target must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
