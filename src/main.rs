//! MargaNav - Waypoint navigation controller
//!
//! Connects to a robot (or simulator) endpoint, loads a recorded path, and
//! drives the robot along it. See the library crate for the navigation core.

use marga_nav::client::RobotClient;
use marga_nav::config::MargaConfig;
use marga_nav::error::{MargaError, Result};
use marga_nav::mission::Mission;
use marga_nav::path::load_path;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let mut config = if args.len() > 1 && !args[1].starts_with("--") {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        MargaConfig::load(config_path)?
    } else if Path::new("marga.toml").exists() {
        info!("Loading configuration from marga.toml");
        MargaConfig::load(Path::new("marga.toml"))?
    } else {
        info!("Using default configuration");
        MargaConfig::default()
    };

    // Flag overrides
    if let Some(host) = flag_value(&args, "--robot") {
        info!("Using robot host: {}", host);
        config.connection.host = host;
    }
    if let Some(file) = flag_value(&args, "--path") {
        info!("Using path file: {}", file);
        config.path.file = file;
    }

    info!("MargaNav v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the path before touching the network
    let path = load_path(Path::new(&config.path.file))?;
    info!(
        "Loaded {} waypoints from {}, goal at ({:.2}, {:.2})",
        path.len(),
        config.path.file,
        path.goal().x,
        path.goal().y
    );

    // Connect to the robot
    info!(
        "Connecting to {}:{}",
        config.connection.host, config.connection.port
    );
    let timeout = Duration::from_millis(config.connection.timeout_ms);
    let mut client = RobotClient::connect_timeout(&config.address(), timeout)?;
    client.set_timeout(Some(timeout))?;

    // Check the scanner geometry against the configured guard sector
    let props = client.laser_properties()?;
    let beams = props.beam_count();
    info!(
        "Laser: {} beams, {:.1}° to {:.1}°",
        beams,
        props.start_angle.to_degrees(),
        props.end_angle.to_degrees()
    );
    if config.guard.sector_end > beams {
        return Err(MargaError::Config(format!(
            "guard sector {}..{} exceeds the {}-beam scan",
            config.guard.sector_start, config.guard.sector_end, beams
        )));
    }

    // SIGINT/SIGTERM cancel the traversal cleanly
    let cancel = Arc::new(AtomicBool::new(false));
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    {
        let cancel = Arc::clone(&cancel);
        std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!("Received signal {}, stopping", signal);
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    // Drive
    let mut mission = Mission::new(&config, client, cancel);
    match mission.run(&path) {
        Ok(report) => {
            info!(
                "Done: completed={}, {} waypoints, {:.1}s",
                report.completed,
                report.waypoints_reached,
                report.elapsed.as_secs_f64()
            );
            Ok(())
        }
        Err(e) => {
            error!("Traversal aborted: {}", e);
            Err(e)
        }
    }
}

/// Value following `flag` in the argument list, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
