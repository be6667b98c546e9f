//! TCP client for the robot endpoint
//!
//! Framing follows the daemon's wire protocol: a 4-byte big-endian length
//! prefix followed by a JSON payload, with a 1 MiB cap on frame size.
//! Requests that query state (`GetPose`, `GetScan`, `GetLaserProperties`)
//! are answered with exactly one reply frame; `Drive` is fire-and-forget.

use crate::error::{MargaError, Result};
use crate::messages::{LaserPropertiesMsg, Reply, Request};
use crate::robot::{CommandSink, PoseSource, ScanSource};
use crate::types::{DriveCommand, Pose, RangeScan};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

/// Maximum accepted frame size (1 MiB)
const MAX_FRAME_SIZE: usize = 1_048_576;

/// Blocking request/reply client for the robot
pub struct RobotClient {
    stream: TcpStream,
}

impl RobotClient {
    /// Connect with timeout.
    pub fn connect_timeout(addr: &str, timeout: Duration) -> Result<Self> {
        let sock_addr: std::net::SocketAddr = addr
            .parse()
            .map_err(|e| MargaError::Config(format!("Invalid address {}: {}", addr, e)))?;
        let stream = TcpStream::connect_timeout(&sock_addr, timeout)?;
        stream.set_nodelay(true)?;

        tracing::info!("Connected to robot at {}", addr);
        Ok(Self { stream })
    }

    /// Set the read/write timeout for subsequent requests.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(timeout)?;
        self.stream.set_write_timeout(timeout)?;
        Ok(())
    }

    /// Fetch the scanner geometry.
    pub fn laser_properties(&mut self) -> Result<LaserPropertiesMsg> {
        match self.request(&Request::GetLaserProperties)? {
            Reply::LaserProperties(props) => Ok(props),
            other => Err(unexpected_reply("laser properties", &other)),
        }
    }

    /// Send a request and read the single reply frame.
    fn request(&mut self, req: &Request) -> Result<Reply> {
        self.send_frame(req)?;
        self.read_frame()
    }

    /// Write one length-prefixed frame.
    fn send_frame(&mut self, req: &Request) -> Result<()> {
        let payload = serde_json::to_vec(req)?;
        let len = payload.len() as u32;

        self.stream.write_all(&len.to_be_bytes())?;
        self.stream.write_all(&payload)?;
        self.stream.flush()?;
        Ok(())
    }

    /// Read one length-prefixed frame and decode it.
    fn read_frame(&mut self) -> Result<Reply> {
        let mut len_bytes = [0u8; 4];
        self.stream.read_exact(&mut len_bytes)?;
        let len = u32::from_be_bytes(len_bytes) as usize;

        if len == 0 || len > MAX_FRAME_SIZE {
            return Err(MargaError::Protocol(format!(
                "Frame length {} outside 1..={}",
                len, MAX_FRAME_SIZE
            )));
        }

        let mut payload = vec![0u8; len];
        self.stream.read_exact(&mut payload)?;

        let reply = serde_json::from_slice(&payload)?;
        Ok(reply)
    }
}

fn unexpected_reply(wanted: &str, got: &Reply) -> MargaError {
    MargaError::Protocol(format!("Expected {} reply, got {:?}", wanted, got))
}

impl PoseSource for RobotClient {
    fn pose(&mut self) -> Result<Pose> {
        match self.request(&Request::GetPose)? {
            Reply::Pose(msg) => Ok(msg.to_pose()),
            other => Err(unexpected_reply("pose", &other)),
        }
    }
}

impl ScanSource for RobotClient {
    fn scan(&mut self) -> Result<RangeScan> {
        match self.request(&Request::GetScan)? {
            Reply::Scan(msg) => Ok(msg.to_scan()),
            other => Err(unexpected_reply("scan", &other)),
        }
    }
}

impl CommandSink for RobotClient {
    fn send_command(&mut self, command: &DriveCommand) -> Result<()> {
        self.send_frame(&Request::Drive {
            linear: command.linear,
            angular: command.angular,
        })
    }
}
