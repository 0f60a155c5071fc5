//! Simulation error types
//!
//! Only programming defects and configuration problems are errors. Falling off
//! the path or hitting an obstacle is gameplay and just ends the run.

use thiserror::Error;

/// Errors raised by the simulation core and its configuration loader
#[derive(Error, Debug)]
pub enum SimError {
    /// `extend` was called before any path existed
    #[error("cannot extend an empty path")]
    EmptyPath,

    /// A tile expected during generation or spawning was missing
    #[error("no path tile at ({x}, {z})")]
    TileNotFound { x: i32, z: i32 },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for `SimConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
