//! Cube Runner - an endless tumbling-cube runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (path generation, obstacles, movement, collisions)
//! - `session`: Boundary surface used by the render/input layers
//! - `config`: Data-driven game balance
//! - `camera`: Camera rig state driven by camera commands
//! - `leaderboard`: Best finished runs of the process

pub mod camera;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod session;
pub mod sim;

pub use camera::{CameraMode, CameraRig};
pub use config::SimConfig;
pub use error::SimError;
pub use leaderboard::{Leaderboard, RunRecord};
pub use session::{Session, Snapshot};

/// Game configuration constants (defaults for `SimConfig`)
pub mod consts {
    /// Tiles in the path generated on reset
    pub const INITIAL_PATH_LENGTH: usize = 20;
    /// Tiles appended by each path extension
    pub const PATH_SEGMENT_LENGTH: usize = 15;
    /// Forced +X steps at the start of a run (corner-free safe start)
    pub const SAFE_START_STEPS: usize = 5;
    /// Consecutive same-axis steps before the initial walk must turn
    pub const MAX_STRAIGHT_RUN: u32 = 3;
    /// Extension segments force a turn every N steps
    pub const SEGMENT_TURN_INTERVAL: usize = 5;
    /// Chance an extension step that repeats the previous axis is redrawn
    pub const SEGMENT_RESAMPLE_CHANCE: f32 = 2.0 / 3.0;

    /// Roll progress per second (a roll takes 1/3 s)
    pub const ROLL_SPEED: f32 = 3.0;
    /// Jump progress per second (a jump takes 1/2 s)
    pub const JUMP_SPEED: f32 = 2.0;
    /// Peak of the jump arc above rest height
    pub const MAX_JUMP_HEIGHT: f32 = 1.5;
    /// Player centre height while resting on a tile
    pub const REST_HEIGHT: f32 = 1.0;

    /// Seconds a tile survives once the player has passed it
    pub const PLATFORM_LIFETIME: f32 = 3.0;
    /// Extend the path when the player gets this close to the frontier
    pub const PATH_EXTENSION_THRESHOLD: f32 = 10.0;

    /// Base obstacle spawn chance per eligible tile
    pub const OBSTACLE_SPAWN_CHANCE: f32 = 0.6;
    /// Spawn chance in the interior of a straight 3-tile run
    pub const STRAIGHT_RUN_SPAWN_CHANCE: f32 = 0.8;
    /// First path index considered for obstacles after a reset
    pub const INITIAL_OBSTACLE_START: usize = 6;
    /// Leading tiles of an extension segment kept obstacle-free
    pub const SEGMENT_SAFE_ZONE: usize = 5;

    /// Largest frame delta callers should feed into an update
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Grid cell containing a world coordinate (rounds half away from zero)
#[inline]
pub fn grid_cell(v: f32) -> i32 {
    v.round() as i32
}

/// Manhattan distance between two grid cells
#[inline]
pub fn manhattan(a: (i32, i32), b: (i32, i32)) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}
