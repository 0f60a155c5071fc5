//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time deltas only
//! - All randomness through a `RandomSource`
//! - Stable iteration order (tiles and obstacles in creation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod movement;
pub mod obstacle;
pub mod path;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tiles;

pub use collision::{collides_obstacle, obstacle_at, on_path};
pub use movement::{StepOutcome, advance_movement};
pub use obstacle::animate_obstacles;
pub use path::{Frontier, Path};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use spawn::spawn_obstacles;
pub use state::{
    Axis, Direction, GameOverCause, GameState, MovementState, Obstacle, ObstacleKind, PathTile,
    PlayerPose,
};
pub use tick::{TickInput, tick};
pub use tiles::decay_tiles;
