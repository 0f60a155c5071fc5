//! Game state and core simulation types
//!
//! Everything a render layer needs to draw a frame lives here, plus the
//! `GameState` aggregate that owns it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::path::{Frontier, Path};
use super::rng::{RandomSource, SeededRandom};
use super::spawn::spawn_obstacles;
use crate::config::SimConfig;
use crate::error::SimError;

/// Axis a path step advances along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// +1 in x
    X,
    /// +1 in z
    Z,
}

impl Axis {
    /// The other axis
    pub fn flip(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// 0 maps to X, anything else to Z
    pub fn from_index(index: u32) -> Self {
        if index == 0 { Axis::X } else { Axis::Z }
    }

    /// Grid delta of one step along this axis
    pub fn step(self) -> (i32, i32) {
        match self {
            Axis::X => (1, 0),
            Axis::Z => (0, 1),
        }
    }
}

/// One platform cell of the path
///
/// `lifetime` stays within `[0, max_lifetime]`; at 0 the tile is gone for good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathTile {
    pub x: i32,
    pub z: i32,
    /// Remaining lifetime in seconds
    pub lifetime: f32,
    pub max_lifetime: f32,
    /// Walk changed axis when entering this tile
    pub corner: bool,
}

impl PathTile {
    pub fn new(x: i32, z: i32, lifetime: f32, corner: bool) -> Self {
        Self {
            x,
            z,
            lifetime,
            max_lifetime: lifetime,
            corner,
        }
    }

    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        (self.x, self.z)
    }

    /// Tile can still be stood on
    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Remaining lifetime as a fraction of its starting value (for fading)
    pub fn life_fraction(&self) -> f32 {
        if self.max_lifetime > 0.0 {
            self.lifetime / self.max_lifetime
        } else {
            0.0
        }
    }
}

/// Obstacle types, each with its own animation and hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Rises from the tile to height 1 over 2 s
    RisingBlock,
    /// Drops from height 2 to the tile over 1 s
    FallingBlock,
    /// Spins in place and bobs
    SpinningBlock,
    /// Circles its anchor cell with radius 0.5
    MovingBlock,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::RisingBlock,
        ObstacleKind::FallingBlock,
        ObstacleKind::SpinningBlock,
        ObstacleKind::MovingBlock,
    ];
}

/// An obstacle anchored to a path tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: i32,
    pub z: i32,
    pub kind: ObstacleKind,
    /// Seconds of animation accumulated since spawn
    pub progress: f32,
    pub active: bool,
    // Derived by the animator only
    pub height: f32,
    /// Degrees
    pub rotation: f32,
    pub offset_x: f32,
    pub offset_z: f32,
}

impl Obstacle {
    /// A freshly spawned obstacle with all animation state zeroed
    pub fn new(x: i32, z: i32, kind: ObstacleKind) -> Self {
        Self {
            x,
            z,
            kind,
            progress: 0.0,
            active: true,
            height: 0.0,
            rotation: 0.0,
            offset_x: 0.0,
            offset_z: 0.0,
        }
    }

    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        (self.x, self.z)
    }
}

/// Player move directions (screen-relative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// z - 1
    Forward,
    /// z + 1
    Backward,
    /// x - 1
    Left,
    /// x + 1
    Right,
}

impl Direction {
    /// Input priority order
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit grid delta (dx, dz)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Forward => (0, -1),
            Direction::Backward => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction whose delta is `(dx, dz)`, if it is a unit step
    pub fn from_delta(dx: i32, dz: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dz))
    }

    /// World-space offset of `cells` steps in this direction
    pub fn offset(self, cells: f32) -> Vec3 {
        let (dx, dz) = self.delta();
        Vec3::new(dx as f32 * cells, 0.0, dz as f32 * cells)
    }
}

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MovementState {
    /// Resting on a tile, accepting input
    #[default]
    Idle,
    /// Tumbling one cell; `progress` in [0, 1]
    Rolling { direction: Direction, progress: f32 },
    /// Arcing two cells from `start` to `destination`
    Jumping {
        direction: Direction,
        progress: f32,
        start: Vec3,
        destination: Vec3,
    },
}

impl MovementState {
    pub fn is_idle(&self) -> bool {
        matches!(self, MovementState::Idle)
    }

    /// Direction of the move in flight
    pub fn direction(&self) -> Option<Direction> {
        match *self {
            MovementState::Idle => None,
            MovementState::Rolling { direction, .. } | MovementState::Jumping { direction, .. } => {
                Some(direction)
            }
        }
    }

    /// Tumble angle in degrees while rolling (0 otherwise)
    pub fn roll_angle(&self) -> f32 {
        match *self {
            MovementState::Rolling { progress, .. } => progress * 90.0,
            _ => 0.0,
        }
    }

    /// Somersault angle in degrees while jumping (0 otherwise)
    pub fn spin_angle(&self) -> f32 {
        match *self {
            MovementState::Jumping { progress, .. } => progress * 180.0,
            _ => 0.0,
        }
    }
}

/// Player pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    /// World position; `y` is the rest height
    pub position: Vec3,
    /// Height above rest while airborne
    pub jump_height: f32,
}

impl PlayerPose {
    pub fn at_rest(x: f32, z: f32, rest_height: f32) -> Self {
        Self {
            position: Vec3::new(x, rest_height, z),
            jump_height: 0.0,
        }
    }

    /// Position including the jump arc
    pub fn world_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.jump_height
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Landed where no walkable tile exists
    FellOffPath,
    /// Rolled into an obstacle
    HitObstacle,
    /// Clipped an obstacle mid-jump
    MidAirCollision,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState<R = SeededRandom> {
    pub config: SimConfig,
    /// Source of all generation/spawn randomness
    pub rng: R,
    pub path: Path,
    pub obstacles: Vec<Obstacle>,
    pub player: PlayerPose,
    pub movement: MovementState,
    pub score: u32,
    /// Best `floor(x + z)` reached this run
    pub max_distance: i32,
    pub game_over: bool,
    pub game_over_cause: Option<GameOverCause>,
    /// Cleared once the player first moves (overlay hint)
    pub show_directions: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds this run
    pub elapsed: f32,
}

impl GameState<SeededRandom> {
    /// Create a new run with default tuning and the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::blank(SimConfig::default(), SeededRandom::new(seed));
        state.reset();
        state
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new run drawing randomness from `rng`, rejecting invalid
    /// tuning before anything is generated
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, SimError> {
        config.validate()?;
        let mut state = Self::blank(config, rng);
        state.try_reset()?;
        Ok(state)
    }

    fn blank(config: SimConfig, rng: R) -> Self {
        Self {
            player: PlayerPose::at_rest(0.0, 0.0, config.rest_height),
            config,
            rng,
            path: Path::default(),
            obstacles: Vec::new(),
            movement: MovementState::Idle,
            score: 0,
            max_distance: 0,
            game_over: false,
            game_over_cause: None,
            show_directions: true,
            time_ticks: 0,
            elapsed: 0.0,
        }
    }

    /// Clear everything, regenerate the initial path and put the player on
    /// its first tile. The random source carries on from where it was.
    ///
    /// # Panics
    ///
    /// Panics if the fresh path cannot be generated or populated. With a
    /// validated config that is a bug, never a gameplay outcome.
    pub fn reset(&mut self) {
        if let Err(e) = self.try_reset() {
            log::error!("Simulation invariant violated on reset: {e}");
            panic!("simulation invariant violated on reset: {e}");
        }
    }

    /// `reset`, surfacing invariant violations instead of panicking
    pub fn try_reset(&mut self) -> Result<(), SimError> {
        self.obstacles.clear();
        self.path.generate_initial(&mut self.rng, &self.config);
        let first = self.path.tiles.first().ok_or(SimError::EmptyPath)?.cell();

        spawn_obstacles(
            &self.path.tiles,
            0,
            self.config.initial_obstacle_start,
            &mut self.obstacles,
            &mut self.rng,
            &self.config,
        )?;

        self.player = PlayerPose::at_rest(first.0 as f32, first.1 as f32, self.config.rest_height);
        self.movement = MovementState::Idle;
        self.score = 0;
        self.max_distance = 0;
        self.game_over = false;
        self.game_over_cause = None;
        self.show_directions = true;
        self.time_ticks = 0;
        self.elapsed = 0.0;

        log::info!(
            "Run reset: {} tiles, {} obstacles, frontier ({}, {})",
            self.path.tiles.len(),
            self.obstacles.len(),
            self.path.frontier.max_x,
            self.path.frontier.max_z
        );
        Ok(())
    }

    /// Append a path segment and populate it with obstacles.
    /// Returns the number of tiles added.
    pub fn extend_path(&mut self) -> Result<usize, SimError> {
        let segment = self.path.extend(&mut self.rng, &self.config)?;
        let added = segment.len();
        let spawned = spawn_obstacles(
            &self.path.tiles,
            segment.start,
            0,
            &mut self.obstacles,
            &mut self.rng,
            &self.config,
        )?;
        log::debug!(
            "Extended path by {} tiles ({} obstacles), frontier now ({}, {})",
            added,
            spawned,
            self.path.frontier.max_x,
            self.path.frontier.max_z
        );
        Ok(added)
    }

    /// End the run; later updates leave the state untouched
    pub fn end_run(&mut self, cause: GameOverCause) {
        if !self.game_over {
            self.game_over = true;
            self.game_over_cause = Some(cause);
            log::info!("Game over ({:?}) with score {}", cause, self.score);
        }
    }

    /// Current frontier
    pub fn frontier(&self) -> Frontier {
        self.path.frontier
    }

    /// Active obstacles only
    pub fn active_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.active)
    }
}
