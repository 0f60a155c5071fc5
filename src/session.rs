//! Boundary surface for the render and input layers
//!
//! A `Session` wraps one `GameState` together with the held input, the
//! camera rig and the process-wide leaderboard. Render code reads it through
//! accessors or an owned `Snapshot`; input code forwards key state through
//! the setters and calls `update` once per frame.

use serde::Serialize;

use crate::camera::CameraRig;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::leaderboard::{Leaderboard, RunRecord};
use crate::sim::{
    Direction, Frontier, GameOverCause, GameState, MovementState, Obstacle, PathTile, PlayerPose,
    RandomSource, SeededRandom, TickInput, tick,
};

/// Owned copy of everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tiles: Vec<PathTile>,
    /// Active obstacles only
    pub obstacles: Vec<Obstacle>,
    pub player: PlayerPose,
    pub movement: MovementState,
    pub score: u32,
    pub game_over: bool,
    pub game_over_cause: Option<GameOverCause>,
    pub show_directions: bool,
    pub camera: CameraRig,
}

/// One playing session: a run plus the state that outlives runs
#[derive(Debug, Clone)]
pub struct Session<R = SeededRandom> {
    state: GameState<R>,
    input: TickInput,
    camera: CameraRig,
    leaderboard: Leaderboard,
}

impl Session<SeededRandom> {
    /// Start a session with default tuning
    pub fn new(seed: u64) -> Self {
        log::info!("Starting session with seed {}", seed);
        Self::from_state(GameState::new(seed))
    }

    /// Start a session with custom tuning, rejecting invalid values
    pub fn with_config(seed: u64, config: SimConfig) -> Result<Self, SimError> {
        let state = GameState::with_rng(config, SeededRandom::new(seed))?;
        log::info!("Starting session with seed {}", seed);
        Ok(Self::from_state(state))
    }
}

impl<R: RandomSource> Session<R> {
    /// Start a session drawing randomness from `rng`
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, SimError> {
        Ok(Self::from_state(GameState::with_rng(config, rng)?))
    }

    fn from_state(state: GameState<R>) -> Self {
        Self {
            state,
            input: TickInput::default(),
            camera: CameraRig::default(),
            leaderboard: Leaderboard::new(),
        }
    }

    /// Begin a new run. Camera and leaderboard carry over.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as `GameState::reset`.
    pub fn reset(&mut self) {
        self.state.reset();
        self.input = TickInput::default();
    }

    /// Advance the session by `dt` seconds.
    ///
    /// # Panics
    ///
    /// Panics if the path reaches a state generation cannot continue from.
    /// That indicates a bug, never a gameplay outcome.
    pub fn update(&mut self, dt: f32) {
        if let Err(e) = self.try_update(dt) {
            log::error!("Simulation invariant violated: {e}");
            panic!("simulation invariant violated: {e}");
        }
    }

    /// Advance the session by `dt` seconds, surfacing invariant violations
    pub fn try_update(&mut self, dt: f32) -> Result<(), SimError> {
        if self.state.game_over {
            return Ok(());
        }

        tick(&mut self.state, &self.input, dt)?;
        self.camera.advance(dt);

        if let Some(cause) = self.state.game_over_cause {
            self.leaderboard.record(RunRecord {
                score: self.state.score,
                elapsed: self.state.elapsed,
                cause,
            });
        }
        Ok(())
    }

    // === Input ===

    pub fn set_forward(&mut self, held: bool) {
        self.input.forward = held;
    }

    pub fn set_backward(&mut self, held: bool) {
        self.input.backward = held;
    }

    pub fn set_left(&mut self, held: bool) {
        self.input.left = held;
    }

    pub fn set_right(&mut self, held: bool) {
        self.input.right = held;
    }

    pub fn set_direction(&mut self, direction: Direction, held: bool) {
        self.input.set_held(direction, held);
    }

    /// Jump modifier
    pub fn set_jump(&mut self, held: bool) {
        self.input.jump = held;
    }

    /// Hand control to the demo planner
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Replace all held intents at once
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    // === Camera ===

    pub fn next_camera_mode(&mut self) {
        self.camera.next_mode();
    }

    pub fn toggle_camera_rotation(&mut self) {
        self.camera.toggle_rotation();
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    // === Read access ===

    pub fn tiles(&self) -> &[PathTile] {
        &self.state.path.tiles
    }

    pub fn active_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.state.active_obstacles()
    }

    pub fn player(&self) -> &PlayerPose {
        &self.state.player
    }

    pub fn movement(&self) -> &MovementState {
        &self.state.movement
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.state.game_over_cause
    }

    pub fn show_directions(&self) -> bool {
        self.state.show_directions
    }

    pub fn frontier(&self) -> Frontier {
        self.state.frontier()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: self.state.path.tiles.clone(),
            obstacles: self.state.active_obstacles().copied().collect(),
            player: self.state.player,
            movement: self.state.movement,
            score: self.state.score,
            game_over: self.state.game_over,
            game_over_cause: self.state.game_over_cause,
            show_directions: self.state.show_directions,
            camera: self.camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ObstacleKind, ScriptedRandom};

    fn clear_session(seed: u64) -> Session {
        let mut session = Session::new(seed);
        session.state_mut().obstacles.clear();
        session
    }

    fn run_until_idle(session: &mut Session, dt: f32) {
        session.update(dt);
        for _ in 0..100 {
            if session.movement().is_idle() || session.is_game_over() {
                return;
            }
            session.update(dt);
        }
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(12345);
        assert_eq!(session.tiles().len(), 20);
        assert_eq!(session.score(), 0);
        assert!(!session.is_game_over());
        assert!(session.show_directions());
        assert!(session.leaderboard().is_empty());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = SimConfig {
            roll_speed: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Session::with_config(1, config),
            Err(SimError::InvalidConfig(_))
        ));

        let config = SimConfig {
            segment_turn_interval: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Session::with_rng(config, ScriptedRandom::constant(0.5)),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_held_input_drives_moves() {
        let mut session = clear_session(12345);
        session.set_right(true);
        run_until_idle(&mut session, 0.1);
        session.set_right(false);

        assert_eq!(session.player().position.x, 1.0);
        assert_eq!(session.score(), 1);
        assert!(!session.show_directions());
    }

    #[test]
    fn test_game_over_records_run() {
        let mut session = clear_session(12345);
        session.set_right(true);
        run_until_idle(&mut session, 0.1);
        run_until_idle(&mut session, 0.1);
        session.set_right(false);
        session.set_forward(true);
        run_until_idle(&mut session, 0.1);

        assert!(session.is_game_over());
        assert_eq!(session.game_over_cause(), Some(GameOverCause::FellOffPath));
        let best = session.leaderboard().best().unwrap();
        assert_eq!(best.score, 2);
        assert_eq!(best.cause, GameOverCause::FellOffPath);

        // Further updates neither mutate nor record again
        for _ in 0..10 {
            session.update(0.1);
        }
        assert_eq!(session.leaderboard().len(), 1);
    }

    #[test]
    fn test_reset_keeps_camera_and_board() {
        let mut session = clear_session(12345);
        session.zoom_out();
        session.set_right(true);
        run_until_idle(&mut session, 0.1);
        session.set_right(false);
        session.set_forward(true);
        run_until_idle(&mut session, 0.1);
        assert!(session.is_game_over());

        session.reset();
        assert!(!session.is_game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(*session.input(), TickInput::default());
        assert_eq!(session.camera().distance, 9.0);
        assert_eq!(session.leaderboard().len(), 1);
    }

    #[test]
    fn test_camera_stops_after_game_over() {
        let mut session = clear_session(12345);
        session.toggle_camera_rotation();
        session.update(1.0);
        assert_eq!(session.camera().angle, 55.0);

        session.set_forward(true);
        run_until_idle(&mut session, 0.1);
        assert!(session.is_game_over());
        let angle = session.camera().angle;
        session.update(1.0);
        assert_eq!(session.camera().angle, angle);
    }

    #[test]
    fn test_snapshot_filters_inactive() {
        let mut session =
            Session::with_rng(SimConfig::default(), ScriptedRandom::constant(0.0)).unwrap();
        let mut gone = Obstacle::new(8, 0, ObstacleKind::MovingBlock);
        gone.active = false;
        session.state_mut().obstacles = vec![Obstacle::new(6, 0, ObstacleKind::RisingBlock), gone];

        let snap = session.snapshot();
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].kind, ObstacleKind::RisingBlock);
        assert_eq!(snap.tiles.len(), session.tiles().len());
        assert!(snap.show_directions);

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("Isometric"));
    }
}
