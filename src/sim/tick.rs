//! Per-frame simulation tick
//!
//! Advances the run in a fixed order: tile decay, obstacle animation,
//! player movement (which may extend the path), then score.

use super::autopilot;
use super::movement::{StepOutcome, advance_movement};
use super::obstacle::animate_obstacles;
use super::rng::RandomSource;
use super::state::{Direction, GameState};
use super::tiles::decay_tiles;
use crate::error::SimError;

/// Input intents held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump modifier; turns the next move into a two-cell jump
    pub jump: bool,
    /// Demo mode - the planner drives the player
    pub autopilot: bool,
}

impl TickInput {
    /// Held direction, resolved Forward > Backward > Left > Right
    pub fn direction(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self.is_held(d))
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set_held(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Forward => self.forward = held,
            Direction::Backward => self.backward = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }
}

/// Advance the run by `dt` seconds.
///
/// A finished run is left untouched. Errors only surface when path
/// extension finds the path in an impossible state.
pub fn tick<R: RandomSource>(
    state: &mut GameState<R>,
    input: &TickInput,
    dt: f32,
) -> Result<(), SimError> {
    if state.game_over {
        return Ok(());
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    let pos = state.player.position;
    decay_tiles(&mut state.path.tiles, dt, pos.x, pos.z);
    animate_obstacles(&mut state.obstacles, dt);

    let planned;
    let input = if input.autopilot {
        planned = autopilot::plan(state);
        &planned
    } else {
        input
    };

    if advance_movement(state, input, dt) == StepOutcome::Landed && !state.game_over {
        extend_if_near_frontier(state)?;
    }

    if !state.game_over {
        update_score(state);
    }
    Ok(())
}

/// Grow the path when the player is within the extension threshold of the
/// frontier. Returns whether a segment was added.
pub fn extend_if_near_frontier<R: RandomSource>(
    state: &mut GameState<R>,
) -> Result<bool, SimError> {
    let pos = state.player.position;
    let distance = state.path.frontier.distance_from(pos.x, pos.z);
    if distance >= state.config.extension_threshold {
        return Ok(false);
    }
    state.extend_path()?;
    Ok(true)
}

/// Raise the score to the furthest `floor(x + z)` reached
pub fn update_score<R: RandomSource>(state: &mut GameState<R>) {
    let pos = state.player.position;
    let current = (pos.x + pos.z).floor() as i32;
    if current > state.max_distance {
        state.max_distance = current;
        state.score = current.max(0) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameOverCause, MovementState, Obstacle, ObstacleKind, PlayerPose};
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn clear_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.obstacles.clear();
        state
    }

    fn hold(direction: Direction, jump: bool) -> TickInput {
        let mut input = TickInput {
            jump,
            ..Default::default()
        };
        input.set_held(direction, true);
        input
    }

    /// Tick with `input` once, then with nothing held until idle again
    fn run_move(state: &mut GameState, input: TickInput, dt: f32) {
        tick(state, &input, dt).unwrap();
        for _ in 0..1000 {
            if state.movement.is_idle() || state.game_over {
                return;
            }
            tick(state, &TickInput::default(), dt).unwrap();
        }
        panic!("move never resolved");
    }

    #[test]
    fn test_input_priority() {
        let all = TickInput {
            forward: true,
            backward: true,
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(all.direction(), Some(Direction::Forward));
        let lr = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(lr.direction(), Some(Direction::Left));
        assert_eq!(TickInput::default().direction(), None);
    }

    #[test]
    fn test_roll_right_one_cell() {
        let mut state = clear_state(12345);
        run_move(&mut state, hold(Direction::Right, false), 0.1);
        assert_eq!(state.player.position, Vec3::new(1.0, 1.0, 0.0));
        assert!(state.movement.is_idle());
        assert!(!state.game_over);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_roll_duration_matches_speed() {
        let mut state = clear_state(12345);
        tick(&mut state, &hold(Direction::Right, false), DT).unwrap();
        let mut ticks = 0;
        while !state.movement.is_idle() {
            tick(&mut state, &TickInput::default(), DT).unwrap();
            ticks += 1;
        }
        // 1 / ROLL_SPEED seconds, give or take a frame of float drift
        assert!((19..=21).contains(&ticks), "took {ticks} ticks");
    }

    #[test]
    fn test_mid_air_collision_before_landing() {
        let mut state = clear_state(12345);
        tick(&mut state, &hold(Direction::Right, true), 0.05).unwrap();
        tick(&mut state, &TickInput::default(), 0.05).unwrap();
        tick(&mut state, &TickInput::default(), 0.05).unwrap();

        // A block starting its fall over the cell the arc is about to cross
        state.obstacles.push(Obstacle::new(1, 0, ObstacleKind::FallingBlock));
        tick(&mut state, &TickInput::default(), 0.05).unwrap();

        assert!(state.game_over);
        assert_eq!(state.game_over_cause, Some(GameOverCause::MidAirCollision));
        match state.movement {
            MovementState::Jumping { progress, .. } => assert!(progress < 1.0),
            other => panic!("expected to still be mid-jump, got {:?}", other),
        }
        assert!(state.player.position.x < 2.0);
    }

    #[test]
    fn test_returning_to_dead_tile_falls() {
        let mut state = clear_state(12345);
        run_move(&mut state, hold(Direction::Right, false), 0.1);
        assert!(!state.game_over);

        let mut waited = 0;
        while state.path.tiles[0].lifetime > 0.0 {
            tick(&mut state, &TickInput::default(), 0.1).unwrap();
            waited += 1;
            assert!(waited < 100);
        }
        assert!(state.path.tiles[1].is_walkable());

        run_move(&mut state, hold(Direction::Left, false), 0.1);
        assert!(state.game_over);
        assert_eq!(state.game_over_cause, Some(GameOverCause::FellOffPath));
    }

    #[test]
    fn test_landing_near_frontier_extends_path() {
        let mut state = clear_state(4242);
        let from = state.path.tiles[12];
        let to = state.path.tiles[13];
        state.player = PlayerPose::at_rest(from.x as f32, from.z as f32, 1.0);
        let direction = Direction::from_delta(to.x - from.x, to.z - from.z).unwrap();

        let before = state.path.len();
        run_move(&mut state, hold(direction, false), 0.1);

        assert!(!state.game_over);
        assert_eq!(state.path.len(), before + state.config.segment_length);
        let max_x = state.path.tiles.iter().map(|t| t.x).max().unwrap();
        let max_z = state.path.tiles.iter().map(|t| t.z).max().unwrap();
        assert_eq!(state.frontier().max_x, max_x);
        assert_eq!(state.frontier().max_z, max_z);
    }

    #[test]
    fn test_no_extension_far_from_frontier() {
        let mut state = clear_state(4242);
        run_move(&mut state, hold(Direction::Right, false), 0.1);
        assert_eq!(state.path.len(), 20);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = clear_state(12345);
        run_move(&mut state, hold(Direction::Forward, false), 0.1);
        assert!(state.game_over);

        let ticks = state.time_ticks;
        let tiles = state.path.tiles.clone();
        let player = state.player;
        for _ in 0..30 {
            tick(&mut state, &hold(Direction::Right, false), 0.1).unwrap();
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.path.tiles, tiles);
        assert_eq!(state.player, player);
    }

    #[test]
    fn test_score_tracks_furthest_point() {
        let mut state = clear_state(12345);
        run_move(&mut state, hold(Direction::Right, false), 0.1);
        run_move(&mut state, hold(Direction::Right, false), 0.1);
        assert_eq!(state.score, 2);
        run_move(&mut state, hold(Direction::Left, false), 0.1);
        assert!(!state.game_over);
        assert_eq!(state.score, 2);
        assert_eq!(state.max_distance, 2);
    }

    #[test]
    fn test_autopilot_survives() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..(30 * 60) {
            tick(&mut state, &input, DT).unwrap();
        }
        assert!(!state.game_over, "autopilot died: {:?}", state.game_over_cause);
        assert!(state.score > 40);
        assert!(state.path.len() > 20);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut state1, &input, DT).unwrap();
            tick(&mut state2, &input, DT).unwrap();
        }

        assert_eq!(state1.path.tiles, state2.path.tiles);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.movement, state2.movement);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.time_ticks, state2.time_ticks);
    }
}
