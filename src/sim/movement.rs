//! Player movement state machine
//!
//! `Idle` is the only state that reads input. A roll tumbles one cell and a
//! jump arcs two; both resolve back to `Idle` once their progress reaches 1.
//! Landing checks run at resolution, except that a jump also tests for
//! obstacles at every airborne step.

use std::f32::consts::PI;

use super::collision::{collides_obstacle, on_path};
use super::rng::RandomSource;
use super::state::{GameOverCause, GameState, MovementState};
use super::tick::TickInput;

/// What one movement step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Idle with no input
    Resting,
    /// Input accepted; a roll or jump begins next tick
    Started,
    /// Roll or jump still in progress
    InFlight,
    /// Move resolved safely on a tile
    Landed,
    /// Move ended the run
    Failed(GameOverCause),
}

/// Advance the player's movement by `dt` seconds
pub fn advance_movement<R: RandomSource>(
    state: &mut GameState<R>,
    input: &TickInput,
    dt: f32,
) -> StepOutcome {
    match state.movement {
        MovementState::Idle => start_move(state, input),
        MovementState::Rolling { direction, progress } => {
            let progress = progress + state.config.roll_speed * dt;
            if progress < 1.0 {
                state.movement = MovementState::Rolling { direction, progress };
                return StepOutcome::InFlight;
            }

            state.movement = MovementState::Idle;
            state.player.position += direction.offset(1.0);
            let pos = state.player.position;

            if !on_path(&state.path.tiles, pos.x, pos.z) {
                return fail(state, GameOverCause::FellOffPath);
            }
            if collides_obstacle(&state.obstacles, pos.x, pos.y, pos.z) {
                return fail(state, GameOverCause::HitObstacle);
            }
            StepOutcome::Landed
        }
        MovementState::Jumping {
            direction,
            progress,
            start,
            destination,
        } => {
            let progress = progress + state.config.jump_speed * dt;
            if progress >= 1.0 {
                state.movement = MovementState::Idle;
                state.player.position = destination;
                state.player.jump_height = 0.0;

                if !on_path(&state.path.tiles, destination.x, destination.z) {
                    return fail(state, GameOverCause::FellOffPath);
                }
                return StepOutcome::Landed;
            }

            state.movement = MovementState::Jumping {
                direction,
                progress,
                start,
                destination,
            };
            state.player.jump_height = state.config.max_jump_height * (progress * PI).sin();
            state.player.position = start.lerp(destination, progress);

            let p = state.player.world_position();
            if collides_obstacle(&state.obstacles, p.x, p.y, p.z) {
                return fail(state, GameOverCause::MidAirCollision);
            }
            StepOutcome::InFlight
        }
    }
}

fn start_move<R: RandomSource>(state: &mut GameState<R>, input: &TickInput) -> StepOutcome {
    let Some(direction) = input.direction() else {
        return StepOutcome::Resting;
    };
    state.show_directions = false;

    state.movement = if input.jump {
        let start = state.player.position;
        MovementState::Jumping {
            direction,
            progress: 0.0,
            start,
            destination: start + direction.offset(2.0),
        }
    } else {
        MovementState::Rolling {
            direction,
            progress: 0.0,
        }
    };
    StepOutcome::Started
}

fn fail<R: RandomSource>(state: &mut GameState<R>, cause: GameOverCause) -> StepOutcome {
    state.end_run(cause);
    StepOutcome::Failed(cause)
}
