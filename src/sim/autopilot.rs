//! Demo-mode planner
//!
//! Walks the path one tile at a time and hops any obstacle in the way.

use super::collision::obstacle_at;
use super::rng::RandomSource;
use super::state::{Direction, GameState};
use super::tick::TickInput;
use crate::grid_cell;

/// Plan the input for this tick. Nothing is held unless the player is idle.
pub fn plan<R: RandomSource>(state: &GameState<R>) -> TickInput {
    let mut input = TickInput::default();
    if state.game_over || !state.movement.is_idle() {
        return input;
    }

    let pos = state.player.position;
    let (cx, cz) = (grid_cell(pos.x), grid_cell(pos.z));
    let tiles = &state.path.tiles;

    let Some(index) = tiles.iter().rposition(|t| t.cell() == (cx, cz)) else {
        return input;
    };
    let Some(next) = tiles.get(index + 1) else {
        return input;
    };
    let Some(direction) = Direction::from_delta(next.x - cx, next.z - cz) else {
        return input;
    };

    if obstacle_at(&state.obstacles, next.x, next.z).is_some() {
        let (dx, dz) = direction.delta();
        if state.path.is_walkable(cx + 2 * dx, cz + 2 * dz) {
            input.jump = true;
        }
    }
    input.set_held(direction, true);
    input
}
