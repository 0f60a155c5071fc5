//! Obstacle placement along freshly generated tiles
//!
//! A candidate tile is rejected when it is a corner, touches a corner,
//! already holds an obstacle or touches one. The survivors roll against a
//! spawn chance that is higher in the middle of a straight run.

use super::path::index_of;
use super::rng::RandomSource;
use super::state::{Obstacle, ObstacleKind, PathTile};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::manhattan;

/// Place obstacles on `tiles[segment_start..]`, visiting segment-relative
/// indices from `start_index` on. When `start_index` is 0 the first
/// `segment_safe_zone` tiles of the segment are skipped.
///
/// The last tile of the path is never used: the tile after it does not
/// exist yet and may turn out to be a corner.
///
/// Returns the number of obstacles placed.
pub fn spawn_obstacles<R: RandomSource>(
    tiles: &[PathTile],
    segment_start: usize,
    start_index: usize,
    obstacles: &mut Vec<Obstacle>,
    rng: &mut R,
    config: &SimConfig,
) -> Result<usize, SimError> {
    let segment = tiles.get(segment_start..).unwrap_or(&[]);
    let open_end = tiles.len().saturating_sub(1);
    let mut spawned = 0;

    for (i, tile) in segment.iter().enumerate().skip(start_index) {
        if start_index == 0 && i < config.segment_safe_zone {
            continue;
        }
        let (x, z) = tile.cell();
        if is_corner_at(tiles, x, z)
            || is_adjacent_to_corner(tiles, x, z)
            || has_obstacle(obstacles, x, z)
            || is_adjacent_to_obstacle(obstacles, x, z)
        {
            continue;
        }

        let index = index_of(tiles, x, z)?;
        if index >= open_end {
            continue;
        }

        let chance = if is_straight_interior(tiles, index) {
            config.straight_run_spawn_chance
        } else {
            config.obstacle_spawn_chance
        };

        if rng.chance(chance) {
            let kind = ObstacleKind::ALL[rng.next_below(ObstacleKind::ALL.len() as u32) as usize];
            obstacles.push(Obstacle::new(x, z, kind));
            spawned += 1;
        }
    }

    Ok(spawned)
}

/// A corner tile sits at this cell
pub fn is_corner_at(tiles: &[PathTile], x: i32, z: i32) -> bool {
    tiles.iter().any(|t| t.corner && t.x == x && t.z == z)
}

/// A corner tile is orthogonally adjacent to this cell
pub fn is_adjacent_to_corner(tiles: &[PathTile], x: i32, z: i32) -> bool {
    tiles
        .iter()
        .any(|t| t.corner && manhattan(t.cell(), (x, z)) == 1)
}

/// An active obstacle already occupies this cell
pub fn has_obstacle(obstacles: &[Obstacle], x: i32, z: i32) -> bool {
    obstacles.iter().any(|o| o.active && o.x == x && o.z == z)
}

/// An active obstacle is orthogonally adjacent to this cell
pub fn is_adjacent_to_obstacle(obstacles: &[Obstacle], x: i32, z: i32) -> bool {
    obstacles
        .iter()
        .any(|o| o.active && manhattan(o.cell(), (x, z)) == 1)
}

/// The tile at `index` is the middle of three collinear unit steps
pub fn is_straight_interior(tiles: &[PathTile], index: usize) -> bool {
    if index == 0 || index + 1 >= tiles.len() {
        return false;
    }
    let (prev, tile, next) = (tiles[index - 1], tiles[index], tiles[index + 1]);
    let along_x = prev.x == tile.x - 1 && prev.z == tile.z && next.x == tile.x + 1 && next.z == tile.z;
    let along_z = prev.z == tile.z - 1 && prev.x == tile.x && next.z == tile.z + 1 && next.x == tile.x;
    along_x || along_z
}
