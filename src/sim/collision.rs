//! Collision queries against the path and the obstacle field
//!
//! Positions are continuous; tiles and obstacle anchors are integer cells.
//! A point belongs to the cell it rounds to.

use super::state::{Obstacle, PathTile};
use super::tiles;
use crate::grid_cell;

/// Whether a world position is over a walkable tile
pub fn on_path(tiles: &[PathTile], x: f32, z: f32) -> bool {
    tiles::is_walkable(tiles, grid_cell(x), grid_cell(z))
}

/// Whether a world point hits any active obstacle anchored in its cell
pub fn collides_obstacle(obstacles: &[Obstacle], x: f32, y: f32, z: f32) -> bool {
    let cell = (grid_cell(x), grid_cell(z));
    obstacles
        .iter()
        .filter(|o| o.active && o.cell() == cell)
        .any(|o| o.intersects(x, y, z))
}

/// First active obstacle anchored at a cell
pub fn obstacle_at(obstacles: &[Obstacle], x: i32, z: i32) -> Option<&Obstacle> {
    obstacles.iter().find(|o| o.active && o.x == x && o.z == z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    #[test]
    fn test_on_path_rounds_to_cell() {
        let tiles = vec![PathTile::new(0, 0, 3.0, false), PathTile::new(1, 0, 3.0, false)];
        assert!(on_path(&tiles, 0.4, 0.0));
        assert!(on_path(&tiles, 0.5, 0.0));
        assert!(on_path(&tiles, 1.49, -0.49));
        assert!(!on_path(&tiles, 1.5, 0.0));
        assert!(!on_path(&tiles, 0.0, 0.5));
    }

    #[test]
    fn test_on_path_ignores_dead_tiles() {
        let mut tiles = vec![PathTile::new(0, 0, 3.0, false)];
        tiles[0].lifetime = 0.0;
        assert!(!on_path(&tiles, 0.0, 0.0));
    }

    #[test]
    fn test_collides_only_in_same_cell() {
        let mut spinner = Obstacle::new(4, 1, ObstacleKind::SpinningBlock);
        spinner.height = 0.5;
        let obstacles = vec![spinner];

        assert!(collides_obstacle(&obstacles, 4.0, 1.0, 1.0));
        assert!(collides_obstacle(&obstacles, 4.4, 1.0, 0.6));
        assert!(!collides_obstacle(&obstacles, 3.0, 1.0, 1.0));
        assert!(!collides_obstacle(&obstacles, 4.0, 2.0, 1.0));
    }

    #[test]
    fn test_moving_block_can_leave_player_cell_clear() {
        // Anchor cell matches but the block has swung away
        let mut mover = Obstacle::new(2, 0, ObstacleKind::MovingBlock);
        mover.offset_x = 0.5;
        mover.offset_z = 0.0;
        let obstacles = vec![mover];
        assert!(!collides_obstacle(&obstacles, 1.6, 1.0, 0.0));
        assert!(collides_obstacle(&obstacles, 2.0, 1.0, 0.0));
    }

    #[test]
    fn test_inactive_obstacles_never_collide() {
        let mut o = Obstacle::new(0, 0, ObstacleKind::SpinningBlock);
        o.active = false;
        assert!(!collides_obstacle(&[o], 0.0, 1.0, 0.0));
        assert!(obstacle_at(&[o], 0, 0).is_none());
    }

    #[test]
    fn test_falling_block_band() {
        let mut o = Obstacle::new(1, 0, ObstacleKind::FallingBlock);
        o.height = 2.0;
        let obstacles = vec![o];
        // Rest height 1.0 sits in the band [height - 1, height + 0.5]
        assert!(collides_obstacle(&obstacles, 1.0, 1.0, 0.0));
        assert!(collides_obstacle(&obstacles, 1.0, 2.5, 0.0));
        assert!(!collides_obstacle(&obstacles, 1.0, 0.99, 0.0));
    }
}
