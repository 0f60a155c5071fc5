//! Platform lifetime decay
//!
//! Tiles behind the player on either axis crumble; tiles ahead or level
//! with the player keep their full lifetime.

use super::state::PathTile;

/// Decay every tile the player has started to pass by `dt` seconds.
/// Lifetime is clamped at 0 and never restored.
pub fn decay_tiles(tiles: &mut [PathTile], dt: f32, player_x: f32, player_z: f32) {
    for tile in tiles.iter_mut() {
        if (tile.x as f32) < player_x || (tile.z as f32) < player_z {
            tile.lifetime = (tile.lifetime - dt).max(0.0);
        }
    }
}

/// Some tile at the cell still has lifetime left
pub fn is_walkable(tiles: &[PathTile], x: i32, z: i32) -> bool {
    tiles
        .iter()
        .any(|t| t.x == x && t.z == z && t.is_walkable())
}
