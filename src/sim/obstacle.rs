//! Obstacle animation and per-kind hit geometry
//!
//! Each `ObstacleKind` owns one update law and one hit test, selected by
//! match so adding a kind forces both to be written.

use super::state::{Obstacle, ObstacleKind};

/// Spin rate of `SpinningBlock` in degrees per second
pub const SPIN_RATE: f32 = 180.0;
/// Seconds a `FallingBlock` takes to reach the tile
pub const FALL_TIME: f32 = 1.0;
/// Radius of a `MovingBlock` orbit around its anchor cell
pub const ORBIT_RADIUS: f32 = 0.5;

impl Obstacle {
    /// Advance animation by `dt` seconds (no-op once inactive)
    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.progress += dt;

        match self.kind {
            ObstacleKind::RisingBlock => {
                self.height = (self.progress * 0.5).min(1.0);
            }
            ObstacleKind::FallingBlock => {
                self.height = if self.progress < FALL_TIME {
                    2.0 - (self.progress / FALL_TIME) * 2.0
                } else {
                    0.0
                };
            }
            ObstacleKind::SpinningBlock => {
                self.rotation += dt * SPIN_RATE;
                self.height = 0.5 + 0.3 * (self.progress * 3.0).sin();
            }
            ObstacleKind::MovingBlock => {
                self.offset_x = ORBIT_RADIUS * (self.progress * 2.0).sin();
                self.offset_z = ORBIT_RADIUS * (self.progress * 2.0).cos();
            }
        }
    }

    /// Whether a point already known to share this obstacle's cell hits it
    pub fn intersects(&self, x: f32, y: f32, z: f32) -> bool {
        if !self.active {
            return false;
        }
        match self.kind {
            ObstacleKind::RisingBlock | ObstacleKind::FallingBlock => {
                y <= self.height + 0.5 && y + 0.5 >= self.height - 0.5
            }
            // Hazard near the ground regardless of the bob
            ObstacleKind::SpinningBlock => y <= 1.5,
            ObstacleKind::MovingBlock => {
                let cx = self.x as f32 + self.offset_x;
                let cz = self.z as f32 + self.offset_z;
                y <= 1.0
                    && x >= cx - 0.5
                    && x <= cx + 0.5
                    && z >= cz - 0.5
                    && z <= cz + 0.5
            }
        }
    }
}

/// Advance every active obstacle
pub fn animate_obstacles(obstacles: &mut [Obstacle], dt: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.advance(dt);
    }
}
