//! Procedural path generation
//!
//! The path is a monotone random walk on the integer grid: every step moves
//! +1 along X or +1 along Z. A tile is a corner when its step changed axis
//! relative to the step before it.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Axis, PathTile};
use super::tiles;
use crate::config::SimConfig;
use crate::error::SimError;

/// Running maximum of each axis reached by generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frontier {
    pub max_x: i32,
    pub max_z: i32,
}

impl Frontier {
    pub fn include(&mut self, x: i32, z: i32) {
        self.max_x = self.max_x.max(x);
        self.max_z = self.max_z.max(z);
    }

    /// Euclidean distance from a world position to the frontier corner
    pub fn distance_from(&self, x: f32, z: f32) -> f32 {
        let dx = self.max_x as f32 - x;
        let dz = self.max_z as f32 - z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Every tile generated this run, in walk order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub tiles: Vec<PathTile>,
    pub frontier: Frontier,
    /// Axis of the most recent step, carried across extensions
    pub last_axis: Option<Axis>,
}

impl Path {
    /// Replace the path with a fresh initial walk starting at (0, 0)
    ///
    /// The first `safe_start_steps` steps go along X, so the opening run is
    /// corner-free. After that the walk turns when it has gone straight
    /// `max_straight_run` times, otherwise turns with 1/3 chance.
    pub fn generate_initial<R: RandomSource>(&mut self, rng: &mut R, config: &SimConfig) {
        self.tiles.clear();
        self.tiles.reserve(config.initial_path_length);
        self.frontier = Frontier::default();
        self.last_axis = None;
        if config.initial_path_length == 0 {
            return;
        }

        let lifetime = config.platform_lifetime;
        let (mut x, mut z) = (0, 0);
        self.tiles.push(PathTile::new(x, z, lifetime, false));

        let mut current: Option<Axis> = None;
        let mut straight_run = 0u32;

        for step in 1..config.initial_path_length {
            let next = if step <= config.safe_start_steps {
                Axis::X
            } else {
                match current {
                    Some(axis) if straight_run >= config.max_straight_run => {
                        straight_run = 0;
                        axis.flip()
                    }
                    Some(axis) => {
                        if rng.next_below(3) == 0 {
                            straight_run = 0;
                            axis.flip()
                        } else {
                            straight_run += 1;
                            axis
                        }
                    }
                    // Only reachable with a zero-length safe start
                    None => {
                        if rng.next_below(3) == 0 {
                            straight_run = 0;
                        } else {
                            straight_run += 1;
                        }
                        Axis::from_index(rng.next_below(2))
                    }
                }
            };

            let corner = current.is_some_and(|axis| axis != next);
            let (dx, dz) = next.step();
            x += dx;
            z += dz;
            self.frontier.include(x, z);
            self.tiles.push(PathTile::new(x, z, lifetime, corner));
            current = Some(next);
        }

        self.last_axis = current;
    }

    /// Append one segment continuing from the last tile.
    /// Returns the index range of the new tiles.
    ///
    /// Each step picks an axis at random. Every `segment_turn_interval`
    /// steps the walk is forced to turn; otherwise a step that would repeat
    /// the previous axis is rejected with `segment_resample_chance` and takes
    /// the other axis. The first step of a segment is never rejected.
    pub fn extend<R: RandomSource>(
        &mut self,
        rng: &mut R,
        config: &SimConfig,
    ) -> Result<Range<usize>, SimError> {
        let last = self.tiles.last().ok_or(SimError::EmptyPath)?;
        let (mut x, mut z) = last.cell();
        let lifetime = config.platform_lifetime;
        let start = self.tiles.len();
        let mut current = self.last_axis;

        for i in 0..config.segment_length {
            let forced_turn = i > 0 && i % config.segment_turn_interval == 0;
            let drawn = Axis::from_index(rng.next_below(2));
            let next = match current {
                Some(axis) if forced_turn => axis.flip(),
                // A rejected repeat can only become the other axis
                Some(axis)
                    if drawn == axis
                        && i > 0
                        && rng.chance(config.segment_resample_chance) =>
                {
                    axis.flip()
                }
                _ => drawn,
            };

            let corner = current.is_some_and(|axis| axis != next);
            let (dx, dz) = next.step();
            x += dx;
            z += dz;
            self.frontier.include(x, z);
            self.tiles.push(PathTile::new(x, z, lifetime, corner));
            current = Some(next);
        }

        self.last_axis = current;
        Ok(start..self.tiles.len())
    }

    /// Index of the first tile at a cell
    pub fn index_of(&self, x: i32, z: i32) -> Result<usize, SimError> {
        index_of(&self.tiles, x, z)
    }

    /// Some tile at the cell still has lifetime left
    pub fn is_walkable(&self, x: i32, z: i32) -> bool {
        tiles::is_walkable(&self.tiles, x, z)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Index of the first tile at a cell in walk order
pub fn index_of(tiles: &[PathTile], x: i32, z: i32) -> Result<usize, SimError> {
    tiles
        .iter()
        .position(|t| t.x == x && t.z == z)
        .ok_or(SimError::TileNotFound { x, z })
}
