//! Simulation tuning
//!
//! Every balance value the simulation reads lives in `SimConfig`. Defaults
//! mirror `crate::consts`; a JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Path generation ===
    /// Tiles generated on reset
    pub initial_path_length: usize,
    /// Tiles appended per extension
    pub segment_length: usize,
    /// Forced +X steps after the first tile
    pub safe_start_steps: usize,
    /// Straight steps allowed before the initial walk must turn
    pub max_straight_run: u32,
    /// Extension segments turn every N steps
    pub segment_turn_interval: usize,
    /// Chance a repeated axis is redrawn during extension
    pub segment_resample_chance: f32,

    // === Movement ===
    pub roll_speed: f32,
    pub jump_speed: f32,
    pub max_jump_height: f32,
    /// Player centre height at rest
    pub rest_height: f32,

    // === Tiles ===
    /// Lifetime (seconds) of a freshly generated tile
    pub platform_lifetime: f32,
    /// Frontier distance that triggers an extension
    pub extension_threshold: f32,

    // === Obstacles ===
    pub obstacle_spawn_chance: f32,
    pub straight_run_spawn_chance: f32,
    /// First path index eligible for obstacles after reset
    pub initial_obstacle_start: usize,
    /// Leading tiles of each extension segment kept clear
    pub segment_safe_zone: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_path_length: INITIAL_PATH_LENGTH,
            segment_length: PATH_SEGMENT_LENGTH,
            safe_start_steps: SAFE_START_STEPS,
            max_straight_run: MAX_STRAIGHT_RUN,
            segment_turn_interval: SEGMENT_TURN_INTERVAL,
            segment_resample_chance: SEGMENT_RESAMPLE_CHANCE,

            roll_speed: ROLL_SPEED,
            jump_speed: JUMP_SPEED,
            max_jump_height: MAX_JUMP_HEIGHT,
            rest_height: REST_HEIGHT,

            platform_lifetime: PLATFORM_LIFETIME,
            extension_threshold: PATH_EXTENSION_THRESHOLD,

            obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
            straight_run_spawn_chance: STRAIGHT_RUN_SPAWN_CHANCE,
            initial_obstacle_start: INITIAL_OBSTACLE_START,
            segment_safe_zone: SEGMENT_SAFE_ZONE,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        if self.initial_path_length == 0 {
            return Err(invalid("initial_path_length must be at least 1"));
        }
        if self.segment_length == 0 {
            return Err(invalid("segment_length must be at least 1"));
        }
        if self.segment_turn_interval == 0 {
            return Err(invalid("segment_turn_interval must be at least 1"));
        }
        for (name, value) in [
            ("roll_speed", self.roll_speed),
            ("jump_speed", self.jump_speed),
            ("platform_lifetime", self.platform_lifetime),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("max_jump_height", self.max_jump_height),
            ("rest_height", self.rest_height),
            ("extension_threshold", self.extension_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must be non-negative, got {value}")));
            }
        }
        for (name, value) in [
            ("segment_resample_chance", self.segment_resample_chance),
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("straight_run_spawn_chance", self.straight_run_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidConfig(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_path_length, 20);
        assert_eq!(config.segment_length, 15);
        assert_eq!(config.obstacle_spawn_chance, 0.6);
        assert_eq!(config.straight_run_spawn_chance, 0.8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "roll_speed": 4.0, "segment_length": 10 }"#).unwrap();
        assert_eq!(config.roll_speed, 4.0);
        assert_eq!(config.segment_length, 10);
        assert_eq!(config.jump_speed, JUMP_SPEED);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimConfig::from_json(r#"{ "obstacle_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));

        let err = SimConfig::from_json(r#"{ "roll_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));

        let err = SimConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
