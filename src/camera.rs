//! Camera rig state
//!
//! Holds what the render layer needs to place its camera; the eye and
//! projection maths live there.

use serde::{Deserialize, Serialize};

/// Default orbit distance from the player
pub const DEFAULT_DISTANCE: f32 = 8.0;
pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 20.0;
/// Distance change per zoom command
pub const ZOOM_STEP: f32 = 1.0;
/// Default orbit angle in degrees
pub const DEFAULT_ANGLE: f32 = 45.0;
/// Orbit speed in degrees per second while rotating
pub const ROTATION_RATE: f32 = 10.0;

/// Camera viewpoints, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraMode {
    #[default]
    Isometric,
    TopDown,
    Side,
    FirstPerson,
}

impl CameraMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::Isometric => "Isometric",
            CameraMode::TopDown => "Top Down",
            CameraMode::Side => "Side",
            CameraMode::FirstPerson => "First Person",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "isometric" | "iso" => Some(CameraMode::Isometric),
            "topdown" | "top" => Some(CameraMode::TopDown),
            "side" => Some(CameraMode::Side),
            "firstperson" | "fp" => Some(CameraMode::FirstPerson),
            _ => None,
        }
    }

    /// The mode after this one, wrapping around
    pub fn next(&self) -> Self {
        match self {
            CameraMode::Isometric => CameraMode::TopDown,
            CameraMode::TopDown => CameraMode::Side,
            CameraMode::Side => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::Isometric,
        }
    }
}

/// Camera rig driven by camera commands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub mode: CameraMode,
    /// Orbit distance, within `[MIN_DISTANCE, MAX_DISTANCE]`
    pub distance: f32,
    /// Orbit angle in degrees, within `[0, 360)`
    pub angle: f32,
    /// Orbit angle held still
    pub fixed_angle: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            mode: CameraMode::default(),
            distance: DEFAULT_DISTANCE,
            angle: DEFAULT_ANGLE,
            fixed_angle: true,
        }
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cycle to the next mode. First person always holds the angle.
    pub fn next_mode(&mut self) {
        self.mode = self.mode.next();
        if self.mode == CameraMode::FirstPerson {
            self.fixed_angle = true;
        }
        log::debug!("Camera mode: {}", self.mode.as_str());
    }

    pub fn toggle_rotation(&mut self) {
        self.fixed_angle = !self.fixed_angle;
    }

    pub fn zoom_in(&mut self) {
        self.distance = (self.distance - ZOOM_STEP).max(MIN_DISTANCE);
    }

    pub fn zoom_out(&mut self) {
        self.distance = (self.distance + ZOOM_STEP).min(MAX_DISTANCE);
    }

    /// Orbit by `dt` seconds unless the angle is fixed
    pub fn advance(&mut self, dt: f32) {
        if self.fixed_angle {
            return;
        }
        self.angle = (self.angle + ROTATION_RATE * dt).rem_euclid(360.0);
    }
}
