//! Physics and timing configuration
//!
//! Every constant the simulation reads lives here so it can be tweaked from
//! JSON without touching code. Missing keys fall back to the defaults in
//! [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player kinematics ===
    /// Downward acceleration per reference frame
    pub gravity: f32,
    /// Damping coefficient (negative), multiplied by vel_x
    pub friction: f32,
    /// Vertical velocity assigned on jump (negative = up)
    pub jump_impulse: f32,
    /// Terminal fall velocity
    pub max_fall_speed: f32,
    /// Horizontal acceleration per held direction
    pub base_accel: f32,
    /// |vel_x| below this snaps to 0
    pub velocity_dead_zone: f32,
    /// Upward offset applied on jump to clear the supporting surface
    pub jump_nudge: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Collision ===
    /// Gap left between the player and a surface after resolution
    pub contact_buffer: f32,
    /// Length of the downward ground probe from the player's bottom-center
    pub ground_probe_length: f32,
    /// Narrow-phase grid spacing
    pub sample_spacing: f32,

    // === Timing ===
    pub level_transition_ms: f32,
    pub death_timeout_ms: f32,
    pub max_frame_delta_ms: f32,
    pub reference_frame_ms: f32,

    // === Camera / screen ===
    pub camera_smoothing: f32,
    pub screen_width: f32,
    pub screen_height: f32,

    // === Debug ===
    /// Emit narrow-phase sample points in the render model
    pub debug_samples: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: PLAYER_GRAVITY,
            friction: PLAYER_FRICTION,
            jump_impulse: PLAYER_JUMP,
            max_fall_speed: MAX_FALL_SPEED,
            base_accel: PLAYER_ACCEL,
            velocity_dead_zone: 0.1,
            jump_nudge: 1.0,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,

            contact_buffer: 1.0,
            ground_probe_length: 2.0,
            sample_spacing: SAMPLE_SPACING,

            level_transition_ms: LEVEL_TRANSITION_MS,
            death_timeout_ms: DEATH_TIMEOUT_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            reference_frame_ms: REFERENCE_FRAME_MS,

            camera_smoothing: CAMERA_SMOOTHING,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            debug_samples: false,
        }
    }
}

impl Tuning {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("jump_impulse", self.jump_impulse),
            ("base_accel", self.base_accel),
            ("velocity_dead_zone", self.velocity_dead_zone),
            ("jump_nudge", self.jump_nudge),
            ("contact_buffer", self.contact_buffer),
            ("ground_probe_length", self.ground_probe_length),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        let positive = [
            ("max_fall_speed", self.max_fall_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("sample_spacing", self.sample_spacing),
            ("level_transition_ms", self.level_transition_ms),
            ("death_timeout_ms", self.death_timeout_ms),
            ("max_frame_delta_ms", self.max_frame_delta_ms),
            ("reference_frame_ms", self.reference_frame_ms),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }

        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return Err(invalid(
                "camera_smoothing",
                format!("{} must be in (0, 1]", self.camera_smoothing),
            ));
        }
        if self.jump_impulse > 0.0 {
            return Err(invalid("jump_impulse", "must point upward (<= 0)".into()));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}
