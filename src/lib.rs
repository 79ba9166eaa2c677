//! Ledge Runner - A side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `levels`: Level data sources (built-in levels, JSON documents)
//! - `input`: Logical input actions and the per-tick snapshot
//! - `view`: Render model handed to an external renderer
//! - `driver`: Frame-callback driver with start/stop control
//! - `tuning`: Data-driven physics and timing constants

pub mod driver;
pub mod input;
pub mod levels;
pub mod sim;
pub mod tuning;
pub mod view;

pub use driver::GameLoop;
pub use input::{Action, InputSnapshot, SharedInput};
pub use levels::{BuiltinLevels, JsonLevels, LevelError, LevelRepository};
pub use tuning::{Tuning, TuningError};
pub use view::{RenderModel, view_model};

/// Reference constants (the defaults `Tuning` is built from)
pub mod consts {
    /// Reference frame duration all per-tick deltas are normalized to (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Longest frame delta accepted before clamping (after tab suspend etc.)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Level geometry grid unit
    pub const TILE_SIZE: f32 = 40.0;

    /// Player defaults (square player)
    pub const PLAYER_SIZE: f32 = 36.0;
    pub const PLAYER_ACCEL: f32 = 0.5;
    /// Proportional damping, applied as `vel_x * PLAYER_FRICTION`
    pub const PLAYER_FRICTION: f32 = -0.12;
    pub const PLAYER_GRAVITY: f32 = 0.8;
    /// Upward impulse (negative y is up)
    pub const PLAYER_JUMP: f32 = -16.0;
    pub const MAX_FALL_SPEED: f32 = 20.0;

    /// Level flow timers
    pub const LEVEL_TRANSITION_MS: f32 = 3000.0;
    pub const DEATH_TIMEOUT_MS: f32 = 1000.0;

    /// Narrow-phase grid spacing (units between sample points)
    pub const SAMPLE_SPACING: f32 = 4.0;
    /// Exponential camera smoothing fraction per tick
    pub const CAMERA_SMOOTHING: f32 = 0.1;
}

/// Round half toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`)
#[inline]
pub fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}
