//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Same state, input and elapsed time always give the same result
//! - Stable iteration order (static platforms before kinematic ones)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod platform;
pub mod rect;
pub mod state;
pub mod tick;
pub mod time;

pub use camera::camera_target;
pub use collision::{Contact, Support, check_contact, collides, ground_probe, sample_points};
pub use physics::{PlayerStep, integrate};
pub use platform::advance_platforms;
pub use rect::Rect;
pub use state::{
    Camera, DeathCause, GameEvent, GamePhase, GameState, KinematicPlatform, Level, Player,
};
pub use tick::tick;
pub use time::{clamp_elapsed, time_scale};
