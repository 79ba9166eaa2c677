//! Player kinematics
//!
//! Input-driven acceleration, proportional friction, gravity and the jump
//! impulse, followed by the two collision passes. Everything except the jump
//! impulse is multiplied by the frame scale factor.

use super::collision::{Support, resolve_horizontal, resolve_vertical};
use super::state::{Level, Player};
use crate::input::InputSnapshot;
use crate::tuning::Tuning;

/// Outcome of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStep {
    pub jumped: bool,
    pub support: Option<Support>,
}

/// Advance the player by one tick and resolve collisions against `level`
pub fn integrate(
    player: &mut Player,
    level: &Level,
    input: &InputSnapshot,
    scale: f32,
    tuning: &Tuning,
) -> PlayerStep {
    // Horizontal: input acceleration plus damping proportional to velocity
    let accel = input.horizontal() * tuning.base_accel + player.vel.x * tuning.friction;
    player.vel.x += accel * scale;
    if player.vel.x.abs() < tuning.velocity_dead_zone {
        player.vel.x = 0.0;
    }

    // Vertical: gravity, capped at terminal velocity
    player.vel.y = (player.vel.y + tuning.gravity * scale).min(tuning.max_fall_speed);

    // Jump impulse is an instantaneous assignment, not time-scaled
    let jumped = input.wants_jump() && player.on_ground;
    if jumped {
        player.vel.y = tuning.jump_impulse;
        player.on_ground = false;
        player.pos.y -= tuning.jump_nudge;
    }

    player.pos.x += player.vel.x * scale;
    resolve_horizontal(player, level, tuning);

    player.pos.y += player.vel.y * scale;
    let support = resolve_vertical(player, level, scale, tuning);

    PlayerStep { jumped, support }
}
