//! Camera follow
//!
//! The camera offset is added to world coordinates when drawing. Each tick it
//! closes a fixed fraction of the gap to a target that centers the player,
//! snapping to whole units. The smoothing is per tick, not time-scaled.

use glam::Vec2;

use super::state::{Camera, Player};
use crate::round_half_up;
use crate::tuning::Tuning;

/// Offset that would center the player on screen. Never scrolls above the
/// level top (y offset stays <= 0).
pub fn camera_target(player: &Player, tuning: &Tuning) -> Vec2 {
    let x = tuning.screen_width / 2.0 - player.pos.x - player.size.x / 2.0;
    let y = tuning.screen_height / 2.0 - player.pos.y - player.size.y / 2.0;
    Vec2::new(round_half_up(x), round_half_up(y).min(0.0))
}

impl Camera {
    /// Move toward the player by `camera_smoothing` of the remaining distance
    pub fn follow(&mut self, player: &Player, tuning: &Tuning) {
        let target = camera_target(player, tuning);
        let next = self.offset + (target - self.offset) * tuning.camera_smoothing;
        self.offset = Vec2::new(round_half_up(next.x), round_half_up(next.y));
    }
}
