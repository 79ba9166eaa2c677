//! Render model
//!
//! Everything an external renderer needs to draw one frame. The simulation
//! never draws; the host calls [`view_model`] after each tick and consumes the
//! result however it likes (immediate-mode drawing, or uploading
//! [`RenderModel::instances`] straight into a GPU buffer).

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::sim::collision::sample_points;
use crate::sim::rect::Rect;
use crate::sim::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// What a rectangle instance depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum RectKind {
    Platform = 0,
    KinematicPlatform = 1,
    Hazard = 2,
    Goal = 3,
    Player = 4,
}

/// Per-rectangle instance data, laid out for a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// Top-left in world space
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// `RectKind` discriminant
    pub kind: u32,
    _pad: [u32; 3], // pad to 32 bytes
}

impl RectInstance {
    pub fn new(rect: &Rect, kind: RectKind) -> Self {
        Self {
            position: [rect.x, rect.y],
            size: [rect.width, rect.height],
            kind: kind as u32,
            _pad: [0; 3],
        }
    }
}

/// Player pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPose {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
}

/// Narrow-phase sample point (debug overlay)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugPoint {
    pub pos: Vec2,
    /// Inside a solid, hazard or goal
    pub hit: bool,
}

/// Snapshot of one frame for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    /// Added to world coordinates when drawing
    pub camera: Vec2,
    pub player: PlayerPose,
    pub platforms: Vec<Rect>,
    pub kinematic_platforms: Vec<Rect>,
    pub hazards: Vec<Rect>,
    pub goals: Vec<Rect>,
    pub phase: GamePhase,
    pub level: u32,
    pub total_levels: u32,
    pub level_transition_ms: f32,
    pub death_ms: f32,
    /// Whole seconds left on the active countdown (LevelComplete / GameOver)
    pub countdown_secs: Option<u32>,
    /// Empty unless `Tuning::debug_samples` is set
    pub debug_points: Vec<DebugPoint>,
}

impl RenderModel {
    /// All rectangles in draw order: platforms, kinematic platforms, hazards,
    /// goals, then the player on top
    pub fn instances(&self) -> Vec<RectInstance> {
        let groups = [
            (&self.platforms, RectKind::Platform),
            (&self.kinematic_platforms, RectKind::KinematicPlatform),
            (&self.hazards, RectKind::Hazard),
            (&self.goals, RectKind::Goal),
        ];
        groups
            .into_iter()
            .flat_map(|(rects, kind)| rects.iter().map(move |r| RectInstance::new(r, kind)))
            .chain(std::iter::once(RectInstance::new(
                &self.player.rect,
                RectKind::Player,
            )))
            .collect()
    }
}

/// Raw bytes of an instance list, ready for a buffer upload
pub fn instance_bytes(instances: &[RectInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Seconds left on a countdown, rounded up
fn countdown(timeout_ms: f32, elapsed_ms: f32) -> u32 {
    ((timeout_ms - elapsed_ms) / 1000.0).ceil().max(0.0) as u32
}

/// Build the render model for the current state
pub fn view_model(state: &GameState, tuning: &Tuning) -> RenderModel {
    let level = &state.level;
    let player = state.player.rect();

    let countdown_secs = match state.phase {
        GamePhase::LevelComplete => {
            Some(countdown(tuning.level_transition_ms, state.level_transition_ms))
        }
        GamePhase::GameOver => Some(countdown(tuning.death_timeout_ms, state.death_ms)),
        GamePhase::Running | GamePhase::Win => None,
    };

    let debug_points = if tuning.debug_samples {
        let targets = level
            .solids()
            .chain(level.hazards.iter())
            .chain(level.goals.iter());
        sample_points(&player, targets, tuning.sample_spacing)
            .map(|(pos, hit)| DebugPoint { pos, hit })
            .collect()
    } else {
        Vec::new()
    };

    RenderModel {
        camera: state.camera.offset,
        player: PlayerPose {
            rect: player,
            vel: state.player.vel,
            on_ground: state.player.on_ground,
        },
        platforms: level.platforms.clone(),
        kinematic_platforms: level.kinematic_platforms.iter().map(|p| p.rect).collect(),
        hazards: level.hazards.clone(),
        goals: level.goals.clone(),
        phase: state.phase,
        level: state.level_id(),
        total_levels: state.total_levels,
        level_transition_ms: state.level_transition_ms,
        death_ms: state.death_ms,
        countdown_secs,
        debug_points,
    }
}
