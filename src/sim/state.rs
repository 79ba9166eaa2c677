//! Game state and core simulation types
//!
//! The game loop owns exactly one [`GameState`]. Loading a level replaces
//! the geometry wholesale and resets the player, camera and timers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::levels::{LevelError, LevelRepository};
use crate::tuning::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Goal reached; waiting for the transition timer or Continue
    LevelComplete,
    /// Player died; waiting for the respawn timer
    GameOver,
    /// Final goal reached (terminal until Reset)
    Win,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    FellOff,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Died(DeathCause),
    LevelCompleted { level: u32 },
    Won,
    LevelLoaded { level: u32 },
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Player {
    pub fn new(spawn: Vec2, size: Vec2) -> Self {
        Self {
            pos: spawn,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A platform that ping-pongs horizontally between `start_x` and `end_x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicPlatform {
    #[serde(flatten)]
    pub rect: Rect,
    /// Lowest left-edge x
    pub start_x: f32,
    /// Highest left-edge x
    pub end_x: f32,
    /// Signed units per reference frame
    pub velocity: f32,
}

impl KinematicPlatform {
    pub fn new(rect: Rect, start_x: f32, end_x: f32, velocity: f32) -> Self {
        Self {
            rect,
            start_x,
            end_x,
            velocity,
        }
    }
}

/// A loaded level. Immutable apart from the kinematic platforms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub id: u32,
    /// Player spawn (top-left)
    pub spawn: Vec2,
    #[serde(default)]
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub kinematic_platforms: Vec<KinematicPlatform>,
    #[serde(default)]
    pub hazards: Vec<Rect>,
    #[serde(default)]
    pub goals: Vec<Rect>,
}

impl Level {
    /// Everything the player can stand on, static first, in iteration order
    pub fn solids(&self) -> impl Iterator<Item = &Rect> + Clone {
        self.platforms
            .iter()
            .chain(self.kinematic_platforms.iter().map(|p| &p.rect))
    }
}

/// Viewport offset added to world coordinates when drawing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level (ids are 1-based)
    pub level: Level,
    pub total_levels: u32,
    pub player: Player,
    pub camera: Camera,
    pub phase: GamePhase,
    /// Time spent in LevelComplete (ms)
    pub level_transition_ms: f32,
    /// Time spent in GameOver (ms)
    pub death_ms: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Start a session at level 1
    pub fn new<R: LevelRepository + ?Sized>(levels: &R, tuning: &Tuning) -> Result<Self, LevelError> {
        let total_levels = levels.level_count();
        let level = levels.load(1)?;
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        log::info!("Starting session: level 1 of {}", total_levels);

        Ok(Self {
            player: Player::new(level.spawn, size),
            level,
            total_levels,
            camera: Camera::default(),
            phase: GamePhase::Running,
            level_transition_ms: 0.0,
            death_ms: 0.0,
            time_ticks: 0,
        })
    }

    /// Current level id
    #[inline]
    pub fn level_id(&self) -> u32 {
        self.level.id
    }

    /// Whether the current level is the last one
    pub fn on_last_level(&self) -> bool {
        self.level.id >= self.total_levels
    }

    /// Replace the level and reset everything bound to it.
    ///
    /// On error nothing is modified.
    pub fn load_level<R: LevelRepository + ?Sized>(
        &mut self,
        id: u32,
        levels: &R,
        tuning: &Tuning,
    ) -> Result<(), LevelError> {
        let level = levels.load(id)?;
        self.level = level;
        self.total_levels = levels.level_count();
        self.reset_player(tuning);
        log::info!("Loaded level {} of {}", id, self.total_levels);
        Ok(())
    }

    /// Put the player back on the spawn point and clear camera and timers
    pub fn reset_player(&mut self, tuning: &Tuning) {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        self.player = Player::new(self.level.spawn, size);
        self.camera = Camera::default();
        self.phase = GamePhase::Running;
        self.level_transition_ms = 0.0;
        self.death_ms = 0.0;
    }
}
