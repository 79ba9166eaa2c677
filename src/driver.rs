//! Frame driver
//!
//! [`GameLoop`] owns the game state and is invoked once per host frame. It
//! does not schedule itself: a browser rAF callback, a native render loop, a
//! timer or a test harness calls [`GameLoop::step`] (or [`GameLoop::frame`]
//! with an absolute timestamp) and draws the returned [`RenderModel`].

use crate::input::SharedInput;
use crate::levels::{LevelError, LevelRepository};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::tick::tick;
use crate::tuning::Tuning;
use crate::view::{RenderModel, view_model};

/// Game session plus its frame pacing
pub struct GameLoop {
    state: GameState,
    levels: Box<dyn LevelRepository>,
    tuning: Tuning,
    input: SharedInput,
    running: bool,
    /// Timestamp of the previous `frame` call
    last_timestamp: Option<f64>,
    last_events: Vec<GameEvent>,
    last_phase: GamePhase,
}

impl GameLoop {
    /// Load level 1 and build a stopped loop
    pub fn new(levels: Box<dyn LevelRepository>, tuning: Tuning) -> Result<Self, LevelError> {
        let state = GameState::new(levels.as_ref(), &tuning)?;
        Ok(Self {
            last_phase: state.phase,
            state,
            levels,
            tuning,
            input: SharedInput::new(),
            running: false,
            last_timestamp: None,
            last_events: Vec::new(),
        })
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("Game loop started (level {})", self.state.level_id());
            self.running = true;
        }
    }

    /// Stop stepping. The next `frame` after a restart only re-arms the clock.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped");
            self.running = false;
            self.last_timestamp = None;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle for the host's input callbacks
    pub fn input(&self) -> SharedInput {
        self.input.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Events raised by the most recent tick
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Render model for the current state, whether or not the loop is running
    pub fn view(&self) -> RenderModel {
        view_model(&self.state, &self.tuning)
    }

    /// Run one tick of `elapsed_ms` and return the frame to draw.
    ///
    /// Returns `Ok(None)` while stopped. A level load failure stops the loop
    /// and is returned to the caller.
    pub fn step(&mut self, elapsed_ms: f32) -> Result<Option<RenderModel>, LevelError> {
        if !self.running {
            return Ok(None);
        }

        let input = self.input.snapshot();
        match tick(&mut self.state, self.levels.as_ref(), &input, elapsed_ms, &self.tuning) {
            Ok(events) => self.last_events = events,
            Err(e) => {
                log::error!("Level load failed, stopping: {}", e);
                self.running = false;
                self.last_timestamp = None;
                return Err(e);
            }
        }

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }

        Ok(Some(self.view()))
    }

    /// Host frame callback taking an absolute timestamp in milliseconds.
    ///
    /// The first call after construction or `stop` only records the timestamp.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<Option<RenderModel>, LevelError> {
        if !self.running {
            return Ok(None);
        }
        let Some(previous) = self.last_timestamp.replace(timestamp_ms) else {
            return Ok(None);
        };
        self.step((timestamp_ms - previous) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_FRAME_MS;
    use crate::input::Action;
    use crate::levels::BuiltinLevels;

    fn game() -> GameLoop {
        GameLoop::new(Box::new(BuiltinLevels), Tuning::default()).unwrap()
    }

    #[test]
    fn test_stopped_loop_does_nothing() {
        let mut game = game();
        assert!(!game.is_running());
        let before = game.state().player.clone();
        assert!(game.step(REFERENCE_FRAME_MS).unwrap().is_none());
        assert_eq!(game.state().player, before);
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_step_returns_model() {
        let mut game = game();
        game.start();
        let model = game.step(REFERENCE_FRAME_MS).unwrap().unwrap();
        assert_eq!(model.level, 1);
        assert_eq!(game.state().time_ticks, 1);
        // Gravity pulled the player down
        assert!(model.player.rect.y > game.state().level.spawn.y);
    }

    #[test]
    fn test_frame_first_call_only_arms() {
        let mut game = game();
        game.start();
        assert!(game.frame(1000.0).unwrap().is_none());
        assert_eq!(game.state().time_ticks, 0);

        assert!(game.frame(1016.0).unwrap().is_some());
        assert_eq!(game.state().time_ticks, 1);

        game.stop();
        game.start();
        assert!(game.frame(50_000.0).unwrap().is_none());
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_input_edges_reach_tick() {
        let mut game = game();
        game.start();
        // Let the player land on the start ledge
        for _ in 0..120 {
            game.step(REFERENCE_FRAME_MS).unwrap();
        }
        assert!(game.state().player.on_ground);

        let input = game.input();
        input.press(Action::JUMP);
        input.release(Action::JUMP);
        game.step(REFERENCE_FRAME_MS).unwrap();
        assert_eq!(game.last_events(), &[GameEvent::Jumped]);
        assert!(game.state().player.vel.y < 0.0);
    }
}
