//! Per-frame simulation tick
//!
//! Drives the game lifecycle: edge-triggered commands first, then either the
//! timer of a paused phase or a full gameplay step (player physics, platform
//! motion, hazard/goal/fall checks, camera).

use super::collision::overlaps_any;
use super::physics::integrate;
use super::platform::advance_platforms;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use super::time::{clamp_elapsed, time_scale};
use crate::input::InputSnapshot;
use crate::levels::{LevelError, LevelRepository};
use crate::tuning::Tuning;

/// Advance the game by one host frame of `elapsed_ms`.
///
/// A level that fails to load aborts the tick with the error; the state is
/// left as it was before the load was attempted.
pub fn tick<R: LevelRepository + ?Sized>(
    state: &mut GameState,
    levels: &R,
    input: &InputSnapshot,
    elapsed_ms: f32,
    tuning: &Tuning,
) -> Result<Vec<GameEvent>, LevelError> {
    let mut events = Vec::new();
    let elapsed = clamp_elapsed(elapsed_ms, tuning);

    // Reset works from any phase
    if input.reset() {
        log::info!("Reset requested - restarting from level 1");
        state.load_level(1, levels, tuning)?;
        events.push(GameEvent::LevelLoaded { level: 1 });
    } else if input.continue_() && state.phase == GamePhase::LevelComplete {
        advance_level(state, levels, tuning, &mut events)?;
    }

    match state.phase {
        GamePhase::LevelComplete => {
            state.level_transition_ms += elapsed;
            if state.level_transition_ms >= tuning.level_transition_ms {
                advance_level(state, levels, tuning, &mut events)?;
            }
            return Ok(events);
        }
        GamePhase::GameOver => {
            state.death_ms += elapsed;
            if state.death_ms >= tuning.death_timeout_ms {
                let id = state.level_id();
                log::info!("Respawning in level {}", id);
                state.load_level(id, levels, tuning)?;
                events.push(GameEvent::LevelLoaded { level: id });
            }
            return Ok(events);
        }
        GamePhase::Win => return Ok(events),
        GamePhase::Running => {}
    }

    state.time_ticks += 1;
    let scale = time_scale(elapsed, tuning);

    let step = integrate(&mut state.player, &state.level, input, scale, tuning);
    log::trace!(
        "tick {}: scale {:.3} pos {:?} vel {:?} support {:?}",
        state.time_ticks,
        scale,
        state.player.pos,
        state.player.vel,
        step.support
    );
    if step.jumped {
        events.push(GameEvent::Jumped);
    }

    // Platforms move after the player resolved against them this tick
    advance_platforms(&mut state.level.kinematic_platforms, scale);

    check_triggers(state, tuning, &mut events);

    state.camera.follow(&state.player, tuning);

    Ok(events)
}

/// Hazards, then goals, then falling off the bottom of the screen
fn check_triggers(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let player = state.player.rect();

    if overlaps_any(&player, &state.level.hazards) {
        die(state, DeathCause::Hazard, events);
        return;
    }

    if overlaps_any(&player, &state.level.goals) {
        let level = state.level_id();
        if state.on_last_level() {
            log::info!("Final level {} completed - game won", level);
            state.phase = GamePhase::Win;
            events.push(GameEvent::Won);
        } else {
            log::info!("Level {} completed", level);
            state.phase = GamePhase::LevelComplete;
            state.level_transition_ms = 0.0;
            events.push(GameEvent::LevelCompleted { level });
        }
        return;
    }

    if state.player.pos.y > tuning.screen_height {
        die(state, DeathCause::FellOff, events);
    }
}

fn die(state: &mut GameState, cause: DeathCause, events: &mut Vec<GameEvent>) {
    log::info!("Player died ({:?}) in level {}", cause, state.level_id());
    state.phase = GamePhase::GameOver;
    state.death_ms = 0.0;
    events.push(GameEvent::Died(cause));
}

/// Leave LevelComplete: next level, or Win after the last one
fn advance_level<R: LevelRepository + ?Sized>(
    state: &mut GameState,
    levels: &R,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Result<(), LevelError> {
    if state.on_last_level() {
        log::info!("No levels left - game won");
        state.phase = GamePhase::Win;
        events.push(GameEvent::Won);
        return Ok(());
    }
    let next = state.level_id() + 1;
    state.load_level(next, levels, tuning)?;
    events.push(GameEvent::LevelLoaded { level: next });
    Ok(())
}
