//! Ledge Runner headless runner
//!
//! Plays the game in attract mode: a seeded bot holds right, hops at random
//! and skips the level-complete countdown. Useful for soak-testing level data
//! and tuning without a renderer.
//!
//! Usage: `ledge-runner [seed] [levels.json] [tuning.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ledge_runner::sim::{GameEvent, GamePhase};
use ledge_runner::{
    Action, BuiltinLevels, GameLoop, JsonLevels, LevelRepository, SharedInput, Tuning,
};

/// Frames to simulate
const FRAMES: u32 = 60 * 60 * 5;
/// Host frame time range (ms), to exercise the time normalizer
const FRAME_MS_RANGE: std::ops::Range<f32> = 8.0..40.0;
/// Chance per grounded frame of starting a jump
const JUMP_CHANCE: f64 = 0.08;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => fail(format!("invalid seed: {}", e)),
        None => 0x1ed6e,
    };

    let levels: Box<dyn LevelRepository> = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| JsonLevels::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(levels) => Box::new(levels),
            Err(e) => fail(format!("cannot load levels from {}: {}", path, e)),
        },
        None => Box::new(BuiltinLevels),
    };

    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => fail(format!("cannot load tuning from {}: {}", path, e)),
        },
        None => Tuning::default(),
    };

    log::info!("Ledge Runner (headless) starting with seed {}", seed);

    let mut game = match GameLoop::new(levels, tuning) {
        Ok(game) => game,
        Err(e) => fail(format!("cannot start session: {}", e)),
    };
    let input = game.input();
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut stats = Stats::default();

    game.start();
    for _ in 0..FRAMES {
        drive_bot(&game, &input, &mut rng);

        let elapsed = rng.random_range(FRAME_MS_RANGE);
        if let Err(e) = game.step(elapsed) {
            fail(format!("session aborted: {}", e));
        }
        stats.record(game.last_events());
    }
    game.stop();

    let state = game.state();
    log::info!(
        "Finished: {} ticks, {} jumps, {} deaths, {} levels cleared, {} wins; now on level {} ({:?})",
        state.time_ticks,
        stats.jumps,
        stats.deaths,
        stats.levels_cleared,
        stats.wins,
        state.level_id(),
        state.phase
    );
}

/// Pick this frame's inputs from the current state
fn drive_bot(game: &GameLoop, input: &SharedInput, rng: &mut Pcg32) {
    let state = game.state();
    match state.phase {
        GamePhase::Running => {
            input.press(Action::MOVE_RIGHT);
            if state.player.on_ground && rng.random_bool(JUMP_CHANCE) {
                input.press(Action::JUMP);
            } else {
                input.release(Action::JUMP);
            }
        }
        GamePhase::LevelComplete => {
            input.release_all();
            input.press(Action::CONTINUE);
        }
        GamePhase::GameOver => input.release_all(),
        GamePhase::Win => {
            input.release_all();
            input.press(Action::RESET);
        }
    }
}

#[derive(Default)]
struct Stats {
    jumps: u32,
    deaths: u32,
    levels_cleared: u32,
    wins: u32,
}

impl Stats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::Died(cause) => {
                    self.deaths += 1;
                    log::info!("Bot died: {:?}", cause);
                }
                GameEvent::LevelCompleted { .. } => self.levels_cleared += 1,
                GameEvent::Won => {
                    self.levels_cleared += 1;
                    self.wins += 1;
                }
                GameEvent::LevelLoaded { .. } => {}
            }
        }
    }
}

fn fail(message: String) -> ! {
    log::error!("{}", message);
    eprintln!("ledge-runner: {}", message);
    std::process::exit(1)
}
