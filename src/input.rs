//! Logical input
//!
//! Hosts translate their key/touch events into [`Action`]s and feed them to a
//! [`SharedInput`]. The simulation reads exactly one [`InputSnapshot`] per tick,
//! so input arriving from another thread mid-tick is never observed half-applied.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Logical actions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Action: u8 {
        const MOVE_LEFT = 1 << 0;
        const MOVE_RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        /// Restart from level 1 (edge-triggered)
        const RESET = 1 << 3;
        /// Skip the level-complete countdown (edge-triggered)
        const CONTINUE = 1 << 4;
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Actions currently held down
    pub held: Action,
    /// Actions pressed since the previous snapshot (even if already released)
    pub pressed: Action,
}

impl InputSnapshot {
    /// Snapshot with the given actions both held and freshly pressed
    pub fn pressing(actions: Action) -> Self {
        Self {
            held: actions,
            pressed: actions,
        }
    }

    /// Snapshot with actions held but no new presses
    pub fn holding(actions: Action) -> Self {
        Self {
            held: actions,
            pressed: Action::empty(),
        }
    }

    /// -1, 0 or 1. Holding both directions cancels out.
    pub fn horizontal(&self) -> f32 {
        let left = self.held.contains(Action::MOVE_LEFT);
        let right = self.held.contains(Action::MOVE_RIGHT);
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Jump fires while held and on a press that was released before the tick
    pub fn wants_jump(&self) -> bool {
        (self.held | self.pressed).contains(Action::JUMP)
    }

    pub fn reset(&self) -> bool {
        self.pressed.contains(Action::RESET)
    }

    pub fn continue_(&self) -> bool {
        self.pressed.contains(Action::CONTINUE)
    }
}

#[derive(Debug, Default)]
struct Latch {
    held: AtomicU8,
    pressed: AtomicU8,
}

/// Thread-safe input state shared between event callbacks and the game loop
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    latch: Arc<Latch>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key/button down
    pub fn press(&self, actions: Action) {
        self.latch.held.fetch_or(actions.bits(), Ordering::AcqRel);
        self.latch.pressed.fetch_or(actions.bits(), Ordering::AcqRel);
    }

    /// Key/button up
    pub fn release(&self, actions: Action) {
        self.latch.held.fetch_and(!actions.bits(), Ordering::AcqRel);
    }

    /// Drop all held actions (e.g. on window blur)
    pub fn release_all(&self) {
        self.latch.held.store(0, Ordering::Release);
    }

    /// Take this tick's snapshot and clear the edge latch
    pub fn snapshot(&self) -> InputSnapshot {
        let pressed = self.latch.pressed.swap(0, Ordering::AcqRel);
        let held = self.latch.held.load(Ordering::Acquire);
        InputSnapshot {
            held: Action::from_bits_truncate(held),
            pressed: Action::from_bits_truncate(pressed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_cancels() {
        assert_eq!(InputSnapshot::holding(Action::MOVE_LEFT).horizontal(), -1.0);
        assert_eq!(InputSnapshot::holding(Action::MOVE_RIGHT).horizontal(), 1.0);
        assert_eq!(
            InputSnapshot::holding(Action::MOVE_LEFT | Action::MOVE_RIGHT).horizontal(),
            0.0
        );
        assert_eq!(InputSnapshot::default().horizontal(), 0.0);
    }

    #[test]
    fn test_press_release_between_ticks_is_seen_once() {
        let input = SharedInput::new();
        input.press(Action::JUMP);
        input.release(Action::JUMP);

        let snap = input.snapshot();
        assert!(snap.wants_jump());
        assert!(!snap.held.contains(Action::JUMP));

        let snap = input.snapshot();
        assert!(!snap.wants_jump());
    }

    #[test]
    fn test_held_survives_snapshots() {
        let input = SharedInput::new();
        input.press(Action::MOVE_RIGHT);
        assert_eq!(input.snapshot().horizontal(), 1.0);
        assert_eq!(input.snapshot().horizontal(), 1.0);
        input.release_all();
        assert_eq!(input.snapshot().horizontal(), 0.0);
    }

    #[test]
    fn test_reset_is_edge_triggered() {
        let input = SharedInput::new();
        input.press(Action::RESET);
        assert!(input.snapshot().reset());
        // Still held, but no new edge
        assert!(!input.snapshot().reset());
    }

    #[test]
    fn test_writer_thread() {
        let input = SharedInput::new();
        let writer = input.clone();
        std::thread::spawn(move || {
            writer.press(Action::CONTINUE | Action::MOVE_LEFT);
        })
        .join()
        .unwrap();

        let snap = input.snapshot();
        assert!(snap.continue_());
        assert_eq!(snap.horizontal(), -1.0);
    }
}
