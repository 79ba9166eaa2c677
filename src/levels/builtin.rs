//! The three hand-built levels
//!
//! Geometry tables are `[x, y, width, height]`; moving platforms append
//! `[start_x, end_x, velocity]`.

use glam::Vec2;

use super::{LevelError, LevelRepository, validate};
use crate::consts::{SCREEN_HEIGHT, TILE_SIZE};
use crate::sim::rect::Rect;
use crate::sim::state::{KinematicPlatform, Level};

const GROUND_Y: f32 = SCREEN_HEIGHT - TILE_SIZE;
const SPAWN: Vec2 = Vec2::new(100.0, 300.0);
/// Safe ledge under the spawn point, shared by every level
const START_LEDGE: [f32; 4] = [50.0, SCREEN_HEIGHT - TILE_SIZE * 3.0, 150.0, TILE_SIZE];
/// Goal flag footprint for levels 1 and 2
const FLAG_W: f32 = TILE_SIZE * 1.5;
const FLAG_H: f32 = TILE_SIZE * 2.5;

struct LevelTable {
    /// `[x, width]` ground segments at GROUND_Y
    ground: &'static [[f32; 2]],
    platforms: &'static [[f32; 4]],
    movers: &'static [[f32; 7]],
    hazards: &'static [[f32; 4]],
    goals: &'static [[f32; 4]],
}

const T: f32 = TILE_SIZE;

static LEVEL_1: LevelTable = LevelTable {
    ground: &[[0.0, 400.0], [500.0, 300.0], [900.0, 400.0], [1400.0, 600.0]],
    platforms: &[
        // Climb
        [300.0, 500.0, 120.0, T],
        [450.0, 420.0, 100.0, T],
        [600.0, 350.0, 80.0, T],
        // Descending run
        [750.0, 280.0, 100.0, T],
        [900.0, 350.0, 120.0, T],
        [1100.0, 400.0, 100.0, T],
        // Precision jumps
        [1250.0, 350.0, 60.0, T],
        [1350.0, 300.0, 50.0, T],
        [1450.0, 250.0, 40.0, T],
        // Final stretch
        [1550.0, 300.0, 100.0, T],
        [1700.0, 350.0, 180.0, T],
        [1780.0, 300.0, 40.0, T],
    ],
    movers: &[
        [380.0, 350.0, 80.0, T, 350.0, 550.0, 2.0],
        [950.0, 200.0, 100.0, T, 850.0, 1050.0, 3.0],
        [1200.0, 320.0, 60.0, T, 1150.0, 1300.0, 5.0],
        [1600.0, 230.0, 70.0, T, 1550.0, 1750.0, 2.0],
    ],
    hazards: &[],
    goals: &[[1780.0, 350.0 - T * 1.5, FLAG_W, FLAG_H]],
};

static LEVEL_2: LevelTable = LevelTable {
    ground: &[
        [0.0, 350.0],
        [450.0, 250.0],
        [800.0, 300.0],
        [1200.0, 200.0],
        [1500.0, 300.0],
    ],
    platforms: &[
        [300.0, 480.0, 120.0, T],
        [450.0, 400.0, 100.0, T],
        [600.0, 320.0, 80.0, T],
        [750.0, 260.0, 80.0, T],
        [900.0, 320.0, 100.0, T],
        [1050.0, 380.0, 80.0, T],
        [1200.0, 300.0, 50.0, T],
        [1300.0, 250.0, 40.0, T],
        [1400.0, 200.0, 30.0, T],
        [1500.0, 250.0, 80.0, T],
        [1650.0, 300.0, 60.0, T],
        [1750.0, 350.0, 50.0, T],
    ],
    movers: &[
        [380.0, 350.0, 70.0, T, 320.0, 500.0, 3.0],
        [900.0, 180.0, 80.0, T, 800.0, 1000.0, 4.0],
        [1200.0, 280.0, 50.0, T, 1150.0, 1330.0, 6.0],
        [1600.0, 200.0, 60.0, T, 1550.0, 1750.0, 3.0],
    ],
    hazards: &[
        // Ground gaps
        [350.0, SCREEN_HEIGHT - T * 2.0, T * 2.0, T],
        [700.0, SCREEN_HEIGHT - T * 2.0, T * 2.0, T],
        [1100.0, SCREEN_HEIGHT - T * 2.0, T * 2.0, T],
        [1400.0, SCREEN_HEIGHT - T * 2.0, T * 2.0, T],
        // Under platforms
        [320.0, 520.0, T * 2.0, T],
        [800.0, 360.0, T * 2.0, T],
        [1250.0, 350.0, T * 1.5, T],
        // Jump lines
        [1050.0, 180.0, T, T],
        [1350.0, 150.0, T, T],
        [1550.0, 320.0, T, T],
        [1700.0, 300.0, T, T],
    ],
    goals: &[[1750.0, 350.0 - T * 1.5, FLAG_W, FLAG_H]],
};

static LEVEL_3: LevelTable = LevelTable {
    ground: &[
        [0.0, 250.0],
        [400.0, 150.0],
        [650.0, 150.0],
        [900.0, 100.0],
        [1100.0, 100.0],
        [1300.0, 100.0],
        [1500.0, 200.0],
        [1800.0, 300.0],
    ],
    platforms: &[
        [250.0, 480.0, 90.0, T],
        [350.0, 420.0, 80.0, T],
        [450.0, 360.0, 70.0, T],
        [550.0, 300.0, 60.0, T],
        [650.0, 250.0, 50.0, T],
        [750.0, 200.0, 45.0, T],
        [850.0, 210.0, 40.0, T],
        [900.0, 220.0, 40.0, T],
        [925.0, 235.0, 30.0, T],
        [950.0, 250.0, 50.0, T],
        [1050.0, 280.0, 50.0, T],
        [1150.0, 250.0, 50.0, T],
        [1250.0, 220.0, 50.0, T],
        [1350.0, 190.0, 50.0, T],
        [1450.0, 220.0, 45.0, T],
        [1550.0, 250.0, 70.0, T],
        [1650.0, 300.0, 60.0, T],
        [1750.0, 350.0, 50.0, T],
        [1850.0, 400.0, 50.0, T],
        [1900.0, 380.0, 150.0, T],
    ],
    movers: &[
        [875.0, 190.0, 40.0, T, 850.0, 950.0, 3.0],
        [350.0, 250.0, 40.0, T, 250.0, 450.0, 4.0],
        [700.0, 120.0, 40.0, T, 650.0, 850.0, 5.0],
        [1000.0, 150.0, 40.0, T, 950.0, 1300.0, 6.0],
        [1400.0, 100.0, 40.0, T, 1350.0, 1500.0, 5.0],
        [1500.0, 150.0, 40.0, T, 1450.0, 1600.0, 5.0],
        [1600.0, 300.0, 40.0, T, 1550.0, 1700.0, 4.0],
    ],
    hazards: &[[1150.0, 300.0, T, T], [1700.0, 400.0, T, T]],
    goals: &[[1950.0, 320.0, 40.0, 80.0]],
};

static LEVELS: [&LevelTable; 3] = [&LEVEL_1, &LEVEL_2, &LEVEL_3];

fn rect([x, y, w, h]: [f32; 4]) -> Rect {
    Rect::new(x, y, w, h)
}

impl LevelTable {
    fn build(&self, id: u32) -> Level {
        let ground = self
            .ground
            .iter()
            .map(|&[x, w]| Rect::new(x, GROUND_Y, w, TILE_SIZE));
        let platforms = ground
            .chain(std::iter::once(rect(START_LEDGE)))
            .chain(self.platforms.iter().copied().map(rect))
            .collect();

        let kinematic_platforms = self
            .movers
            .iter()
            .map(|&[x, y, w, h, start_x, end_x, velocity]| {
                KinematicPlatform::new(Rect::new(x, y, w, h), start_x, end_x, velocity)
            })
            .collect();

        Level {
            id,
            spawn: SPAWN,
            platforms,
            kinematic_platforms,
            hazards: self.hazards.iter().copied().map(rect).collect(),
            goals: self.goals.iter().copied().map(rect).collect(),
        }
    }
}

/// The built-in campaign
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl LevelRepository for BuiltinLevels {
    fn level_count(&self) -> u32 {
        LEVELS.len() as u32
    }

    fn load(&self, id: u32) -> Result<Level, LevelError> {
        let table = id
            .checked_sub(1)
            .and_then(|i| LEVELS.get(i as usize))
            .ok_or(LevelError::NotFound { id })?;
        let level = table.build(id);
        validate(&level)?;
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_load() {
        for id in 1..=BuiltinLevels.level_count() {
            let level = BuiltinLevels.load(id).unwrap();
            assert_eq!(level.id, id);
            assert_eq!(level.spawn, SPAWN);
            assert!(!level.goals.is_empty());
            assert!(!level.kinematic_platforms.is_empty());
        }
        assert!(matches!(BuiltinLevels.load(4), Err(LevelError::NotFound { id: 4 })));
        assert!(matches!(BuiltinLevels.load(0), Err(LevelError::NotFound { id: 0 })));
    }

    #[test]
    fn test_level_one_has_no_spikes() {
        let level = BuiltinLevels.load(1).unwrap();
        assert!(level.hazards.is_empty());
        // 4 ground segments + start ledge + 12 platforms
        assert_eq!(level.platforms.len(), 17);
    }

    #[test]
    fn test_movers_start_on_their_track() {
        for id in 1..=3 {
            for mover in BuiltinLevels.load(id).unwrap().kinematic_platforms {
                assert!(mover.rect.x >= mover.start_x && mover.rect.x <= mover.end_x);
            }
        }
    }

    #[test]
    fn test_spawn_drops_onto_start_ledge() {
        let level = BuiltinLevels.load(1).unwrap();
        let ledge = level.platforms[4];
        assert_eq!(ledge, rect(START_LEDGE));
        let center_x = SPAWN.x + 18.0;
        assert!(center_x >= ledge.left() && center_x <= ledge.right());
        assert!(SPAWN.y + 36.0 < ledge.top());
    }
}
