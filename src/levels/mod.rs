//! Level data sources
//!
//! A repository maps 1-based level ids to [`Level`] geometry. Level data is
//! validated every time it is loaded; a missing or malformed level is fatal
//! for the session and is reported to the caller instead of being patched up.

mod builtin;

pub use builtin::BuiltinLevels;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::rect::Rect;
use crate::sim::state::Level;

/// Level loading failure
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {id} does not exist")]
    NotFound { id: u32 },
    #[error("level {id} is malformed: {reason}")]
    Malformed { id: u32, reason: String },
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of level geometry
pub trait LevelRepository {
    /// Number of levels; valid ids are `1..=level_count()`
    fn level_count(&self) -> u32;

    /// Fresh, validated copy of a level
    fn load(&self, id: u32) -> Result<Level, LevelError>;
}

/// Check a level is usable by the simulation
pub fn validate(level: &Level) -> Result<(), LevelError> {
    let id = level.id;
    let malformed = |reason: String| LevelError::Malformed { id, reason };

    if !level.spawn.is_finite() {
        return Err(malformed(format!("spawn {:?} is not finite", level.spawn)));
    }

    check_rects(id, "platform", level.platforms.iter())?;
    check_rects(id, "kinematic platform", level.kinematic_platforms.iter().map(|p| &p.rect))?;
    check_rects(id, "hazard", level.hazards.iter())?;
    check_rects(id, "goal", level.goals.iter())?;

    for (i, mover) in level.kinematic_platforms.iter().enumerate() {
        if !(mover.start_x.is_finite() && mover.end_x.is_finite() && mover.velocity.is_finite()) {
            return Err(malformed(format!("kinematic platform {i} has non-finite track")));
        }
        if mover.start_x > mover.end_x {
            return Err(malformed(format!(
                "kinematic platform {i} track is reversed ({} > {})",
                mover.start_x, mover.end_x
            )));
        }
        if mover.rect.x < mover.start_x || mover.rect.x > mover.end_x {
            return Err(malformed(format!(
                "kinematic platform {i} starts at x={} outside its track [{}, {}]",
                mover.rect.x, mover.start_x, mover.end_x
            )));
        }
    }

    if level.goals.is_empty() {
        return Err(malformed("no goal".to_string()));
    }

    Ok(())
}

fn check_rects<'a>(
    id: u32,
    kind: &str,
    rects: impl Iterator<Item = &'a Rect>,
) -> Result<(), LevelError> {
    for (i, rect) in rects.enumerate() {
        if !rect.is_finite() {
            return Err(LevelError::Malformed {
                id,
                reason: format!("{kind} {i} has non-finite bounds"),
            });
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(LevelError::Malformed {
                id,
                reason: format!("{kind} {i} has non-positive size {}x{}", rect.width, rect.height),
            });
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct LevelDocument {
    levels: Vec<Level>,
}

/// Levels parsed from a JSON document of the form `{ "levels": [ ... ] }`.
///
/// Ids are positional: the first entry is level 1.
#[derive(Debug, Clone, Default)]
pub struct JsonLevels {
    levels: Vec<Level>,
}

impl JsonLevels {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let doc: LevelDocument = serde_json::from_str(json)?;
        log::info!("Parsed {} levels from JSON", doc.levels.len());
        Ok(Self::new(doc.levels))
    }
}

impl LevelRepository for JsonLevels {
    fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    fn load(&self, id: u32) -> Result<Level, LevelError> {
        let index = id.checked_sub(1).ok_or(LevelError::NotFound { id })? as usize;
        let mut level = self
            .levels
            .get(index)
            .cloned()
            .ok_or(LevelError::NotFound { id })?;
        level.id = id;
        validate(&level).inspect_err(|e| log::warn!("Rejected level {}: {}", id, e))?;
        Ok(level)
    }
}
