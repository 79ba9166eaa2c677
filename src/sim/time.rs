//! Frame time normalization
//!
//! The host calls us at whatever cadence the display runs. Every per-tick
//! velocity and position delta is multiplied by a scale factor relative to a
//! 60 Hz reference frame so simulated speed is frame-rate independent.

use crate::tuning::Tuning;

/// Clamp a host-supplied frame delta to `[0, max_frame_delta_ms]`.
///
/// Negative and NaN inputs collapse to 0 so a misbehaving host clock cannot
/// run the simulation backwards.
#[inline]
pub fn clamp_elapsed(elapsed_ms: f32, tuning: &Tuning) -> f32 {
    elapsed_ms.max(0.0).min(tuning.max_frame_delta_ms)
}

/// Dimensionless scale factor for a frame delta
#[inline]
pub fn time_scale(elapsed_ms: f32, tuning: &Tuning) -> f32 {
    clamp_elapsed(elapsed_ms, tuning) / tuning.reference_frame_ms
}
