//! Scoring module - points, level curve and gravity interval.
//!
//! The rules are deliberately flat: every cleared row is worth the same fixed
//! points (no combo or multi-line scaling), the level is a pure function of
//! the score, and the drop interval decays exponentially with the level down
//! to a floor.

use tui_blockfall_types::{
    DROP_INTERVAL_DECAY, DROP_INTERVAL_FLOOR_MS, POINTS_PER_LEVEL, POINTS_PER_LINE,
};

/// Points awarded for clearing `lines` rows in one sweep.
pub fn score_for_clear(lines: u32) -> u32 {
    lines * POINTS_PER_LINE
}

/// Level as a function of score: `score / 50 + 1`.
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Gravity interval for a level: `max(120, base * 0.85^(level-1))`.
///
/// Monotonically non-increasing in `level`; levels at or below 1 use the base
/// interval unchanged.
pub fn drop_interval_for_level(level: u32, base_ms: f64) -> f64 {
    let exponent = level.saturating_sub(1) as i32;
    (base_ms * DROP_INTERVAL_DECAY.powi(exponent)).max(DROP_INTERVAL_FLOOR_MS)
}
