//! Scoring module - line-clear points, level curve and fall speed
//!
//! All functions are pure:
//! - Line clears score `LINE_SCORES[rows] * level`, rows capped at 4.
//! - Hard drops score one point per row travelled, independent of level.
//! - The level rises every 6 cleared lines, from 1 up to 10.
//! - The fall interval shrinks by 60ms per level, never below 50ms.

use crate::types::{
    BASE_FALL_MS, FALL_FLOOR_MS, FALL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
    SCORE_DISPLAY_MAX,
};

/// Calculate line clear score
/// rows: rows removed by one landing (anything above 4 is scored as 4)
/// level: current level (1-based)
pub fn line_score(rows: usize, level: u32) -> u32 {
    LINE_SCORES[rows.min(4)].saturating_mul(level)
}

/// Points for a hard drop over `rows` rows
pub fn hard_drop_score(rows: u32) -> u32 {
    rows
}

/// Level for a cumulative number of cleared lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + 1).min(MAX_LEVEL)
}

/// Milliseconds between automatic one-row falls at `level`
pub fn fall_interval_ms(level: u32) -> u32 {
    BASE_FALL_MS
        .saturating_sub(level.saturating_mul(FALL_STEP_MS))
        .max(FALL_FLOOR_MS)
}

/// Level and fall interval for a cumulative number of cleared lines
pub fn level_and_fall_interval(total_lines: u32) -> (u32, u32) {
    let level = level_for_lines(total_lines);
    (level, fall_interval_ms(level))
}

/// Score clamped to what the 6-digit panel can show
pub fn display_score(score: u32) -> u32 {
    score.min(SCORE_DISPLAY_MAX)
}
