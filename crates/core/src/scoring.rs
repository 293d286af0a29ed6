//! Scoring module - line-clear awards, double-score odds, level and gravity
//!
//! Level is never tracked on its own: it is a pure function of the cumulative
//! score and is recomputed after every lock.

use crate::types::{
    DOUBLE_CHANCE_BASE, DOUBLE_CHANCE_CAP, DOUBLE_CHANCE_PER_LEVEL, GRAVITY_FPS, LINE_SCORES,
    POINTS_PER_LEVEL,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points from the line table before doubling
    pub base: u32,
    /// Points actually awarded
    pub total: u32,
    pub doubled: bool,
}

/// Base award for clearing `lines` rows with one lock.
/// Anything outside 1..=4 scores nothing.
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Calculate the award for one lock
pub fn calculate_score(lines: usize, doubled: bool) -> ScoreResult {
    let base = calculate_line_score(lines);
    let doubled = doubled && base > 0;
    let total = if doubled { base.saturating_mul(2) } else { base };
    ScoreResult {
        base,
        total,
        doubled,
    }
}

/// Chance, in percent, that a hard-drop clear scores double at `level`
pub fn double_chance_percent(level: u32) -> u32 {
    let extra = level.saturating_sub(1).saturating_mul(DOUBLE_CHANCE_PER_LEVEL);
    DOUBLE_CHANCE_BASE.saturating_add(extra).min(DOUBLE_CHANCE_CAP)
}

/// Does a roll in [1, 100] land inside the double-score chance for `level`?
pub fn is_double_roll(roll: u32, level: u32) -> bool {
    roll <= double_chance_percent(level)
}

/// Level for a cumulative score (1-based)
pub fn calculate_level(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Frames between gravity steps at `level`, never less than one
pub fn gravity_frames(level: u32) -> u32 {
    (GRAVITY_FPS / level.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0), 0);
        assert_eq!(calculate_line_score(1), 100);
        assert_eq!(calculate_line_score(2), 300);
        assert_eq!(calculate_line_score(3), 700);
        assert_eq!(calculate_line_score(4), 1500);
        assert_eq!(calculate_line_score(5), 0);
    }

    #[test]
    fn test_doubling() {
        let result = calculate_score(1, true);
        assert_eq!(result.base, 100);
        assert_eq!(result.total, 200);
        assert!(result.doubled);

        let result = calculate_score(4, false);
        assert_eq!(result.total, 1500);
        assert!(!result.doubled);

        // Nothing to double without a clear.
        let result = calculate_score(0, true);
        assert_eq!(result.total, 0);
        assert!(!result.doubled);
    }

    #[test]
    fn test_double_chance_grows_and_caps() {
        assert_eq!(double_chance_percent(1), 10);
        assert_eq!(double_chance_percent(2), 13);
        assert_eq!(double_chance_percent(5), 22);
        assert_eq!(double_chance_percent(14), 49);
        assert_eq!(double_chance_percent(15), 50);
        assert_eq!(double_chance_percent(100), 50);
        // Level 0 never happens in play, but must not underflow.
        assert_eq!(double_chance_percent(0), 10);
    }

    #[test]
    fn test_double_roll_boundary() {
        assert!(is_double_roll(1, 1));
        assert!(is_double_roll(10, 1));
        assert!(!is_double_roll(11, 1));
        assert!(!is_double_roll(100, 50));
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(1999), 1);
        assert_eq!(calculate_level(2000), 2);
        assert_eq!(calculate_level(4001), 3);
    }

    #[test]
    fn test_gravity_frames() {
        assert_eq!(gravity_frames(1), 30);
        assert_eq!(gravity_frames(2), 15);
        assert_eq!(gravity_frames(4), 7);
        assert_eq!(gravity_frames(30), 1);
        assert_eq!(gravity_frames(45), 1);
        assert_eq!(gravity_frames(0), 30);
    }
}
