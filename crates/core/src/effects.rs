//! Presentation-only timers: clearing-line glows and the double-score flash.
//!
//! None of this feeds back into the rules. The engine refreshes it on every lock
//! and counts it down once per frame.

use crate::types::{
    CLEAR_EFFECT_FRAMES, CLEAR_EFFECT_INTENSITY, CLEAR_EFFECT_LABEL_FRAMES, DOUBLE_SCORE_FRAMES,
};

/// Glow over a row that was just cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearEffect {
    pub row: usize,
    /// Frames left
    pub timer: u8,
    /// Glow intensity, 255 = opaque
    pub intensity: u8,
    /// Whether the clear scored double
    pub double: bool,
}

impl ClearEffect {
    pub fn new(row: usize, double: bool) -> Self {
        Self {
            row,
            timer: CLEAR_EFFECT_FRAMES,
            intensity: CLEAR_EFFECT_INTENSITY,
            double,
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0
    }

    /// Whether the "2x" marker should be drawn this frame
    pub fn shows_label(&self) -> bool {
        self.double && self.timer > CLEAR_EFFECT_LABEL_FRAMES
    }

    /// Count down one frame; intensity decays by 10% (rounded down)
    pub fn advance(&mut self) {
        if self.timer == 0 {
            return;
        }
        self.timer -= 1;
        self.intensity = (self.intensity as u32 * 9 / 10) as u8;
    }
}

/// Whether the double-score flash is lit on a frame with `timer` frames left.
///
/// The flash blinks in 3-frame halves.
pub fn flash_visible(timer: u8) -> bool {
    timer > 0 && timer % 6 < 3
}

/// All transient effects owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    lines: Vec<ClearEffect>,
    double_timer: u8,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the line effects with one per cleared row.
    ///
    /// Called on every lock, so a lock that clears nothing wipes older glows.
    pub fn on_lock(&mut self, rows: &[usize], doubled: bool) {
        self.lines.clear();
        self.lines
            .extend(rows.iter().map(|&row| ClearEffect::new(row, doubled)));
        if doubled {
            self.double_timer = DOUBLE_SCORE_FRAMES;
        }
    }

    /// Count every timer down by one frame
    pub fn advance(&mut self) {
        for effect in &mut self.lines {
            effect.advance();
        }
        self.double_timer = self.double_timer.saturating_sub(1);
    }

    pub fn lines(&self) -> &[ClearEffect] {
        &self.lines
    }

    /// Line effects still on screen
    pub fn active_lines(&self) -> impl Iterator<Item = &ClearEffect> + '_ {
        self.lines.iter().filter(|e| e.is_active())
    }

    pub fn double_active(&self) -> bool {
        self.double_timer > 0
    }

    pub fn double_timer(&self) -> u8 {
        self.double_timer
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.double_timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_effect_decays() {
        let mut effect = ClearEffect::new(7, false);
        assert_eq!(effect.timer, 30);
        assert_eq!(effect.intensity, 255);

        effect.advance();
        assert_eq!(effect.timer, 29);
        assert_eq!(effect.intensity, 229);
        effect.advance();
        assert_eq!(effect.intensity, 206);

        for _ in 0..40 {
            effect.advance();
        }
        assert!(!effect.is_active());
        assert_eq!(effect.timer, 0);
    }

    #[test]
    fn test_label_shows_for_first_half_of_double_glow() {
        let mut effect = ClearEffect::new(3, true);
        let mut labelled = 0;
        while effect.is_active() {
            if effect.shows_label() {
                labelled += 1;
            }
            effect.advance();
        }
        assert_eq!(labelled, 15);

        assert!(!ClearEffect::new(3, false).shows_label());
    }

    #[test]
    fn test_flash_blinks() {
        let lit: Vec<bool> = (1..=6).map(flash_visible).collect();
        assert_eq!(lit, vec![true, true, false, false, false, true]);
        assert!(!flash_visible(0));
    }

    #[test]
    fn test_lock_replaces_effects() {
        let mut effects = Effects::new();
        effects.on_lock(&[18, 19], true);
        assert_eq!(effects.lines().len(), 2);
        assert!(effects.lines().iter().all(|e| e.double));
        assert_eq!(effects.double_timer(), 30);

        effects.advance();
        assert_eq!(effects.double_timer(), 29);

        effects.on_lock(&[], false);
        assert!(effects.lines().is_empty());
        // The flash keeps running; only a new double restarts it.
        assert!(effects.double_active());
    }
}
