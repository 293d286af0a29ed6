//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, Phase};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WELL: Rgb = Rgb::new(30, 30, 40);
const GLOW: Rgb = Rgb::new(255, 255, 255);
const GOLD: Rgb = Rgb::new(255, 200, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame sits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// Callers reuse the framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let board_w = snap.width as u16 * self.cell_w;
        let board_h = snap.height as u16;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: viewport.height.saturating_sub(board_h + 2) / 2,
            w: board_w + 2,
            h: board_h + 2,
        };

        let border = if snap.double_flash_visible() {
            CellStyle::new(GOLD, BLACK).bold()
        } else {
            CellStyle::new(Rgb::new(200, 200, 200), BLACK)
        };
        self.draw_border(fb, frame, border);

        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x as usize, y as usize).and_then(Color::from_id) {
                    Some(color) => self.draw_block(fb, frame, x as u16, y as u16, color),
                    None => self.draw_empty(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let Some(active) = snap.active {
            for &(x, y) in active.cells.iter() {
                if x >= 0 && y >= 0 && (x as u8) < snap.width && (y as u8) < snap.height {
                    self.draw_block(fb, frame, x as u16, y as u16, active.color);
                }
            }
        }

        self.draw_clear_effects(fb, snap, frame);
        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::Waiting => self.draw_overlay_text(fb, frame, "PRESS ENTER"),
            Phase::Over => self.draw_overlay_text(fb, frame, "GAME OVER"),
            Phase::Victory => self.draw_overlay_text(fb, frame, "YOU WIN"),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn cell_origin(&self, frame: Frame, x: u16, y: u16) -> (u16, u16) {
        (frame.x + 1 + x * self.cell_w, frame.y + 1 + y)
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let (px, py) = self.cell_origin(frame, x, y);
        let style = CellStyle::new(Rgb::new(70, 70, 80), WELL);
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px, py, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Color) {
        let (px, py) = self.cell_origin(frame, x, y);
        let style = CellStyle::new(color.into(), WELL);
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    /// Fade a white glow over cleared rows and tag doubled ones with "2x".
    fn draw_clear_effects(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        for effect in snap.clear_effects.iter().filter(|e| e.is_active()) {
            if effect.row >= snap.height as usize {
                continue;
            }
            let (px, py) = self.cell_origin(frame, 0, effect.row as u16);
            let row_w = snap.width as u16 * self.cell_w;
            for dx in 0..row_w {
                if let Some(mut cell) = fb.get(px + dx, py) {
                    cell.style.bg = cell.style.bg.blend(GLOW, effect.intensity);
                    cell.style.fg = cell.style.fg.blend(GLOW, effect.intensity / 2);
                    fb.set(px + dx, py, cell);
                }
            }
            if effect.shows_label() {
                let label = CellStyle::new(GOLD, BLACK).bold();
                fb.put_str(px + row_w.saturating_sub(2) / 2, py, "2x", label);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("BEST", snap.high_score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let style = CellStyle::new(next.color.into(), BLACK);
            for &(dx, dy) in next.minos.iter() {
                let px = panel_x + dx as u16 * self.cell_w;
                fb.fill_rect(px, y + dy as u16, self.cell_w, 1, '█', style);
            }
        }
        y = y.saturating_add(5);

        if let Some(capacity) = snap.progress_capacity {
            fb.put_str(panel_x, y, "PROGRESS", label);
            y = y.saturating_add(1);
            let filled = snap.progress.min(capacity);
            fb.put_u32(panel_x, y, filled, value);
            let slash_x = panel_x + digits(filled);
            fb.put_char(slash_x, y, '/', value);
            fb.put_u32(slash_x + 1, y, capacity, value);
            y = y.saturating_add(1);

            let bar_w: u16 = 10;
            let lit = if capacity == 0 {
                bar_w
            } else {
                (filled as u64 * bar_w as u64 / capacity as u64) as u16
            };
            let on = CellStyle::new(GOLD, BLACK);
            let off = CellStyle::new(Rgb::new(70, 70, 80), BLACK);
            for i in 0..bar_w {
                let (ch, style) = if i < lit { ('█', on) } else { ('░', off) };
                fb.put_char(panel_x + i, y, ch, style);
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn digits(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
