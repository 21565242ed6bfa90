//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::shape_bounds;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameEvent, PieceKind, BOARD_WIDTH, HIDDEN_ROWS, VISIBLE_HEIGHT};

/// How long a feedback banner stays up.
pub const BANNER_MS: u64 = 1_200;

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 10;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Short-lived text shown over the playfield after a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    text: String,
    until_ms: u64,
}

impl Banner {
    pub fn new(text: impl Into<String>, now_ms: u64) -> Self {
        Self {
            text: text.into(),
            until_ms: now_ms.saturating_add(BANNER_MS),
        }
    }

    pub fn for_event(event: GameEvent, now_ms: u64) -> Self {
        match event {
            GameEvent::LinesCleared(n) => Self::new(format!("LINES +{n}"), now_ms),
            GameEvent::GameOver => Self::new("GAME OVER", now_ms),
        }
    }

    /// The text while the banner is still up.
    pub fn text_at(&self, now_ms: u64) -> Option<&str> {
        (now_ms < self.until_ms).then_some(self.text.as_str())
    }
}

/// Lays out the playfield and side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 keeps cells roughly square with typical glyph aspect ratios.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size of the bordered playfield.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            VISIBLE_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Top-left corner of the playfield border within `viewport`.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render one frame into a reusable framebuffer.
    ///
    /// The hidden spawn rows are never drawn. `banner` is centered over the
    /// playfield when present.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        banner: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().with_char(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for vy in 0..VISIBLE_HEIGHT {
            let board_y = (vy + HIDDEN_ROWS) as usize;
            for x in 0..BOARD_WIDTH {
                let px = start_x + 1 + x as u16 * self.cell_w;
                let py = start_y + 1 + vy as u16 * self.cell_h;
                match snap.board[board_y][x as usize].kind() {
                    Some(kind) => {
                        let style = block_style(kind, PLAYFIELD_BG);
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
                    }
                    None => {
                        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
                        fb.put_char(px + self.cell_w / 2, py, '·', style);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if let Some(text) = banner {
            self.draw_banner(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, banner: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, banner, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(right, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, n) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, snap, panel_x, y + 1);
    }

    /// The upcoming piece, trimmed to its bounding box.
    fn draw_preview(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let (min_row, min_col, _, _) = shape_bounds(snap.next);
        let style = block_style(snap.next, Rgb::new(0, 0, 0));
        for &(row, col) in snap.next_shape.iter() {
            let px = x + (col - min_col) as u16 * self.cell_w;
            let py = y + (row - min_row) as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as u16;
        let x = start_x + frame_w.saturating_sub(text_w) / 2;
        let y = start_y + frame_h / 2;
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

fn block_style(kind: PieceKind, bg: Rgb) -> CellStyle {
    CellStyle::new(Rgb::of_piece(kind), bg).bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_expires() {
        let banner = Banner::for_event(GameEvent::LinesCleared(2), 1_000);
        assert_eq!(banner.text_at(1_000), Some("LINES +2"));
        assert_eq!(banner.text_at(1_000 + BANNER_MS - 1), Some("LINES +2"));
        assert_eq!(banner.text_at(1_000 + BANNER_MS), None);
    }

    #[test]
    fn frame_fits_twenty_visible_rows() {
        let view = GameView::default();
        assert_eq!(view.frame_size(), (22, 22));
        assert_eq!(
            view.with_anchor_y(AnchorY::Top).frame_origin(Viewport::new(80, 30)),
            (29, 0)
        );
    }
}
