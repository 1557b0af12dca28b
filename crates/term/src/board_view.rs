//! BoardView: draws a `StoneBoard` into a terminal framebuffer.
//!
//! This module is pure (no I/O). The board pushes its visible stones through
//! the core draw contract: [`StonePalette`] is the asset catalog, and a
//! short-lived painter is the render target that projects each stone's screen
//! position back onto a terminal cell.

use crate::core::{AssetCatalog, Geometry, RandomSource, RenderTarget, StoneBoard, StoneTransform};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::StoneKind;

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

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal "model" of one stone kind: a color and four spin frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoneGlyph {
    pub color: Rgb,
    pub frames: [char; 4],
}

impl StoneGlyph {
    /// Frame for a spin angle in degrees.
    pub fn frame(&self, angle_deg: f32) -> char {
        let quarter = (angle_deg.rem_euclid(360.0) / 90.0) as usize;
        self.frames[quarter.min(3)]
    }
}

/// Kind → glyph table.
#[derive(Debug, Clone)]
pub struct StonePalette {
    glyphs: Vec<StoneGlyph>,
}

impl StonePalette {
    pub fn new(glyphs: Vec<StoneGlyph>) -> Self {
        Self { glyphs }
    }
}

impl Default for StonePalette {
    fn default() -> Self {
        const SPIN: [char; 4] = ['◆', '◈', '◇', '◈'];
        let colors = [
            Rgb::new(220, 80, 80),
            Rgb::new(80, 200, 120),
            Rgb::new(80, 140, 230),
            Rgb::new(240, 210, 80),
            Rgb::new(200, 110, 220),
            Rgb::new(80, 220, 220),
        ];
        Self::new(
            colors
                .into_iter()
                .map(|color| StoneGlyph {
                    color,
                    frames: SPIN,
                })
                .collect(),
        )
    }
}

impl AssetCatalog for StonePalette {
    type Asset = StoneGlyph;

    fn asset(&self, kind: StoneKind) -> Option<&StoneGlyph> {
        self.glyphs.get(kind as usize)
    }
}

/// Render target writing into the board area of a framebuffer.
struct FramePainter<'a> {
    fb: &'a mut FrameBuffer,
    geometry: Geometry,
    /// Top-left terminal cell inside the border.
    origin: (u16, u16),
    cell_w: u16,
    cell_h: u16,
    drawn: u32,
}

impl RenderTarget<StoneGlyph> for FramePainter<'_> {
    fn submit(&mut self, glyph: &StoneGlyph, transform: &StoneTransform) {
        let [x, y, _] = transform.translation;
        let column = self.geometry.column_at(x).round();
        let row = self.geometry.row_at(y).round();
        // Stones still above the board (or thrown off it) are not visible.
        if column < 0.0 || row < 0.0 {
            return;
        }
        let (column, row) = (column as usize, row as usize);
        if column >= self.geometry.nx() || row >= self.geometry.ny() {
            return;
        }

        let style = CellStyle::colored(glyph.color, BOARD_BG).bold();
        self.fb.fill_rect(
            self.origin.0 + column as u16 * self.cell_w,
            self.origin.1 + row as u16 * self.cell_h,
            self.cell_w,
            self.cell_h,
            glyph.frame(transform.angle_deg),
            style,
        );
        self.drawn += 1;
    }
}

/// A lightweight terminal view of the stone board.
#[derive(Debug, Clone)]
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    palette: StonePalette,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            palette: StonePalette::default(),
        }
    }

    pub fn with_palette(mut self, palette: StonePalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &StonePalette {
        &self.palette
    }

    /// Render the board into an existing framebuffer.
    ///
    /// Returns how many stones were painted inside the board area.
    pub fn render_into<R: RandomSource>(
        &self,
        board: &StoneBoard<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> u32 {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let Some(geometry) = board.geometry().copied() else {
            self.draw_centered(fb, viewport, "NOT INITIALIZED");
            return 0;
        };

        let board_w = geometry.nx() as u16 * self.cell_w;
        let board_h = geometry.ny() as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let empty = CellStyle::colored(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for row in 0..geometry.ny() as u16 {
            for column in 0..geometry.nx() as u16 {
                fb.fill_rect(
                    start_x + 1 + column * self.cell_w,
                    start_y + 1 + row * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    '·',
                    empty,
                );
            }
        }
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let mut painter = FramePainter {
            fb: &mut *fb,
            geometry,
            origin: (start_x + 1, start_y + 1),
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            drawn: 0,
        };
        board.draw(&self.palette, &mut painter);
        let drawn = painter.drawn;

        self.draw_side_panel(fb, board, viewport, start_x + frame_w + 2, start_y);
        drawn
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R: RandomSource>(&self, board: &StoneBoard<R>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(board, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::colored(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let (right, bottom) = (x + w - 1, y + h - 1);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, bottom, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(right, y + dy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
    }

    fn draw_side_panel<R: RandomSource>(
        &self,
        fb: &mut FrameBuffer,
        board: &StoneBoard<R>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(8) > viewport.width {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::colored(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let rows: [(&str, u32); 2] = [
            ("STONES", board.stone_count() as u32),
            ("QUEUE", board.pending_animations() as u32),
        ];
        let mut y = start_y;
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }
        fb.put_str(panel_x, y, "STATE", label);
        let state = if board.is_playing_animation() {
            "ANIM"
        } else {
            "IDLE"
        };
        fb.put_str(panel_x, y + 1, state, value);
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, viewport: Viewport, text: &str) {
        let w = text.chars().count() as u16;
        let x = viewport.width.saturating_sub(w) / 2;
        fb.put_str(x, viewport.height / 2, text, CellStyle::default().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_frames_follow_quarter_turns() {
        let glyph = StoneGlyph {
            color: Rgb::new(1, 2, 3),
            frames: ['a', 'b', 'c', 'd'],
        };
        assert_eq!(glyph.frame(0.0), 'a');
        assert_eq!(glyph.frame(95.0), 'b');
        assert_eq!(glyph.frame(180.0), 'c');
        assert_eq!(glyph.frame(359.9), 'd');
        assert_eq!(glyph.frame(-10.0), 'd');
    }

    #[test]
    fn palette_skips_unknown_kinds() {
        let palette = StonePalette::default();
        assert!((0..6).all(|kind| palette.asset(kind).is_some()));
        assert!(palette.asset(6).is_none());
    }
}
