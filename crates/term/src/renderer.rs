//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is written in full; later
//! frames only rewrite runs of cells that changed since the last present.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    /// Restore the terminal.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present a frame, diffing against the previously presented one.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;
        match self.last.as_mut() {
            Some(last) => last.clone_from(fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands turning `prev` into `next` (a full redraw when there is
/// no previous frame or the size changed).
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let same_size = prev.is_some_and(|p| p.width() == next.width() && p.height() == next.height());
    let mut style: Option<CellStyle> = None;

    match prev {
        Some(prev) if same_size => {
            for y in 0..next.height() {
                for (start, len) in changed_runs(prev, next, y) {
                    out.queue(cursor::MoveTo(start, y))?;
                    write_cells(out, &next.row(y)[start as usize..(start + len) as usize], &mut style)?;
                }
            }
        }
        _ => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                out.queue(cursor::MoveTo(0, y))?;
                write_cells(out, next.row(y), &mut style)?;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn write_cells(
    out: &mut Vec<u8>,
    cells: &[crate::fb::Cell],
    current: &mut Option<CellStyle>,
) -> Result<()> {
    for cell in cells {
        if *current != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            *current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(start, len)` runs of cells in row `y` that differ between two
/// equally-sized frames.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<(u16, u16)> {
    let (a, b) = (prev.row(y), next.row(y));
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for x in 0..b.len() {
        let differs = a.get(x) != b.get(x);
        match (differs, run_start) {
            (true, None) => run_start = Some(x),
            (false, Some(start)) => {
                runs.push((start as u16, (x - start) as u16));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        runs.push((start as u16, (b.len() - start) as u16));
    }
    runs
}
