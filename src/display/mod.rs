//! Terminal canvas: the only place that writes escape sequences.
//!
//! The world is rasterised into a true-colour pixel buffer where every
//! terminal cell holds two vertically stacked pixels (drawn with `▀`), then
//! text runs are printed on top in whole cells. No game logic happens here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use jetpack_adventure::entities::{Rect, Rgb, BLACK, SCREEN_HEIGHT, SCREEN_WIDTH};
use jetpack_adventure::render::{Anchor, Canvas};

fn term_color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

fn blend(dst: Rgb, src: Rgb, alpha: f32) -> Rgb {
    let mix = |d: u8, s: u8| (d as f32 + (s as f32 - d as f32) * alpha).round() as u8;
    Rgb(mix(dst.0, src.0), mix(dst.1, src.1), mix(dst.2, src.2))
}

struct TextRun {
    col: i32,
    row: i32,
    text: String,
    color: Rgb,
}

/// Half-block pixel canvas sized to the terminal.
pub struct Screen {
    cols: u16,
    rows: u16,
    /// Pixel buffer, `cols` wide and `rows * 2` tall.
    px: Vec<Rgb>,
    texts: Vec<TextRun>,
    /// World units → pixels.
    sx: f32,
    sy: f32,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut screen = Screen {
            cols: 0,
            rows: 0,
            px: Vec::new(),
            texts: Vec::new(),
            sx: 1.0,
            sy: 1.0,
        };
        screen.resize(cols, rows);
        screen
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.px = vec![BLACK; self.width() * self.height()];
        self.sx = self.width() as f32 / SCREEN_WIDTH;
        self.sy = self.height() as f32 / SCREEN_HEIGHT;
    }

    fn width(&self) -> usize {
        self.cols as usize
    }

    fn height(&self) -> usize {
        self.rows as usize * 2
    }

    /// Wipe pixels and text before drawing a new frame.
    pub fn clear(&mut self) {
        self.px.fill(BLACK);
        self.texts.clear();
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.width() + x]
    }

    /// Pixel span whose centres fall inside `[lo, hi)` world units.
    fn span(lo: f32, hi: f32, scale: f32, limit: usize) -> (usize, usize) {
        let first = (lo * scale - 0.5).ceil().max(0.0) as usize;
        let last = (hi * scale - 0.5).ceil().max(0.0) as usize;
        (first.min(limit), last.min(limit))
    }

    // ── Output ───────────────────────────────────────────────────────────────

    /// Write the frame to the terminal.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..self.rows as usize {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.width() {
                let top = self.get(col, row * 2);
                let bottom = self.get(col, row * 2 + 1);

                if bg != Some(bottom) {
                    out.queue(style::SetBackgroundColor(term_color(bottom)))?;
                    bg = Some(bottom);
                }
                if top == bottom {
                    out.queue(Print(' '))?;
                } else {
                    if fg != Some(top) {
                        out.queue(style::SetForegroundColor(term_color(top)))?;
                        fg = Some(top);
                    }
                    out.queue(Print('\u{2580}'))?; // ▀
                }
            }
        }

        for run in &self.texts {
            self.present_text(out, run)?;
        }

        out.queue(style::ResetColor)?;
        out.flush()
    }

    fn present_text<W: Write>(&self, out: &mut W, run: &TextRun) -> std::io::Result<()> {
        if run.row < 0 || run.row >= self.rows as i32 {
            return Ok(());
        }
        let skip = (-run.col).max(0) as usize;
        let col = run.col.max(0) as usize;
        let room = self.width().saturating_sub(col);
        let visible: String = run.text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }

        let under = self.get(col, run.row as usize * 2 + 1);
        out.queue(cursor::MoveTo(col as u16, run.row as u16))?;
        out.queue(style::SetBackgroundColor(term_color(under)))?;
        out.queue(style::SetForegroundColor(term_color(run.color)))?;
        out.queue(style::SetAttribute(style::Attribute::Bold))?;
        out.queue(Print(visible))?;
        out.queue(style::SetAttribute(style::Attribute::Reset))?;
        Ok(())
    }
}

impl Canvas for Screen {
    fn fill_rect(&mut self, rect: Rect, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(rect.x, rect.right(), self.sx, self.width());
        let (y0, y1) = Self::span(rect.y, rect.bottom(), self.sy, self.height());
        let w = self.width();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = &mut self.px[y * w + x];
                *p = if alpha >= 1.0 { color } else { blend(*p, color, alpha) };
            }
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb, anchor: Anchor) {
        let mut col = (x * self.sx).round() as i32;
        if anchor == Anchor::Centre {
            col -= text.chars().count() as i32 / 2;
        }
        let row = (y * self.sy / 2.0).round() as i32;
        self.texts.push(TextRun { col, row, text: text.to_string(), color });
    }
}

/// Blank the whole terminal, e.g. after a resize.
pub fn wipe<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()
}
