use std::io::{self, Write};
use std::ops::Range;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use game_core::{Color, DrawCommand, Frame, Renderer};

const BLOCK: char = '█';
const BALL: char = '●';

/// Draws frames as character cells, scaling the field to the terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
    fixed_size: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fixed_size: None,
        }
    }

    /// Render into a grid of `cols` x `rows` regardless of the real terminal
    #[cfg(test)]
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            fixed_size: Some((cols, rows)),
        }
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        match self.fixed_size {
            Some(size) => Ok(size),
            None => terminal::size(),
        }
    }

    fn fill(&mut self, cols: Range<u16>, rows: Range<u16>, ch: char) -> io::Result<()> {
        let line: String = std::iter::repeat(ch).take(cols.len()).collect();
        for row in rows {
            queue!(self.out, MoveTo(cols.start, row), Print(&line))?;
        }
        Ok(())
    }
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Cells covered by `[lo, hi)` in field units, at least one cell wide
fn cell_span(lo: f32, hi: f32, scale: f32, limit: u16) -> Range<u16> {
    if limit == 0 {
        return 0..0;
    }
    let max = f32::from(limit);
    let start = (lo * scale).floor().clamp(0.0, max - 1.0);
    let end = (hi * scale).ceil().clamp(start + 1.0, max);
    start as u16..end as u16
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = self.size()?;
        if cols == 0 || rows == 0 {
            return Ok(());
        }
        let sx = f32::from(cols) / frame.width;
        let sy = f32::from(rows) / frame.height;

        for command in &frame.commands {
            match command {
                DrawCommand::Clear(color) => {
                    queue!(
                        self.out,
                        SetBackgroundColor(term_color(*color)),
                        Clear(ClearType::All)
                    )?;
                }
                DrawCommand::Rect { rect, color } => {
                    queue!(self.out, SetForegroundColor(term_color(*color)))?;
                    let x = cell_span(rect.left(), rect.right(), sx, cols);
                    let y = cell_span(rect.top(), rect.bottom(), sy, rows);
                    self.fill(x, y, BLOCK)?;
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => {
                    queue!(self.out, SetForegroundColor(term_color(*color)))?;
                    let x = cell_span(center.x - radius, center.x + radius, sx, cols);
                    let y = cell_span(center.y - radius, center.y + radius, sy, rows);
                    self.fill(x, y, BALL)?;
                }
                DrawCommand::Text { pos, text, color } => {
                    let width = text.chars().count() as f32;
                    let col = (pos.x * sx - width / 2.0).max(0.0) as u16;
                    let row = ((pos.y * sy) as u16).min(rows - 1);
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(*color)),
                        MoveTo(col, row),
                        Print(text)
                    )?;
                }
            }
        }

        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }
}
