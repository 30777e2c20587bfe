//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: queue cursor move (only when not contiguous), style changes, glyph
//! 3. Flush to the writer once
//! 4. Store current frame as previous for next comparison

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use crossterm::queue;

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Convert our color to crossterm's.
pub fn to_crossterm_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

/// Last emitted terminal state, to skip redundant escape codes.
#[derive(Debug, Default)]
struct PenState {
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
    /// Where the terminal cursor is after the last glyph.
    next: Option<(u16, u16)>,
}

/// Differential renderer for fullscreen mode.
///
/// Keeps track of the previous frame to enable diff-based rendering.
pub struct DiffRenderer<W: Write = Stdout> {
    writer: W,
    output: Vec<u8>,
    pen: PenState,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<Stdout> {
    /// Create a renderer writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for DiffRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> DiffRenderer<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            output: Vec::with_capacity(16384),
            pen: PenState::default(),
            previous: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let mut changed = 0;

        queue!(self.output, BeginSynchronizedUpdate)?;
        self.pen = PenState::default();

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };

                let unchanged = match &self.previous {
                    Some(prev) if prev.width() == buffer.width() && prev.height() == buffer.height() => {
                        prev.get(x, y).is_some_and(|p| cells_equal(cell, p))
                    }
                    _ => false,
                };

                if !unchanged {
                    changed += 1;
                    self.render_cell(x, y, cell)?;
                }
            }
        }

        queue!(self.output, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        self.flush()?;

        self.previous = Some(buffer.clone());
        Ok(changed)
    }

    fn render_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Continuation of a wide char: the glyph before already covers it
        if cell.char == 0 {
            self.pen.next = None;
            return Ok(());
        }

        if self.pen.next != Some((x, y)) {
            queue!(self.output, MoveTo(x, y))?;
        }

        if self.pen.attrs != Some(cell.attrs) {
            queue!(self.output, SetAttribute(Attribute::Reset))?;
            for (flag, attribute) in [
                (Attr::BOLD, Attribute::Bold),
                (Attr::DIM, Attribute::Dim),
                (Attr::ITALIC, Attribute::Italic),
                (Attr::UNDERLINE, Attribute::Underlined),
                (Attr::INVERSE, Attribute::Reverse),
            ] {
                if cell.attrs.contains(flag) {
                    queue!(self.output, SetAttribute(attribute))?;
                }
            }
            self.pen.attrs = Some(cell.attrs);
            // Reset cleared colors too
            self.pen.fg = None;
            self.pen.bg = None;
        }

        if self.pen.fg != Some(cell.fg) {
            queue!(self.output, SetForegroundColor(to_crossterm_color(cell.fg)))?;
            self.pen.fg = Some(cell.fg);
        }
        if self.pen.bg != Some(cell.bg) {
            queue!(self.output, SetBackgroundColor(to_crossterm_color(cell.bg)))?;
            self.pen.bg = Some(cell.bg);
        }

        let glyph = char::from_u32(cell.char).unwrap_or(' ');
        queue!(self.output, Print(glyph))?;

        let advance = crate::layout::char_width(glyph).max(1);
        self.pen.next = Some((x.saturating_add(advance), y));
        Ok(())
    }

    /// Place the terminal cursor (or hide it).
    pub fn place_cursor(&mut self, position: Option<(u16, u16)>) -> io::Result<()> {
        match position {
            Some((x, y)) => queue!(self.output, MoveTo(x, y), Show)?,
            None => queue!(self.output, Hide)?,
        }
        self.pen.next = None;
        self.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.output.is_empty() {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        self.writer.flush()
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Fast cell equality check.
#[inline]
fn cells_equal(a: &Cell, b: &Cell) -> bool {
    a.char == b.char && a.attrs == b.attrs && a.fg == b.fg && a.bg == b.bg
}

// =============================================================================
// Tests
// =============================================================================
