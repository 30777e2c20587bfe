//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. All drawing operations work on this buffer.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Clipping**: drawing functions accept an optional `ClipRect`.
//! - **Wide characters**: CJK and emoji mark the next cell as a continuation (char = 0).

use crate::layout::char_width;
use crate::types::{Attr, BorderStyle, Cell, ClipRect, Rgba};

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    /// Read back one row as a string (continuation cells skipped).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.char != 0)
            .filter_map(|cell| char::from_u32(cell.char))
            .collect()
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    #[allow(clippy::too_many_arguments)]
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        char: u32,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];

        let blended_bg = if bg.is_opaque() || bg.is_terminal_default() {
            bg
        } else {
            Rgba::blend(bg, cell.bg)
        };

        cell.char = char;
        cell.fg = fg;
        cell.bg = blended_bg;
        cell.attrs = attrs;

        true
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used (handles wide characters).
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let width = char_width(ch);
            if width == 0 {
                continue;
            }

            if self.set_cell(col, y, ch as u32, fg, Rgba::TRANSPARENT, attrs, clip)
                && width == 2
                && clip.is_none_or(|c| c.contains(col + 1, y))
            {
                if let Some(next) = self.get_mut(col + 1, y) {
                    next.char = 0;
                    next.fg = fg;
                    next.attrs = attrs;
                }
            }

            col = col.saturating_add(width);
        }

        col.saturating_sub(x)
    }

    /// Draw text right-aligned within a width.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_right(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let text_width = crate::layout::string_width(text);
        let offset = width.saturating_sub(text_width);
        self.draw_text(x + offset, y, text, fg, attrs, clip)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(&mut self, rect: ClipRect, style: BorderStyle, color: Rgba, clip: Option<&ClipRect>) {
        if rect.width < 2 || rect.height < 2 || style == BorderStyle::None {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let bg = Rgba::TRANSPARENT;
        let (x, y) = (rect.x, rect.y);
        let x2 = x + rect.width - 1;
        let y2 = y + rect.height - 1;

        self.set_cell(x, y, tl as u32, color, bg, Attr::NONE, clip);
        self.set_cell(x2, y, tr as u32, color, bg, Attr::NONE, clip);
        self.set_cell(x2, y2, br as u32, color, bg, Attr::NONE, clip);
        self.set_cell(x, y2, bl as u32, color, bg, Attr::NONE, clip);

        for col in (x + 1)..x2 {
            self.set_cell(col, y, horiz as u32, color, bg, Attr::NONE, clip);
            self.set_cell(col, y2, horiz as u32, color, bg, Attr::NONE, clip);
        }

        for row in (y + 1)..y2 {
            self.set_cell(x, row, vert as u32, color, bg, Attr::NONE, clip);
            self.set_cell(x2, row, vert as u32, color, bg, Attr::NONE, clip);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
