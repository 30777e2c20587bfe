//! Overlay layers drawn over the text content.

use crate::types::{BorderStyle, ClipRect, Rgba, TextAlign};

/// A single-line text overlay (placeholder or counter).
///
/// `frame` is in field-local content coordinates: row 0 is the first
/// content line, not the first visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub frame: ClipRect,
    pub color: Rgba,
    pub align: TextAlign,
    pub hidden: bool,
}

impl TextLayer {
    pub fn new(text: impl Into<String>, color: Rgba, align: TextAlign) -> Self {
        Self {
            text: text.into(),
            frame: ClipRect::default(),
            color,
            align,
            hidden: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// Border decoration of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLayer {
    pub border_color: Rgba,
    pub border_width: u16,
    pub style: BorderStyle,
    /// Content is clipped to the inside of the border.
    pub clips_to_bounds: bool,
}

impl Default for BackgroundLayer {
    fn default() -> Self {
        Self {
            border_color: Rgba::LIGHT_GRAY,
            border_width: 1,
            style: BorderStyle::Rounded,
            clips_to_bounds: true,
        }
    }
}
