//! Core types for spark-textfield.
//!
//! Colors, cells and rectangles flow from the field into the frame buffer.
//! `TextRange` is the unit every edit hook speaks in.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Transparent color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Default for placeholder, counter and border.
    pub const LIGHT_GRAY: Self = Self::rgb(170, 170, 170);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha blend src over dst (Porter-Duff "over" operation).
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }

        let (dr, dg, db, da) = if dst.is_terminal_default() {
            (0i16, 0i16, 0i16, 255i16)
        } else {
            (dst.r, dst.g, dst.b, dst.a)
        };

        let sa = src.a as i32;
        let inv_sa = 255 - sa;
        let out_a = sa + (da as i32 * inv_sa) / 255;

        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_r = ((src.r as i32 * sa) + (dr as i32 * da as i32 * inv_sa / 255)) / out_a;
        let out_g = ((src.g as i32 * sa) + (dg as i32 * da as i32 * inv_sa / 255)) / out_a;
        let out_b = ((src.b as i32 * sa) + (db as i32 * da as i32 * inv_sa / 255)) / out_a;

        Self {
            r: out_r.clamp(0, 255) as i16,
            g: out_g.clamp(0, 255) as i16,
            b: out_b.clamp(0, 255) as i16,
            a: out_a.clamp(0, 255) as i16,
        }
    }

    /// Parse hex color string (#RGB, #RRGGBB, #RRGGBBAA).
    ///
    /// Returns None for invalid format.
    ///
    /// ```
    /// use spark_textfield::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#aaa"), Some(Rgba::LIGHT_GRAY));
    /// assert_eq!(Rgba::from_hex("ff000080"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 5;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space).
    pub char: u32,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A rectangle in terminal cells.
///
/// Used for widget bounds, overlay frames and clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let y2 = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));

        if x2 > x1 && y2 > y1 {
            Some(ClipRect {
                x: x1,
                y: y1,
                width: x2 - x1,
                height: y2 - y1,
            })
        } else {
            None
        }
    }

    /// The rect shrunk by `n` cells on every side.
    pub fn inset(&self, n: u16) -> ClipRect {
        ClipRect {
            x: self.x.saturating_add(n),
            y: self.y.saturating_add(n),
            width: self.width.saturating_sub(n * 2),
            height: self.height.saturating_sub(n * 2),
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border style constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 2,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 3,
    /// - | + + + +
    Ascii = 7,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
        }
    }

    /// Cells taken by this border on each side.
    pub const fn width(&self) -> u16 {
        match self {
            Self::None => 0,
            _ => 1,
        }
    }
}

// =============================================================================
// Text alignment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

// =============================================================================
// TextRange
// =============================================================================

/// Half-open range of character (Unicode scalar) offsets into a text.
///
/// `start == end` is an insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty range at `at`.
    pub const fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if this range addresses a text of `char_count` characters.
    #[inline]
    pub const fn fits(&self, char_count: usize) -> bool {
        self.start <= self.end && self.end <= char_count
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Replace the characters in `range` with `replacement`.
///
/// Offsets are in chars. Out-of-range offsets clamp to the text length.
pub fn replace_chars(text: &str, range: TextRange, replacement: &str) -> String {
    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end.max(range.start));

    let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
    out.push_str(&text[..start]);
    out.push_str(replacement);
    out.push_str(&text[end..]);
    out
}

/// Byte offset of the `char_index`th char (or `text.len()` past the end).
pub fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_hex_forms() {
        assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::RED));
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("  #aaaaaa "), Some(Rgba::LIGHT_GRAY));
        assert_eq!(Rgba::from_hex("#00000000"), Some(Rgba::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_rgba_from_hex_invalid() {
        assert!(Rgba::from_hex("").is_none());
        assert!(Rgba::from_hex("#12345").is_none());
        assert!(Rgba::from_hex("#zzz").is_none());
    }

    #[test]
    fn test_blend_transparent_keeps_dst() {
        assert_eq!(Rgba::blend(Rgba::TRANSPARENT, Rgba::RED), Rgba::RED);
        assert_eq!(Rgba::blend(Rgba::WHITE, Rgba::RED), Rgba::WHITE);
    }

    #[test]
    fn test_clip_rect_inset_and_intersect() {
        let r = ClipRect::new(2, 3, 10, 4);
        assert_eq!(r.inset(1), ClipRect::new(3, 4, 8, 2));
        assert_eq!(ClipRect::new(0, 0, 1, 1).inset(1).width, 0);

        let other = ClipRect::new(8, 0, 10, 5);
        assert_eq!(r.intersect(&other), Some(ClipRect::new(8, 3, 4, 2)));
        assert!(r.contains(11, 6));
        assert!(!r.contains(12, 6));
    }

    #[test]
    fn test_text_range_fits() {
        assert!(TextRange::caret(0).fits(0));
        assert!(TextRange::new(1, 3).fits(3));
        assert!(!TextRange::new(1, 4).fits(3));
        assert!(!TextRange::new(3, 1).fits(5));
        assert_eq!(TextRange::from(2..5).len(), 3);
    }

    #[test]
    fn test_replace_chars_multibyte() {
        assert_eq!(replace_chars("héllo", TextRange::new(1, 2), "e"), "hello");
        assert_eq!(replace_chars("", TextRange::caret(0), "hello"), "hello");
        assert_eq!(replace_chars("hello", TextRange::caret(5), "!"), "hello!");
        assert_eq!(replace_chars("a😀b", TextRange::new(1, 2), ""), "ab");
    }
}
