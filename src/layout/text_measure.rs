//! Text Measurement
//!
//! Utilities for measuring text in terminal cells and in user-perceived
//! characters.
//!
//! - Cell width comes from `unicode-width` (CJK and emoji: 2, combining marks: 0)
//! - Length is the number of extended grapheme clusters, so `"e\u{301}"`
//!   and a ZWJ emoji sequence each count as one

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a single character in cells.
///
/// Control characters have no width.
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Number of user-perceived characters (extended grapheme clusters).
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Number of display lines in `text` (explicit newlines only, min 1).
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
