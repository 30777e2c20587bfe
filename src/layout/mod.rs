//! Layout - overlay placement (Taffy) and text measurement.

pub mod overlay;
pub mod text_measure;

pub use overlay::{compute_overlay_frames, OverlayFrames};
pub use text_measure::{char_width, grapheme_count, line_count, string_width};
