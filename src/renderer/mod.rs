//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. The field paints itself into a
//! [`FrameBuffer`]; [`DiffRenderer`] turns buffer changes into crossterm
//! commands.
//!
//! ```text
//! ConstrainedTextField::render → FrameBuffer → DiffRenderer → Terminal
//! ```

pub mod buffer;
pub mod diff;

pub use buffer::FrameBuffer;
pub use diff::{to_crossterm_color, DiffRenderer};
