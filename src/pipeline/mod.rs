//! Pipeline - fullscreen terminal session for a single field.
//!
//! ```text
//! crossterm event → InputEvent → field.handle_event → TextView hooks
//!                                                    ↓
//! DiffRenderer ← FrameBuffer ← field.render ← field.layout (taffy)
//! ```

pub mod mount;
pub mod terminal;

pub use mount::{field_bounds, mount, run, tick, MountHandle, RunOptions};
pub use terminal::{detect_terminal_size, TerminalSetup};
