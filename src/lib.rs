//! # spark-textfield
//!
//! A constrained multi-line text field for terminal UIs: placeholder text,
//! a live remaining-characters counter and a maximum length, with an
//! optional observer notified of changes and consulted before each edit.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! the content signal and the focus state.
//!
//! ## Architecture
//!
//! ```text
//! ConstrainedTextField ──owns──▶ TextView (host primitive)
//!        ▲                          │ edit hooks: should_change / did_change /
//!        └──────── subscribe ───────┘             layout / did_end_editing
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr, Cell, ClipRect, TextRange)
//! - [`engine`] - View index registry
//! - [`host`] - The `TextView` host primitive and its edit hooks
//! - [`field`] - `ConstrainedTextField`, its config and observer
//! - [`layout`] - Taffy overlay placement and text measurement
//! - [`state`] - Focus, keyboard and crossterm input
//! - [`renderer`] - Frame buffer and diff renderer
//! - [`pipeline`] - Fullscreen terminal loop

pub mod engine;
pub mod error;
pub mod field;
pub mod host;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{FieldError, Result};

pub use engine::{allocate_index, release_index, reset_registry};

pub use host::{Cleanup, EditHooks, LayoutContext, TextView};

pub use field::{
    BackgroundLayer, ConstrainedTextField, FieldCallbacks, FieldConfig, FieldView, TextLayer,
};

pub use layout::{compute_overlay_frames, string_width, OverlayFrames};

pub use renderer::{DiffRenderer, FrameBuffer};

pub use pipeline::{mount, run, tick, MountHandle, RunOptions};

pub use state::{
    // Focus
    blur, focus, get_focused_index, has_focus, is_focused, register_callbacks, FocusCallbacks,
    // Keyboard
    KeyState, KeyboardEvent, Modifiers,
    // Input
    InputEvent,
};
