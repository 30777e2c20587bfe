//! State Module - Runtime state for interactive text views
//!
//! - **Focus** - focused view signal, focus/blur callbacks
//! - **Keyboard** - event types, last-event signal
//! - **Input** - crossterm event conversion and polling

pub mod focus;
pub mod input;
pub mod keyboard;

pub use focus::{blur, focus, get_focused_index, has_focus, is_focused, register_callbacks, FocusCallbacks};
pub use input::{InputEvent, convert_event, convert_key_event, poll_event, read_event};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
