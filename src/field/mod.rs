//! Field - the constrained text field widget.
//!
//! - **config** - `FieldConfig` props with defaults
//! - **callbacks** - optional observer hooks and the `FieldView` they receive
//! - **overlay** - placeholder/counter text layers and the border layer
//! - **text_field** - `ConstrainedTextField` itself

pub mod callbacks;
pub mod config;
pub mod overlay;
pub mod text_field;

pub use callbacks::{
    remaining, DidChangeCallback, DidEndEditingCallback, FieldCallbacks, FieldView, ShouldChangeTextCallback,
};
pub use config::{FieldConfig, DEFAULT_MAX_LENGTH, DEFAULT_PLACEHOLDER};
pub use overlay::{BackgroundLayer, TextLayer};
pub use text_field::ConstrainedTextField;
