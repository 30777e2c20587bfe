//! Host primitives - the text view the field is composed over.

pub mod text_view;

pub use text_view::{
    ensure_cursor_visible, line_col, offset_of, Cleanup, Dirty, EditHooks, LayoutContext, LayoutHook,
    ShouldChangeHook, TextHook, TextView,
};
