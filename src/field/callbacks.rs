//! Observer hooks for a constrained field.
//!
//! Every hook is optional. An absent hook means "not implemented": the
//! field falls back to its baseline behavior and raises nothing.

use std::rc::Rc;

use super::config::FieldConfig;
use crate::layout::grapheme_count;
use crate::types::TextRange;

/// Read-only view of a field handed to observer hooks.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub text: &'a str,
    pub config: &'a FieldConfig,
    /// Current counter text, if the counter overlay exists.
    pub counter: Option<&'a str>,
    pub placeholder_visible: bool,
}

impl FieldView<'_> {
    /// Length in user-perceived characters.
    pub fn char_count(&self) -> usize {
        grapheme_count(self.text)
    }

    /// Characters left before the cap (negative when over it).
    pub fn remaining(&self) -> i64 {
        remaining(self.config.max_length, self.char_count())
    }
}

/// `max_length - len`, not clamped at zero. Saturates at the `i64` bounds.
pub fn remaining(max_length: usize, len: usize) -> i64 {
    let max_length = i64::try_from(max_length).unwrap_or(i64::MAX);
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    max_length.saturating_sub(len)
}

/// Fired after an accepted edit and after each layout pass.
pub type DidChangeCallback = Rc<dyn Fn(&FieldView<'_>)>;
/// Fired when editing ends (blur or Escape).
pub type DidEndEditingCallback = Rc<dyn Fn(&FieldView<'_>)>;
/// Pre-change gate. The length cap is applied on top of its verdict.
pub type ShouldChangeTextCallback = Rc<dyn Fn(&FieldView<'_>, TextRange, &str) -> bool>;

/// Observer of a [`ConstrainedTextField`](super::ConstrainedTextField).
#[derive(Clone, Default)]
pub struct FieldCallbacks {
    pub did_change: Option<DidChangeCallback>,
    pub did_end_editing: Option<DidEndEditingCallback>,
    pub should_change_text: Option<ShouldChangeTextCallback>,
}

impl FieldCallbacks {
    pub fn on_did_change(mut self, f: impl Fn(&FieldView<'_>) + 'static) -> Self {
        self.did_change = Some(Rc::new(f));
        self
    }

    pub fn on_did_end_editing(mut self, f: impl Fn(&FieldView<'_>) + 'static) -> Self {
        self.did_end_editing = Some(Rc::new(f));
        self
    }

    pub fn on_should_change_text(mut self, f: impl Fn(&FieldView<'_>, TextRange, &str) -> bool + 'static) -> Self {
        self.should_change_text = Some(Rc::new(f));
        self
    }
}

impl std::fmt::Debug for FieldCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCallbacks")
            .field("did_change", &self.did_change.is_some())
            .field("did_end_editing", &self.did_end_editing.is_some())
            .field("should_change_text", &self.should_change_text.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_goes_negative() {
        assert_eq!(remaining(25, 0), 25);
        assert_eq!(remaining(3, 7), -4);
    }

    #[test]
    fn test_remaining_saturates_on_huge_values() {
        assert_eq!(remaining(usize::MAX, 0), i64::MAX);
        assert_eq!(remaining(usize::MAX, 1), i64::MAX - 1);
        assert_eq!(remaining(0, usize::MAX), -i64::MAX);
    }

    #[test]
    fn test_view_counts_graphemes() {
        let config = FieldConfig::default().with_max_length(2);
        let view = FieldView {
            text: "e\u{301}",
            config: &config,
            counter: None,
            placeholder_visible: false,
        };
        assert_eq!(view.char_count(), 1);
        assert_eq!(view.remaining(), 1);
    }
}
