//! TextView - the host multi-line text-input primitive.
//!
//! Owns the content (a `Signal<String>`), a char cursor, the vertical
//! scroll offset and the view bounds. Widgets customize it by composition:
//! they register [`EditHooks`] and get a cleanup closure back.
//!
//! # Edit lifecycle
//!
//! ```text
//! replace(range, text)
//!   ├─ every should_change hook must return true, else nothing happens
//!   ├─ content updated, cursor moved past the insertion, cursor scrolled into view
//!   ├─ every did_change hook is called with the new content
//!   └─ layout requested (runs on the next layout_if_needed)
//! ```
//!
//! `set_text` bypasses the pre/post change hooks; it is the external
//! "force set" path.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use crate::engine::{allocate_index, release_index};
use crate::error::{FieldError, Result};
use crate::layout::line_count;
use crate::state::focus::{self, FocusCallbacks};
use crate::state::keyboard::KeyboardEvent;
use crate::types::{replace_chars, ClipRect, TextRange};

/// Cleanup closure returned by subscriptions.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Dirty flags
// =============================================================================

bitflags::bitflags! {
    /// Pending work for the view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Dirty: u8 {
        const LAYOUT = 1 << 0;
        const CONTENT = 1 << 1;
    }
}

// =============================================================================
// Hooks
// =============================================================================

/// Everything a layout hook may read about the view.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub text: &'a str,
    pub bounds: ClipRect,
    pub scroll_offset: u16,
    pub text_inset: u16,
}

/// Pre-change gate: (current text, range, replacement) -> accept.
pub type ShouldChangeHook = Rc<dyn Fn(&str, TextRange, &str) -> bool>;
/// Called with the current text.
pub type TextHook = Rc<dyn Fn(&str)>;
pub type LayoutHook = Rc<dyn Fn(&LayoutContext<'_>) -> Result<()>>;

/// Edit lifecycle hooks. Every hook is optional.
#[derive(Clone, Default)]
pub struct EditHooks {
    pub should_change: Option<ShouldChangeHook>,
    pub did_change: Option<TextHook>,
    pub layout: Option<LayoutHook>,
    pub did_end_editing: Option<TextHook>,
}

impl EditHooks {
    pub fn on_should_change(mut self, f: impl Fn(&str, TextRange, &str) -> bool + 'static) -> Self {
        self.should_change = Some(Rc::new(f));
        self
    }

    pub fn on_did_change(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.did_change = Some(Rc::new(f));
        self
    }

    pub fn on_layout(mut self, f: impl Fn(&LayoutContext<'_>) -> Result<()> + 'static) -> Self {
        self.layout = Some(Rc::new(f));
        self
    }

    pub fn on_did_end_editing(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.did_end_editing = Some(Rc::new(f));
        self
    }
}

#[derive(Default)]
struct HookRegistry {
    entries: Vec<(usize, EditHooks)>,
    next_id: usize,
}

impl HookRegistry {
    fn snapshot(&self) -> Vec<EditHooks> {
        self.entries.iter().map(|(_, hooks)| hooks.clone()).collect()
    }
}

fn snapshot(registry: &Rc<RefCell<HookRegistry>>) -> Vec<EditHooks> {
    registry.borrow().snapshot()
}

// =============================================================================
// Cursor helpers
// =============================================================================

/// Find the start of the word before the given char position.
fn find_word_start(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut i = pos.min(chars.len());

    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    i
}

/// Find the end of the word after the given char position.
fn find_word_end(text: &str, pos: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut i = pos.min(len);

    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }
    i
}

/// (line, column) of a char offset. Columns are in chars.
pub fn line_col(text: &str, pos: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for c in text.chars().take(pos) {
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Char offset of (line, column), clamping the column to the line length.
pub fn offset_of(text: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (i, content) in text.split('\n').enumerate() {
        let len = content.chars().count();
        if i == line {
            return offset + col.min(len);
        }
        offset += len + 1;
    }
    text.chars().count()
}

/// Adjust a vertical scroll offset so the cursor line stays visible.
///
/// `visible_rows` of 0 leaves the offset alone.
pub fn ensure_cursor_visible(cursor_line: usize, scroll_offset: u16, visible_rows: u16) -> u16 {
    if visible_rows == 0 {
        return scroll_offset;
    }

    let top = scroll_offset as usize;
    let bottom = top + visible_rows as usize;

    if cursor_line < top {
        cursor_line as u16
    } else if cursor_line >= bottom {
        (cursor_line + 1 - visible_rows as usize) as u16
    } else {
        scroll_offset
    }
}

// =============================================================================
// TextView
// =============================================================================

/// Host multi-line text input.
pub struct TextView {
    index: usize,
    text: Signal<String>,
    cursor: usize,
    scroll_offset: u16,
    bounds: ClipRect,
    text_inset: u16,
    dirty: Dirty,
    hooks: Rc<RefCell<HookRegistry>>,
    focus_cleanup: Option<Cleanup>,
}

impl TextView {
    /// Create an empty view with a fresh registry slot.
    pub fn new() -> Self {
        let index = allocate_index();
        let text = signal(String::new());
        let hooks: Rc<RefCell<HookRegistry>> = Rc::default();

        // Losing focus ends editing
        let weak_hooks: Weak<RefCell<HookRegistry>> = Rc::downgrade(&hooks);
        let text_for_blur = text.clone();
        let focus_cleanup = focus::register_callbacks(index, FocusCallbacks {
            on_focus: None,
            on_blur: Some(Box::new(move || {
                if let Some(hooks) = weak_hooks.upgrade() {
                    let current = text_for_blur.get();
                    for hook in snapshot(&hooks).iter().filter_map(|h| h.did_end_editing.as_ref()) {
                        hook(&current);
                    }
                }
            })),
        });

        Self {
            index,
            text,
            cursor: 0,
            scroll_offset: 0,
            bounds: ClipRect::default(),
            text_inset: 0,
            dirty: Dirty::LAYOUT,
            hooks,
            focus_cleanup: Some(Box::new(focus_cleanup)),
        }
    }

    /// Registry index of this view (focus is keyed by it).
    pub fn index(&self) -> usize {
        self.index
    }

    // -------------------------------------------------------------------------
    // Hooks
    // -------------------------------------------------------------------------

    /// Register edit hooks. Returns a closure that unregisters them.
    pub fn subscribe(&mut self, hooks: EditHooks) -> Cleanup {
        let id = {
            let mut registry = self.hooks.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, hooks));
            id
        };
        self.set_needs_layout();

        let weak = Rc::downgrade(&self.hooks);
        Box::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Number of registered hook sets.
    pub fn subscriber_count(&self) -> usize {
        self.hooks.borrow().entries.len()
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn char_count(&self) -> usize {
        self.text.get().chars().count()
    }

    /// Replace `range` (char offsets) with `replacement`.
    ///
    /// Returns `Ok(false)` when a pre-change hook rejected the edit and
    /// `Err(InvalidRange)` when the range does not address the content.
    pub fn replace(&mut self, range: TextRange, replacement: &str) -> Result<bool> {
        let current = self.text.get();
        let len = current.chars().count();
        if !range.fits(len) {
            return Err(FieldError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }

        let hooks = snapshot(&self.hooks);
        for gate in hooks.iter().filter_map(|h| h.should_change.as_ref()) {
            if !gate(&current, range, replacement) {
                tracing::debug!(view = self.index, ?range, "edit rejected by pre-change hook");
                return Ok(false);
            }
        }

        let updated = replace_chars(&current, range, replacement);
        self.text.set(updated.clone());
        self.cursor = range.start + replacement.chars().count();
        self.scroll_to_cursor();
        self.dirty |= Dirty::CONTENT;
        tracing::trace!(view = self.index, ?range, inserted = replacement.chars().count(), "edit applied");

        for hook in hooks.iter().filter_map(|h| h.did_change.as_ref()) {
            hook(&updated);
        }

        self.set_needs_layout();
        Ok(true)
    }

    /// Replace at the cursor, logging (not propagating) range errors.
    fn edit(&mut self, range: TextRange, replacement: &str) -> bool {
        match self.replace(range, replacement) {
            Ok(applied) => applied,
            Err(err) => {
                tracing::warn!(view = self.index, %err, "edit dropped");
                false
            }
        }
    }

    /// Force-set the content. Pre/post change hooks are not consulted.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let len = text.chars().count();
        tracing::debug!(view = self.index, chars = len, "content set externally");

        self.text.set(text);
        self.cursor = self.cursor.min(len);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.dirty |= Dirty::CONTENT;
        self.set_needs_layout();
    }

    /// Insert pasted text at the cursor. `\r\n` is normalized to `\n`.
    pub fn paste(&mut self, text: &str) -> Result<bool> {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let pos = self.cursor.min(self.char_count());
        self.replace(TextRange::caret(pos), &normalized)
    }

    // -------------------------------------------------------------------------
    // Cursor & scrolling
    // -------------------------------------------------------------------------

    pub fn cursor(&self) -> usize {
        self.cursor.min(self.char_count())
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.char_count());
        self.scroll_to_cursor();
    }

    /// Cursor as (line, column).
    pub fn cursor_line_col(&self) -> (usize, usize) {
        line_col(&self.text.get(), self.cursor())
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    /// Set the vertical scroll offset (rows), clamped to the content.
    pub fn set_scroll_offset(&mut self, offset: u16) {
        let clamped = offset.min(self.max_scroll());
        if clamped != self.scroll_offset {
            self.scroll_offset = clamped;
            self.set_needs_layout();
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (self.scroll_offset as i32 + delta).clamp(0, u16::MAX as i32) as u16;
        self.set_scroll_offset(target);
    }

    fn scroll_to_cursor(&mut self) {
        let (line, _) = self.cursor_line_col();
        let next = ensure_cursor_visible(line, self.scroll_offset, self.visible_rows());
        self.set_scroll_offset(next);
    }

    /// Number of content lines.
    pub fn line_count(&self) -> usize {
        line_count(&self.text.get())
    }

    /// Rows available for content inside the inset.
    pub fn visible_rows(&self) -> u16 {
        self.bounds.height.saturating_sub(self.text_inset * 2)
    }

    /// Largest scroll offset that still shows content.
    pub fn max_scroll(&self) -> u16 {
        let lines = self.line_count().min(u16::MAX as usize) as u16;
        lines.saturating_sub(self.visible_rows())
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn bounds(&self) -> ClipRect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: ClipRect) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
            self.set_needs_layout();
        }
    }

    /// Cells between the bounds and the text on every side.
    pub fn text_inset(&self) -> u16 {
        self.text_inset
    }

    pub fn set_text_inset(&mut self, inset: u16) {
        if inset != self.text_inset {
            self.text_inset = inset;
            self.set_needs_layout();
        }
    }

    /// Content area in screen coordinates.
    pub fn content_rect(&self) -> ClipRect {
        self.bounds.inset(self.text_inset)
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    pub fn set_needs_layout(&mut self) {
        self.dirty |= Dirty::LAYOUT;
    }

    pub fn needs_layout(&self) -> bool {
        self.dirty.contains(Dirty::LAYOUT)
    }

    /// Pending flags (layout, content).
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Clear the content flag once a frame has been drawn.
    pub fn mark_drawn(&mut self) {
        self.dirty.remove(Dirty::CONTENT);
    }

    /// Run layout hooks if a layout was requested.
    ///
    /// Returns whether a pass ran.
    pub fn layout_if_needed(&mut self) -> Result<bool> {
        if !self.needs_layout() {
            return Ok(false);
        }
        self.dirty.remove(Dirty::LAYOUT);

        let text = self.text.get();
        let context = LayoutContext {
            text: &text,
            bounds: self.bounds,
            scroll_offset: self.scroll_offset,
            text_inset: self.text_inset,
        };

        for hook in snapshot(&self.hooks).iter().filter_map(|h| h.layout.as_ref()) {
            hook(&context)?;
        }
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focus(&self) {
        focus::focus(self.index);
    }

    pub fn is_focused(&self) -> bool {
        focus::is_focused(self.index)
    }

    /// End editing: drop focus, which fires the end-editing hooks.
    pub fn blur(&self) {
        if self.is_focused() {
            focus::blur();
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Translate a key press into cursor moves or edits.
    ///
    /// Returns true if the key was consumed. A consumed key does not imply
    /// an applied edit; the hooks may have rejected it.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        if !event.is_press() {
            return false;
        }

        let text = self.text.get();
        let len = text.chars().count();
        let pos = self.cursor.min(len);
        let ctrl = event.modifiers.ctrl;

        if let Some(ch) = event.printable() {
            let mut buf = [0u8; 4];
            self.edit(TextRange::caret(pos), ch.encode_utf8(&mut buf));
            return true;
        }

        match event.key.as_str() {
            "Enter" => {
                self.edit(TextRange::caret(pos), "\n");
                true
            }
            "Backspace" => {
                if pos > 0 {
                    let start = if ctrl { find_word_start(&text, pos) } else { pos - 1 };
                    self.edit(TextRange::new(start, pos), "");
                }
                true
            }
            "Delete" => {
                if pos < len {
                    let end = if ctrl { find_word_end(&text, pos) } else { pos + 1 };
                    self.edit(TextRange::new(pos, end), "");
                }
                true
            }
            "ArrowLeft" => {
                let next = if ctrl { find_word_start(&text, pos) } else { pos.saturating_sub(1) };
                self.set_cursor(next);
                true
            }
            "ArrowRight" => {
                let next = if ctrl { find_word_end(&text, pos) } else { (pos + 1).min(len) };
                self.set_cursor(next);
                true
            }
            "ArrowUp" => {
                let (line, col) = line_col(&text, pos);
                let next = if line == 0 { 0 } else { offset_of(&text, line - 1, col) };
                self.set_cursor(next);
                true
            }
            "ArrowDown" => {
                let (line, col) = line_col(&text, pos);
                let next = if line + 1 >= line_count(&text) {
                    len
                } else {
                    offset_of(&text, line + 1, col)
                };
                self.set_cursor(next);
                true
            }
            "Home" => {
                let next = if ctrl { 0 } else { offset_of(&text, line_col(&text, pos).0, 0) };
                self.set_cursor(next);
                true
            }
            "End" => {
                let next = if ctrl {
                    len
                } else {
                    offset_of(&text, line_col(&text, pos).0, usize::MAX)
                };
                self.set_cursor(next);
                true
            }
            "PageUp" => {
                self.scroll_by(-(self.visible_rows().max(1) as i32));
                true
            }
            "PageDown" => {
                self.scroll_by(self.visible_rows().max(1) as i32);
                true
            }
            "Escape" => {
                self.blur();
                true
            }
            _ => false,
        }
    }
}

impl Default for TextView {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TextView {
    fn drop(&mut self) {
        if self.is_focused() {
            focus::blur();
        }
        if let Some(cleanup) = self.focus_cleanup.take() {
            cleanup();
        }
        release_index(self.index);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reset_registry;
    use crate::state::focus::reset_focus_state;
    use crate::state::keyboard::Modifiers;
    use std::cell::Cell;

    fn setup() -> TextView {
        reset_registry();
        reset_focus_state();
        let mut view = TextView::new();
        view.set_bounds(ClipRect::new(0, 0, 20, 4));
        view
    }

    fn type_str(view: &mut TextView, s: &str) {
        for c in s.chars() {
            view.handle_key(&KeyboardEvent::new(c.to_string()));
        }
    }

    #[test]
    fn test_replace_applies_and_moves_cursor() {
        let mut view = setup();
        assert!(view.replace(TextRange::caret(0), "hello").unwrap());
        assert_eq!(view.text(), "hello");
        assert_eq!(view.cursor(), 5);

        assert!(view.replace(TextRange::new(0, 1), "J").unwrap());
        assert_eq!(view.text(), "Jello");
        assert_eq!(view.cursor(), 1);
    }

    #[test]
    fn test_replace_invalid_range() {
        let mut view = setup();
        let err = view.replace(TextRange::new(0, 3), "x").unwrap_err();
        assert!(matches!(err, FieldError::InvalidRange { start: 0, end: 3, len: 0 }));

        let err = view.replace(TextRange::new(2, 1), "x").unwrap_err();
        assert!(matches!(err, FieldError::InvalidRange { .. }));
    }

    #[test]
    fn test_should_change_gate_blocks_edit() {
        let mut view = setup();
        let _cleanup = view.subscribe(EditHooks::default().on_should_change(|_, _, replacement| !replacement.contains('x')));

        assert!(!view.replace(TextRange::caret(0), "x").unwrap());
        assert_eq!(view.text(), "");
        assert!(view.replace(TextRange::caret(0), "y").unwrap());
        assert_eq!(view.text(), "y");
    }

    #[test]
    fn test_did_change_fires_with_new_text() {
        let mut view = setup();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = seen.clone();
        let _cleanup = view.subscribe(EditHooks::default().on_did_change(move |text| sink.borrow_mut().push(text.to_string())));

        type_str(&mut view, "ab");
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
    }

    #[test]
    fn test_set_text_skips_hooks() {
        let mut view = setup();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let _cleanup = view.subscribe(
            EditHooks::default()
                .on_should_change(|_, _, _| false)
                .on_did_change(move |_| counter.set(counter.get() + 1)),
        );

        view.set_text("forced");
        assert_eq!(view.text(), "forced");
        assert_eq!(calls.get(), 0);
        assert!(view.needs_layout());
    }

    #[test]
    fn test_unsubscribe_removes_hooks() {
        let mut view = setup();
        let cleanup = view.subscribe(EditHooks::default().on_should_change(|_, _, _| false));
        assert_eq!(view.subscriber_count(), 1);

        cleanup();
        assert_eq!(view.subscriber_count(), 0);
        assert!(view.replace(TextRange::caret(0), "ok").unwrap());
    }

    #[test]
    fn test_layout_runs_once_per_request() {
        let mut view = setup();
        let passes = Rc::new(Cell::new(0));
        let p = passes.clone();
        let _cleanup = view.subscribe(EditHooks::default().on_layout(move |_| {
            p.set(p.get() + 1);
            Ok(())
        }));

        assert!(view.layout_if_needed().unwrap());
        assert!(!view.layout_if_needed().unwrap());
        assert_eq!(passes.get(), 1);

        view.set_needs_layout();
        assert!(view.layout_if_needed().unwrap());
        assert_eq!(passes.get(), 2);
    }

    #[test]
    fn test_layout_error_propagates() {
        let mut view = setup();
        let _cleanup = view.subscribe(EditHooks::default().on_layout(|_| Err(FieldError::Layout("boom".into()))));
        assert!(matches!(view.layout_if_needed(), Err(FieldError::Layout(_))));
    }

    #[test]
    fn test_keys_edit_and_navigate() {
        let mut view = setup();
        type_str(&mut view, "ab");
        view.handle_key(&KeyboardEvent::new("Enter"));
        type_str(&mut view, "cd");
        assert_eq!(view.text(), "ab\ncd");
        assert_eq!(view.cursor_line_col(), (1, 2));

        view.handle_key(&KeyboardEvent::new("ArrowUp"));
        assert_eq!(view.cursor(), 2);
        view.handle_key(&KeyboardEvent::new("Home"));
        assert_eq!(view.cursor(), 0);
        view.handle_key(&KeyboardEvent::new("Delete"));
        assert_eq!(view.text(), "b\ncd");
        view.handle_key(&KeyboardEvent::new("End"));
        assert_eq!(view.cursor(), 1);
        view.handle_key(&KeyboardEvent::new("Backspace"));
        assert_eq!(view.text(), "\ncd");
        view.handle_key(&KeyboardEvent::new("ArrowDown"));
        assert_eq!(view.cursor_line_col(), (1, 0));
    }

    #[test]
    fn test_ctrl_backspace_deletes_word() {
        let mut view = setup();
        view.set_text("hello world");
        view.set_cursor(11);
        view.handle_key(&KeyboardEvent::with_modifiers("Backspace", Modifiers::ctrl()));
        assert_eq!(view.text(), "hello ");
    }

    #[test]
    fn test_ctrl_char_not_inserted() {
        let mut view = setup();
        assert!(!view.handle_key(&KeyboardEvent::with_modifiers("a", Modifiers::ctrl())));
        assert_eq!(view.text(), "");
    }

    #[test]
    fn test_paste_normalizes_newlines() {
        let mut view = setup();
        assert!(view.paste("a\r\nb").unwrap());
        assert_eq!(view.text(), "a\nb");
        assert_eq!(view.cursor(), 3);
    }

    #[test]
    fn test_typing_past_bottom_scrolls() {
        let mut view = setup();
        view.set_text_inset(1);
        // 4 rows - 2 inset = 2 visible rows
        view.set_text("1\n2\n3");
        view.set_cursor(5);
        assert_eq!(view.scroll_offset(), 1);

        view.handle_key(&KeyboardEvent::new("PageUp"));
        assert_eq!(view.scroll_offset(), 0);
        view.scroll_by(10);
        assert_eq!(view.scroll_offset(), view.max_scroll());
    }

    #[test]
    fn test_escape_ends_editing_via_blur() {
        let mut view = setup();
        let ended = Rc::new(RefCell::new(None::<String>));
        let sink = ended.clone();
        let _cleanup =
            view.subscribe(EditHooks::default().on_did_end_editing(move |text| *sink.borrow_mut() = Some(text.to_string())));

        view.focus();
        type_str(&mut view, "done");
        view.handle_key(&KeyboardEvent::new("Escape"));

        assert!(!view.is_focused());
        assert_eq!(ended.borrow().as_deref(), Some("done"));
    }

    #[test]
    fn test_focus_moving_away_ends_editing() {
        let mut view = setup();
        let ended = Rc::new(Cell::new(0));
        let e = ended.clone();
        let _cleanup = view.subscribe(EditHooks::default().on_did_end_editing(move |_| e.set(e.get() + 1)));

        view.focus();
        focus::focus(99);
        assert_eq!(ended.get(), 1);

        // Not focused: Escape is consumed but nothing fires
        view.handle_key(&KeyboardEvent::new("Escape"));
        assert_eq!(ended.get(), 1);
    }

    #[test]
    fn test_line_helpers() {
        assert_eq!(line_col("ab\ncd", 4), (1, 1));
        assert_eq!(offset_of("ab\ncd", 1, 10), 5);
        assert_eq!(offset_of("ab\ncd", 5, 0), 5);
        assert_eq!(ensure_cursor_visible(5, 0, 3), 3);
        assert_eq!(ensure_cursor_visible(0, 3, 3), 0);
        assert_eq!(ensure_cursor_visible(4, 3, 3), 3);
    }
}
