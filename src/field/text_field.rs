//! ConstrainedTextField - a bordered text view with placeholder, counter
//! and a character cap.
//!
//! The field owns a [`TextView`] and subscribes to its edit hooks. Field
//! state lives behind `Rc<RefCell<..>>` so the hook closures and the
//! public methods see the same config, callbacks and overlays.
//!
//! ```text
//! TextView::replace ──▶ should_change ──▶ cap + observer verdict
//!                   ──▶ did_change    ──▶ counter, placeholder, observer
//! TextView::layout_if_needed ──▶ layout ──▶ overlay frames (taffy), then did_change
//! focus lost / Escape ──▶ did_end_editing ──▶ observer
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::callbacks::{remaining, FieldCallbacks, FieldView};
use super::config::FieldConfig;
use super::overlay::{BackgroundLayer, TextLayer};
use crate::error::Result;
use crate::host::{Cleanup, EditHooks, LayoutContext, TextView};
use crate::layout::{compute_overlay_frames, grapheme_count, string_width};
use crate::renderer::FrameBuffer;
use crate::state::input::InputEvent;
use crate::types::{replace_chars, Attr, BorderStyle, ClipRect, Rgba, TextAlign, TextRange};

// =============================================================================
// Shared state
// =============================================================================

#[derive(Default)]
struct FieldState {
    config: FieldConfig,
    callbacks: FieldCallbacks,
    background: BackgroundLayer,
    placeholder: Option<TextLayer>,
    counter: Option<TextLayer>,
}

impl FieldState {
    fn view<'a>(&'a self, text: &'a str) -> FieldView<'a> {
        FieldView {
            text,
            config: &self.config,
            counter: self.counter.as_ref().map(|c| c.text.as_str()),
            placeholder_visible: self.placeholder.as_ref().is_some_and(TextLayer::is_visible),
        }
    }

    fn ensure_placeholder(&mut self) -> &mut TextLayer {
        let config = &self.config;
        self.placeholder.get_or_insert_with(|| {
            tracing::debug!("placeholder overlay created");
            TextLayer::new(config.placeholder.clone(), config.placeholder_color, TextAlign::Left)
        })
    }

    fn ensure_counter(&mut self, len: usize) -> &mut TextLayer {
        let config = &self.config;
        self.counter.get_or_insert_with(|| {
            let text = remaining(config.max_length, len).to_string();
            tracing::debug!(counter = %text, "counter overlay created");
            let mut layer = TextLayer::new(text, config.placeholder_color, TextAlign::Right);
            layer.frame.width = config.counter_width();
            layer.frame.height = 1;
            layer
        })
    }
}

type SharedState = Rc<RefCell<FieldState>>;

// =============================================================================
// Hook bodies
// =============================================================================

fn will_change(state: &SharedState, text: &str, range: TextRange, replacement: &str) -> bool {
    let state = state.borrow();
    let verdict = match &state.callbacks.should_change_text {
        Some(gate) => gate(&state.view(text), range, replacement),
        None => true,
    };

    if state.config.counter_enabled {
        let candidate = grapheme_count(&replace_chars(text, range, replacement));
        if candidate > state.config.max_length {
            tracing::debug!(candidate, max_length = state.config.max_length, "edit rejected by length cap");
            return false;
        }
    }

    verdict
}

fn did_change(state: &SharedState, text: &str) {
    let callback = {
        let mut state = state.borrow_mut();
        if !state.config.counter_enabled {
            return;
        }

        let len = grapheme_count(text);
        let counter_text = remaining(state.config.max_length, len).to_string();
        state.ensure_counter(len).text = counter_text;
        state.ensure_placeholder().hidden = len > 0;
        state.callbacks.did_change.clone()
    };

    if let Some(callback) = callback {
        let state = state.borrow();
        callback(&state.view(text));
    }
}

fn did_end_editing(state: &SharedState, text: &str) {
    let callback = state.borrow().callbacks.did_end_editing.clone();
    if let Some(callback) = callback {
        tracing::debug!("editing ended");
        let state = state.borrow();
        callback(&state.view(text));
    }
}

fn layout_pass(state: &SharedState, ctx: &LayoutContext<'_>) -> Result<()> {
    {
        let mut guard = state.borrow_mut();
        let st = &mut *guard;
        let len = grapheme_count(ctx.text);

        st.background = BackgroundLayer {
            border_color: st.config.border_color,
            border_width: 1,
            style: BorderStyle::Rounded,
            clips_to_bounds: true,
        };
        let border = st.background.border_width;

        let (placeholder_text, color) = (st.config.placeholder.clone(), st.config.placeholder_color);
        let placeholder = st.ensure_placeholder();
        placeholder.text = placeholder_text;
        placeholder.color = color;
        placeholder.hidden = len > 0;

        let counter_width = if st.config.counter_enabled {
            let current = remaining(st.config.max_length, len).to_string();
            let width = st.config.counter_width().max(string_width(&current));
            st.ensure_counter(len);
            Some(width)
        } else {
            None
        };

        let frames = compute_overlay_frames(ctx.bounds.width, ctx.bounds.height, border, counter_width)?;

        if let Some(placeholder) = st.placeholder.as_mut() {
            placeholder.frame = frames.placeholder;
        }
        if let Some(counter) = st.counter.as_mut() {
            match frames.counter {
                Some(frame) => {
                    counter.frame = ClipRect { y: frame.y.saturating_add(ctx.scroll_offset), ..frame };
                    counter.color = st.config.placeholder_color;
                    counter.hidden = false;
                }
                None => counter.hidden = true,
            }
        }

        tracing::trace!(
            width = ctx.bounds.width,
            height = ctx.bounds.height,
            scroll = ctx.scroll_offset,
            "field layout"
        );
    }

    did_change(state, ctx.text);
    Ok(())
}

// =============================================================================
// ConstrainedTextField
// =============================================================================

/// Multi-line text field with a placeholder, a remaining-characters
/// counter and a maximum length.
pub struct ConstrainedTextField {
    host: TextView,
    state: SharedState,
    unsubscribe: Option<Cleanup>,
}

impl ConstrainedTextField {
    /// Create a field with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FieldConfig::default())
    }

    pub fn with_config(config: FieldConfig) -> Self {
        let mut host = TextView::new();
        host.set_text_inset(1);

        let state: SharedState = Rc::new(RefCell::new(FieldState {
            config,
            ..Default::default()
        }));

        let (gate, changed, layout, ended) = (state.clone(), state.clone(), state.clone(), state.clone());
        let unsubscribe = host.subscribe(
            EditHooks::default()
                .on_should_change(move |text, range, replacement| will_change(&gate, text, range, replacement))
                .on_did_change(move |text| did_change(&changed, text))
                .on_layout(move |ctx| layout_pass(&layout, ctx))
                .on_did_end_editing(move |text| did_end_editing(&ended, text)),
        );

        Self {
            host,
            state,
            unsubscribe: Some(unsubscribe),
        }
    }

    // -------------------------------------------------------------------------
    // Host access
    // -------------------------------------------------------------------------

    pub fn host(&self) -> &TextView {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut TextView {
        &mut self.host
    }

    pub fn text(&self) -> String {
        self.host.text()
    }

    /// Set the content without consulting the cap or the observer.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.host.set_text(text);
    }

    pub fn set_bounds(&mut self, bounds: ClipRect) {
        self.host.set_bounds(bounds);
    }

    pub fn focus(&self) {
        self.host.focus();
    }

    /// Drop focus; the observer's `did_end_editing` fires.
    pub fn blur(&self) {
        self.host.blur();
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn config(&self) -> FieldConfig {
        self.state.borrow().config.clone()
    }

    pub fn set_callbacks(&mut self, callbacks: FieldCallbacks) {
        self.state.borrow_mut().callbacks = callbacks;
    }

    fn update_config(&mut self, update: impl FnOnce(&mut FieldConfig)) {
        update(&mut self.state.borrow_mut().config);
        self.host.set_needs_layout();
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        let placeholder = placeholder.into();
        self.update_config(|c| c.placeholder = placeholder);
    }

    pub fn set_placeholder_color(&mut self, color: Rgba) {
        self.update_config(|c| c.placeholder_color = color);
    }

    pub fn set_max_length(&mut self, max_length: usize) {
        self.update_config(|c| c.max_length = max_length);
    }

    pub fn set_counter_enabled(&mut self, enabled: bool) {
        self.update_config(|c| c.counter_enabled = enabled);
    }

    pub fn set_border_color(&mut self, color: Rgba) {
        self.update_config(|c| c.border_color = color);
    }

    // -------------------------------------------------------------------------
    // Edit events
    // -------------------------------------------------------------------------

    /// Decide whether replacing `range` with `replacement` may proceed.
    ///
    /// The observer's verdict (or `true`) unless the counter is enabled and
    /// the result would exceed `max_length`. Mutates nothing.
    pub fn on_will_change_text(&self, range: TextRange, replacement: &str) -> bool {
        will_change(&self.state, &self.host.text(), range, replacement)
    }

    /// Refresh the counter and placeholder, then notify the observer.
    ///
    /// No-op while the counter is disabled.
    pub fn on_did_change_text(&self) {
        did_change(&self.state, &self.host.text());
    }

    /// Run the layout pass if one is pending.
    pub fn layout(&mut self) -> Result<bool> {
        self.host.layout_if_needed()
    }

    // -------------------------------------------------------------------------
    // Overlays
    // -------------------------------------------------------------------------

    pub fn counter_text(&self) -> Option<String> {
        self.state.borrow().counter.as_ref().map(|c| c.text.clone())
    }

    pub fn placeholder_layer(&self) -> Option<TextLayer> {
        self.state.borrow().placeholder.clone()
    }

    pub fn counter_layer(&self) -> Option<TextLayer> {
        self.state.borrow().counter.clone()
    }

    pub fn placeholder_visible(&self) -> bool {
        self.state.borrow().placeholder.as_ref().is_some_and(TextLayer::is_visible)
    }

    pub fn background(&self) -> BackgroundLayer {
        self.state.borrow().background
    }

    /// Number of overlay layers created so far.
    pub fn overlay_count(&self) -> usize {
        let state = self.state.borrow();
        usize::from(state.placeholder.is_some()) + usize::from(state.counter.is_some())
    }

    // -------------------------------------------------------------------------
    // Input & rendering
    // -------------------------------------------------------------------------

    /// Route an input event to the host view.
    ///
    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<bool> {
        match event {
            InputEvent::Key(key) => {
                tracing::trace!(key = %key.key, "key routed to field");
                Ok(self.host.handle_key(key))
            }
            InputEvent::Paste(text) => self.host.paste(text).map(|_| true),
            InputEvent::Scroll(delta) => {
                self.host.scroll_by(*delta);
                Ok(true)
            }
            InputEvent::FocusLost => {
                let had_focus = self.host.is_focused();
                self.host.blur();
                Ok(had_focus)
            }
            _ => Ok(false),
        }
    }

    /// Paint the field into a frame buffer.
    pub fn render(&self, buffer: &mut FrameBuffer) {
        let bounds = self.host.bounds();
        let scroll = self.host.scroll_offset();
        let state = self.state.borrow();
        let background = &state.background;

        buffer.draw_border(bounds, background.style, background.border_color, None);

        let content = self.host.content_rect();
        let clip = if background.clips_to_bounds {
            content.intersect(&buffer.bounds())
        } else {
            Some(buffer.bounds())
        };
        let Some(clip) = clip else {
            return;
        };

        let text = self.host.text();
        for (row, line) in text
            .split('\n')
            .skip(scroll as usize)
            .take(self.host.visible_rows() as usize)
            .enumerate()
        {
            buffer.draw_text(content.x, content.y + row as u16, line, Rgba::TERMINAL_DEFAULT, Attr::NONE, Some(&clip));
        }

        if let Some(placeholder) = state.placeholder.as_ref().filter(|p| p.is_visible()) {
            let x = bounds.x + placeholder.frame.x;
            let y = (bounds.y + placeholder.frame.y).saturating_sub(scroll);
            buffer.draw_text(x, y, &placeholder.text, placeholder.color, Attr::ITALIC, Some(&clip));
        }

        // The counter sits on the border row, outside the content clip
        if let Some(counter) = state.counter.as_ref().filter(|c| c.is_visible()) {
            let x = bounds.x + counter.frame.x;
            let y = bounds.y + counter.frame.y.saturating_sub(scroll);
            buffer.draw_text_right(x, y, counter.frame.width, &counter.text, counter.color, Attr::NONE, Some(&bounds));
        }
    }

    /// Screen position of the caret, if focused and on a visible row.
    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        if !self.host.is_focused() {
            return None;
        }

        let text = self.host.text();
        let (line, col) = self.host.cursor_line_col();
        let scroll = self.host.scroll_offset() as usize;
        if line < scroll || line >= scroll + self.host.visible_rows() as usize {
            return None;
        }

        let prefix: String = text.split('\n').nth(line).unwrap_or("").chars().take(col).collect();
        let content = self.host.content_rect();
        let x = content.x.saturating_add(string_width(&prefix));
        if x >= content.x + content.width {
            return None;
        }
        Some((x, content.y + (line - scroll) as u16))
    }
}

impl Default for ConstrainedTextField {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConstrainedTextField {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
