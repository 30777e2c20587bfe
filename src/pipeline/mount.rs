//! Mount API - drive one field fullscreen.
//!
//! # Example
//!
//! ```ignore
//! use spark_textfield::{pipeline, ConstrainedTextField};
//!
//! let mut field = ConstrainedTextField::new();
//!
//! // Option 1: blocking loop, returns on Ctrl+C
//! pipeline::run(&mut field, RunOptions::default())?;
//!
//! // Option 2: tick manually
//! let mut handle = pipeline::mount(&mut field, RunOptions::default())?;
//! while pipeline::tick(&mut handle, &mut field)? {
//!     // Your logic here
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::time::Duration;

use super::terminal::{detect_terminal_size, TerminalSetup};
use crate::error::Result;
use crate::field::ConstrainedTextField;
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::state::input::{self, InputEvent};
use crate::types::ClipRect;

// =============================================================================
// Options
// =============================================================================

/// Settings for the fullscreen loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// How long each tick waits for input.
    pub poll_interval: Duration,
    /// Empty cells between the terminal edge and the field.
    pub margin: u16,
    /// Fixed field height. `None` fills the terminal.
    pub height: Option<u16>,
    /// Focus the field on mount.
    pub autofocus: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(16),
            margin: 1,
            height: None,
            autofocus: true,
        }
    }
}

/// Field rectangle for a terminal of the given size.
pub fn field_bounds(width: u16, height: u16, options: &RunOptions) -> ClipRect {
    let area = ClipRect::new(0, 0, width, height).inset(options.margin);
    match options.height {
        Some(h) => ClipRect { height: h.min(area.height), ..area },
        None => area,
    }
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Renderer state of a mounted field.
pub struct MountHandle<W: Write = Stdout> {
    renderer: DiffRenderer<W>,
    buffer: FrameBuffer,
    options: RunOptions,
    running: bool,
    terminal: Option<TerminalSetup>,
}

impl<W: Write> MountHandle<W> {
    /// Mount onto an arbitrary writer without touching the terminal.
    pub fn with_writer(
        writer: W,
        size: (u16, u16),
        field: &mut ConstrainedTextField,
        options: RunOptions,
    ) -> Self {
        let handle = Self {
            renderer: DiffRenderer::with_writer(writer),
            buffer: FrameBuffer::new(size.0, size.1),
            options,
            running: true,
            terminal: None,
        };
        field.set_bounds(field_bounds(size.0, size.1, &handle.options));
        if handle.options.autofocus {
            field.focus();
        }
        handle
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; the next tick returns false.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn renderer(&self) -> &DiffRenderer<W> {
        &self.renderer
    }

    pub fn resize(&mut self, field: &mut ConstrainedTextField, width: u16, height: u16) {
        tracing::debug!(width, height, "terminal resized");
        self.buffer.resize(width, height);
        self.renderer.invalidate();
        field.set_bounds(field_bounds(width, height, &self.options));
    }

    /// Apply one input event.
    pub fn dispatch(&mut self, field: &mut ConstrainedTextField, event: &InputEvent) -> Result<()> {
        match event {
            InputEvent::Key(key) if key.modifiers.ctrl && key.key == "c" => {
                tracing::debug!("ctrl+c, stopping");
                self.stop();
            }
            InputEvent::Resize(width, height) => self.resize(field, *width, *height),
            other => {
                field.handle_event(other)?;
            }
        }
        Ok(())
    }

    /// Lay out, paint and flush one frame.
    ///
    /// Returns the number of changed cells.
    pub fn draw(&mut self, field: &mut ConstrainedTextField) -> Result<usize> {
        field.layout()?;

        self.buffer.clear();
        field.render(&mut self.buffer);
        let changed = self.renderer.render(&self.buffer)?;
        self.renderer.place_cursor(field.cursor_position())?;
        field.host_mut().mark_drawn();
        Ok(changed)
    }
}

impl<W: Write> Drop for MountHandle<W> {
    fn drop(&mut self) {
        if let Some(mut terminal) = self.terminal.take() {
            let _ = terminal.exit_fullscreen();
        }
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Enter fullscreen and mount the field on stdout.
pub fn mount(field: &mut ConstrainedTextField, options: RunOptions) -> Result<MountHandle<Stdout>> {
    let mut terminal = TerminalSetup::new();
    terminal.enter_fullscreen()?;

    let size = detect_terminal_size();
    let mut handle = MountHandle::with_writer(io::stdout(), size, field, options);
    handle.terminal = Some(terminal);
    handle.draw(field)?;
    Ok(handle)
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the event loop once.
///
/// * `Ok(true)` - continue running
/// * `Ok(false)` - stop requested (Ctrl+C or `handle.stop()`)
pub fn tick(handle: &mut MountHandle<Stdout>, field: &mut ConstrainedTextField) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    let event = input::poll_event(handle.options.poll_interval)?;
    if let Some(event) = &event {
        handle.dispatch(field, event)?;
    }

    // Cursor moves leave the view clean but still need the caret placed
    if handle.is_running() && (event.is_some() || !field.host().dirty().is_empty()) {
        handle.draw(field)?;
    }

    Ok(handle.is_running())
}

/// Mount, loop until Ctrl+C, then restore the terminal.
pub fn run(field: &mut ConstrainedTextField, options: RunOptions) -> Result<()> {
    let mut handle = mount(field, options)?;
    while tick(&mut handle, field)? {}
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
