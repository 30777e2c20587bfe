//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with our keyboard types.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `convert_event` - Convert any crossterm Event to an InputEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use std::time::Duration;

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified event type for the field's event loop
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyboardEvent),
    /// Bracketed paste
    Paste(String),
    /// Vertical wheel scroll in rows (negative = up)
    Scroll(i32),
    /// Terminal resize (new width, height)
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    /// No event or unhandled event type
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Insert => "Insert".to_string(),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    let mut modifiers = convert_modifiers(event.modifiers);
    if event.code == KeyCode::BackTab {
        modifiers.shift = true;
    }

    KeyboardEvent { key, modifiers, state }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
        meta: mods.contains(KeyModifiers::SUPER) || mods.contains(KeyModifiers::META),
    }
}

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Paste(text) => InputEvent::Paste(text),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        CrosstermEvent::FocusGained => InputEvent::FocusGained,
        CrosstermEvent::FocusLost => InputEvent::FocusLost,
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => InputEvent::Scroll(-1),
            MouseEventKind::ScrollDown => InputEvent::Scroll(1),
            _ => InputEvent::None,
        },
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent as CrosstermMouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_char_and_named_keys() {
        let event = convert_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(event.key, "q");
        assert_eq!(event.modifiers, Modifiers::none());

        let event = convert_key_event(key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(event.key, "Enter");

        let event = convert_key_event(key(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(event.key, "ArrowLeft");
        assert!(event.modifiers.ctrl);
    }

    #[test]
    fn test_convert_backtab_sets_shift() {
        let event = convert_key_event(key(KeyCode::BackTab, KeyModifiers::NONE));
        assert_eq!(event.key, "Tab");
        assert!(event.modifiers.shift);
    }

    #[test]
    fn test_convert_release_state() {
        let mut raw = key(KeyCode::Char('a'), KeyModifiers::NONE);
        raw.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(raw).state, KeyState::Release);
    }

    #[test]
    fn test_convert_paste_and_scroll() {
        assert_eq!(
            convert_event(CrosstermEvent::Paste("hi".into())),
            InputEvent::Paste("hi".into())
        );

        let wheel = CrosstermMouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(convert_event(CrosstermEvent::Mouse(wheel)), InputEvent::Scroll(1));
        assert_eq!(convert_event(CrosstermEvent::Resize(80, 24)), InputEvent::Resize(80, 24));
    }
}
