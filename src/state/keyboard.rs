//! Keyboard Module - Keyboard event types
//!
//! Key names follow the DOM convention used across spark: printable keys are
//! the character itself, special keys are named ("Enter", "ArrowUp", ...).
//!
//! Routing is done by the focused `TextView`, see
//! [`TextView::handle_key`](crate::host::TextView::handle_key).

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    /// Create modifiers with shift
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }

    /// True when a modifier that turns a key into a shortcut is held.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press or auto-repeat; releases are ignored by editing.
    pub fn is_press(&self) -> bool {
        matches!(self.state, KeyState::Press | KeyState::Repeat)
    }

    /// The character this event types, if it is a plain printable key.
    pub fn printable(&self) -> Option<char> {
        if self.modifiers.is_command() {
            return None;
        }
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable() {
        assert_eq!(KeyboardEvent::new("a").printable(), Some('a'));
        assert_eq!(KeyboardEvent::new("é").printable(), Some('é'));
        assert_eq!(KeyboardEvent::with_modifiers("A", Modifiers::shift()).printable(), Some('A'));
        assert_eq!(KeyboardEvent::new("Enter").printable(), None);
        assert_eq!(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()).printable(), None);
        assert_eq!(KeyboardEvent::new("").printable(), None);
    }

    #[test]
    fn test_release_is_not_press() {
        let mut event = KeyboardEvent::new("a");
        assert!(event.is_press());
        event.state = KeyState::Repeat;
        assert!(event.is_press());
        event.state = KeyState::Release;
        assert!(!event.is_press());
    }
}
