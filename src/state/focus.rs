//! Focus System - Which text view is being edited
//!
//! Manages focus state:
//! - `focused_index` signal (currently focused view)
//! - Focus callbacks (on_focus/on_blur)
//!
//! A view losing focus is how editing ends; `TextView` registers an
//! `on_blur` callback that fires its end-editing hooks.
//!
//! # Example
//!
//! ```ignore
//! use spark_textfield::state::focus;
//!
//! let cleanup = focus::register_callbacks(index, FocusCallbacks {
//!     on_focus: Some(Box::new(|| println!("Focused!"))),
//!     on_blur: Some(Box::new(|| println!("Blurred!"))),
//! });
//! focus::focus(index);
//! focus::blur();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// FOCUSED INDEX SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_INDEX: Signal<i32> = signal(-1);
}

/// Get the currently focused view index (-1 if none)
pub fn get_focused_index() -> i32 {
    FOCUSED_INDEX.with(|s| s.get())
}

/// Check if any view is focused
pub fn has_focus() -> bool {
    get_focused_index() >= 0
}

/// Check if specific view is focused
pub fn is_focused(index: usize) -> bool {
    get_focused_index() == index as i32
}

// =============================================================================
// FOCUS CALLBACKS
// =============================================================================

/// Callbacks fired when focus changes
#[derive(Default)]
pub struct FocusCallbacks {
    pub on_focus: Option<Box<dyn Fn()>>,
    pub on_blur: Option<Box<dyn Fn()>>,
}

type CallbackList = Vec<(usize, Rc<FocusCallbacks>)>;

thread_local! {
    static FOCUS_CALLBACK_REGISTRY: RefCell<HashMap<usize, CallbackList>> = RefCell::new(HashMap::new());
    static NEXT_CALLBACK_ID: RefCell<usize> = const { RefCell::new(0) };
}

/// Register focus callbacks for a view.
/// Returns cleanup function to unregister.
pub fn register_callbacks(index: usize, callbacks: FocusCallbacks) -> impl FnOnce() {
    let callback_id = NEXT_CALLBACK_ID.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    });

    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow_mut()
            .entry(index)
            .or_default()
            .push((callback_id, Rc::new(callbacks)));
    });

    move || {
        FOCUS_CALLBACK_REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(list) = reg.get_mut(&index) {
                list.retain(|(id, _)| *id != callback_id);
                if list.is_empty() {
                    reg.remove(&index);
                }
            }
        });
    }
}

/// Snapshot the callbacks for an index so none are called while the
/// registry is borrowed (a callback may register or unregister).
fn callbacks_for(index: usize) -> Vec<Rc<FocusCallbacks>> {
    FOCUS_CALLBACK_REGISTRY.with(|reg| {
        reg.borrow()
            .get(&index)
            .map(|list| list.iter().map(|(_, cb)| cb.clone()).collect())
            .unwrap_or_default()
    })
}

/// Set focus and fire callbacks at the source
fn set_focus_with_callbacks(new_index: i32) {
    let old_index = get_focused_index();

    if old_index == new_index {
        return;
    }

    // Update first so blur handlers observe the view as no longer focused
    FOCUSED_INDEX.with(|s| s.set(new_index));

    if old_index >= 0 {
        for cb in callbacks_for(old_index as usize) {
            if let Some(ref on_blur) = cb.on_blur {
                on_blur();
            }
        }
    }

    if new_index >= 0 {
        for cb in callbacks_for(new_index as usize) {
            if let Some(ref on_focus) = cb.on_focus {
                on_focus();
            }
        }
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Focus a specific view.
pub fn focus(index: usize) {
    set_focus_with_callbacks(index as i32);
}

/// Clear focus.
pub fn blur() {
    set_focus_with_callbacks(-1);
}

/// Reset all focus state (for testing).
pub fn reset_focus_state() {
    FOCUSED_INDEX.with(|s| s.set(-1));
    FOCUS_CALLBACK_REGISTRY.with(|reg| reg.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_focus_and_blur() {
        reset_focus_state();
        assert!(!has_focus());

        focus(3);
        assert!(is_focused(3));
        assert_eq!(get_focused_index(), 3);

        blur();
        assert!(!has_focus());
    }

    #[test]
    fn test_callbacks_fire_on_change_only() {
        reset_focus_state();

        let focused = Rc::new(Cell::new(0));
        let blurred = Rc::new(Cell::new(0));
        let (f, b) = (focused.clone(), blurred.clone());

        let cleanup = register_callbacks(1, FocusCallbacks {
            on_focus: Some(Box::new(move || f.set(f.get() + 1))),
            on_blur: Some(Box::new(move || b.set(b.get() + 1))),
        });

        focus(1);
        focus(1);
        assert_eq!(focused.get(), 1);

        focus(2);
        assert_eq!(blurred.get(), 1);

        cleanup();
        focus(1);
        blur();
        assert_eq!(focused.get(), 1);
        assert_eq!(blurred.get(), 1);
    }

    #[test]
    fn test_blur_callback_sees_cleared_focus() {
        reset_focus_state();

        let saw = Rc::new(Cell::new(true));
        let s = saw.clone();
        let _cleanup = register_callbacks(0, FocusCallbacks {
            on_blur: Some(Box::new(move || s.set(is_focused(0)))),
            ..Default::default()
        });

        focus(0);
        blur();
        assert!(!saw.get());
    }
}
