//! End-to-end behavior of ConstrainedTextField through the public API.
//!
//! Run with: cargo test --test constrained_field

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_textfield::state::focus::reset_focus_state;
use spark_textfield::{
    reset_registry, ClipRect, ConstrainedTextField, FieldCallbacks, FieldConfig, FrameBuffer, InputEvent,
    KeyboardEvent, TextRange,
};

// =============================================================================
// HELPERS
// =============================================================================

fn field(config: FieldConfig) -> ConstrainedTextField {
    reset_registry();
    reset_focus_state();
    let mut field = ConstrainedTextField::with_config(config);
    field.set_bounds(ClipRect::new(0, 0, 24, 6));
    field
}

fn key(name: &str) -> InputEvent {
    InputEvent::Key(KeyboardEvent::new(name))
}

fn type_str(field: &mut ConstrainedTextField, text: &str) {
    for c in text.chars() {
        field.handle_event(&key(&c.to_string())).unwrap();
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn fill_to_cap_then_reject() {
    let mut field = field(FieldConfig::default().with_max_length(5));

    assert!(field.host_mut().replace(TextRange::caret(0), "hello").unwrap());
    assert_eq!(field.counter_text().as_deref(), Some("0"));

    assert!(!field.host_mut().replace(TextRange::caret(5), "!").unwrap());
    assert_eq!(field.text(), "hello");
    assert_eq!(field.counter_text().as_deref(), Some("0"));
}

#[test]
fn typing_stops_at_cap() {
    let mut field = field(FieldConfig::default().with_max_length(3));
    type_str(&mut field, "abcdef");

    assert_eq!(field.text(), "abc");
    assert_eq!(field.counter_text().as_deref(), Some("0"));

    // Deleting frees room again
    field.handle_event(&key("Backspace")).unwrap();
    type_str(&mut field, "z");
    assert_eq!(field.text(), "abz");
}

#[test]
fn counter_disabled_accepts_any_length() {
    let mut field = field(FieldConfig::default().with_counter_enabled(false).with_max_length(1));
    type_str(&mut field, "no limit here");
    field.layout().unwrap();

    assert_eq!(field.text(), "no limit here");
    assert!(field.counter_layer().is_none());
    assert_eq!(field.counter_text(), None);
}

#[test]
fn observer_veto_is_honored_under_cap() {
    let mut field = field(FieldConfig::default());
    field.set_callbacks(FieldCallbacks::default().on_should_change_text(|_, _, replacement| replacement != "x"));

    type_str(&mut field, "axb");
    assert_eq!(field.text(), "ab");
}

#[test]
fn cap_overrides_permissive_observer() {
    let mut field = field(FieldConfig::default().with_max_length(2));
    let asked = Rc::new(Cell::new(0));
    let a = asked.clone();
    field.set_callbacks(FieldCallbacks::default().on_should_change_text(move |_, _, _| {
        a.set(a.get() + 1);
        true
    }));

    assert!(!field.on_will_change_text(TextRange::caret(0), "abc"));
    assert_eq!(asked.get(), 1);
}

#[test]
fn length_counts_user_perceived_characters() {
    let mut field = field(FieldConfig::default().with_max_length(3));
    field.handle_event(&InputEvent::Paste("h\u{e9}\u{e9}".into())).unwrap();
    assert_eq!(field.text(), "h\u{e9}\u{e9}");
    assert_eq!(field.counter_text().as_deref(), Some("0"));

    assert!(!field.on_will_change_text(TextRange::caret(3), "\u{e9}"));
}

#[test]
fn combining_mark_counts_as_one_character() {
    let mut field = field(FieldConfig::default().with_max_length(1));
    // "e" followed by COMBINING ACUTE ACCENT
    assert!(field.on_will_change_text(TextRange::caret(0), "e\u{301}"));
    field.handle_event(&InputEvent::Paste("e\u{301}".into())).unwrap();
    assert_eq!(field.text(), "e\u{301}");
    assert_eq!(field.counter_text().as_deref(), Some("0"));

    // A further mark joins the same cluster, a new base letter does not
    assert!(field.on_will_change_text(TextRange::caret(2), "\u{301}"));
    assert!(!field.on_will_change_text(TextRange::caret(2), "x"));
}

#[test]
fn emoji_sequences_count_as_one_character() {
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
    let flag = "\u{1F1EB}\u{1F1F7}";

    let mut field = field(FieldConfig::default().with_max_length(2));
    field.handle_event(&InputEvent::Paste(family.into())).unwrap();
    assert_eq!(field.text(), family);
    assert_eq!(field.counter_text().as_deref(), Some("1"));

    field.handle_event(&InputEvent::Paste(flag.into())).unwrap();
    assert_eq!(field.counter_text().as_deref(), Some("0"));

    let end = field.text().chars().count();
    assert!(!field.on_will_change_text(TextRange::caret(end), "a"));
}

#[test]
fn terminal_focus_loss_ends_editing() {
    let mut field = field(FieldConfig::default());
    let ended = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = ended.clone();
    field.set_callbacks(
        FieldCallbacks::default().on_did_end_editing(move |view| sink.borrow_mut().push(view.text.to_string())),
    );

    field.focus();
    type_str(&mut field, "draft");
    assert!(field.handle_event(&InputEvent::FocusLost).unwrap());
    assert_eq!(*ended.borrow(), vec!["draft".to_string()]);

    // Already blurred: a second loss is ignored
    assert!(!field.handle_event(&InputEvent::FocusLost).unwrap());
    assert_eq!(ended.borrow().len(), 1);
}

#[test]
fn paste_over_cap_is_rejected_whole() {
    let mut field = field(FieldConfig::default().with_max_length(4));
    type_str(&mut field, "ab");
    field.handle_event(&InputEvent::Paste("cde".into())).unwrap();
    assert_eq!(field.text(), "ab");
}

// =============================================================================
// OBSERVER
// =============================================================================

#[test]
fn observer_receives_change_and_end_editing() {
    let mut field = field(FieldConfig::default().with_max_length(10));
    let changes = Rc::new(RefCell::new(Vec::new()));
    let ended = Rc::new(Cell::new(false));
    let (c, e) = (changes.clone(), ended.clone());

    field.set_callbacks(
        FieldCallbacks::default()
            .on_did_change(move |view| c.borrow_mut().push((view.text.to_string(), view.counter.map(str::to_string))))
            .on_did_end_editing(move |_| e.set(true)),
    );

    field.focus();
    type_str(&mut field, "ok");
    assert_eq!(
        *changes.borrow(),
        vec![
            ("o".to_string(), Some("9".to_string())),
            ("ok".to_string(), Some("8".to_string())),
        ]
    );

    field.handle_event(&key("Escape")).unwrap();
    assert!(ended.get());
}

#[test]
fn forced_text_resyncs_on_layout() {
    let mut field = field(FieldConfig::default().with_max_length(10));
    field.layout().unwrap();
    assert!(field.placeholder_visible());

    field.set_text("external");
    assert!(field.host().needs_layout());
    field.layout().unwrap();

    assert!(!field.placeholder_visible());
    assert_eq!(field.counter_text().as_deref(), Some("2"));
}

// =============================================================================
// LAYOUT & RENDERING
// =============================================================================

#[test]
fn repeated_layout_is_stable() {
    let mut field = field(FieldConfig::default());
    field.layout().unwrap();
    let first = (field.placeholder_layer(), field.counter_layer());

    for _ in 0..3 {
        field.host_mut().set_needs_layout();
        field.layout().unwrap();
        assert_eq!(field.overlay_count(), 2);
        assert_eq!((field.placeholder_layer(), field.counter_layer()), first);
    }
}

#[test]
fn resize_moves_counter() {
    let mut field = field(FieldConfig::default());
    field.layout().unwrap();
    assert_eq!(field.counter_layer().unwrap().frame, ClipRect::new(21, 5, 2, 1));

    field.set_bounds(ClipRect::new(0, 0, 30, 4));
    field.layout().unwrap();
    assert_eq!(field.counter_layer().unwrap().frame, ClipRect::new(27, 3, 2, 1));
}

#[test]
fn rendered_frame_shows_text_and_counter() {
    let mut field = field(FieldConfig::default().with_max_length(50));
    type_str(&mut field, "line one");
    field.handle_event(&key("Enter")).unwrap();
    type_str(&mut field, "two");
    field.layout().unwrap();

    let mut buffer = FrameBuffer::new(24, 6);
    field.render(&mut buffer);

    assert!(buffer.row_text(1).starts_with("│line one "));
    assert!(buffer.row_text(2).starts_with("│two "));
    assert!(buffer.row_text(5).ends_with("38╯"));
    assert!(!buffer.row_text(1).contains("Enter detail"));
}
