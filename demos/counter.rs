//! Constrained field demo.
//!
//! A bio field capped at 80 characters. Type to see the counter count
//! down; edits that would exceed the cap are refused. Escape ends editing,
//! Ctrl+C quits.
//!
//! Logs go to `counter-demo.log` (the alternate screen hides stderr):
//!
//! ```text
//! RUST_LOG=spark_textfield=debug cargo run --example counter
//! ```

use std::fs::File;
use std::sync::Mutex;

use spark_textfield::{pipeline, ConstrainedTextField, FieldCallbacks, FieldConfig, Rgba, RunOptions};
use tracing_subscriber::EnvFilter;

fn main() -> spark_textfield::Result<()> {
    let log = File::create("counter-demo.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(log))
        .try_init();

    let config = FieldConfig::default()
        .with_placeholder("Tell us about yourself")
        .with_max_length(80)
        .with_border_color(Rgba::from_hex("#5f87af").unwrap_or(Rgba::LIGHT_GRAY));

    let mut field = ConstrainedTextField::with_config(config);
    field.set_callbacks(
        FieldCallbacks::default()
            .on_did_change(|view| {
                tracing::info!(remaining = view.remaining(), "bio changed");
            })
            .on_did_end_editing(|view| {
                tracing::info!(chars = view.char_count(), "bio editing ended");
            })
            // No tabs in a bio
            .on_should_change_text(|_, _, replacement| !replacement.contains('\t')),
    );

    pipeline::run(&mut field, RunOptions { height: Some(8), ..Default::default() })?;

    println!("{}", field.text());
    Ok(())
}
