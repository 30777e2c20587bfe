//! Field configuration - props struct with defaults.
//!
//! ```ignore
//! let config = FieldConfig {
//!     placeholder: "Describe the issue".into(),
//!     max_length: 140,
//!     ..Default::default()
//! };
//! ```

use crate::error::{FieldError, Result};
use crate::layout::string_width;
use crate::types::Rgba;

/// Placeholder shown by a freshly created field.
pub const DEFAULT_PLACEHOLDER: &str = "Enter detail";
/// Default character cap.
pub const DEFAULT_MAX_LENGTH: usize = 25;

/// Configuration state of a [`ConstrainedTextField`](super::ConstrainedTextField).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Shown while the content is empty.
    pub placeholder: String,
    /// Color of both the placeholder and the counter.
    pub placeholder_color: Rgba,
    /// Maximum number of characters (grapheme clusters).
    pub max_length: usize,
    /// Whether the counter is shown and the cap enforced.
    pub counter_enabled: bool,
    pub border_color: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            placeholder_color: Rgba::LIGHT_GRAY,
            max_length: DEFAULT_MAX_LENGTH,
            counter_enabled: true,
            border_color: Rgba::LIGHT_GRAY,
        }
    }
}

impl FieldConfig {
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_placeholder_color(mut self, color: Rgba) -> Self {
        self.placeholder_color = color;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_counter_enabled(mut self, enabled: bool) -> Self {
        self.counter_enabled = enabled;
        self
    }

    pub fn with_border_color(mut self, color: Rgba) -> Self {
        self.border_color = color;
        self
    }

    /// Width in cells of the widest counter value this config produces
    /// for content that respects the cap.
    pub fn counter_width(&self) -> u16 {
        string_width(&self.max_length.to_string())
    }

    /// Check the config against a field width.
    ///
    /// Not called by the field itself; callers that want the check opt in.
    pub fn validate(&self, field_width: u16) -> Result<()> {
        if self.placeholder.contains('\n') {
            return Err(FieldError::InvalidConfig("placeholder must be a single line".into()));
        }

        // Border on both sides plus the counter itself
        if self.counter_enabled && self.counter_width() + 2 > field_width {
            return Err(FieldError::InvalidConfig(format!(
                "counter for max_length {} needs {} cells, field is {} wide",
                self.max_length,
                self.counter_width() + 2,
                field_width
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.placeholder, "Enter detail");
        assert_eq!(config.max_length, 25);
        assert!(config.counter_enabled);
        assert_eq!(config.placeholder_color, Rgba::LIGHT_GRAY);
        assert_eq!(config.border_color, Rgba::LIGHT_GRAY);
    }

    #[test]
    fn test_builders() {
        let config = FieldConfig::default()
            .with_placeholder("Bio")
            .with_max_length(140)
            .with_counter_enabled(false)
            .with_border_color(Rgba::RED);
        assert_eq!(config.placeholder, "Bio");
        assert_eq!(config.max_length, 140);
        assert!(!config.counter_enabled);
        assert_eq!(config.border_color, Rgba::RED);
        assert_eq!(config.counter_width(), 3);
    }

    #[test]
    fn test_validate() {
        assert!(FieldConfig::default().validate(20).is_ok());

        let multi = FieldConfig::default().with_placeholder("a\nb");
        assert!(matches!(multi.validate(20), Err(FieldError::InvalidConfig(_))));

        let wide = FieldConfig::default().with_max_length(1_000_000);
        assert!(wide.validate(5).is_err());
        assert!(wide.with_counter_enabled(false).validate(5).is_ok());
    }
}
