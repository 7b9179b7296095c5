//! Engine configuration.
//!
//! Loaded once at startup from TOML; every field has a default so a config
//! file only needs the keys it changes:
//!
//! ```toml
//! [theme]
//! accent = "#ff8800"
//! text = [1.0, 1.0, 1.0, 1.0]
//!
//! [metrics]
//! padding = 6.0
//! wheel_step = 32.0
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::UiResult;
use crate::style::{Metrics, Theme};

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Widget colors.
    pub theme: Theme,
    /// Widget sizes and timings.
    pub metrics: Metrics,
}

impl GuiConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidConfig`](crate::UiError::InvalidConfig) if the text
    /// is not valid TOML or a value has the wrong shape.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(?config.metrics, "loaded gui configuration");
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// [`UiError::Io`](crate::UiError::Io) if the file cannot be read, or
    /// [`UiError::InvalidConfig`](crate::UiError::InvalidConfig) if it does
    /// not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> UiResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Returns this configuration with a different theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;
    use crate::style::Color;

    #[test]
    fn test_empty_config_is_default() {
        let config = GuiConfig::from_toml_str("").unwrap();
        assert_eq!(config, GuiConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = GuiConfig::from_toml_str(
            r##"
            [theme]
            accent = "#ff000080"
            text = [0.0, 1.0, 0.0]

            [metrics]
            padding = 6.0
            password_glyph = "#"
            "##,
        )
        .unwrap();

        assert_eq!(config.theme.accent, Color::hex(0xFF00_0080));
        assert_eq!(config.theme.text, Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(config.theme.background, Theme::DARK.background);
        assert_eq!(config.metrics.padding, 6.0);
        assert_eq!(config.metrics.password_glyph, '#');
        assert_eq!(config.metrics.wheel_step, Metrics::default().wheel_step);
    }

    #[test]
    fn test_bad_color_is_invalid_config() {
        let err = GuiConfig::from_toml_str("[theme]\naccent = \"#12\"\n").unwrap_err();
        assert!(matches!(err, UiError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GuiConfig::from_toml_file("/definitely/not/here/sgui.toml").unwrap_err();
        assert!(matches!(err, UiError::Io(_)));
    }
}
