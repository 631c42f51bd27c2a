//! Settings for all helpers, deserialized from JSON.
//!
//! Pages pass the same shape either as a JSON string (see
//! [`HelpersConfig::from_json`]) or as a JS object to the `Helpers`
//! constructor. Every field is optional and falls back to the defaults the
//! panel was built around: `/api`, `data-bs-theme`, and a 100 ms fade toggling
//! `d-none`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::net::api::ApiConfig;
use crate::util::fade::{FadeConfig, MAX_FADE_DURATION_MS};
use crate::util::theme::ThemeConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpersConfig {
    pub api: ApiConfig,
    pub theme: ThemeConfig,
    pub fade: FadeConfig,
    pub log_level: log::Level,
}

impl Default for HelpersConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            theme: ThemeConfig::default(),
            fade: FadeConfig::default(),
            log_level: log::Level::Info,
        }
    }
}

impl HelpersConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or wrongly typed
    /// fields, and [`ConfigError::Invalid`] if validation fails.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the helpers cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fade.duration_ms > MAX_FADE_DURATION_MS {
            return Err(ConfigError::Invalid(format!(
                "fade.duration_ms must be at most {MAX_FADE_DURATION_MS}, got {}",
                self.fade.duration_ms
            )));
        }
        if self.fade.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid("fade.frame_interval_ms must be greater than zero".into()));
        }
        if self.fade.marker_class.is_empty() || self.fade.marker_class.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "fade.marker_class must be a single class name, got '{}'",
                self.fade.marker_class
            )));
        }
        if self.theme.attribute.is_empty() {
            return Err(ConfigError::Invalid("theme.attribute must not be empty".into()));
        }
        Ok(())
    }
}
