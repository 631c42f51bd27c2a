//! Theme mode from the browser's color-scheme preference.
//!
//! Reads `prefers-color-scheme` once per call and writes `dark` or `light`
//! to an attribute on the `<html>` element (Bootstrap's `data-bs-theme` by
//! default). Nothing is persisted and no change listener is registered; call
//! again to pick up a changed preference.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::dom::DomError;

pub const DEFAULT_THEME_ATTRIBUTE: &str = "data-bs-theme";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Attribute written on the document root.
    pub attribute: String,
    /// Media query whose match means "dark".
    pub media_query: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { attribute: DEFAULT_THEME_ATTRIBUTE.to_owned(), media_query: DARK_SCHEME_QUERY.to_owned() }
    }
}

/// The parts of the page environment the theme setter touches.
pub trait ThemeHost {
    /// Whether `media_query` currently matches.
    fn prefers_dark(&self, media_query: &str) -> bool;

    /// Set `name` to `value` on the document's root element.
    ///
    /// # Errors
    ///
    /// Returns a [`DomError`] if the root element is missing or rejects the attribute.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;
}

/// Apply the preferred theme mode to the document root and return it.
///
/// # Errors
///
/// Returns a [`DomError`] if the attribute cannot be written.
pub fn apply_preferred_theme<H: ThemeHost + ?Sized>(host: &H, config: &ThemeConfig) -> Result<ThemeMode, DomError> {
    let mode = ThemeMode::from_prefers_dark(host.prefers_dark(&config.media_query));
    host.set_root_attribute(&config.attribute, mode.as_str())?;
    log::debug!("theme mode set: {}={mode}", config.attribute);
    Ok(mode)
}

/// The current page's window and document.
#[cfg(feature = "browser")]
pub struct BrowserDocument {
    window: web_sys::Window,
}

#[cfg(feature = "browser")]
impl BrowserDocument {
    /// # Errors
    ///
    /// Returns [`DomError::NoWindow`] outside a browser main thread.
    pub fn current() -> Result<Self, DomError> {
        web_sys::window().map(|window| Self { window }).ok_or(DomError::NoWindow)
    }
}

#[cfg(feature = "browser")]
impl ThemeHost for BrowserDocument {
    fn prefers_dark(&self, media_query: &str) -> bool {
        matches!(self.window.match_media(media_query), Ok(Some(list)) if list.matches())
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        let root = self
            .window
            .document()
            .and_then(|doc| doc.document_element())
            .ok_or(DomError::NoDocumentElement)?;
        root.set_attribute(name, value)?;
        Ok(())
    }
}
