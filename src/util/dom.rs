//! Error type for DOM calls.

/// Failure reported by a DOM operation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("document has no root element")]
    NoDocumentElement,
    /// A DOM method threw; carries the debug form of the thrown value.
    #[error("DOM call failed: {0}")]
    Js(String),
}

#[cfg(feature = "browser")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
