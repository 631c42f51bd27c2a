//! Page helpers for the delivery panel, compiled to WebAssembly.
//!
//! Replaces the panel's hand-written helper script with typed Rust: JSON API
//! calls under a configurable prefix, a light/dark theme setter driven by the
//! browser's color-scheme preference, and short fade transitions that toggle
//! the "force hidden" marker class.
//!
//! Browser bindings live behind the `browser` feature. Everything else is
//! written against small traits ([`net::transport::Transport`],
//! [`util::theme::ThemeHost`], [`util::fade::FadeElement`]) so it runs and is
//! tested natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`net`] | Form encoding, HTTP transports, [`net::api::ApiClient`], delivery endpoints |
//! | [`util`] | Theme mode, fade transitions, DOM error type |
//! | [`config`] | Deserializable settings for all helpers |
//! | [`logging`] | Console logger and panic hook setup |
//! | `bindings` | `#[wasm_bindgen]` surface for page scripts (`browser` only) |

#[cfg(feature = "browser")]
pub mod bindings;
pub mod config;
pub mod logging;
pub mod net;
pub mod util;
