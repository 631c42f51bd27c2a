//! DOM helpers shared by the panel pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each helper is written against a small trait so the behavior is testable
//! natively; `web_sys` implementations sit behind the `browser` feature.

pub mod dom;
pub mod fade;
pub mod theme;
