//! Networking modules for the panel's JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `form` encodes payloads, `transport` is the HTTP seam (browser or native),
//! `api` applies the prefix and response policy, and `deliveries` wraps the
//! concrete endpoints the panel pages call.

pub mod api;
pub mod deliveries;
pub mod form;
pub mod transport;

#[cfg(test)]
#[path = "support_test.rs"]
pub(crate) mod test_helpers;
