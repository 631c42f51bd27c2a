//! Typed wrappers for the delivery panel endpoints.
//!
//! The backend reports business failures inside 2xx bodies (`ok: false`,
//! a non-empty `error`, `new_status: -1`); these helpers turn them into
//! [`ApiError::Rejected`] or [`StatusCheck::Failed`].

#[cfg(test)]
#[path = "deliveries_test.rs"]
mod deliveries_test;

use serde::Deserialize;
use serde_json::Value;

use super::api::{ApiClient, ApiError};
use super::form::Payload;
use super::transport::Transport;

/// `new_status` value meaning "no change since the status the page holds".
pub const NO_STATUS_CHANGE: i64 = -1;

/// Delivery record and the marketplace purchase it belongs to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeliverySnapshot {
    pub delivery: Value,
    pub purchase: Value,
}

/// Outcome of polling for a delivery status change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusCheck {
    Unchanged,
    Changed(i64),
    /// The delivery stopped with an error message.
    Failed(String),
}

#[derive(Deserialize)]
struct AckResponse {
    ok: bool,
}

#[derive(Deserialize)]
struct TimeResponse {
    time: String,
}

#[derive(Deserialize)]
struct ErrorFieldResponse {
    #[serde(default)]
    error: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    new_status: i64,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ProfileResponse {
    profile: Value,
}

fn code_payload(code: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("code".to_owned(), Value::from(code));
    payload
}

fn ack_rejected_message(path: &str) -> String {
    format!("{path} was not acknowledged")
}

/// Borrowing view over an [`ApiClient`] scoped to delivery endpoints.
pub struct Deliveries<'a, T> {
    api: &'a ApiClient<T>,
}

impl<T: Transport> ApiClient<T> {
    #[must_use]
    pub fn deliveries(&self) -> Deliveries<'_, T> {
        Deliveries { api: self }
    }
}

impl<T: Transport> Deliveries<'_, T> {
    /// Fetch (or lazily create) the delivery for a purchase code.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body lacks
    /// `delivery`/`purchase`.
    pub async fn get(&self, code: &str) -> Result<DeliverySnapshot, ApiError> {
        self.api.post_as("/deliveries/get", &code_payload(code)).await
    }

    /// Human-readable time left before delivery starts; empty once due.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or `time` is missing.
    pub async fn time_until_delivery(&self, code: &str) -> Result<String, ApiError> {
        let resp: TimeResponse = self
            .api
            .post_as("/deliveries/get_time_until_delivery", &code_payload(code))
            .await?;
        Ok(resp.time)
    }

    /// Start the delivery now instead of waiting for its scheduled time.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the server answers `ok: false`.
    pub async fn force_start(&self, code: &str) -> Result<(), ApiError> {
        self.acknowledged("/deliveries/force_start", code).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the server answers `ok: false`.
    pub async fn pause(&self, code: &str) -> Result<(), ApiError> {
        self.acknowledged("/deliveries/pause", code).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the server answers `ok: false`.
    pub async fn unpause(&self, code: &str) -> Result<(), ApiError> {
        self.acknowledged("/deliveries/unpause", code).await
    }

    /// Change the Steam profile the delivery goes to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] carrying the server's message when the
    /// URL is empty, invalid, private, or the delivery already started.
    pub async fn set_steam_profile_url(&self, code: &str, profile_url: &str) -> Result<(), ApiError> {
        let mut payload = code_payload(code);
        payload.insert("steam_profile_url".to_owned(), Value::from(profile_url));
        let resp: ErrorFieldResponse = self
            .api
            .post_as("/deliveries/set_steam_profile_url", &payload)
            .await?;
        if resp.error.is_empty() { Ok(()) } else { Err(ApiError::Rejected(resp.error)) }
    }

    /// Ask whether the delivery moved past `current_status`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or `new_status` is missing.
    pub async fn check_for_new_status(&self, code: &str, current_status: i64) -> Result<StatusCheck, ApiError> {
        let mut payload = code_payload(code);
        payload.insert("delivery_status".to_owned(), Value::from(current_status));
        let resp: StatusResponse = self
            .api
            .post_as("/deliveries/check_for_new_status", &payload)
            .await?;
        Ok(classify_status(resp))
    }

    /// Public details of the Steam profile at `profile_url`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn steam_profile_info(&self, profile_url: &str) -> Result<Value, ApiError> {
        let mut payload = Payload::new();
        payload.insert("steam_profile_url".to_owned(), Value::from(profile_url));
        self.api.post("/get_steam_profile_info", &payload).await
    }

    /// Profile of the account that sends deliveries.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or `profile` is missing.
    pub async fn courier_steam_profile(&self) -> Result<Value, ApiError> {
        let resp: ProfileResponse = self.api.post_as("/get_courier_steam_profile", &Payload::new()).await?;
        Ok(resp.profile)
    }

    async fn acknowledged(&self, path: &str, code: &str) -> Result<(), ApiError> {
        let resp: AckResponse = self.api.post_as(path, &code_payload(code)).await?;
        if resp.ok { Ok(()) } else { Err(ApiError::Rejected(ack_rejected_message(path))) }
    }
}

fn classify_status(resp: StatusResponse) -> StatusCheck {
    match (resp.new_status, resp.error) {
        (NO_STATUS_CHANGE, Some(error)) if !error.is_empty() => StatusCheck::Failed(error),
        (NO_STATUS_CHANGE, _) => StatusCheck::Unchanged,
        (status, _) => StatusCheck::Changed(status),
    }
}
