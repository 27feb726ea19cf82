//! Chat endpoint contract: wire types and the injectable transport trait.
//!
//! WIRE FORMAT
//! ===========
//! `POST <endpoint>` with `Content-Type: application/json`:
//!
//! - request: `{ "message": "<trimmed user text>" }`
//! - response: `{ "success": <bool>, "response": "<reply text>" }`
//!
//! Replies decode leniently: a missing `success` reads as `false`, and a
//! `response` that is not a string is dropped.
//!
//! ERROR HANDLING
//! ==============
//! Transports report what went wrong precisely through [`ServiceError`];
//! the widget collapses every variant into a single "service unreachable"
//! fallback.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of the outbound chat request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of a reply from the chat endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "text_or_none")]
    pub response: Option<String>,
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

impl ChatReply {
    #[must_use]
    pub fn ok(response: impl Into<String>) -> Self {
        Self { success: true, response: Some(response.into()) }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self { success: false, response: None }
    }

    /// Reply text to show, or `None` when the service signalled a logical
    /// failure. A success reply with no `response` field counts as failure.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        if self.success { self.response.as_deref() } else { None }
    }
}

/// Transport-level failure talking to the chat endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (DNS, refused, CORS, timeout).
    #[error("chat request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("chat endpoint returned status {status}")]
    Status { status: u16 },

    /// The response body was not a valid [`ChatReply`].
    #[error("chat response could not be decoded: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Sends one user message to the chat endpoint.
///
/// Futures are not required to be `Send` so browser transports can run on
/// a single-threaded local executor.
#[async_trait(?Send)]
pub trait ChatService {
    /// Submit `message` and wait for the endpoint's reply.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the request fails, the endpoint returns
    /// a non-2xx status, or the body does not decode.
    async fn send(&self, message: &str) -> Result<ChatReply, ServiceError>;
}

/// Decode a raw response body into a [`ChatReply`].
///
/// # Errors
///
/// Returns [`ServiceError::Decode`] if `body` is not a JSON object.
pub fn decode_reply(body: &str) -> Result<ChatReply, ServiceError> {
    Ok(serde_json::from_str(body)?)
}
