//! Native transport for the chat endpoint, built on `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use chat::{ChatReply, ChatRequest, ChatService, ServiceError, decode_reply};
use reqwest::Url;
use serde_json::Value;

use crate::error::CliError;

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// [`ChatService`] posting to a chat endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct ReqwestChatService {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestChatService {
    /// Build a service for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidApiUrl`] if `endpoint` is not an absolute
    /// http(s) URL, or [`CliError::Http`] if the client cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CliError> {
        let url = Url::parse(endpoint.trim()).map_err(|_| CliError::InvalidApiUrl(endpoint.to_owned()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CliError::InvalidApiUrl(endpoint.to_owned()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint: url })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `/health` on the endpoint's origin.
    #[must_use]
    pub fn health_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path("/health");
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// Probe the service health endpoint and return its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Http`] when the request fails and
    /// [`CliError::Unhealthy`] on a non-2xx status.
    pub async fn health(&self) -> Result<Value, CliError> {
        let url = self.health_url();
        tracing::debug!(%url, "probing chat service health");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CliError::Unhealthy { status: status.as_u16() });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl ChatService for ReqwestChatService {
    async fn send(&self, message: &str) -> Result<ChatReply, ServiceError> {
        tracing::debug!(endpoint = %self.endpoint, "posting chat message");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status { status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        decode_reply(&body)
    }
}
