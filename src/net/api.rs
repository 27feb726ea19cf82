//! Browser transport for the chat endpoint.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: the transport reports itself unavailable, since the
//! endpoint is only reachable from the page.

use async_trait::async_trait;
use chat::{ChatReply, ChatService, ServiceError};

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

/// [`ChatService`] that POSTs to a fixed endpoint with `fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpChatService {
    endpoint: String,
}

impl HttpChatService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ChatService for HttpChatService {
    async fn send(&self, message: &str) -> Result<ChatReply, ServiceError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.endpoint)
                .json(&chat::ChatRequest::new(message))
                .map_err(|e| ServiceError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ServiceError::Status { status: resp.status() });
            }
            let body = resp.text().await.map_err(|e| ServiceError::Transport(e.to_string()))?;
            chat::decode_reply(&body)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = message;
            Err(ServiceError::Transport(format!("{} is only reachable from the browser", self.endpoint)))
        }
    }
}
