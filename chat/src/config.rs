//! Widget configuration.
//!
//! Front ends decide where values come from (compile-time env in the
//! browser, flags and env vars in the CLI); this type only carries them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::input::KeyChord;

/// Endpoint used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/chat";

/// Bot text shown when the service answers with `success: false`.
pub const RETRY_FALLBACK: &str = "Sorry, I couldn't process that. Please try again!";

/// Greeting seeded into a fresh widget.
pub const DEFAULT_GREETING: &str = "Hi! Ask me anything.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint: String,
    pub greeting: Option<String>,
    pub toggle_chord: KeyChord,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_URL.to_owned(),
            greeting: Some(DEFAULT_GREETING.to_owned()),
            toggle_chord: KeyChord::default(),
        }
    }
}

impl WidgetConfig {
    /// Config for `endpoint` with the remaining fields defaulted. Blank
    /// endpoints fall back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn with_endpoint(endpoint: &str) -> Self {
        let endpoint = endpoint.trim();
        let endpoint = if endpoint.is_empty() { DEFAULT_API_URL } else { endpoint };
        Self { endpoint: endpoint.to_owned(), ..Self::default() }
    }

    #[must_use]
    pub fn greeting(mut self, greeting: Option<String>) -> Self {
        self.greeting = greeting.filter(|g| !g.trim().is_empty());
        self
    }

    /// Bot text shown when the endpoint could not be reached.
    #[must_use]
    pub fn unreachable_fallback(&self) -> String {
        format!(
            "Oops! Something went wrong. Please make sure the chat service at {} is running.",
            self.endpoint
        )
    }
}
