//! Deployment-time widget configuration.
//!
//! The endpoint is baked in at build time from `CHATBOT_API_URL`; a
//! component instance can still override it through its props.

use chat::WidgetConfig;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Endpoint compiled into this build.
pub const API_URL: &str = match option_env!("CHATBOT_API_URL") {
    Some(url) => url,
    None => chat::DEFAULT_API_URL,
};

/// Resolve the config for one widget instance from its optional props.
pub fn resolve(endpoint: Option<&str>, greeting: Option<String>) -> WidgetConfig {
    let config = WidgetConfig::with_endpoint(endpoint.unwrap_or(API_URL));
    match greeting {
        Some(text) => config.greeting(Some(text)),
        None => config,
    }
}
