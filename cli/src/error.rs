/// Failures that end a CLI invocation with a non-zero exit status.
///
/// Chat transport failures are not here: the widget turns those into a
/// fallback bot turn, exactly as the browser does.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid API URL: {0}")]
    InvalidApiUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {status}")]
    Unhealthy { status: u16 },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
