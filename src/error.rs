use thiserror::Error;

/// Errors that can occur while talking to the services backend
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Transport-level failure (connection refused, timeout, invalid body)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Failed to serialize or deserialize a JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service menu could not be loaded
    #[error("Failed to load services: {0}")]
    MenuLoad(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Error building HTTP headers (for example an invalid session cookie)
    #[error("Header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
