use thiserror::Error;

/// Errors raised while generating, storing or delivering a post.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("History storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("History format error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
