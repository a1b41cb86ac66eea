use thiserror::Error;

/// Failure of one data request. Always recoverable: the caller keeps whatever it
/// displayed before and reports the message.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered HTTP {0}")]
    Status(u16),
    #[error("response is not a valid feature collection: {0}")]
    Decode(#[from] serde_json::Error),
}
