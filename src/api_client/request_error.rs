use thiserror::Error;

/// Everything that can go wrong between issuing a request and holding its parsed body.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}
