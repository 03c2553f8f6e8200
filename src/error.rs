/// Error types shared across the application
use thiserror::Error;

use crate::restore::encoder::EncodeError;

/// Configuration problems detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable not set")]
    MissingApiKey,
}

/// Everything that can go wrong during one restoration attempt.
///
/// The UI never shows these; they are logged and collapsed into a single
/// generic message.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] EncodeError),

    #[error("request to image service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("no image data found in the response")]
    NoImage,

    #[error("restored image data is not valid base64: {0}")]
    InvalidImageData(#[from] base64::DecodeError),
}

/// Fatal errors that keep the application from starting or running
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("user interface error: {0}")]
    Ui(#[from] iced::Error),
}
