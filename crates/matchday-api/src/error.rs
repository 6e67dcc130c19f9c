//! API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Credentials rejected by the server")]
    Unauthorized,

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
}
