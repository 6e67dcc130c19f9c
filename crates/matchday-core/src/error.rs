//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] matchday_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] matchday_session::SessionError),

    #[error("API error: {0}")]
    Api(#[from] matchday_api::ApiError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] matchday_navigation::NavigationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
