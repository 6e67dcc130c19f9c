//! Navigation error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Unknown path: {0}")]
    UnknownPath(String),
}
