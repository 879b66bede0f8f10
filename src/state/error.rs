use thiserror::Error;

use crate::core::errors::ApiError;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to seed the base knowledge pool: {0}")]
    Engine(#[source] ApiError),
}
