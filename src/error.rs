//! Crate-wide error type.

use thiserror::Error as ThisError;

use crate::registry::StopId;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Precondition violated by the caller (e.g. stops without a depot).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("stop {0} not found")]
    NotFound(StopId),
    /// The proposed order is not an exact permutation of the registry contents.
    #[error("invalid order: {0}")]
    InvalidOrder(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}
