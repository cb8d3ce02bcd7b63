//! Shared error types for the catalog aggregation pipeline

use thiserror::Error;

use crate::types::SourceKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("{origin} source failed: {message}")]
    SourceFailed { origin: SourceKind, message: String },

    #[error("Invalid catalog sort: {value}")]
    InvalidSort { value: String },
}

impl SharedError {
    pub fn source_failed(origin: SourceKind, message: impl Into<String>) -> Self {
        Self::SourceFailed {
            origin,
            message: message.into(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
