//! Aggregator-specific error types

use thiserror::Error;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Upstream source failure: {0}")]
    UpstreamFailure(#[from] SharedError),

    #[error("Invalid sort policy: {value}")]
    InvalidSort { value: String },

    #[error("Scenario error: {message}")]
    ScenarioError { message: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AggregatorError {
    pub fn scenario(message: impl Into<String>) -> Self {
        Self::ScenarioError {
            message: message.into(),
        }
    }

    /// Whether this error terminated a live catalog stream
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::UpstreamFailure(_))
    }
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;
