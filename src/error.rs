//! Error types for trend analysis.

use thiserror::Error;

/// Errors raised by the trend analyzer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Computation error: {reason}")]
    ComputationError { reason: String },
}

impl TrendError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        TrendError::InvalidInput { reason: reason.into() }
    }

    pub fn computation(reason: impl Into<String>) -> Self {
        TrendError::ComputationError { reason: reason.into() }
    }
}

/// Result type for trend analysis operations.
pub type Result<T> = std::result::Result<T, TrendError>;
