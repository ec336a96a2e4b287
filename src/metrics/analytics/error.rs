//! Analytics error types.

use thiserror::Error;

/// Errors that can occur around W' analytics.
///
/// Degenerate ride data is never an error; it produces an empty analysis.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Computation was superseded before it finished.
    #[error("Computation cancelled")]
    Cancelled,
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
