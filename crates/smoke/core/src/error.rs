//! Error types for node-smoke-core.

use thiserror::Error;

/// Errors raised while configuring or running the check battery.
///
/// Individual check failures are not errors; they are recorded as
/// [`CheckOutcome::Failed`](crate::CheckOutcome::Failed) and only surface
/// here in aggregate through [`SmokeError::ChecksFailed`].
#[derive(Debug, Error)]
pub enum SmokeError {
    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration value rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// One or more checks failed.
    #[error("{failed} out of {total} tests failed")]
    ChecksFailed { failed: usize, total: usize },

    /// The runner is one-shot and was invoked again.
    #[error("check runner has already been run")]
    AlreadyRun,
}

/// Result type for smoke operations.
pub type SmokeResult<T> = Result<T, SmokeError>;
