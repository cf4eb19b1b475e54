use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading a batch from an event log source failed.
    #[error("source read error: {0}")]
    SourceRead(String),
    /// The outbound webhook call failed or returned a non-success status.
    #[error("webhook delivery failed: {0}")]
    Delivery(String),
    /// Anything else that should not happen during normal operation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience constructors
impl AppError {
    pub fn source_read(msg: impl Into<String>) -> Self {
        AppError::SourceRead(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        AppError::Delivery(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
