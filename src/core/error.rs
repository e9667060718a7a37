//! Error types for ledger operations.

use thiserror::Error;

/// Errors produced by ledger components.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Durable storage medium is not reachable; operation degraded to a no-op.
    #[error("storage unavailable")]
    StorageUnavailable,
    /// Malformed persisted or imported text.
    #[error("serialization failure: {0}")]
    Serialization(String),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
    /// Caller-supplied input rejected at the boundary.
    #[error("validation failure: {0}")]
    Validation(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
