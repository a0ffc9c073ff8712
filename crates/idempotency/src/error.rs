use common::IdempotencyKey;
use thiserror::Error;

/// Errors that can occur when resolving an idempotency key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdempotencyError {
    /// The key was already used with a different request fingerprint.
    ///
    /// This indicates a client bug: the same key was reused for a
    /// semantically different request. Callers should surface it as a
    /// conflict rather than a transient failure.
    #[error("idempotency key '{key}' has already been used with a different request")]
    KeyConflict { key: IdempotencyKey },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, IdempotencyError>;
