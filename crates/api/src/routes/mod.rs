//! Route handlers for the three service apps.

pub mod catalog;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod payments;

use axum::http::HeaderMap;
use common::IdempotencyKey;

use crate::error::ApiError;

/// Header carrying the client-chosen idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Extracts and validates the `Idempotency-Key` header.
///
/// A missing, unreadable, or blank header is a client error: the key is
/// required, not synthesized, so duplicate submissions are always
/// detectable.
pub(crate) fn require_idempotency_key(headers: &HeaderMap) -> Result<IdempotencyKey, ApiError> {
    let missing = || ApiError::BadRequest("Missing Idempotency-Key header.".to_string());
    let value = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .ok_or_else(missing)?
        .to_str()
        .map_err(|_| missing())?;
    IdempotencyKey::new(value).map_err(|_| missing())
}
