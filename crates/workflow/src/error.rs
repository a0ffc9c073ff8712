//! Workflow error taxonomy.

use common::{ItemId, OrderId};
use idempotency::IdempotencyError;
use thiserror::Error;

use crate::gateways::GatewayError;

/// Errors surfaced by the order orchestration workflow.
///
/// `EmptyItems` and `UnknownItem` abort before any write, so the caller can
/// retry under the same idempotency key after correcting the request.
/// `PaymentFailed` is different: a failed order has already been recorded
/// and bound to the key by the time this error is returned.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The request contained no item ids.
    #[error("at least one itemId is required")]
    EmptyItems,

    /// A requested item does not exist in the catalog.
    #[error("unknown itemId: {0}")]
    UnknownItem(ItemId),

    /// The idempotency key was reused with a different request.
    #[error(transparent)]
    Idempotency(#[from] IdempotencyError),

    /// The catalog collaborator call failed. Nothing was written.
    #[error("catalog lookup failed")]
    Catalog(#[source] GatewayError),

    /// The payment collaborator call failed. A failed order has been
    /// durably recorded under the request's idempotency key.
    #[error("payment authorization failed for order {order_id}")]
    PaymentFailed {
        order_id: OrderId,
        #[source]
        source: GatewayError,
    },
}

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
