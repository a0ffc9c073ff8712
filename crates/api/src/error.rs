//! API error type with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use idempotency::IdempotencyError;
use workflow::WorkflowError;

/// API-level error that maps onto the HTTP status contract.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Malformed or incomplete request; the caller can fix and retry.
    BadRequest(String),
    /// Idempotency key reused with a different payload.
    Conflict(String),
    /// A collaborator call failed; reported as a gateway error.
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => {
                tracing::error!(error = %msg, "collaborator failure");
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match &err {
            WorkflowError::EmptyItems | WorkflowError::UnknownItem(_) => {
                ApiError::BadRequest(err.to_string())
            }
            WorkflowError::Idempotency(conflict) => ApiError::Conflict(conflict.to_string()),
            WorkflowError::Catalog(_) => ApiError::BadGateway("Catalog lookup failed.".to_string()),
            WorkflowError::PaymentFailed { .. } => {
                ApiError::BadGateway("Payment authorization failed.".to_string())
            }
        }
    }
}

impl From<IdempotencyError> for ApiError {
    fn from(err: IdempotencyError) -> Self {
        ApiError::Conflict(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use common::{IdempotencyKey, ItemId, OrderId};
    use workflow::GatewayError;

    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn workflow_errors_map_to_contract_statuses() {
        assert_eq!(
            status_of(WorkflowError::EmptyItems.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(WorkflowError::UnknownItem(ItemId::new()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                WorkflowError::Idempotency(IdempotencyError::KeyConflict {
                    key: IdempotencyKey::new("K1").unwrap(),
                })
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(
                WorkflowError::PaymentFailed {
                    order_id: OrderId::new(),
                    source: GatewayError::Transport("down".to_string()),
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(WorkflowError::Catalog(GatewayError::Transport("down".to_string())).into()),
            StatusCode::BAD_GATEWAY
        );
    }
}
