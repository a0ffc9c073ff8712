//! Payment authority endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use common::PaymentId;
use domain::{Payment, PaymentRequest, PaymentStore};

use crate::error::ApiError;
use crate::routes::require_idempotency_key;

/// POST /payments — authorize an amount, exactly-once per idempotency key.
#[tracing::instrument(skip(store, headers, req))]
pub async fn create(
    State(store): State<PaymentStore>,
    headers: HeaderMap,
    Json(req): Json<PaymentRequest>,
) -> Result<axum::response::Response, ApiError> {
    use axum::response::IntoResponse;

    let key = require_idempotency_key(&headers)?;
    let (payment, created) = store.authorize(&key, &req).await?;

    let response = if created {
        let location = format!("/payments/{}", payment.id);
        (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(payment),
        )
            .into_response()
    } else {
        (StatusCode::OK, Json(payment)).into_response()
    };
    Ok(response)
}

/// GET /payments/:id — look up a recorded payment.
#[tracing::instrument(skip(store))]
pub async fn get(
    State(store): State<PaymentStore>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Payment {id} not found")))?;

    let payment = store
        .get(payment_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Payment {id} not found")))?;

    Ok(Json(payment))
}
