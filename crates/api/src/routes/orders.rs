//! Order creation and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use common::{ItemId, OrderId};
use domain::Order;
use serde::Deserialize;
use workflow::{CatalogGateway, OrderWorkflow, PaymentGateway};

use crate::error::ApiError;
use crate::routes::require_idempotency_key;

/// Shared state of the order service app.
pub struct OrderAppState<C, P> {
    pub workflow: OrderWorkflow<C, P>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub item_ids: Vec<ItemId>,
}

/// POST /orders — run the create-order workflow.
///
/// Returns 201 with the order on first creation and 200 on an idempotent
/// replay of the same key and payload.
#[tracing::instrument(skip(state, headers, req))]
pub async fn create<C, P>(
    State(state): State<Arc<OrderAppState<C, P>>>,
    headers: HeaderMap,
    Json(req): Json<CreateOrderRequest>,
) -> Result<axum::response::Response, ApiError>
where
    C: CatalogGateway + 'static,
    P: PaymentGateway + 'static,
{
    use axum::response::IntoResponse;

    let key = require_idempotency_key(&headers)?;
    let (order, created) = state.workflow.place_order(&key, &req.item_ids).await?;

    let response = if created {
        let location = format!("/orders/{}", order.id);
        (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(order),
        )
            .into_response()
    } else {
        (StatusCode::OK, Json(order)).into_response()
    };
    Ok(response)
}

/// GET /orders/:id — look up a recorded order.
#[tracing::instrument(skip(state))]
pub async fn get<C, P>(
    State(state): State<Arc<OrderAppState<C, P>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError>
where
    C: CatalogGateway + 'static,
    P: PaymentGateway + 'static,
{
    // A malformed id cannot name any order, so it resolves like an
    // unknown one.
    let order_id: OrderId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Order {id} not found")))?;

    let order = state
        .workflow
        .orders()
        .get(order_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(order))
}
