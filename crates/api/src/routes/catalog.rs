//! Catalog endpoints.

use axum::Json;
use axum::extract::{Path, State};
use common::ItemId;
use domain::{CatalogItem, CatalogStore};

use crate::error::ApiError;

/// GET /items — all catalog items, sorted by name.
#[tracing::instrument(skip(store))]
pub async fn list(State(store): State<CatalogStore>) -> Json<Vec<CatalogItem>> {
    Json(store.all())
}

/// GET /items/:id — look up a catalog item.
#[tracing::instrument(skip(store))]
pub async fn get(
    State(store): State<CatalogStore>,
    Path(id): Path<String>,
) -> Result<Json<CatalogItem>, ApiError> {
    let item_id: ItemId = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Item {id} not found")))?;

    let item = store
        .get(item_id)
        .ok_or_else(|| ApiError::NotFound(format!("Item {id} not found")))?;

    Ok(Json(item))
}
