//! Catalog collaborator gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::ItemId;
use domain::{CatalogItem, CatalogStore};
use reqwest::StatusCode;

use super::GatewayError;

/// Item lookup against the catalog collaborator.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Resolves an item by id; `None` means the catalog does not know it.
    async fn item(&self, id: ItemId) -> Result<Option<CatalogItem>, GatewayError>;
}

/// HTTP client for the catalog service.
#[derive(Debug, Clone)]
pub struct HttpCatalogGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogGateway {
    /// Creates a gateway talking to the catalog service at `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn item(&self, id: ItemId) -> Result<Option<CatalogItem>, GatewayError> {
        let url = format!("{}/items/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status()?;
        let item = response.json::<CatalogItem>().await?;
        Ok(Some(item))
    }
}

/// In-memory catalog gateway over a [`CatalogStore`], for tests and local
/// single-process wiring.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogGateway {
    store: CatalogStore,
    unavailable: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryCatalogGateway {
    /// Creates a gateway over the given store.
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store,
            unavailable: Arc::new(AtomicBool::new(false)),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes every subsequent lookup fail with a transport error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups attempted so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalogGateway {
    async fn item(&self, id: ItemId) -> Result<Option<CatalogItem>, GatewayError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("catalog unavailable".to_string()));
        }
        Ok(self.store.get(id))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[tokio::test]
    async fn in_memory_gateway_resolves_seeded_item() {
        let gateway = InMemoryCatalogGateway::new(CatalogStore::with_seed_items());
        let coffee_id: ItemId = "11111111-1111-1111-1111-111111111111".parse().unwrap();

        let item = gateway.item(coffee_id).await.unwrap().unwrap();
        assert_eq!(item.name, "Coffee");
        assert_eq!(item.price, dec!(3.50));
        assert_eq!(gateway.lookup_count(), 1);
    }

    #[tokio::test]
    async fn in_memory_gateway_returns_none_for_unknown_item() {
        let gateway = InMemoryCatalogGateway::new(CatalogStore::with_seed_items());
        assert!(gateway.item(ItemId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_gateway_can_simulate_outage() {
        let gateway = InMemoryCatalogGateway::new(CatalogStore::with_seed_items());
        gateway.set_unavailable(true);

        let result = gateway.item(ItemId::new()).await;
        assert!(matches!(result, Err(GatewayError::Transport(_))));
    }
}
