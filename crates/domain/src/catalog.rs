//! Catalog items and the seeded in-memory catalog store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::ItemId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A purchasable item as the catalog service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
}

impl CatalogItem {
    /// Creates a catalog item.
    pub fn new(id: ItemId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Read-mostly in-memory catalog.
///
/// The catalog is a collaborator from the order workflow's point of view;
/// this store backs the standalone catalog service and the in-memory
/// catalog gateway used in tests.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Arc<RwLock<HashMap<ItemId, CatalogItem>>>,
}

impl CatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the standard demo items.
    ///
    /// Fixed IDs make it easier to test across services.
    pub fn with_seed_items() -> Self {
        let store = Self::new();
        let seed = [
            CatalogItem::new(
                ItemId::from_uuid(uuid::Uuid::from_u128(0x11111111_1111_1111_1111_111111111111)),
                "Coffee",
                dec!(3.50),
            ),
            CatalogItem::new(
                ItemId::from_uuid(uuid::Uuid::from_u128(0x22222222_2222_2222_2222_222222222222)),
                "Tea",
                dec!(2.75),
            ),
            CatalogItem::new(
                ItemId::from_uuid(uuid::Uuid::from_u128(0x33333333_3333_3333_3333_333333333333)),
                "Sandwich",
                dec!(6.25),
            ),
        ];
        for item in seed {
            store.insert(item);
        }
        store
    }

    /// Adds or replaces an item.
    pub fn insert(&self, item: CatalogItem) {
        self.items.write().unwrap().insert(item.id, item);
    }

    /// Looks up an item by id.
    pub fn get(&self, id: ItemId) -> Option<CatalogItem> {
        self.items.read().unwrap().get(&id).cloned()
    }

    /// Returns all items sorted by name.
    pub fn all(&self) -> Vec<CatalogItem> {
        let mut items: Vec<_> = self.items.read().unwrap().values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_has_three_items() {
        let store = CatalogStore::with_seed_items();
        let items = store.all();
        assert_eq!(items.len(), 3);
        // Sorted by name.
        assert_eq!(items[0].name, "Coffee");
        assert_eq!(items[1].name, "Sandwich");
        assert_eq!(items[2].name, "Tea");
    }

    #[test]
    fn get_returns_seeded_item_by_fixed_id() {
        let store = CatalogStore::with_seed_items();
        let coffee_id: ItemId = "11111111-1111-1111-1111-111111111111".parse().unwrap();

        let item = store.get(coffee_id).unwrap();
        assert_eq!(item.name, "Coffee");
        assert_eq!(item.price, dec!(3.50));
    }

    #[test]
    fn get_unknown_id_returns_none() {
        let store = CatalogStore::with_seed_items();
        assert_eq!(store.get(ItemId::new()), None);
    }

    #[test]
    fn insert_replaces_existing_item() {
        let store = CatalogStore::new();
        let id = ItemId::new();
        store.insert(CatalogItem::new(id, "Widget", dec!(1.00)));
        store.insert(CatalogItem::new(id, "Widget", dec!(2.00)));

        assert_eq!(store.get(id).unwrap().price, dec!(2.00));
        assert_eq!(store.all().len(), 1);
    }
}
