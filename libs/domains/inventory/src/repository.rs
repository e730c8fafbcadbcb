use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{InventoryError, InventoryResult};
use crate::models::InventoryItem;

/// Repository trait for inventory persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Every item, ordered by id
    async fn find_all(&self) -> InventoryResult<Vec<InventoryItem>>;

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<InventoryItem>>;

    /// Inserts when `item.id` is `None`, otherwise rewrites the whole row.
    /// Rewriting a missing row is `NotFound`.
    async fn save(&self, item: InventoryItem) -> InventoryResult<InventoryItem>;

    /// Removing an absent id is a no-op
    async fn delete_by_id(&self, id: i64) -> InventoryResult<()>;

    /// Items with `disabled = false`, ordered by id
    async fn find_enabled(&self) -> InventoryResult<Vec<InventoryItem>>;
}

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i64, InventoryItem>,
    last_id: i64,
}

/// In-memory implementation of InventoryRepository (for development/testing)
///
/// Ids come from a counter that only moves forward, so deleted ids are never reissued.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn find_all(&self) -> InventoryResult<Vec<InventoryItem>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<InventoryItem>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn save(&self, mut item: InventoryItem) -> InventoryResult<InventoryItem> {
        let mut store = self.store.write().await;

        match item.id {
            None => {
                store.last_id += 1;
                let id = store.last_id;
                item.id = Some(id);
                store.items.insert(id, item.clone());
                tracing::info!(item_id = id, "Created inventory item");
            }
            Some(id) => {
                let slot = store
                    .items
                    .get_mut(&id)
                    .ok_or(InventoryError::NotFound(id))?;
                *slot = item.clone();
                tracing::info!(item_id = id, "Updated inventory item");
            }
        }

        Ok(item)
    }

    async fn delete_by_id(&self, id: i64) -> InventoryResult<()> {
        let mut store = self.store.write().await;
        if store.items.remove(&id).is_some() {
            tracing::info!(item_id = id, "Deleted inventory item");
        }
        Ok(())
    }

    async fn find_enabled(&self) -> InventoryResult<Vec<InventoryItem>> {
        let store = self.store.read().await;
        Ok(store
            .items
            .values()
            .filter(|item| !item.disabled)
            .cloned()
            .collect())
    }
}
