use std::sync::Arc;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{InventoryFields, InventoryItem, NewInventoryItem, ProductView};
use crate::repository::InventoryRepository;

/// Service layer over an [`InventoryRepository`].
///
/// Turns a missing row into [`InventoryError::NotFound`] and builds the
/// create, update and toggle flows out of the repository's five operations.
#[derive(Clone)]
pub struct InventoryService<R: InventoryRepository> {
    repository: Arc<R>,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn find_all(&self) -> InventoryResult<Vec<InventoryItem>> {
        self.repository.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> InventoryResult<InventoryItem> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(InventoryError::NotFound(id))
    }

    pub async fn save(&self, item: InventoryItem) -> InventoryResult<InventoryItem> {
        self.repository.save(item).await
    }

    pub async fn delete(&self, id: i64) -> InventoryResult<()> {
        self.repository.delete_by_id(id).await
    }

    pub async fn get_enabled(&self) -> InventoryResult<Vec<InventoryItem>> {
        self.repository.find_enabled().await
    }

    /// Stores a new, enabled item.
    pub async fn create(&self, input: NewInventoryItem) -> InventoryResult<InventoryItem> {
        self.repository.save(input.into()).await
    }

    /// Full replacement of the editable fields; `image` is replaced only when `Some`.
    pub async fn update(
        &self,
        id: i64,
        fields: InventoryFields,
        image: Option<String>,
    ) -> InventoryResult<InventoryItem> {
        let mut item = self.find_by_id(id).await?;
        item.apply(fields, image);
        self.repository.save(item).await
    }

    /// Flips `disabled` and persists the whole record.
    pub async fn toggle_disabled(&self, id: i64) -> InventoryResult<InventoryItem> {
        let mut item = self.find_by_id(id).await?;
        item.disabled = !item.disabled;

        let item = self.repository.save(item).await?;
        tracing::info!(item_id = id, disabled = item.disabled, "Toggled inventory item");
        Ok(item)
    }

    /// Enabled items as storefront views
    pub async fn get_products(&self) -> InventoryResult<Vec<ProductView>> {
        let items = self.repository.find_enabled().await?;
        Ok(items.into_iter().map(ProductView::from).collect())
    }
}
