use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{InventoryError, InventoryResult},
    models::InventoryItem,
    repository::InventoryRepository,
};

/// sea-orm backed repository.
///
/// Named for its production backend; the queries are portable and the
/// integration tests run them against SQLite.
#[derive(Clone)]
pub struct PgInventoryRepository {
    db: DatabaseConnection,
}

impl PgInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn find_all(&self) -> InventoryResult<Vec<InventoryItem>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> InventoryResult<Option<InventoryItem>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, item: InventoryItem) -> InventoryResult<InventoryItem> {
        match item.id {
            None => {
                let active_model: entity::ActiveModel = item.into();
                let model = active_model.insert(&self.db).await?;

                tracing::info!(item_id = model.id, "Created inventory item");
                Ok(model.into())
            }
            Some(id) => {
                let active_model: entity::ActiveModel = item.clone().into();
                let result = entity::Entity::update_many()
                    .set(active_model)
                    .filter(entity::Column::Id.eq(id))
                    .exec(&self.db)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(InventoryError::NotFound(id));
                }

                tracing::info!(item_id = id, "Updated inventory item");
                Ok(item)
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> InventoryResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(item_id = id, "Deleted inventory item");
        }
        Ok(())
    }

    async fn find_enabled(&self) -> InventoryResult<Vec<InventoryItem>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Disabled.eq(false))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
