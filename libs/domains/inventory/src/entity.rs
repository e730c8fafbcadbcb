use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;

use crate::models::InventoryItem;

/// Sea-ORM entity for the `inventory` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub disabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "inventory";
}

impl From<Model> for InventoryItem {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            image: model.image,
            price: model.price,
            stock: model.stock,
            category: model.category,
            disabled: model.disabled,
        }
    }
}

/// Every column is `Set`; the key is left for the store on insert and kept
/// `Unchanged` on update so it is used only for matching.
impl From<InventoryItem> for ActiveModel {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: match item.id {
                Some(id) => Unchanged(id),
                None => NotSet,
            },
            name: Set(item.name),
            description: Set(item.description),
            image: Set(item.image),
            price: Set(item.price),
            stock: Set(item.stock),
            category: Set(item.category),
            disabled: Set(item.disabled),
        }
    }
}
