use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stocked product.
///
/// `id` is `None` only before the first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Bread")]
    pub name: String,
    #[schema(example = "Sourdough loaf")]
    pub description: String,
    /// Public URL of the hosted image, `null` when none was uploaded
    pub image: Option<String>,
    #[schema(example = 3.5)]
    pub price: f64,
    #[schema(example = 10)]
    pub stock: i32,
    #[schema(example = "Bakery")]
    pub category: String,
    pub disabled: bool,
}

impl InventoryItem {
    /// Replaces the editable fields. The image is replaced only when a new URL is given.
    pub fn apply(&mut self, fields: InventoryFields, image: Option<String>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.stock = fields.stock;
        self.category = fields.category;
        if let Some(url) = image {
            self.image = Some(url);
        }
    }
}

/// Display projection for storefront clients; never exposes `disabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductView {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: String,
}

impl From<InventoryItem> for ProductView {
    fn from(item: InventoryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            image: item.image,
            price: item.price,
            stock: item.stock,
            category: item.category,
        }
    }
}

/// The fields a client edits through the create and update forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
}

/// Construction request; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewInventoryItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub image: Option<String>,
}

impl NewInventoryItem {
    pub fn from_fields(fields: InventoryFields, image: Option<String>) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            stock: fields.stock,
            category: fields.category,
            image,
        }
    }
}

impl From<NewInventoryItem> for InventoryItem {
    fn from(new: NewInventoryItem) -> Self {
        Self {
            id: None,
            name: new.name,
            description: new.description,
            image: new.image,
            price: new.price,
            stock: new.stock,
            category: new.category,
            disabled: false,
        }
    }
}
