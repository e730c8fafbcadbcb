//! Multipart form parsing shared by the create and update endpoints.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::{InventoryError, InventoryResult};
use crate::media::ImageUpload;
use crate::models::InventoryFields;

const IMAGE_FIELD: &str = "image";
const DEFAULT_FILE_NAME: &str = "upload";

/// A parsed `multipart/form-data` inventory submission.
///
/// An `image` part with an empty body counts as no image. Unknown parts are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryForm {
    pub fields: InventoryFields,
    pub image: Option<ImageUpload>,
}

/// OpenAPI shape of the form; parsing goes through [`InventoryForm`].
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct InventoryFormSchema {
    #[schema(example = "Bread")]
    name: String,
    #[schema(example = "Sourdough loaf")]
    description: String,
    #[schema(example = 3.5)]
    price: f64,
    #[schema(example = 10)]
    stock: i32,
    #[schema(example = "Bakery")]
    category: String,
    #[schema(value_type = Option<String>, format = Binary)]
    image: Option<Vec<u8>>,
}

#[derive(Default)]
struct RawFields {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    stock: Option<String>,
    category: Option<String>,
}

impl InventoryForm {
    pub async fn from_multipart(mut multipart: Multipart) -> InventoryResult<Self> {
        let mut raw = RawFields::default();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| InventoryError::InvalidInput(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            let slot = match name.as_str() {
                IMAGE_FIELD => {
                    image = read_image(field).await?;
                    continue;
                }
                "name" => &mut raw.name,
                "description" => &mut raw.description,
                "price" => &mut raw.price,
                "stock" => &mut raw.stock,
                "category" => &mut raw.category,
                _ => continue,
            };

            let text = field.text().await.map_err(|e| {
                InventoryError::InvalidInput(format!("Unreadable field '{name}': {e}"))
            })?;
            *slot = Some(text);
        }

        Ok(Self {
            fields: raw.into_fields()?,
            image,
        })
    }
}

impl RawFields {
    fn into_fields(self) -> InventoryResult<InventoryFields> {
        let price: f64 = parse("price", self.price)?;
        if !price.is_finite() {
            return Err(InventoryError::InvalidInput(
                "Invalid value for field 'price'".to_string(),
            ));
        }

        Ok(InventoryFields {
            name: required("name", self.name)?,
            description: required("description", self.description)?,
            price,
            stock: parse("stock", self.stock)?,
            category: required("category", self.category)?,
        })
    }
}

async fn read_image(field: Field<'_>) -> InventoryResult<Option<ImageUpload>> {
    let file_name = field
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_owned();
    let content_type = field.content_type().map(str::to_owned);

    let bytes = field
        .bytes()
        .await
        .map_err(|e| InventoryError::InvalidInput(format!("Unreadable field 'image': {e}")))?;

    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(ImageUpload {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    }))
}

fn required(name: &str, value: Option<String>) -> InventoryResult<String> {
    value.ok_or_else(|| InventoryError::InvalidInput(format!("Missing required field '{name}'")))
}

fn parse<T: FromStr>(name: &str, value: Option<String>) -> InventoryResult<T> {
    let value = required(name, value)?;
    value.trim().parse().map_err(|_| {
        InventoryError::InvalidInput(format!("Invalid value for field '{name}': '{value}'"))
    })
}
