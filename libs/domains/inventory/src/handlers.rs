use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, patch},
};
use axum_helpers::{
    IdPath,
    errors::responses::{
        BadRequestFormResponse, BadRequestIdResponse, InternalServerErrorResponse,
        NotFoundResponse, UploadFailedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{InventoryError, InventoryResult};
use crate::form::{InventoryForm, InventoryFormSchema};
use crate::media::{ImageUpload, MediaStore};
use crate::models::{InventoryItem, NewInventoryItem, ProductView};
use crate::repository::InventoryRepository;
use crate::service::InventoryService;

/// OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items,
        create_item,
        get_item,
        update_item,
        delete_item,
        toggle_item,
        list_enabled,
        list_products,
    ),
    components(
        schemas(InventoryItem, ProductView, InventoryFormSchema),
        responses(
            NotFoundResponse,
            BadRequestFormResponse,
            BadRequestIdResponse,
            UploadFailedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Inventory management endpoints")
    )
)]
pub struct ApiDoc;

/// Shared handler state
pub struct InventoryState<R: InventoryRepository> {
    pub service: InventoryService<R>,
    pub media: Arc<dyn MediaStore>,
}

type SharedState<R> = State<Arc<InventoryState<R>>>;

/// Create the inventory router with all HTTP endpoints
pub fn router<R: InventoryRepository + 'static>(
    service: InventoryService<R>,
    media: Arc<dyn MediaStore>,
) -> Router {
    let state = Arc::new(InventoryState { service, media });

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/enabled", get(list_enabled))
        .route("/products", get(list_products))
        .route(
            "/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/{id}/toggle-disable", patch(toggle_item))
        .with_state(state)
}

/// Uploads the image when one was sent; `context` prefixes the failure message.
async fn upload_image(
    media: &dyn MediaStore,
    image: Option<ImageUpload>,
    context: &str,
) -> InventoryResult<Option<String>> {
    let Some(image) = image else {
        return Ok(None);
    };

    media
        .upload(image)
        .await
        .map(Some)
        .map_err(|e| InventoryError::UploadFailed(format!("{context}: {e}")))
}

/// List every inventory item
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All inventory items", body = Vec<InventoryItem>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: InventoryRepository>(
    State(state): SharedState<R>,
) -> InventoryResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.service.find_all().await?))
}

/// Create an inventory item, uploading its image first when present
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body(content = InventoryFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item created", body = InventoryItem),
        (status = 400, response = BadRequestFormResponse),
        (status = 500, response = UploadFailedResponse)
    )
)]
async fn create_item<R: InventoryRepository>(
    State(state): SharedState<R>,
    multipart: Multipart,
) -> InventoryResult<Json<InventoryItem>> {
    let form = InventoryForm::from_multipart(multipart).await?;

    let image = upload_image(
        state.media.as_ref(),
        form.image,
        "Failed to upload image",
    )
    .await?;

    let item = state
        .service
        .create(NewInventoryItem::from_fields(form.fields, image))
        .await?;
    Ok(Json(item))
}

/// Get an inventory item by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Inventory item id")
    ),
    responses(
        (status = 200, description = "Item found", body = InventoryItem),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_item<R: InventoryRepository>(
    State(state): SharedState<R>,
    IdPath(id): IdPath,
) -> InventoryResult<Json<InventoryItem>> {
    Ok(Json(state.service.find_by_id(id).await?))
}

/// Replace an item's fields; the stored image is kept unless a new one is sent
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Inventory item id")
    ),
    request_body(content = InventoryFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Item updated", body = InventoryItem),
        (status = 400, response = BadRequestFormResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = UploadFailedResponse)
    )
)]
async fn update_item<R: InventoryRepository>(
    State(state): SharedState<R>,
    IdPath(id): IdPath,
    multipart: Multipart,
) -> InventoryResult<Json<InventoryItem>> {
    let form = InventoryForm::from_multipart(multipart).await?;

    // Nothing is uploaded for an item that does not exist.
    state.service.find_by_id(id).await?;

    let image = upload_image(
        state.media.as_ref(),
        form.image,
        "Failed to update image",
    )
    .await?;

    let item = state.service.update(id, form.fields, image).await?;
    Ok(Json(item))
}

/// Delete an inventory item; deleting an unknown id also succeeds
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Inventory item id")
    ),
    responses(
        (status = 200, description = "Item deleted or already absent"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: InventoryRepository>(
    State(state): SharedState<R>,
    IdPath(id): IdPath,
) -> InventoryResult<StatusCode> {
    state.service.delete(id).await?;
    Ok(StatusCode::OK)
}

/// Flip an item between enabled and disabled
#[utoipa::path(
    patch,
    path = "/{id}/toggle-disable",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Inventory item id")
    ),
    responses(
        (status = 200, description = "Item with its new flag", body = InventoryItem),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn toggle_item<R: InventoryRepository>(
    State(state): SharedState<R>,
    IdPath(id): IdPath,
) -> InventoryResult<Json<InventoryItem>> {
    Ok(Json(state.service.toggle_disabled(id).await?))
}

/// List items that are not disabled
#[utoipa::path(
    get,
    path = "/enabled",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "Enabled inventory items", body = Vec<InventoryItem>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_enabled<R: InventoryRepository>(
    State(state): SharedState<R>,
) -> InventoryResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.service.get_enabled().await?))
}

/// Enabled items in storefront form
#[utoipa::path(
    get,
    path = "/products",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "Enabled items without the disabled flag", body = Vec<ProductView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: InventoryRepository>(
    State(state): SharedState<R>,
) -> InventoryResult<Json<Vec<ProductView>>> {
    Ok(Json(state.service.get_products().await?))
}
