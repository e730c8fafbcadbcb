//! Handler tests for the Inventory domain
//!
//! Drive the domain router directly (no `/api/inventory` prefix) with
//! multipart bodies, an in-memory or SQLite repository, and an in-memory
//! media store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_inventory::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use test_utils::{MultipartBody, TestDatabase};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app_with(media: InMemoryMediaStore) -> (Router, InMemoryInventoryRepository) {
    let repo = InMemoryInventoryRepository::new();
    let router = handlers::router(InventoryService::new(repo.clone()), Arc::new(media));
    (router, repo)
}

fn bread_form(stock: &str) -> MultipartBody {
    MultipartBody::new()
        .text("name", "Bread")
        .text("description", "Sourdough loaf")
        .text("price", "3.50")
        .text("stock", stock)
        .text("category", "Bakery")
}

fn form_request(method: &str, uri: &str, form: MultipartBody) -> Request<Body> {
    let (content_type, body) = form.finish();
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn seed(repo: &InMemoryInventoryRepository, name: &str, disabled: bool) -> InventoryItem {
    repo.save(InventoryItem {
        id: None,
        name: name.to_string(),
        description: format!("{name} description"),
        image: Some(format!("https://img/{name}")),
        price: 2.0,
        stock: 4,
        category: "Pantry".to_string(),
        disabled,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_without_image() {
    let media = InMemoryMediaStore::new();
    let (app, _repo) = app_with(media.clone());

    let response = app
        .oneshot(form_request("POST", "/", bread_form("10")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "Bread");
    assert_eq!(body["price"], 3.5);
    assert_eq!(body["stock"], 10);
    assert!(body["image"].is_null());
    assert_eq!(body["disabled"], false);
    assert_eq!(media.upload_count().await, 0);
}

#[tokio::test]
async fn test_create_with_image_stores_returned_url() {
    let media = InMemoryMediaStore::new();
    let (app, repo) = app_with(media.clone());

    let form = bread_form("10").file("image", "bread.png", "image/png", b"\x89PNG\r\n");
    let response = app.oneshot(form_request("POST", "/", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(created.image.as_deref(), Some("memory://media/1/bread.png"));

    let uploads = media.uploads().await;
    assert_eq!(uploads[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(uploads[0].bytes, b"\x89PNG\r\n");

    let stored = repo.find_by_id(created.id.unwrap()).await.unwrap();
    assert_eq!(stored, Some(created));
}

#[tokio::test]
async fn test_create_with_empty_image_part_skips_upload() {
    let media = InMemoryMediaStore::new();
    let (app, _repo) = app_with(media.clone());

    let form = bread_form("10").file("image", "", "application/octet-stream", b"");
    let response = app.oneshot(form_request("POST", "/", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let created: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(created.image, None);
    assert_eq!(media.upload_count().await, 0);
}

#[tokio::test]
async fn test_create_upload_failure_persists_nothing() {
    let (app, repo) = app_with(InMemoryMediaStore::failing("quota exceeded"));

    let form = bread_form("10").file("image", "bread.png", "image/png", b"png");
    let response = app.oneshot(form_request("POST", "/", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to upload image: "));
    assert!(message.contains("quota exceeded"));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_bad_price_is_400() {
    let (app, repo) = app_with(InMemoryMediaStore::new());

    let form = MultipartBody::new()
        .text("name", "Bread")
        .text("description", "Sourdough")
        .text("price", "abc")
        .text("stock", "1")
        .text("category", "Bakery");
    let response = app.oneshot(form_request("POST", "/", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("'price'"));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_missing_field_is_400() {
    let (app, _repo) = app_with(InMemoryMediaStore::new());

    let form = MultipartBody::new().text("name", "Bread");
    let response = app.oneshot(form_request("POST", "/", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_item_found_missing_and_malformed() {
    let (app, repo) = app_with(InMemoryMediaStore::new());
    let item = seed(&repo, "Rice", false).await;
    let id = item.id.unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(fetched, item);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Item not found with id 999");

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_hides_item_from_enabled_only() {
    let (app, repo) = app_with(InMemoryMediaStore::new());
    let item = seed(&repo, "Bread", false).await;
    let id = item.id.unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("PATCH", &format!("/{id}/toggle-disable")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let toggled: InventoryItem = json_body(response.into_body()).await;
    assert!(toggled.disabled);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/enabled"))
        .await
        .unwrap();
    let enabled: Vec<InventoryItem> = json_body(response.into_body()).await;
    assert!(enabled.iter().all(|i| i.id != Some(id)));

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let all: Vec<InventoryItem> = json_body(response.into_body()).await;
    assert!(all.iter().any(|i| i.id == Some(id) && i.disabled));
}

#[tokio::test]
async fn test_toggle_missing_item_is_404() {
    let (app, _repo) = app_with(InMemoryMediaStore::new());

    let response = app
        .oneshot(empty_request("PATCH", "/5/toggle-disable"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_image_keeps_stored_image() {
    let media = InMemoryMediaStore::new();
    let (app, repo) = app_with(media.clone());
    let item = seed(&repo, "Bread", true).await;
    let id = item.id.unwrap();

    let response = app
        .oneshot(form_request("PUT", &format!("/{id}"), bread_form("5")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(updated.stock, 5);
    assert_eq!(updated.price, 3.5);
    assert_eq!(updated.description, "Sourdough loaf");
    assert_eq!(updated.image, item.image);
    assert!(updated.disabled);
    assert_eq!(media.upload_count().await, 0);
}

#[tokio::test]
async fn test_update_with_image_replaces_it() {
    let (app, repo) = app_with(InMemoryMediaStore::new());
    let item = seed(&repo, "Bread", false).await;
    let id = item.id.unwrap();

    let form = bread_form("5").file("image", "new.jpg", "image/jpeg", b"jpeg");
    let response = app
        .oneshot(form_request("PUT", &format!("/{id}"), form))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(updated.image.as_deref(), Some("memory://media/1/new.jpg"));
}

#[tokio::test]
async fn test_update_missing_item_is_404_without_upload() {
    let media = InMemoryMediaStore::new();
    let (app, _repo) = app_with(media.clone());

    let form = bread_form("5").file("image", "new.jpg", "image/jpeg", b"jpeg");
    let response = app.oneshot(form_request("PUT", "/41", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(media.upload_count().await, 0);
}

#[tokio::test]
async fn test_update_upload_failure_leaves_item_untouched() {
    let (app, repo) = app_with(InMemoryMediaStore::failing("timeout"));
    let item = seed(&repo, "Bread", false).await;
    let id = item.id.unwrap();

    let form = bread_form("1").file("image", "new.jpg", "image/jpeg", b"jpeg");
    let response = app
        .oneshot(form_request("PUT", &format!("/{id}"), form))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to update image: ")
    );
    assert_eq!(repo.find_by_id(id).await.unwrap(), Some(item));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (app, repo) = app_with(InMemoryMediaStore::new());
    let id = seed(&repo, "Bread", false).await.id.unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    assert_eq!(repo.find_by_id(id).await.unwrap(), None);
}

#[tokio::test]
async fn test_products_lists_enabled_items_without_flag() {
    let (app, repo) = app_with(InMemoryMediaStore::new());
    seed(&repo, "Bread", false).await;
    seed(&repo, "Cake", true).await;
    seed(&repo, "Milk", false).await;

    let response = app.oneshot(empty_request("GET", "/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    for product in &products {
        assert!(product.get("disabled").is_none());
    }
    assert_eq!(products[0]["name"], "Bread");
    assert_eq!(products[1]["name"], "Milk");
}

#[tokio::test]
async fn test_full_flow_against_sqlite() {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    let app = handlers::router(
        InventoryService::new(repo),
        Arc::new(InMemoryMediaStore::new()),
    );

    let form = bread_form("10").file("image", "bread.png", "image/png", b"png");
    let response = app
        .clone()
        .oneshot(form_request("POST", "/", form))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: InventoryItem = json_body(response.into_body()).await;
    let id = created.id.unwrap();

    let response = app
        .clone()
        .oneshot(form_request("PUT", &format!("/{id}"), bread_form("5")))
        .await
        .unwrap();
    let updated: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(updated.stock, 5);
    assert_eq!(updated.image, created.image);

    let response = app
        .clone()
        .oneshot(empty_request("PATCH", &format!("/{id}/toggle-disable")))
        .await
        .unwrap();
    let toggled: InventoryItem = json_body(response.into_body()).await;
    assert!(toggled.disabled);

    let response = app.oneshot(empty_request("GET", "/products")).await.unwrap();
    let products: Vec<ProductView> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}
