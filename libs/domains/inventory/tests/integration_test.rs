//! Integration tests for the sea-orm repository
//!
//! Run against a migrated in-memory SQLite database; the `#[ignore]`d test
//! repeats the core flow on PostgreSQL via testcontainers.

use domain_inventory::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn new_item(builder: &TestDataBuilder, suffix: &str) -> InventoryItem {
    NewInventoryItem {
        name: builder.name("item", suffix),
        description: format!("{suffix} description"),
        price: builder.price(),
        stock: builder.stock(),
        category: builder.category(),
        image: None,
    }
    .into()
}

async fn repository() -> (TestDatabase, PgInventoryRepository) {
    let db = TestDatabase::new().await;
    let repo = PgInventoryRepository::new(db.connection());
    (db, repo)
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_save_assigns_id_and_round_trips() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("save_round_trip");

    let created = repo.save(new_item(&builder, "main")).await.unwrap();

    let id = created.id.expect("store assigns an id");
    assert!(!created.disabled);
    assert_eq!(repo.find_by_id(id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_find_by_id_absent_is_none() {
    let (_db, repo) = repository().await;
    assert_eq!(repo.find_by_id(404).await.unwrap(), None);
}

#[tokio::test]
async fn test_save_with_id_rewrites_every_column() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("full_update");

    let mut item = repo.save(new_item(&builder, "main")).await.unwrap();
    item.name = "Renamed".to_string();
    item.description = "Changed".to_string();
    item.image = Some("https://img/renamed".to_string());
    item.price = 9.25;
    item.stock = 1;
    item.category = "Dairy".to_string();
    item.disabled = true;

    let saved = repo.save(item.clone()).await.unwrap();

    assert_eq!(saved, item);
    assert_eq!(repo.find_by_id(item.id.unwrap()).await.unwrap(), Some(item));
}

#[tokio::test]
async fn test_save_with_unknown_id_is_not_found() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("update_missing");

    let mut ghost = new_item(&builder, "ghost");
    ghost.id = Some(77);

    let result = repo.save(ghost).await;
    assert!(matches!(result, Err(InventoryError::NotFound(77))));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("delete_twice");

    let id = repo
        .save(new_item(&builder, "main"))
        .await
        .unwrap()
        .id
        .unwrap();

    repo.delete_by_id(id).await.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap(), None);

    repo.delete_by_id(id).await.unwrap();
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("no_reuse");

    let first = repo.save(new_item(&builder, "a")).await.unwrap();
    let second = repo.save(new_item(&builder, "b")).await.unwrap();
    repo.delete_by_id(second.id.unwrap()).await.unwrap();
    let third = repo.save(new_item(&builder, "c")).await.unwrap();

    assert!(third.id > second.id);
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_find_all_and_find_enabled_ordering() {
    let (_db, repo) = repository().await;
    let builder = TestDataBuilder::from_test_name("ordering");

    let a = repo.save(new_item(&builder, "a")).await.unwrap();
    let mut b = repo.save(new_item(&builder, "b")).await.unwrap();
    let c = repo.save(new_item(&builder, "c")).await.unwrap();

    b.disabled = true;
    repo.save(b.clone()).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all, vec![a.clone(), b, c.clone()]);

    let enabled = repo.find_enabled().await.unwrap();
    assert_eq!(enabled, vec![a, c]);
}

// ============================================================================
// Service Tests (real database)
// ============================================================================

#[tokio::test]
async fn test_toggle_twice_restores_flag() {
    let db = TestDatabase::new().await;
    let service = InventoryService::new(PgInventoryRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("toggle_twice");

    let created = service
        .create(NewInventoryItem::from_fields(
            InventoryFields {
                name: builder.name("item", "main"),
                description: "Toggle me".to_string(),
                price: builder.price(),
                stock: builder.stock(),
                category: builder.category(),
            },
            Some("https://img/original".to_string()),
        ))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let once = service.toggle_disabled(id).await.unwrap();
    assert!(once.disabled);
    assert!(service.get_enabled().await.unwrap().is_empty());

    let twice = service.toggle_disabled(id).await.unwrap();
    assert_eq!(twice, created);
}

#[tokio::test]
async fn test_toggle_missing_item_is_not_found() {
    let db = TestDatabase::new().await;
    let service = InventoryService::new(PgInventoryRepository::new(db.connection()));

    let result = service.toggle_disabled(12).await;
    assert!(matches!(result, Err(InventoryError::NotFound(12))));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_round_trip_on_postgres() {
    let db = TestDatabase::postgres().await;
    let repo = PgInventoryRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("postgres_round_trip");

    let created = repo.save(new_item(&builder, "main")).await.unwrap();
    let id = created.id.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap(), Some(created));

    repo.delete_by_id(id).await.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap(), None);
}
