//! Inventory Domain
//!
//! CRUD over inventory items, an enabled/disabled visibility flag, and image
//! upload to an external media host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  Handlers   │────▶│ MediaStore  │  ← image upload (Cloudinary / in-memory)
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← not-found translation, toggle, projections
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + sea-orm / in-memory implementations)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_inventory::{
//!     handlers,
//!     media::InMemoryMediaStore,
//!     repository::InMemoryInventoryRepository,
//!     service::InventoryService,
//! };
//!
//! let service = InventoryService::new(InMemoryInventoryRepository::new());
//! let router = handlers::router(service, Arc::new(InMemoryMediaStore::new()));
//! ```

pub mod entity;
pub mod error;
pub mod form;
pub mod handlers;
pub mod media;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{InventoryError, InventoryResult};
pub use form::InventoryForm;
pub use handlers::ApiDoc;
pub use media::{
    CloudinaryConfig, CloudinaryMediaStore, ImageUpload, InMemoryMediaStore, MediaError,
    MediaStore,
};
pub use models::{InventoryFields, InventoryItem, NewInventoryItem, ProductView};
pub use postgres::PgInventoryRepository;
pub use repository::{InMemoryInventoryRepository, InventoryRepository};
pub use service::InventoryService;
