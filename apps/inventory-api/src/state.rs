//! Application state management

use domain_inventory::MediaStore;
use std::sync::Arc;

/// Shared application state, cloned into routers (cheap `Arc` clones)
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Image host shared by every handler
    pub media: Arc<dyn MediaStore>,
}
