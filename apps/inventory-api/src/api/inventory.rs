use axum::Router;
use domain_inventory::{InventoryService, PgInventoryRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgInventoryRepository::new(state.db.clone());
    let service = InventoryService::new(repository);
    handlers::router(service, state.media.clone())
}
