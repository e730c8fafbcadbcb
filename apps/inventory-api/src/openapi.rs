//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Inventory management with image upload"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/inventory", api = domain_inventory::ApiDoc)
    ),
    tags(
        (name = "inventory", description = "Inventory item endpoints")
    )
)]
pub struct ApiDoc;
