use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Item not found with id {0}")]
    NotFound(i64),

    /// Carries the client-facing message, e.g. `Failed to upload image: ...`
    #[error("{0}")]
    UploadFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Convert InventoryError to AppError for standardized error responses
impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotFound(id) => {
                AppError::NotFound(format!("Item not found with id {}", id))
            }
            InventoryError::UploadFailed(msg) => AppError::UploadFailed(msg),
            InventoryError::InvalidInput(msg) => AppError::BadRequest(msg),
            InventoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
