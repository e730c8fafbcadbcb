//! Image hosting.
//!
//! Handlers hand uploaded bytes to a [`MediaStore`] and persist the URL it
//! returns. [`CloudinaryMediaStore`] talks to Cloudinary's upload API;
//! [`InMemoryMediaStore`] serves tests and local development.

mod cloudinary;
mod memory;

pub use cloudinary::{CloudinaryConfig, CloudinaryMediaStore};
pub use memory::InMemoryMediaStore;

use async_trait::async_trait;
use thiserror::Error;

/// An image received from a client, before upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid media configuration: {0}")]
    Config(String),

    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upload rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected upload response: {0}")]
    InvalidResponse(String),
}

/// Uploads an image and returns its public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError>;
}
