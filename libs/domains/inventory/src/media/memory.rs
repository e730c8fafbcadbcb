use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{ImageUpload, MediaError, MediaStore};

/// Records uploads and hands out `memory://media/<n>/<file_name>` URLs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaStore {
    uploads: Arc<Mutex<Vec<ImageUpload>>>,
    failure: Option<String>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every upload fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            uploads: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub async fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().await.clone()
    }

    pub async fn upload_count(&self) -> usize {
        self.uploads.lock().await.len()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        if let Some(message) = &self.failure {
            return Err(MediaError::Rejected {
                status: 503,
                message: message.clone(),
            });
        }

        let mut uploads = self.uploads.lock().await;
        let url = format!("memory://media/{}/{}", uploads.len() + 1, image.file_name);
        uploads.push(image);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_urls_are_sequential() {
        let store = InMemoryMediaStore::new();

        assert_eq!(
            store.upload(image("a.png")).await.unwrap(),
            "memory://media/1/a.png"
        );
        assert_eq!(
            store.upload(image("b.png")).await.unwrap(),
            "memory://media/2/b.png"
        );
        assert_eq!(store.uploads().await[1].file_name, "b.png");
    }

    #[tokio::test]
    async fn test_failing_store_records_nothing() {
        let store = InMemoryMediaStore::failing("quota exceeded");

        let err = store.upload(image("a.png")).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(store.upload_count().await, 0);
    }
}
