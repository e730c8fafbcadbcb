use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;

use super::{ImageUpload, MediaError, MediaStore};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials for signed uploads.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Target folder inside the media library
    pub folder: Option<String>,
}

impl CloudinaryConfig {
    /// Parses `cloudinary://<api_key>:<api_secret>@<cloud_name>`.
    pub fn from_url(raw: &str) -> Result<Self, MediaError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| MediaError::Config(format!("CLOUDINARY_URL is not a valid URL: {e}")))?;

        if url.scheme() != "cloudinary" {
            return Err(MediaError::Config(format!(
                "CLOUDINARY_URL must use the cloudinary:// scheme, got '{}'",
                url.scheme()
            )));
        }

        let api_key = url.username();
        let api_secret = url.password().unwrap_or_default();
        let cloud_name = url.host_str().unwrap_or_default();

        if api_key.is_empty() || api_secret.is_empty() || cloud_name.is_empty() {
            return Err(MediaError::Config(
                "CLOUDINARY_URL must look like cloudinary://<api_key>:<api_secret>@<cloud_name>"
                    .to_string(),
            ));
        }

        Ok(Self {
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            folder: None,
        })
    }

    pub fn with_folder(mut self, folder: Option<String>) -> Self {
        self.folder = folder;
        self
    }

    /// Signed parameters in alphabetical order, joined as a query string.
    fn string_to_sign(&self, timestamp: i64) -> String {
        match &self.folder {
            Some(folder) => format!("folder={folder}&timestamp={timestamp}"),
            None => format!("timestamp={timestamp}"),
        }
    }

    /// Hex SHA-256 of the signed parameters followed by the API secret.
    fn sign(&self, timestamp: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.string_to_sign(timestamp).as_bytes());
        hasher.update(self.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("folder", &self.folder)
            .finish()
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Uploads through Cloudinary's signed image upload endpoint.
#[derive(Clone, Debug)]
pub struct CloudinaryMediaStore {
    client: Client,
    config: CloudinaryConfig,
    upload_url: String,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let upload_url = format!("{}/{}/image/upload", API_BASE, config.cloud_name);
        Self::with_upload_url(config, upload_url)
    }

    /// Same as [`new`](Self::new) but posting to `upload_url`; used against local fakes.
    pub fn with_upload_url(
        config: CloudinaryConfig,
        upload_url: impl Into<String>,
    ) -> Result<Self, MediaError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            config,
            upload_url: upload_url.into(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    fn form(&self, image: ImageUpload, timestamp: i64) -> Result<Form, MediaError> {
        let mut file = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            file = file.mime_str(content_type)?;
        }

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", self.config.sign(timestamp))
            .text("signature_algorithm", "sha256");

        if let Some(folder) = &self.config.folder {
            form = form.text("folder", folder.clone());
        }

        Ok(form)
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        let file_name = image.file_name.clone();
        let size = image.bytes.len();
        let timestamp = chrono::Utc::now().timestamp();

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(self.form(image, timestamp)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);

            tracing::warn!(
                status = status.as_u16(),
                %message,
                file_name = %file_name,
                "Cloudinary rejected upload"
            );
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        tracing::info!(file_name = %file_name, size, url = %uploaded.secure_url, "Uploaded image");
        Ok(uploaded.secure_url)
    }
}
