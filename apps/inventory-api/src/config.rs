//! Configuration for Inventory API

use core_config::{
    AppInfo, FromEnv, app_info, env_optional, env_or_default, env_parse, env_required,
    server::ServerConfig,
};
use database::postgres::PostgresConfig;
use domain_inventory::{CloudinaryConfig, CloudinaryMediaStore, InMemoryMediaStore, MediaStore};
use std::sync::Arc;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    pub media: MediaSettings,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - DATABASE_URL
        let server = ServerConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", true)?;
        let media = MediaSettings::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
            media,
        })
    }
}

/// Where uploaded images go, selected through `MEDIA_BACKEND`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaSettings {
    Cloudinary(CloudinaryConfig),
    /// Keeps uploads in process memory; local development only
    InMemory,
}

impl MediaSettings {
    pub fn from_env() -> eyre::Result<Self> {
        let backend = env_or_default("MEDIA_BACKEND", "cloudinary");

        match backend.trim().to_ascii_lowercase().as_str() {
            "cloudinary" => {
                let url = env_required("CLOUDINARY_URL")?;
                let config = CloudinaryConfig::from_url(&url)?
                    .with_folder(env_optional("CLOUDINARY_FOLDER"));
                Ok(Self::Cloudinary(config))
            }
            "memory" => Ok(Self::InMemory),
            other => Err(eyre::eyre!(
                "MEDIA_BACKEND must be 'cloudinary' or 'memory', got '{}'",
                other
            )),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::Cloudinary(_) => "cloudinary",
            Self::InMemory => "memory",
        }
    }

    pub fn build(&self) -> eyre::Result<Arc<dyn MediaStore>> {
        Ok(match self {
            Self::Cloudinary(config) => Arc::new(CloudinaryMediaStore::new(config.clone())?),
            Self::InMemory => Arc::new(InMemoryMediaStore::new()),
        })
    }
}
