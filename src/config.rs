//! Client configuration loaded from TOML.
//!
//! Lookup order: the file named by `MEMEVERSE_CONFIG`, then
//! `./data/memeverse.toml`, then built-in defaults. `MEMEVERSE_IMGBB_KEY`
//! overrides the upload key from any source.

use crate::error::AppError;
use crate::image_processing::MAX_IMAGE_BYTES;
use crate::models::Theme;
use image_host::ImageHostConfig;
use meme_catalog::{CatalogClient, DEFAULT_CATALOG_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "MEMEVERSE_CONFIG";
pub const API_KEY_ENV: &str = "MEMEVERSE_IMGBB_KEY";
pub const CONFIG_FILE: &str = "memeverse.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the database
    pub data_dir: PathBuf,
    pub catalog_url: String,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// Stands in for the OS color-scheme signal when set
    pub preferred_theme: Option<Theme>,
    pub image_host: ImageHostSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageHostSettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout_secs: 30,
            max_upload_bytes: MAX_IMAGE_BYTES,
            preferred_theme: None,
            image_host: ImageHostSettings::default(),
        }
    }
}

impl Default for ImageHostSettings {
    fn default() -> Self {
        let defaults = ImageHostConfig::default();
        Self {
            endpoint: defaults.endpoint,
            api_key: defaults.api_key,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

impl AppConfig {
    /// Parses a TOML document; missing fields keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Reads the config file at `path`
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Resolves the configuration from the environment and the filesystem
    pub fn load() -> Result<Self, AppError> {
        let explicit = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let fallback = Self::default().data_dir.join(CONFIG_FILE);

        let mut config = match explicit {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None if fallback.exists() => {
                log::debug!("Loading config from {}", fallback.display());
                Self::from_file(&fallback)?
            }
            None => Self::default(),
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.image_host.api_key = key;
        }

        Ok(config)
    }

    pub fn catalog_client(&self) -> CatalogClient {
        CatalogClient::new(self.catalog_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn image_host_config(&self) -> ImageHostConfig {
        ImageHostConfig {
            endpoint: self.image_host.endpoint.clone(),
            api_key: self.image_host.api_key.clone(),
            timeout_secs: self.image_host.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.catalog_url, "https://api.imgflip.com/get_memes");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_partial_document() {
        let raw = r#"
            data_dir = "/tmp/memes"
            preferred_theme = "dark"

            [image_host]
            api_key = "abc123"
        "#;
        let config = AppConfig::from_toml_str(raw).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/memes"));
        assert_eq!(config.preferred_theme, Some(Theme::Dark));
        assert_eq!(config.image_host_config().api_key, "abc123");
        assert_eq!(config.image_host.endpoint, "https://api.imgbb.com/1/upload");
        assert_eq!(config.catalog_client().endpoint(), DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            AppConfig::from_toml_str("request_timeout_secs = \"soon\""),
            Err(AppError::Config(_))
        ));
    }
}
