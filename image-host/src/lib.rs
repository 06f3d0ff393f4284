//! # Image Host
//!
//! Uploads image bytes to an imgbb-compatible hosting service and returns a
//! stable URL for the stored image.
//!
//! This crate provides:
//! - Upload configuration (endpoint, API key, timeout)
//! - A single-shot upload service (no retry; the caller keeps its draft)
//! - Tolerant parsing of the host response
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use image_host::{ImageHostConfig, ImageUploadService};
//!
//! let config = ImageHostConfig {
//!     api_key: "secret".to_string(),
//!     ..Default::default()
//! };
//!
//! let service = ImageUploadService::new(config);
//! let hosted = service.upload(&bytes, Some("my meme")).await?;
//! println!("{}", hosted.url);
//! ```

pub mod models;
pub mod upload;

pub use models::{HostedImage, ImageHostConfig, UploadData, UploadResponse, DEFAULT_UPLOAD_URL};
pub use upload::{parse_upload_response, ImageUploadService, UploadError, UploadResult};
