//! # Meme Catalog
//!
//! A small client for the public imgflip meme template catalog.
//!
//! This crate provides:
//! - The wire models of the `get_memes` endpoint
//! - An HTTP client with sane timeouts
//! - Strict response validation (non-success status, `success: false` and
//!   malformed payloads all become a [`CatalogError`])
//!
//! ## Separation of Concerns
//!
//! This crate only fetches. It does **not**:
//! - Cache or persist the catalog (the catalog is re-fetched each session)
//! - Track likes, uploads or any other user state
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use meme_catalog::CatalogClient;
//!
//! let client = CatalogClient::new("https://api.imgflip.com/get_memes".to_string());
//! let memes = client.fetch_memes().await?;
//! ```

pub mod models;
pub mod service;

pub use models::{CatalogData, CatalogMeme, CatalogResponse};
pub use service::{parse_catalog, CatalogClient, CatalogError, DEFAULT_CATALOG_URL};
