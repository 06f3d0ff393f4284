//! # MemeVerse
//!
//! The non-visual core of a local-first meme browsing client.
//!
//! This crate provides:
//! - A meme store: remote catalog load, likes and user uploads
//! - A theme store: light/dark preference with persistence
//! - Per-meme comments and a local profile
//! - Search, category filter, sorting and a leaderboard over the catalog
//!
//! State transitions are pure and return explicit effects; a storage
//! adapter executes them. Storage failures are logged and never fatal.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use memeverse::{AppConfig, AppStore};
//!
//! let config = AppConfig::load()?;
//! let mut app = AppStore::open(&config);
//! app.load_catalog(&config.catalog_client()).await;
//! app.like("181913649")?;
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod ids;
pub mod image_processing;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;

pub use config::AppConfig;
pub use error::AppError;
pub use models::{Comment, Meme, Profile, Theme};
pub use services::{Category, ExploreQuery, ImageHost, MemeCatalog, SortDirection, SortKey};
pub use storage::{Effect, KeyValueStore, MemoryStore, SqliteStore};
pub use store::{AppStore, FetchStatus, MemeStore, ThemeStore};
