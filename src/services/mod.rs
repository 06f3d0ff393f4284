pub mod catalog_service;
pub mod comment_service;
pub mod explore_service;
pub mod profile_service;
pub mod upload_service;

pub use catalog_service::MemeCatalog;
pub use explore_service::{Category, ExploreQuery, MemeStats, SortDirection, SortKey};
pub use upload_service::ImageHost;
