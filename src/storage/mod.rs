//! Durable key-value storage and the effect adapter.
//!
//! State transitions never touch storage themselves. They return a list of
//! [`Effect`]s which [`run_effects`] executes; a failing write is logged and
//! dropped so the in-memory state stays authoritative for the session.

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

use crate::error::AppError;
use crate::models::Theme;

/// Keys written by the client
pub mod keys {
    pub const USER_MEMES: &str = "userMemes";
    pub const LIKED_MEMES: &str = "likedMemes";
    pub const THEME: &str = "theme";
    pub const PROFILE_NAME: &str = "profile_name";
    pub const PROFILE_BIO: &str = "profile_bio";
    pub const PROFILE_AVATAR: &str = "profile_avatar";

    /// Per-meme comment list key
    pub fn comments(meme_id: &str) -> String {
        format!("comments_{}", meme_id)
    }
}

/// String-keyed, string-valued synchronous storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// Side effect requested by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write `value` under `key`
    Persist { key: String, value: String },
    /// Tell the view layer to switch its visual mode
    ApplyTheme(Theme),
}

impl Effect {
    pub fn persist(key: impl Into<String>, value: impl Into<String>) -> Self {
        Effect::Persist {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Executes persistence effects and hands back the ones meant for the view.
///
/// Storage failures are logged and never propagated.
pub fn run_effects(store: &dyn KeyValueStore, effects: Vec<Effect>) -> Vec<Effect> {
    let mut view_effects = Vec::new();
    for effect in effects {
        match effect {
            Effect::Persist { key, value } => {
                if let Err(e) = store.set(&key, &value) {
                    log::warn!("Could not persist '{}': {}", key, e);
                }
            }
            other => view_effects.push(other),
        }
    }
    view_effects
}

/// Reads and deserializes a JSON value, treating absent keys as `None`
pub fn load_json<T: serde::de::DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, AppError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
