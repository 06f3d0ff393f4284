use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author recorded on every locally posted comment
pub const DEFAULT_AUTHOR: &str = "User";

/// A comment left on a meme's detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment stamped with a fresh timestamp id
    pub fn new(text: String) -> Self {
        Self {
            id: crate::ids::next_timestamp_id(),
            text,
            author: DEFAULT_AUTHOR.to_string(),
            created_at: Utc::now(),
        }
    }
}
