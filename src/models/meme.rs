use meme_catalog::CatalogMeme;
use serde::{Deserialize, Serialize};

/// A meme, either from the remote catalog or uploaded by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meme {
    pub id: String,
    pub url: String,
    /// Display caption
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_count: Option<u32>,
}

impl Meme {
    pub fn new(id: impl Into<String>, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            name: name.into(),
            width: None,
            height: None,
            box_count: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Wider than tall; memes without dimensions never qualify
    pub fn is_landscape(&self) -> bool {
        matches!((self.width, self.height), (Some(w), Some(h)) if w > h)
    }

    /// Case-insensitive substring match on the display name
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Creation time in epoch milliseconds for locally generated ids
    pub fn created_at_millis(&self) -> Option<i64> {
        self.id.parse().ok()
    }
}

impl From<CatalogMeme> for Meme {
    fn from(meme: CatalogMeme) -> Self {
        Self {
            id: meme.id,
            url: meme.url,
            name: meme.name,
            width: meme.width,
            height: meme.height,
            box_count: meme.box_count,
        }
    }
}
