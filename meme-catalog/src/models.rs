use serde::{Deserialize, Serialize};

/// Envelope returned by the `get_memes` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<CatalogData>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Payload of a successful catalog response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub memes: Vec<CatalogMeme>,
}

/// A single meme template as delivered by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMeme {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub box_count: Option<u32>,
}
