use serde::{Deserialize, Deserializer, Serialize};

/// Public imgbb upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Configuration for the image host
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    /// Upload endpoint accepting a form with `key` and base64 `image`
    pub endpoint: String,
    pub api_key: String,
    /// Total request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_UPLOAD_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostedImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Envelope returned by the host
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Option<UploadData>,
}

/// Image description inside a successful response
#[derive(Debug, Clone, Deserialize)]
pub struct UploadData {
    pub url: String,
    // imgbb has delivered these both as numbers and as strings
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: Option<u32>,
}

fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl From<UploadData> for HostedImage {
    fn from(data: UploadData) -> Self {
        Self {
            url: data.url,
            width: data.width,
            height: data.height,
        }
    }
}
