use crate::models::{CatalogMeme, CatalogResponse};
use std::time::Duration;

/// Public imgflip endpoint listing the most popular meme templates
pub const DEFAULT_CATALOG_URL: &str = "https://api.imgflip.com/get_memes";

/// Error type for catalog operations
#[derive(Debug)]
pub enum CatalogError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            CatalogError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            CatalogError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only client for the meme catalog
pub struct CatalogClient {
    endpoint: String,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a new catalog client for the given endpoint
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the full catalog with exactly one GET request
    pub async fn fetch_memes(&self) -> Result<Vec<CatalogMeme>, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("MemeVerse/0.1.0")
            .build()
            .map_err(|e| CatalogError::NetworkError(format!("Client build failed: {}", e)))?;

        log::debug!("Fetching meme catalog from {}", self.endpoint);

        let response = client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::ServerError(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::NetworkError(format!("Failed to read body: {}", e)))?;

        let memes = parse_catalog(&body)?;
        log::info!("Catalog delivered {} memes", memes.len());
        Ok(memes)
    }
}

/// Parses and validates a raw catalog response body
pub fn parse_catalog(body: &str) -> Result<Vec<CatalogMeme>, CatalogError> {
    let response: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::JsonError(format!("Failed to parse response: {}", e)))?;

    if !response.success {
        return Err(CatalogError::ServerError(
            response
                .error_message
                .unwrap_or_else(|| "Catalog reported failure".to_string()),
        ));
    }

    response
        .data
        .map(|data| data.memes)
        .ok_or_else(|| CatalogError::JsonError("Response is missing data.memes".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_success() {
        let body = r#"{
            "success": true,
            "data": {
                "memes": [
                    {"id": "181913649", "name": "Drake Hotline Bling", "url": "https://i.imgflip.com/30b1gx.jpg", "width": 1200, "height": 1200, "box_count": 2, "captions": 1000},
                    {"id": "87743020", "name": "Two Buttons", "url": "https://i.imgflip.com/1g8my4.jpg", "width": 600, "height": 908, "box_count": 3}
                ]
            }
        }"#;

        let memes = parse_catalog(body).unwrap();
        assert_eq!(memes.len(), 2);
        assert_eq!(memes[0].id, "181913649");
        assert_eq!(memes[1].box_count, Some(3));
    }

    #[test]
    fn test_parse_catalog_reported_failure() {
        let body = r#"{"success": false, "error_message": "rate limited"}"#;
        match parse_catalog(body) {
            Err(CatalogError::ServerError(msg)) => assert_eq!(msg, "rate limited"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_catalog_malformed() {
        assert!(matches!(
            parse_catalog("<html>oops</html>"),
            Err(CatalogError::JsonError(_))
        ));
        assert!(matches!(
            parse_catalog(r#"{"success": true}"#),
            Err(CatalogError::JsonError(_))
        ));
    }

    #[test]
    fn test_optional_metadata_defaults() {
        let body = r#"{"success": true, "data": {"memes": [{"id": "1", "name": "Doge", "url": "u"}]}}"#;
        let memes = parse_catalog(body).unwrap();
        assert_eq!(memes[0].width, None);
        assert_eq!(memes[0].box_count, None);
    }
}
