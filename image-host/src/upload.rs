//! Image upload against an imgbb-compatible host
//!
//! The image is sent base64 encoded in a url-encoded form together with the
//! API key. Exactly one request is made per call; there is no retry.

use crate::models::{HostedImage, ImageHostConfig, UploadResponse};
use base64::Engine as _;
use std::time::Duration;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur during an upload
#[derive(Debug)]
pub enum UploadError {
    NetworkError(String),
    ServerError(String),
    JsonError(String),
    Other(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::NetworkError(e) => write!(f, "Network error: {}", e),
            UploadError::ServerError(e) => write!(f, "Server error: {}", e),
            UploadError::JsonError(e) => write!(f, "JSON error: {}", e),
            UploadError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UploadError {}

/// Service for uploading images to the host
pub struct ImageUploadService {
    config: ImageHostConfig,
}

impl ImageUploadService {
    /// Create a new image upload service
    pub fn new(config: ImageHostConfig) -> Self {
        Self { config }
    }

    /// Uploads raw image bytes and returns where the host stored them
    pub async fn upload(&self, bytes: &[u8], name: Option<&str>) -> UploadResult<HostedImage> {
        if self.config.api_key.trim().is_empty() {
            return Err(UploadError::Other(
                "No API key configured for the image host".to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(UploadError::Other("Refusing to upload an empty image".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("MemeVerse/0.1.0")
            .build()
            .map_err(|e| UploadError::NetworkError(format!("Client build failed: {}", e)))?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        let mut form: Vec<(&str, &str)> = vec![
            ("key", self.config.api_key.as_str()),
            ("image", encoded.as_str()),
        ];
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            form.push(("name", name));
        }

        log::debug!(
            "Uploading {} bytes to {}",
            bytes.len(),
            self.config.endpoint
        );

        let response = client
            .post(&self.config.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| UploadError::NetworkError(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::NetworkError(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            log::warn!("Image host answered {}: {}", status, body);
            return Err(UploadError::ServerError(format!(
                "Server returned status: {}",
                status
            )));
        }

        let hosted = parse_upload_response(&body)?;
        log::info!("Image stored at {}", hosted.url);
        Ok(hosted)
    }
}

/// Parses the host response, requiring `success: true` and an image URL
pub fn parse_upload_response(body: &str) -> UploadResult<HostedImage> {
    let response: UploadResponse = serde_json::from_str(body)
        .map_err(|e| UploadError::JsonError(format!("Failed to parse response: {}", e)))?;

    if !response.success {
        return Err(UploadError::ServerError(format!(
            "Upload failed (status {})",
            response
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        )));
    }

    response
        .data
        .map(HostedImage::from)
        .ok_or_else(|| UploadError::JsonError("Response is missing data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_dimensions() {
        let body = r#"{"success": true, "status": 200, "data": {"url": "https://i.ibb.co/x/meme.png", "width": 640, "height": 480}}"#;
        let hosted = parse_upload_response(body).unwrap();
        assert_eq!(hosted.url, "https://i.ibb.co/x/meme.png");
        assert_eq!(hosted.width, Some(640));
        assert_eq!(hosted.height, Some(480));
    }

    #[test]
    fn test_parse_string_dimensions() {
        let body = r#"{"success": true, "data": {"url": "u", "width": "800", "height": "600"}}"#;
        let hosted = parse_upload_response(body).unwrap();
        assert_eq!(hosted.width, Some(800));
        assert_eq!(hosted.height, Some(600));
    }

    #[test]
    fn test_parse_failure() {
        let body = r#"{"success": false, "status": 400, "error": {"message": "Invalid API v1 key."}}"#;
        assert!(matches!(
            parse_upload_response(body),
            Err(UploadError::ServerError(_))
        ));
        assert!(matches!(
            parse_upload_response("not json"),
            Err(UploadError::JsonError(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_requires_api_key() {
        let service = ImageUploadService::new(ImageHostConfig::default());
        let result = service.upload(&[0xFF, 0xD8, 0xFF], None).await;
        assert!(matches!(result, Err(UploadError::Other(_))));
    }
}
