use std::fmt;

/// Central error types for the MemeVerse client
#[derive(Debug)]
pub enum AppError {
    /// Catalog fetch or image upload did not complete
    Network(String),
    /// Invalid user input (file type/size, duplicate id, ...)
    Validation(String),
    /// Persistent storage error (rusqlite)
    Storage(rusqlite::Error),
    /// Persisted value could not be (de)serialized
    Serialization(serde_json::Error),
    /// Filesystem error
    Io(std::io::Error),
    /// Configuration file could not be read or parsed
    Config(String),
    /// Resource not found
    NotFound(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
            AppError::Io(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Storage(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<meme_catalog::CatalogError> for AppError {
    fn from(e: meme_catalog::CatalogError) -> Self {
        AppError::Network(e.to_string())
    }
}

impl From<image_host::UploadError> for AppError {
    fn from(e: image_host::UploadError) -> Self {
        AppError::Network(e.to_string())
    }
}

impl AppError {
    /// User-friendly error messages for the view layer
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Failed to reach the server. Please try again.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Serialization(_) => {
                "Your changes could not be saved on this device.".to_string()
            }
            AppError::Io(_) => "Error accessing files. Please check permissions.".to_string(),
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::NotFound(msg) => format!("{} was not found.", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
