use crate::error::AppError;
use base64::Engine;
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;

/// Upload size limit (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Facts about an accepted image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Maps the sniffed format to a MIME type; only JPEG, PNG and GIF are accepted
fn accepted_mime(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        _ => None,
    }
}

/// Checks size and type of an image and reads its dimensions
pub fn inspect_image(bytes: &[u8], max_bytes: usize) -> Result<ImageInfo, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("The selected file is empty".to_string()));
    }

    if bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "Image size should be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }

    let mime = image::guess_format(bytes)
        .ok()
        .and_then(accepted_mime)
        .ok_or_else(|| {
            AppError::Validation(
                "Please select a valid image file (JPEG, PNG, or GIF)".to_string(),
            )
        })?;

    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
        .map_err(|e| AppError::Validation(format!("Image could not be read: {}", e)))?;

    Ok(ImageInfo {
        mime,
        width,
        height,
    })
}

/// Encodes image bytes as a `data:` URL
pub fn bytes_to_data_url(bytes: &[u8], mime: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

/// Reads an image from `path`, validates it and returns a data URL
pub fn image_path_to_data_url(path: &Path, max_bytes: usize) -> Result<String, AppError> {
    let data = std::fs::read(path)?;
    let info = inspect_image(&data, max_bytes)?;
    Ok(bytes_to_data_url(&data, info.mime))
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .expect("encode test png");
    buffer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_png() {
        let png = sample_png(4, 2);
        let info = inspect_image(&png, MAX_IMAGE_BYTES).unwrap();
        assert_eq!(info.mime, "image/png");
        assert_eq!((info.width, info.height), (4, 2));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let result = inspect_image(b"just some text, not an image", MAX_IMAGE_BYTES);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_oversized_and_empty() {
        let png = sample_png(4, 2);
        assert!(matches!(
            inspect_image(&png, 8),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            inspect_image(&[], MAX_IMAGE_BYTES),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_data_url() {
        assert_eq!(bytes_to_data_url(b"abc", "image/gif"), "data:image/gif;base64,YWJj");
    }
}
