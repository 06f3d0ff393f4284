use crate::error::AppError;
use crate::ids::next_timestamp_id;
use crate::image_processing::inspect_image;
use crate::models::Meme;
use crate::storage::KeyValueStore;
use crate::store::MemeStore;
use image_host::{HostedImage, ImageUploadService};

/// Caption used when the user leaves it blank
pub const DEFAULT_CAPTION: &str = "My awesome meme";

/// Stores image bytes somewhere reachable and returns the URL
#[allow(async_fn_in_trait)]
pub trait ImageHost {
    async fn upload_image(&self, bytes: &[u8], name: Option<&str>)
        -> Result<HostedImage, AppError>;
}

impl ImageHost for ImageUploadService {
    async fn upload_image(
        &self,
        bytes: &[u8],
        name: Option<&str>,
    ) -> Result<HostedImage, AppError> {
        Ok(self.upload(bytes, name).await?)
    }
}

/// Validates, uploads and records a new user meme.
///
/// On failure the store is untouched so the caller can keep the draft and retry.
pub async fn upload_meme<H: ImageHost>(
    store: &mut MemeStore,
    storage: &dyn KeyValueStore,
    host: &H,
    bytes: &[u8],
    caption: &str,
    max_bytes: usize,
) -> Result<Meme, AppError> {
    let info = inspect_image(bytes, max_bytes)?;

    let caption = caption.trim();
    let name = if caption.is_empty() {
        DEFAULT_CAPTION
    } else {
        caption
    };

    let hosted = host.upload_image(bytes, Some(name)).await.map_err(|e| {
        log::error!("Meme upload failed: {}", e);
        e
    })?;

    let meme = Meme {
        id: next_timestamp_id().to_string(),
        url: hosted.url,
        name: name.to_string(),
        width: hosted.width.or(Some(info.width)),
        height: hosted.height.or(Some(info.height)),
        box_count: Some(0),
    };

    store.add_user_meme(storage, meme.clone())?;
    log::info!("Uploaded meme {} ({})", meme.id, meme.url);
    Ok(meme)
}
