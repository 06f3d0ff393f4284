use crate::error::AppError;
use crate::models::Meme;
use meme_catalog::CatalogClient;

/// Read-only source of the remote meme catalog
#[allow(async_fn_in_trait)]
pub trait MemeCatalog {
    /// Fetches the whole catalog; any failure is a network failure
    async fn fetch_memes(&self) -> Result<Vec<Meme>, AppError>;
}

impl MemeCatalog for CatalogClient {
    async fn fetch_memes(&self) -> Result<Vec<Meme>, AppError> {
        let memes = CatalogClient::fetch_memes(self).await?;
        Ok(memes.into_iter().map(Meme::from).collect())
    }
}
