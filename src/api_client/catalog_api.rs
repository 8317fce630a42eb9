use crate::api_client::{RequestClient, RequestError};
use crate::catalog::{Artist, ContentSnapshot, YearsSnapshot};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// The three backend endpoints the view-model talks to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET years`
    async fn fetch_years(&self) -> Result<YearsSnapshot, RequestError>;

    /// `POST artist`. The backend wipes its catalog and reloads it for this artist.
    async fn create_artist(&self, artist: &Artist) -> Result<Value, RequestError>;

    /// `GET content/<year>`
    async fn fetch_content(&self, year: i32) -> Result<ContentSnapshot, RequestError>;
}

#[async_trait]
impl CatalogApi for RequestClient {
    async fn fetch_years(&self) -> Result<YearsSnapshot, RequestError> {
        self.get("years").await
    }

    async fn create_artist(&self, artist: &Artist) -> Result<Value, RequestError> {
        let result: Value = self.post("artist", artist).await?;
        info!(artist = %artist.artist_name, %result, "artist created");
        Ok(result)
    }

    async fn fetch_content(&self, year: i32) -> Result<ContentSnapshot, RequestError> {
        self.get(&format!("content/{year}")).await
    }
}
