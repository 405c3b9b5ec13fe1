// Source of schedule chart images
use async_trait::async_trait;

use crate::error::WatchError;

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Distinct chart image URLs found on the schedule page. Implementations
    /// wait a bounded time for at least one image element to appear; a page
    /// with none yields an empty list, not an error.
    async fn discover_images(&self, page_url: &str) -> Result<Vec<String>, WatchError>;

    /// Raw image bytes for one discovered URL.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, WatchError>;
}
