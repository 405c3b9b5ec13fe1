// Outbound notification seam
use async_trait::async_trait;

use crate::error::WatchError;

#[async_trait]
pub trait ScheduleNotifier: Send + Sync {
    /// Send one message to `destination` with the annotated schedule image
    /// (PNG bytes) and a caption.
    async fn send_photo(
        &self,
        destination: &str,
        png: Vec<u8>,
        caption: &str,
    ) -> Result<(), WatchError>;
}
