// Text recognition seam
use async_trait::async_trait;
use image::GrayImage;

use crate::error::WatchError;

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Raw recognized text from a binarized grayscale image. No structure is
    /// guaranteed; callers parse what they need out of the text.
    async fn recognize_text(&self, image: &GrayImage, language: &str)
        -> Result<String, WatchError>;
}
