// Tesseract adapter - shells out to the system binary
use async_trait::async_trait;
use image::GrayImage;
use tokio::process::Command;

use crate::application::text_recognizer::TextRecognizer;
use crate::error::WatchError;

pub struct TesseractOcr;

impl TesseractOcr {
    /// Probe for the binary so a missing install surfaces at startup
    /// instead of on the first image.
    pub async fn new() -> Result<Self, WatchError> {
        let status = Command::new("tesseract")
            .arg("--version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|err| {
                WatchError::Recognizer(format!("tesseract is not available: {}", err))
            })?;
        if !status.success() {
            return Err(WatchError::Recognizer(
                "tesseract --version exited with an error".into(),
            ));
        }
        Ok(Self)
    }
}

#[async_trait]
impl TextRecognizer for TesseractOcr {
    async fn recognize_text(
        &self,
        image: &GrayImage,
        language: &str,
    ) -> Result<String, WatchError> {
        // Images are analyzed one at a time, so a pid-scoped temp name
        // cannot collide.
        let input = std::env::temp_dir().join(format!("outage-watch-ocr-{}.png", std::process::id()));
        image
            .save(&input)
            .map_err(|err| WatchError::Recognizer(err.to_string()))?;

        let output = Command::new("tesseract")
            .arg(&input)
            .arg("stdout")
            .args(["-l", language])
            .output()
            .await
            .map_err(|err| WatchError::Recognizer(err.to_string()));
        let _ = tokio::fs::remove_file(&input).await;
        let output = output?;

        if !output.status.success() {
            return Err(WatchError::Recognizer(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
