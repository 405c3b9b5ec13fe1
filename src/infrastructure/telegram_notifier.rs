// Telegram Bot API adapter
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::application::notifier::ScheduleNotifier;
use crate::error::WatchError;

const API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|err| WatchError::Notify(err.to_string()))?;
        Ok(Self { client, bot_token })
    }
}

#[async_trait]
impl ScheduleNotifier for TelegramNotifier {
    async fn send_photo(
        &self,
        destination: &str,
        png: Vec<u8>,
        caption: &str,
    ) -> Result<(), WatchError> {
        let url = format!("{}/bot{}/sendPhoto", API_BASE, self.bot_token);
        let photo = Part::bytes(png)
            .file_name("schedule.png")
            .mime_str("image/png")
            .map_err(|err| WatchError::Notify(err.to_string()))?;
        let form = Form::new()
            .text("chat_id", destination.to_string())
            .text("caption", caption.to_string())
            .text("parse_mode", "Markdown")
            .part("photo", photo);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| WatchError::Notify(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::Notify(format!(
                "sendPhoto returned {}: {}",
                status, body
            )));
        }
        Ok(())
    }
}
