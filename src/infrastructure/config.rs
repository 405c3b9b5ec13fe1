// Configuration loading - file plus environment overrides
use serde::Deserialize;

use crate::domain::color::ColorBound;
use crate::domain::grid::GridSpec;
use crate::error::WatchError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub source: SourceSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    pub telegram: TelegramSettings,
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub page_url: String,
    /// URL substrings that mark an image as a schedule chart.
    #[serde(default = "default_url_markers")]
    pub url_markers: Vec<String>,
    /// How long to keep polling the page for at least one image element.
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Bounded wait for one image download.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default = "default_color_low")]
    pub color_low: ColorBound,
    #[serde(default = "default_color_high")]
    pub color_high: ColorBound,
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    /// Human-readable name of the monitored queue, shown in captions.
    #[serde(default = "default_queue_label")]
    pub queue_label: String,
}

/// Credentials for the notification channel. Missing values abort the run
/// before any image is touched.
#[derive(Debug, Deserialize, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            color_low: default_color_low(),
            color_high: default_color_high(),
            ocr_language: default_ocr_language(),
            queue_label: default_queue_label(),
        }
    }
}

fn default_state_path() -> String {
    "state.json".to_string()
}

fn default_url_markers() -> Vec<String> {
    vec!["GPV".to_string(), "media".to_string()]
}

fn default_page_timeout() -> u64 {
    20
}

fn default_poll_interval() -> u64 {
    2
}

fn default_fetch_timeout() -> u64 {
    20
}

fn default_color_low() -> ColorBound {
    // The chart's saturated blue fill: tight hue range, looser
    // saturation/value so compression artifacts still classify.
    ColorBound {
        hue: 180.0,
        saturation: 0.31,
        value: 0.20,
    }
}

fn default_color_high() -> ColorBound {
    ColorBound {
        hue: 260.0,
        saturation: 1.0,
        value: 0.90,
    }
}

fn default_ocr_language() -> String {
    "ukr+eng".to_string()
}

fn default_queue_label() -> String {
    "4.1".to_string()
}

/// Layer `config/watch.toml` (optional) under `WATCH_*` environment
/// variables, e.g. `WATCH_TELEGRAM__BOT_TOKEN` and `WATCH_TELEGRAM__CHAT_ID`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/watch").required(false))
        .add_source(config::Environment::with_prefix("WATCH").separator("__"))
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), WatchError> {
        self.analysis.grid.validate()?;
        if self.source.page_url.is_empty() {
            return Err(WatchError::Config("source.page_url is not set".into()));
        }
        if self.telegram.bot_token.is_empty() || self.telegram.chat_id.is_empty() {
            return Err(WatchError::Config(
                "telegram credentials are not set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            source: SourceSettings {
                page_url: "https://example.test/schedule".into(),
                url_markers: default_url_markers(),
                page_timeout_secs: default_page_timeout(),
                poll_interval_secs: default_poll_interval(),
                fetch_timeout_secs: default_fetch_timeout(),
            },
            analysis: AnalysisSettings::default(),
            telegram: TelegramSettings {
                bot_token: "token".into(),
                chat_id: "-100123".into(),
            },
            state_path: default_state_path(),
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let mut config = valid_config();
        config.telegram.bot_token.clear();
        assert!(matches!(config.validate(), Err(WatchError::Config(_))));
    }

    #[test]
    fn test_bad_grid_geometry_is_rejected() {
        let mut config = valid_config();
        config.analysis.grid.x_end = 1.5;
        assert!(matches!(config.validate(), Err(WatchError::Geometry(_))));
    }
}
