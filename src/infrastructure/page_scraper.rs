// Schedule page scraping - image discovery and download over HTTP
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use crate::application::image_source::ImageSource;
use crate::error::WatchError;
use crate::infrastructure::config::SourceSettings;

static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]+src\s*=\s*["']([^"']+)["']"#).unwrap());

// The site serves a stripped-down page to unknown clients.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub struct PageScraper {
    client: reqwest::Client,
    settings: SourceSettings,
}

impl PageScraper {
    pub fn new(settings: SourceSettings) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.fetch_timeout_secs))
            .build()
            .map_err(|err| WatchError::Discovery(err.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn scan_page(&self, page_url: &str) -> Result<Vec<String>, WatchError> {
        let html = self
            .client
            .get(page_url)
            .send()
            .await
            .map_err(|err| WatchError::Discovery(err.to_string()))?
            .error_for_status()
            .map_err(|err| WatchError::Discovery(err.to_string()))?
            .text()
            .await
            .map_err(|err| WatchError::Discovery(err.to_string()))?;

        Ok(extract_chart_urls(
            &html,
            page_url,
            &self.settings.url_markers,
        ))
    }
}

/// Pull `<img src>` values out of the page, resolve them against the page
/// URL and keep the distinct ones that look like schedule charts.
fn extract_chart_urls(html: &str, page_url: &str, markers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for captures in IMG_SRC.captures_iter(html) {
        let Some(resolved) = resolve_url(page_url, &captures[1]) else {
            continue;
        };
        if markers.iter().any(|marker| resolved.contains(marker)) && seen.insert(resolved.clone()) {
            urls.push(resolved);
        }
    }
    urls
}

fn resolve_url(page_url: &str, src: &str) -> Option<String> {
    reqwest::Url::parse(page_url)
        .ok()?
        .join(src)
        .ok()
        .map(Into::into)
}

#[async_trait]
impl ImageSource for PageScraper {
    async fn discover_images(&self, page_url: &str) -> Result<Vec<String>, WatchError> {
        // The gallery is attached client-side after page load; poll until an
        // image element shows up or the bounded wait runs out. A page that
        // never grows one is an empty result, not an error.
        let deadline =
            tokio::time::Instant::now() + Duration::from_secs(self.settings.page_timeout_secs);
        loop {
            let urls = self.scan_page(page_url).await?;
            if !urls.is_empty() {
                return Ok(urls);
            }
            if tokio::time::Instant::now() >= deadline {
                tracing::warn!(page_url, "no chart images appeared before the deadline");
                return Ok(Vec::new());
            }
            tokio::time::sleep(Duration::from_secs(self.settings.poll_interval_secs)).await;
        }
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, WatchError> {
        let fetch_error = |err: reqwest::Error| WatchError::Fetch {
            url: url.to_string(),
            message: err.to_string(),
        };
        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .map_err(fetch_error)?
            .error_for_status()
            .map_err(fetch_error)?
            .bytes()
            .await
            .map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}
