// Monitor service - one-shot batch over the discovered schedule images
use std::sync::Arc;

use anyhow::Context;
use image::RgbImage;

use crate::application::chart_analyzer::ChartAnalyzer;
use crate::application::date_reader::DateReader;
use crate::application::image_source::ImageSource;
use crate::application::notifier::ScheduleNotifier;
use crate::domain::signature::{classify, signature, ChangeKind};
use crate::error::WatchError;
use crate::infrastructure::state_store::StateStore;
use crate::presentation::message::schedule_caption;

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub notified: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

enum Outcome {
    Notified,
    Unchanged,
}

pub struct MonitorService {
    source: Arc<dyn ImageSource>,
    notifier: Arc<dyn ScheduleNotifier>,
    date_reader: DateReader,
    analyzer: ChartAnalyzer,
    page_url: String,
    destination: String,
    queue_label: String,
}

impl MonitorService {
    pub fn new(
        source: Arc<dyn ImageSource>,
        notifier: Arc<dyn ScheduleNotifier>,
        date_reader: DateReader,
        analyzer: ChartAnalyzer,
        page_url: String,
        destination: String,
        queue_label: String,
    ) -> Self {
        Self {
            source,
            notifier,
            date_reader,
            analyzer,
            page_url,
            destination,
            queue_label,
        }
    }

    /// One batch over the page's schedule images. A failure on one image
    /// never touches its siblings; only discovery failure ends the run.
    /// The caller owns loading and saving the state store around the run.
    pub async fn run(&self, store: &mut StateStore) -> anyhow::Result<RunSummary> {
        let urls = self
            .source
            .discover_images(&self.page_url)
            .await
            .context("page discovery failed")?;

        let mut summary = RunSummary {
            discovered: urls.len(),
            ..Default::default()
        };
        if urls.is_empty() {
            tracing::info!("no schedule images on the page, nothing to do");
            return Ok(summary);
        }
        tracing::info!(count = urls.len(), "discovered schedule images");

        for url in &urls {
            match self.process_image(url, store).await {
                Ok(Outcome::Notified) => summary.notified += 1,
                Ok(Outcome::Unchanged) => summary.unchanged += 1,
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "skipping image");
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }

    async fn process_image(
        &self,
        url: &str,
        store: &mut StateStore,
    ) -> Result<Outcome, WatchError> {
        let bytes = self.source.fetch_image(url).await?;
        let image = image::load_from_memory(&bytes)?.to_rgb8();

        let date = self.date_reader.read_date(&image).await?;
        let date_key = date.format("%d.%m.%Y").to_string();

        // Per-pixel classification over the full image is the heavy step;
        // keep it off the coordination thread.
        let analyzer = self.analyzer.clone();
        let analysis = tokio::task::spawn_blocking(move || analyzer.analyze(&image))
            .await
            .map_err(|err| WatchError::Analysis(err.to_string()))?;

        let current = signature(&analysis.intervals);
        let change = classify(store.get(&date_key), &current);
        if change == ChangeKind::Unchanged {
            tracing::debug!(date = %date_key, "schedule unchanged");
            return Ok(Outcome::Unchanged);
        }
        tracing::debug!(date = %date_key, signature = %current, "schedule differs from last known");

        let caption = schedule_caption(change, &self.queue_label, &date_key, &analysis.intervals);
        let png = encode_png(&analysis.annotated)?;
        self.notifier
            .send_photo(&self.destination, png, &caption)
            .await?;

        // Recorded only after the send succeeded, so a failed notification
        // leaves the date eligible for retry on the next scheduled run.
        store.insert(date_key.clone(), current);
        tracing::info!(date = %date_key, change = ?change, "notification sent");
        Ok(Outcome::Notified)
    }
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, WatchError> {
    let mut bytes = Vec::new();
    image.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )?;
    Ok(bytes)
}
