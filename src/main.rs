// Main entry point - Dependency injection and one-shot batch run
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::chart_analyzer::ChartAnalyzer;
use crate::application::date_reader::DateReader;
use crate::application::monitor_service::MonitorService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::page_scraper::PageScraper;
use crate::infrastructure::state_store::StateStore;
use crate::infrastructure::telegram_notifier::TelegramNotifier;
use crate::infrastructure::tesseract_ocr::TesseractOcr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration (validates grid geometry and credentials)
    let config = load_config()?;

    // Create adapters (infrastructure layer)
    let source = Arc::new(PageScraper::new(config.source.clone())?);
    let recognizer = Arc::new(TesseractOcr::new().await?);
    let notifier = Arc::new(TelegramNotifier::new(config.telegram.bot_token.clone())?);

    // Create the analysis pipeline (application layer)
    let analyzer = ChartAnalyzer::new(
        config.analysis.color_low,
        config.analysis.color_high,
        config.analysis.grid.clone(),
    );
    let date_reader = DateReader::new(recognizer, config.analysis.ocr_language.clone());

    let service = MonitorService::new(
        source,
        notifier,
        date_reader,
        analyzer,
        config.source.page_url.clone(),
        config.telegram.chat_id.clone(),
        config.analysis.queue_label.clone(),
    );

    // One batch: load state once, process every image, persist only when
    // something changed.
    let mut store = StateStore::load(&config.state_path);
    let summary = service.run(&mut store).await?;
    if store.is_dirty() {
        store.save()?;
    }

    tracing::info!(
        discovered = summary.discovered,
        notified = summary.notified,
        unchanged = summary.unchanged,
        skipped = summary.skipped,
        "watch run complete"
    );
    Ok(())
}
