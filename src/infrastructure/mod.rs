// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod page_scraper;
pub mod state_store;
pub mod telegram_notifier;
pub mod tesseract_ocr;
