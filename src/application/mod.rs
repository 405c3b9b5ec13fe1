// Application layer - use cases and collaborator seams
pub mod chart_analyzer;
pub mod date_reader;
pub mod image_source;
pub mod monitor_service;
pub mod notifier;
pub mod text_recognizer;
