// Presentation layer - outbound message rendering
pub mod message;
