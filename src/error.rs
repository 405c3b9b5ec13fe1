// Error taxonomy for a watch run
use thiserror::Error;

/// Failure kinds a run can hit, split so callers can decide between
/// "skip this image" and "end the run".
///
/// Only `Discovery` and `Config` end a run early; everything else is scoped
/// to a single image and leaves its siblings untouched.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("page discovery failed: {0}")]
    Discovery(String),

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("no parseable date in the chart header")]
    DateNotFound,

    #[error("text recognition failed: {0}")]
    Recognizer(String),

    #[error("analysis task failed: {0}")]
    Analysis(String),

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("state store error: {0}")]
    State(#[from] std::io::Error),

    #[error("invalid grid geometry: {0}")]
    Geometry(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
