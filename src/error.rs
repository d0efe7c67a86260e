use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching or parsing a track's embedded tags.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Audio file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tag error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    #[error("No tag found in audio file")]
    NoTag,

    /// The worker thread went away without reporting back.
    #[error("Metadata worker disconnected")]
    Disconnected,
}

/// Errors raised by the native playback backend.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("GStreamer init failed: {0}")]
    Init(#[from] gstreamer::glib::Error),

    #[error("Failed to create playbin: {0}")]
    Element(#[from] gstreamer::glib::BoolError),

    #[error("State change failed: {0}")]
    StateChange(#[from] gstreamer::StateChangeError),

    #[error("Audio file not found: {0}")]
    FileNotFound(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid site config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = MetadataError> = std::result::Result<T, E>;
