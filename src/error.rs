//! Error types for media loading, cropping and encoding.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {name}: {reason}")]
    Decode { name: String, reason: String },

    #[error("Could not encode {name} as {mime}: {reason}")]
    Encode {
        name: String,
        mime: String,
        reason: String,
    },

    #[error("No image encoder for {0}")]
    UnsupportedFormat(String),

    #[error("Could not open {url}: {reason}")]
    Open { url: String, reason: String },

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type MediaResult<T> = Result<T, MediaError>;
