//! Error types for strip discovery and thumbnail loading.
//!
//! Scrolling itself never fails; only the filesystem side has errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StripError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl StripError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StripError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        StripError::Image {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for StripError
pub type Result<T> = std::result::Result<T, StripError>;
