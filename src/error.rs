/// Error types for the gallery and its capabilities
///
/// Capabilities report a `CapabilityError`; the coordinator wraps those into a
/// `GalleryError` describing which step of the operation failed.

use thiserror::Error;

/// Failure reported by a platform capability (camera, file storage, preferences).
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The user dismissed the capture, or nothing was available to capture.
    #[error("capture cancelled: {0}")]
    Cancelled(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Failure of a gallery operation.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Camera denied, cancelled, or failed.
    #[error("photo capture failed: {0}")]
    CaptureFailed(#[source] CapabilityError),

    /// A file or store write failed.
    #[error("failed to persist {what}: {source}")]
    PersistenceFailed {
        what: String,
        #[source]
        source: CapabilityError,
    },

    /// The stored photo list is not valid JSON for a list of records.
    #[error("stored photo list is corrupt: {0}")]
    DeserializationFailed(#[from] serde_json::Error),

    /// Reading photo bytes (or the stored list) failed.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: CapabilityError,
    },

    #[error("no photo with filepath {0}")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GalleryError {
    pub(crate) fn persistence(what: impl Into<String>, source: CapabilityError) -> Self {
        GalleryError::PersistenceFailed {
            what: what.into(),
            source,
        }
    }

    pub(crate) fn read(path: impl Into<String>, source: CapabilityError) -> Self {
        GalleryError::ReadFailed {
            path: path.into(),
            source,
        }
    }
}

/// Failure loading a `GalleryConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not determine user data directory")]
    NoDataDir,
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
