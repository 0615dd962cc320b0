use std::path::PathBuf;

use thiserror::Error;

use figsync_core::{FrameKey, TransportError};
use figsync_render::RenderError;
use figsync_scanner::ScanError;

/// Errors from the sync pipeline.
///
/// Transport failures are scoped to a frame and reported per frame; the
/// batch keeps going. The remaining variants abort the pass.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The remote transport failed for one frame.
    #[error("transport failure for frame {key}: {source}")]
    Transport {
        key: FrameKey,
        #[source]
        source: TransportError,
    },

    /// A document no longer contains the marker it was scanned with.
    #[error("marker {marker} not found in {path}")]
    AnchorNotFound { path: PathBuf, marker: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The metadata file exists but is not valid JSON.
    #[error("metadata error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
