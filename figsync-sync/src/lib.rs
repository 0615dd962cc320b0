//! Batch synchronization of Figma frames into MDX documentation.
//!
//! The pipeline ties the other crates together: scan documents for
//! frame markers, detect which frames changed since the recorded sync,
//! and for those export screenshots, extract specifications, render
//! managed blocks, and reconcile them into the documents. All file
//! writes are digest-gated and atomic, so a pass over an unchanged
//! remote touches nothing on disk.

pub mod detect;
pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod store;
pub mod writer;

pub use detect::needs_sync;
pub use error::SyncError;
pub use pipeline::{
    run, FrameOutcome, FrameReport, FrameSource, SyncOptions, SyncPaths, SyncReport,
};
pub use reconcile::{reconcile, END_MARKER};
pub use store::{MetadataStore, SyncRecord};
pub use writer::{write_if_changed, WriteResult};
