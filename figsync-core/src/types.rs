//! Domain types for figsync.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Identity of a frame is always the `(fileId, nodeId)` pair.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::node::FrameNode;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed Figma file identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed node identifier within a Figma file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Frame identity as `fileId/nodeId` — the metadata store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameKey(pub String);

impl FrameKey {
    pub fn new(file_id: &FileId, node_id: &NodeId) -> Self {
        Self(format!("{file_id}/{node_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FrameKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FrameKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A frame reference discovered in a document.
///
/// Rebuilt on every run by scanning document text; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReference {
    /// Document the marker was found in.
    pub document_path: PathBuf,
    pub file_id: FileId,
    pub node_id: NodeId,
    /// The literal marker comment as it appears in the document. Doubles as
    /// the anchor for the managed content block.
    pub marker: String,
}

impl FrameReference {
    pub fn key(&self) -> FrameKey {
        FrameKey::new(&self.file_id, &self.node_id)
    }
}

/// A frame as returned by the remote fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFrame {
    pub name: String,
    /// Remote last-modified instant, used for change detection.
    pub last_modified: DateTime<Utc>,
    /// The frame's document subtree, input to specification extraction.
    pub document: FrameNode,
}

// ---------------------------------------------------------------------------
// Export options
// ---------------------------------------------------------------------------

/// Image encoding for screenshot export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    /// Wire value for the export endpoint; doubles as the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screenshot export options. Defaults: PNG at 2x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ImageFormat,
    /// Integer scale multiplier applied by the export endpoint.
    pub scale: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            scale: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
