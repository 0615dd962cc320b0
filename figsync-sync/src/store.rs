//! Persistent sync metadata.
//!
//! The store is a flat JSON object keyed by frame key (`fileId/nodeId`);
//! values are [`SyncRecord`]s. Updates are shallow merges, so a partial
//! record never clears fields it does not mention. Writes go through the
//! digest-gated atomic writer and only happen when something actually
//! changed, tracked by a dirty flag.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use figsync_core::FrameKey;

use crate::error::{io_err, SyncError};
use crate::writer::write_if_changed;

/// Per-frame sync metadata. Every field is optional so records can be
/// merged piecemeal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncRecord {
    /// Remote last-modified instant observed at the last update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// When this tool last wrote the frame's block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_name: Option<String>,
    /// Document path relative to the docs root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Frame-keyed metadata store backed by a single JSON file.
#[derive(Debug)]
pub struct MetadataStore {
    path: PathBuf,
    records: BTreeMap<String, SyncRecord>,
    dirty: bool,
}

impl MetadataStore {
    /// Load the store from `path`. A missing file is an empty store; a
    /// present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let records = match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_err(path, e)),
        };
        Ok(Self {
            path: path.to_path_buf(),
            records,
            dirty: false,
        })
    }

    pub fn get(&self, key: &FrameKey) -> Option<&SyncRecord> {
        self.records.get(key.as_str())
    }

    /// Shallow-merge `patch` into the record for `key`, creating the
    /// record if absent. `None` fields in the patch leave the existing
    /// values alone.
    pub fn update(&mut self, key: &FrameKey, patch: SyncRecord) {
        let existed = self.records.contains_key(key.as_str());
        let record = self.records.entry(key.as_str().to_owned()).or_default();
        let before = record.clone();
        if patch.last_modified.is_some() {
            record.last_modified = patch.last_modified;
        }
        if patch.last_synced.is_some() {
            record.last_synced = patch.last_synced;
        }
        if patch.frame_name.is_some() {
            record.frame_name = patch.frame_name;
        }
        if patch.file_path.is_some() {
            record.file_path = patch.file_path;
        }
        if !existed || *record != before {
            self.dirty = true;
        }
    }

    /// Drop the record for `key`. Returns whether a record existed.
    pub fn remove(&mut self, key: &FrameKey) -> bool {
        let removed = self.records.remove(key.as_str()).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SyncRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when the in-memory state differs from what was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist the store atomically. No-op on disk when the serialized
    /// form is unchanged.
    pub fn save(&mut self) -> Result<(), SyncError> {
        let data = serde_json::to_vec_pretty(&self.records)?;
        write_if_changed(&self.path, &data, false)?;
        self.dirty = false;
        Ok(())
    }
}
