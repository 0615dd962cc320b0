//! The batch sync pipeline.
//!
//! One [`run`] scans the docs tree for frame markers, fetches each
//! referenced frame, and for frames that changed since the recorded
//! sync exports a screenshot, extracts the specification, renders the
//! managed block, and reconciles it into the document. Remote failures
//! are per-frame: the batch continues and the report carries the
//! outcome of every frame.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use figsync_core::{
    ExportOptions, FileId, FrameKey, FrameReference, NodeId, RemoteFrame, TransportError,
};
use figsync_render::BlockRenderer;
use figsync_scanner::{find_documents, Scanner};

use crate::error::{io_err, SyncError};
use crate::reconcile::reconcile;
use crate::store::{MetadataStore, SyncRecord};
use crate::writer::write_if_changed;

// ---------------------------------------------------------------------------
// Frame source
// ---------------------------------------------------------------------------

/// Remote access needed by the pipeline.
///
/// The production implementation is the HTTP Figma client; tests use
/// in-memory fakes.
pub trait FrameSource {
    /// Fetch a frame's name, last-modified instant, and document tree.
    /// `Ok(None)` means the node does not exist or is inaccessible.
    fn fetch_frame(
        &self,
        file_id: &FileId,
        node_id: &NodeId,
    ) -> Result<Option<RemoteFrame>, TransportError>;

    /// Export the frame as an encoded image.
    fn export_image(
        &self,
        file_id: &FileId,
        node_id: &NodeId,
        options: ExportOptions,
    ) -> Result<Vec<u8>, TransportError>;
}

// ---------------------------------------------------------------------------
// Options and paths
// ---------------------------------------------------------------------------

/// Behavior switches for one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Re-sync every frame regardless of timestamps.
    pub force: bool,
    /// Report what would change without touching any file.
    pub dry_run: bool,
    pub export: ExportOptions,
}

/// Filesystem layout of one docs tree.
#[derive(Debug, Clone)]
pub struct SyncPaths {
    pub docs_dir: PathBuf,
    pub images_dir: PathBuf,
    pub metadata_path: PathBuf,
}

impl SyncPaths {
    /// Conventional layout under a docs root: images in `images/figma/`,
    /// metadata in `.figsync/metadata.json`.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            docs_dir: root.to_path_buf(),
            images_dir: root.join("images").join("figma"),
            metadata_path: root.join(".figsync").join("metadata.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What happened to one frame reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Screenshot and block were refreshed.
    Updated {
        /// True when the refresh was forced rather than change-driven.
        forced: bool,
    },
    /// Recorded timestamp matches the remote; nothing to do.
    UpToDate,
    /// The remote node does not exist or is inaccessible.
    NotFound,
    /// A per-frame error; the rest of the batch still ran.
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct FrameReport {
    pub key: FrameKey,
    pub document: PathBuf,
    pub outcome: FrameOutcome,
}

/// Result of one whole pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub documents_scanned: usize,
    pub frames: Vec<FrameReport>,
}

impl SyncReport {
    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, FrameOutcome::Updated { .. }))
    }

    pub fn up_to_date_count(&self) -> usize {
        self.count(|o| matches!(o, FrameOutcome::UpToDate))
    }

    pub fn not_found_count(&self) -> usize {
        self.count(|o| matches!(o, FrameOutcome::NotFound))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FrameOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FrameOutcome) -> bool) -> usize {
        self.frames.iter().filter(|f| pred(&f.outcome)).count()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run one batch pass over the docs tree.
pub fn run(
    source: &dyn FrameSource,
    paths: &SyncPaths,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let scanner = Scanner::new()?;
    let renderer = BlockRenderer::new()?;

    let documents = find_documents(&paths.docs_dir)?;
    tracing::info!("found {} documents to scan", documents.len());

    let references = scanner.scan_documents(&documents)?;
    tracing::info!("found {} frame references", references.len());

    let mut store = MetadataStore::load(&paths.metadata_path)?;
    let mut report = SyncReport {
        documents_scanned: documents.len(),
        frames: Vec::with_capacity(references.len()),
    };

    for reference in &references {
        let key = reference.key();
        tracing::info!("processing {key} ({})", reference.document_path.display());
        let outcome =
            match process_frame(source, &renderer, &mut store, paths, options, reference) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("frame {key} failed: {e}");
                    FrameOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
        report.frames.push(FrameReport {
            key,
            document: reference.document_path.clone(),
            outcome,
        });
    }

    if store.is_dirty() && !options.dry_run {
        store.save()?;
    }

    Ok(report)
}

fn process_frame(
    source: &dyn FrameSource,
    renderer: &BlockRenderer,
    store: &mut MetadataStore,
    paths: &SyncPaths,
    options: &SyncOptions,
    reference: &FrameReference,
) -> Result<FrameOutcome, SyncError> {
    let key = reference.key();

    let frame = source
        .fetch_frame(&reference.file_id, &reference.node_id)
        .map_err(|source| SyncError::Transport {
            key: key.clone(),
            source,
        })?;
    let Some(frame) = frame else {
        tracing::warn!("frame {key} not found or inaccessible");
        return Ok(FrameOutcome::NotFound);
    };

    let needed = crate::detect::needs_sync(store.get(&key), frame.last_modified);
    if !needed && !options.force {
        tracing::debug!("{key} up to date (last modified {})", frame.last_modified);
        return Ok(FrameOutcome::UpToDate);
    }

    let image_path = export_screenshot(source, paths, options, reference, &frame)?;

    let spec = figsync_extract::extract(&frame.document);
    let frame_name = (!frame.name.is_empty()).then_some(frame.name.as_str());

    let document_dir = reference
        .document_path
        .parent()
        .unwrap_or_else(|| Path::new(""));
    let embedded_path = relative_path(document_dir, &image_path);
    let block = renderer.render_block(frame_name, &embedded_path, &spec)?;

    let document = fs::read_to_string(&reference.document_path)
        .map_err(|e| io_err(&reference.document_path, e))?;
    let updated = reconcile(&document, &reference.document_path, &reference.marker, &block)?;
    write_if_changed(
        &reference.document_path,
        updated.as_bytes(),
        options.dry_run,
    )?;

    if !options.dry_run {
        store.update(
            &key,
            SyncRecord {
                last_modified: Some(frame.last_modified),
                last_synced: Some(Utc::now()),
                frame_name: Some(frame.name.clone()),
                file_path: Some(
                    relative_path(&paths.docs_dir, &reference.document_path)
                        .to_string_lossy()
                        .replace('\\', "/"),
                ),
            },
        );
    }

    Ok(FrameOutcome::Updated { forced: !needed })
}

fn export_screenshot(
    source: &dyn FrameSource,
    paths: &SyncPaths,
    options: &SyncOptions,
    reference: &FrameReference,
    frame: &RemoteFrame,
) -> Result<PathBuf, SyncError> {
    let key = reference.key();
    let bytes = source
        .export_image(&reference.file_id, &reference.node_id, options.export)
        .map_err(|source| SyncError::Transport { key, source })?;

    let path = paths.images_dir.join(image_filename(
        &reference.file_id,
        &reference.node_id,
        &frame.name,
        options.export,
    ));
    write_if_changed(&path, &bytes, options.dry_run)?;
    Ok(path)
}

fn image_filename(
    file_id: &FileId,
    node_id: &NodeId,
    frame_name: &str,
    export: ExportOptions,
) -> String {
    // Node ids use `:` which is not filename-safe everywhere.
    let node = node_id.as_str().replace(':', "-");
    let mut name = slug(frame_name);
    if name.is_empty() {
        name = "frame".to_string();
    }
    format!("{file_id}-{node}-{name}.{}", export.format)
}

/// Lowercased, with every non-alphanumeric run collapsed to a single `-`.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Relative path from `from_dir` to `to`, built from the common prefix.
fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from: Vec<_> = from_dir.components().collect();
    let to_parts: Vec<_> = to.components().collect();
    let common = from
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part);
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}
