//! Managed-block reconciliation.
//!
//! Each frame marker anchors a managed region that runs to the next
//! `<!-- /figma-sync -->` end marker. [`reconcile`] replaces that region
//! with a freshly rendered block, or inserts region plus end marker when
//! the document has none yet. Everything outside the region is preserved
//! byte for byte.

use std::path::Path;

use crate::error::SyncError;

/// Closes a managed content region.
pub const END_MARKER: &str = "<!-- /figma-sync -->";

const SEPARATOR: &str = "\n\n";

/// Replace (or insert) the managed block anchored at `anchor` in
/// `document`.
///
/// The end marker is only honored when it appears after the anchor; an
/// earlier one belongs to a preceding frame's region. Fails with
/// [`SyncError::AnchorNotFound`] when the anchor is missing, which can
/// happen when a document was edited between scanning and reconciling.
pub fn reconcile(
    document: &str,
    document_path: &Path,
    anchor: &str,
    block: &str,
) -> Result<String, SyncError> {
    let anchor_start = document
        .find(anchor)
        .ok_or_else(|| SyncError::AnchorNotFound {
            path: document_path.to_path_buf(),
            marker: anchor.to_string(),
        })?;
    let anchor_end = anchor_start + anchor.len();

    let replacement = format!("{anchor}{SEPARATOR}{block}{SEPARATOR}{END_MARKER}");

    let region_end = match document[anchor_end..].find(END_MARKER) {
        Some(offset) => anchor_end + offset + END_MARKER.len(),
        None => anchor_end,
    };

    let mut updated = String::with_capacity(
        document.len() - (region_end - anchor_start) + replacement.len(),
    );
    updated.push_str(&document[..anchor_start]);
    updated.push_str(&replacement);
    updated.push_str(&document[region_end..]);
    Ok(updated)
}
