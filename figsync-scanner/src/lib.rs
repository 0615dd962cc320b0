//! Document discovery and frame-marker scanning for figsync.
//!
//! [`find_documents`] walks a docs tree for `.mdx` files; [`Scanner`]
//! extracts `<!-- figma-frame: FILE_ID/NODE_ID -->` markers from document
//! text. References are returned in document order; documents in sorted
//! path order, so a whole pass sees a stable sequence.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

use figsync_core::types::{FileId, FrameReference, NodeId};

/// File ids may not contain `/` or whitespace; node ids may not contain
/// `-` or whitespace (Figma uses `:`-separated ids in markers).
const MARKER_PATTERN: &str = r"<!--\s*figma-frame:\s*([^/\s]+)/([^-\s]+)\s*-->";

/// Errors from document discovery and scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The marker pattern failed to compile.
    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Document discovery
// ---------------------------------------------------------------------------

/// Recursively collect `.mdx` documents under `root`, sorted by path.
///
/// Hidden directories and `node_modules` are skipped.
pub fn find_documents(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut found = Vec::new();
    collect_documents(root, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_documents(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ScanError> {
    let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            if name.starts_with('.') || name == "node_modules" {
                continue;
            }
            collect_documents(&path, out)?;
        } else if file_type.is_file() && name.ends_with(".mdx") {
            out.push(path);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Marker scanning
// ---------------------------------------------------------------------------

/// Frame-marker scanner.
///
/// The pattern is compiled once per instance and the scanner holds no other
/// state; reuse one instance for a whole pass.
#[derive(Debug, Clone)]
pub struct Scanner {
    marker: Regex,
}

impl Scanner {
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            marker: Regex::new(MARKER_PATTERN)?,
        })
    }

    /// Extract every frame reference in `content`, in document order.
    ///
    /// The raw marker text is kept verbatim — it anchors the managed
    /// content block later.
    pub fn scan(&self, document_path: &Path, content: &str) -> Vec<FrameReference> {
        self.marker
            .captures_iter(content)
            .map(|captures| FrameReference {
                document_path: document_path.to_path_buf(),
                file_id: FileId::from(&captures[1]),
                node_id: NodeId::from(&captures[2]),
                marker: captures[0].to_string(),
            })
            .collect()
    }

    /// Read and scan every document, concatenating references in order.
    pub fn scan_documents(&self, documents: &[PathBuf]) -> Result<Vec<FrameReference>, ScanError> {
        let mut references = Vec::new();
        for path in documents {
            let content = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
            references.extend(self.scan(path, &content));
        }
        Ok(references)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner() -> Scanner {
        Scanner::new().unwrap()
    }

    #[test]
    fn scan_extracts_ids_and_raw_marker() {
        let doc = Path::new("docs/button.mdx");
        let refs = scanner().scan(doc, "intro <!-- figma-frame: abc/1:23 --> outro");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].file_id, FileId::from("abc"));
        assert_eq!(refs[0].node_id, NodeId::from("1:23"));
        assert_eq!(refs[0].marker, "<!-- figma-frame: abc/1:23 -->");
        assert_eq!(refs[0].document_path, doc);
    }

    #[test]
    fn scan_tolerates_flexible_whitespace() {
        let doc = Path::new("d.mdx");
        let refs = scanner().scan(doc, "<!--figma-frame: abc/123-->");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].marker, "<!--figma-frame: abc/123-->");
    }

    #[test]
    fn scan_returns_references_in_document_order() {
        let doc = Path::new("d.mdx");
        let content = "<!-- figma-frame: f1/1 -->\ntext\n<!-- figma-frame: f2/2 -->\n";
        let refs = scanner().scan(doc, content);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].file_id, FileId::from("f1"));
        assert_eq!(refs[1].file_id, FileId::from("f2"));
    }

    #[test]
    fn scan_rejects_hyphenated_node_ids() {
        // A node id may not contain `-`; the closing `-->` would be eaten.
        let refs = scanner().scan(Path::new("d.mdx"), "<!-- figma-frame: abc/1-23 -->");
        assert!(refs.is_empty());
    }

    #[test]
    fn scan_ignores_end_markers_and_plain_comments() {
        let content = "<!-- /figma-sync -->\n<!-- a note -->\n";
        assert!(scanner().scan(Path::new("d.mdx"), content).is_empty());
    }

    #[test]
    fn find_documents_is_sorted_and_skips_ignored_dirs() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("zeta.mdx"), "z").unwrap();
        fs::write(root.join("guides/alpha.mdx"), "a").unwrap();
        fs::write(root.join("guides/notes.md"), "not mdx").unwrap();
        fs::write(root.join("node_modules/pkg/readme.mdx"), "skip").unwrap();
        fs::write(root.join(".git/config.mdx"), "skip").unwrap();

        let docs = find_documents(root).unwrap();
        assert_eq!(
            docs,
            vec![root.join("guides/alpha.mdx"), root.join("zeta.mdx")]
        );
    }

    #[test]
    fn scan_documents_reads_each_file() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.mdx");
        let b = tmp.path().join("b.mdx");
        fs::write(&a, "<!-- figma-frame: f/1 -->").unwrap();
        fs::write(&b, "no markers here").unwrap();

        let refs = scanner().scan_documents(&[a.clone(), b]).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].document_path, a);
    }

    #[test]
    fn find_documents_on_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(
            find_documents(&missing),
            Err(ScanError::Io { .. })
        ));
    }
}
