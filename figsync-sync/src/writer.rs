//! Digest-gated atomic file writes.
//!
//! Content is compared against what is on disk by SHA-256 before any
//! write, so a pass that produces identical bytes touches nothing and
//! file mtimes stay stable. Actual writes go to a sibling temp file
//! first and are renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, SyncError};

/// Outcome of a gated write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// Contents differed and were written.
    Written,
    /// On-disk contents already match; nothing was touched.
    Unchanged,
    /// Contents differ but this is a dry run; nothing was touched.
    WouldWrite,
}

fn digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".figsync.tmp");
    PathBuf::from(name)
}

/// Write `contents` to `path` unless the file already holds them.
pub fn write_if_changed(
    path: &Path,
    contents: &[u8],
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    if let Ok(existing) = fs::read(path) {
        if digest(&existing) == digest(contents) {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged);
        }
    }

    if dry_run {
        tracing::info!("would write {} ({} bytes)", path.display(), contents.len());
        return Ok(WriteResult::WouldWrite);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        // Leave no temp file behind on a failed rename.
        let _ = fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    tracing::debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(WriteResult::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_new_file_and_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/file.txt");
        let result = write_if_changed(&path, b"hello", false).unwrap();
        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn identical_contents_are_not_rewritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.txt");
        write_if_changed(&path, b"hello", false).unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let result = write_if_changed(&path, b"hello", false).unwrap();
        assert_eq!(result, WriteResult::Unchanged);
        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn changed_contents_are_rewritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.txt");
        write_if_changed(&path, b"one", false).unwrap();
        let result = write_if_changed(&path, b"two", false).unwrap();
        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read(&path).unwrap(), b"two");
    }

    #[test]
    fn dry_run_reports_without_touching_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.txt");
        let result = write_if_changed(&path, b"hello", true).unwrap();
        assert_eq!(result, WriteResult::WouldWrite);
        assert!(!path.exists());
    }

    #[test]
    fn dry_run_still_detects_unchanged_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.txt");
        fs::write(&path, b"hello").unwrap();
        let result = write_if_changed(&path, b"hello", true).unwrap();
        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn no_temp_files_remain_after_a_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.txt");
        write_if_changed(&path, b"hello", false).unwrap();
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
