//! `figsync forget` — drop one frame's sync record.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use figsync_core::FrameKey;
use figsync_sync::{MetadataStore, SyncPaths};

/// Arguments for `figsync forget`.
#[derive(Args, Debug)]
pub struct ForgetArgs {
    /// Frame key, as `fileId/nodeId`.
    pub frame: String,

    /// Docs directory whose metadata to edit.
    #[arg(default_value = ".")]
    pub docs_dir: PathBuf,
}

impl ForgetArgs {
    pub fn run(self) -> Result<()> {
        let paths = SyncPaths::rooted_at(&self.docs_dir);
        let mut store = MetadataStore::load(&paths.metadata_path)
            .with_context(|| format!("failed to load metadata for '{}'", self.docs_dir.display()))?;

        let key = FrameKey::from(self.frame.as_str());
        if store.remove(&key) {
            store
                .save()
                .with_context(|| format!("failed to save metadata for '{key}'"))?;
            println!("✓ Forgot '{key}'; the next sync will refresh it.");
        } else {
            println!("No sync record for '{key}'.");
        }
        Ok(())
    }
}
