//! `figsync status` — recorded sync metadata for a docs tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use figsync_sync::{MetadataStore, SyncPaths, SyncRecord};

/// Arguments for `figsync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Docs directory whose metadata to show.
    #[arg(default_value = ".")]
    pub docs_dir: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson<'a> {
    summary: StatusSummaryJson,
    frames: BTreeMap<&'a str, &'a SyncRecord>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    tracked: usize,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "frame")]
    frame: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "document")]
    document: String,
    #[tabled(rename = "last modified")]
    last_modified: String,
    #[tabled(rename = "last synced")]
    last_synced: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let paths = SyncPaths::rooted_at(&self.docs_dir);
        let store = MetadataStore::load(&paths.metadata_path)
            .with_context(|| format!("failed to load metadata for '{}'", self.docs_dir.display()))?;

        if self.json {
            let payload = StatusJson {
                summary: StatusSummaryJson {
                    tracked: store.len(),
                },
                frames: store.iter().collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        println!(
            "figsync v{} | {} frame(s) tracked",
            env!("CARGO_PKG_VERSION"),
            store.len()
        );
        if store.is_empty() {
            println!("No sync records. Run 'figsync sync' first.");
            return Ok(());
        }

        let rows: Vec<StatusTableRow> = store
            .iter()
            .map(|(key, record)| StatusTableRow {
                frame: key.to_string(),
                name: record.frame_name.clone().unwrap_or_default(),
                document: record.file_path.clone().unwrap_or_default(),
                last_modified: timestamp(record.last_modified),
                last_synced: timestamp(record.last_synced),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!(
            "{}",
            "Run 'figsync sync --force' to refresh every frame.".bright_black()
        );
        Ok(())
    }
}

fn timestamp(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match value {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "never".to_string(),
    }
}
