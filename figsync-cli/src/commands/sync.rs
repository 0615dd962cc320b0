//! `figsync sync` — run one batch pass over a docs tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use figsync_core::{Config, ExportOptions};
use figsync_sync::{pipeline, FrameOutcome, SyncOptions, SyncPaths, SyncReport};

use crate::client::FigmaClient;
use crate::ImageFormatArg;

/// Arguments for `figsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Docs directory to scan.
    #[arg(default_value = ".")]
    pub docs_dir: PathBuf,

    /// Re-sync every frame regardless of timestamps.
    #[arg(long)]
    pub force: bool,

    /// Report what would change without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Screenshot image format.
    #[arg(long, default_value = "png")]
    pub format: ImageFormatArg,

    /// Integer scale multiplier for screenshot export.
    #[arg(long, default_value_t = 2)]
    pub scale: u8,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = Config::from_env().context("configuration error")?;
        let client = FigmaClient::new(&config.access_token);

        let paths = SyncPaths::rooted_at(&self.docs_dir);
        let options = SyncOptions {
            force: self.force || config.force_update,
            dry_run: self.dry_run,
            export: ExportOptions {
                format: self.format.into(),
                scale: self.scale,
            },
        };

        let report = pipeline::run(&client, &paths, &options)
            .with_context(|| format!("sync failed for '{}'", self.docs_dir.display()))?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if report.frames.is_empty() {
        println!(
            "{prefix}✓ scanned {} document(s) — no frame markers found",
            report.documents_scanned
        );
        return;
    }

    println!(
        "{prefix}✓ scanned {} document(s), {} frame(s): {} updated, {} up to date, {} not found, {} failed",
        report.documents_scanned,
        report.frames.len(),
        report.updated_count(),
        report.up_to_date_count(),
        report.not_found_count(),
        report.failed_count(),
    );

    for frame in &report.frames {
        let (glyph, detail) = match &frame.outcome {
            FrameOutcome::Updated { forced: true } => ("✎".yellow(), "updated (forced)".to_string()),
            FrameOutcome::Updated { forced: false } => ("✎".green(), "updated".to_string()),
            FrameOutcome::UpToDate => ("·".bright_black(), "up to date".to_string()),
            FrameOutcome::NotFound => ("?".yellow(), "not found".to_string()),
            FrameOutcome::Failed { error } => ("✗".red(), error.clone()),
        };
        println!(
            "  {glyph}  {} ({}) — {detail}",
            frame.key,
            frame.document.display()
        );
    }
}
