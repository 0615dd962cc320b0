//! figsync — sync Figma frames into MDX documentation.
//!
//! # Usage
//!
//! ```text
//! figsync sync [<docs-dir>] [--force] [--dry-run] [--format png|jpg|svg|pdf] [--scale N]
//! figsync status [<docs-dir>] [--json]
//! figsync forget <fileId/nodeId> [<docs-dir>]
//! ```
//!
//! `sync` needs `FIGMA_ACCESS_TOKEN` in the environment; `FORCE_UPDATE=true`
//! is equivalent to `--force`.

mod client;
mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{forget::ForgetArgs, status::StatusArgs, sync::SyncArgs};
use figsync_core::ImageFormat;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "figsync",
    version,
    about = "Sync Figma frame screenshots and specifications into MDX docs",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan documents for frame markers and sync changed frames.
    Sync(SyncArgs),

    /// Show recorded sync metadata for a docs tree.
    Status(StatusArgs),

    /// Drop the sync record for one frame so the next sync refreshes it.
    Forget(ForgetArgs),
}

// ---------------------------------------------------------------------------
// Shared ImageFormat argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ImageFormat` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct ImageFormatArg(pub ImageFormat);

impl FromStr for ImageFormatArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self(ImageFormat::Png)),
            "jpg" | "jpeg" => Ok(Self(ImageFormat::Jpg)),
            "svg" => Ok(Self(ImageFormat::Svg)),
            "pdf" => Ok(Self(ImageFormat::Pdf)),
            other => Err(format!(
                "unknown image format '{other}'; expected: png, jpg, svg, pdf"
            )),
        }
    }
}

impl fmt::Display for ImageFormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ImageFormatArg> for ImageFormat {
    fn from(f: ImageFormatArg) -> Self {
        f.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Forget(args) => args.run(),
    }
}
