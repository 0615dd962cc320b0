//! Tera-backed block rendering.

use std::path::Path;

use tera::{Context, Tera};

use figsync_extract::Specification;

use crate::error::RenderError;
use crate::sections::sections;

const BLOCK_TEMPLATE: &str = include_str!("templates/block.md.tera");

/// Renders managed content blocks from extracted specifications.
pub struct BlockRenderer {
    tera: Tera,
}

impl BlockRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template("block.md", BLOCK_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Render the block for one frame.
    ///
    /// `image_path` is embedded as given, with backslashes normalized to
    /// forward slashes so blocks are identical across platforms. The
    /// result carries no trailing whitespace; the reconciler owns the
    /// blank lines around the block.
    pub fn render_block(
        &self,
        frame_name: Option<&str>,
        image_path: &Path,
        spec: &Specification,
    ) -> Result<String, RenderError> {
        let image_path = image_path.to_string_lossy().replace('\\', "/");

        let mut context = Context::new();
        context.insert("frame_name", &frame_name);
        context.insert("image_alt", frame_name.unwrap_or("Figma design"));
        context.insert("image_path", &image_path);
        context.insert("sections", &sections(spec));

        let rendered = self.tera.render("block.md", &context)?;
        Ok(rendered.trim_end().to_string())
    }
}
