use thiserror::Error;

/// Errors raised while rendering content blocks.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}
