//! Error types for figsync-core.

use thiserror::Error;

/// Errors raised while assembling process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The Figma access token was absent or empty.
    #[error("FIGMA_ACCESS_TOKEN environment variable is required")]
    MissingToken,
}

/// Errors from the remote design-tool transport.
///
/// Produced by the Figma client; the sync pipeline treats every variant as
/// a per-frame failure (logged skip), never as a fatal error.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The API answered with a non-success status.
    #[error("figma API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Decode(String),

    /// The image-export endpoint returned no URL for the node.
    #[error("failed to get image URL for node {node_id}")]
    MissingImageUrl { node_id: String },
}
