//! figsync core library — domain types, remote node model, configuration.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`node`] — the remote frame document model
//! - [`config`] — process configuration from the environment
//! - [`error`] — [`ConfigError`] and [`TransportError`]

pub mod config;
pub mod error;
pub mod node;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, TransportError};
pub use node::FrameNode;
pub use types::{
    ExportOptions, FileId, FrameKey, FrameReference, ImageFormat, NodeId, RemoteFrame,
};
