//! HTTP client for the Figma REST API.
//!
//! Two endpoints are used: `/v1/files/{file}/nodes` for frame documents
//! and `/v1/images/{file}` for screenshot export. Export is a two-step
//! dance: the API answers with a short-lived URL, and the image bytes
//! are downloaded from there without the token header.

use std::collections::HashMap;
use std::io::Read;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use figsync_core::node::FrameNode;
use figsync_core::{ExportOptions, FileId, NodeId, RemoteFrame, TransportError};
use figsync_sync::FrameSource;

const API_BASE: &str = "https://api.figma.com";

/// Cap on downloaded image size.
const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

pub struct FigmaClient {
    agent: ureq::Agent,
    token: String,
    base_url: String,
}

impl FigmaClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, API_BASE)
    }

    /// Point the client at a different host, used by tests.
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one frame. `Ok(None)` when the file exists but the node id
    /// is unknown or inaccessible.
    pub fn get_node(
        &self,
        file_id: &FileId,
        node_id: &NodeId,
    ) -> Result<Option<RemoteFrame>, TransportError> {
        let path = format!("/v1/files/{file_id}/nodes?ids={}", encode_id(node_id.as_str()));
        let mut response: NodesResponse = self.get_json(&path)?;

        let Some(entry) = response.nodes.remove(node_id.as_str()) else {
            return Ok(None);
        };
        // Prefer the frame's own name over the containing file's.
        let name = entry
            .document
            .name
            .clone()
            .unwrap_or(response.name);
        Ok(Some(RemoteFrame {
            name,
            last_modified: response.last_modified,
            document: entry.document,
        }))
    }

    /// Export one frame as an image and download the bytes.
    pub fn export_image(
        &self,
        file_id: &FileId,
        node_id: &NodeId,
        options: ExportOptions,
    ) -> Result<Vec<u8>, TransportError> {
        let path = format!(
            "/v1/images/{file_id}?ids={}&format={}&scale={}",
            encode_id(node_id.as_str()),
            options.format,
            options.scale
        );
        let response: ImagesResponse = self.get_json(&path)?;

        let url = response
            .images
            .get(node_id.as_str())
            .and_then(|url| url.clone())
            .ok_or_else(|| TransportError::MissingImageUrl {
                node_id: node_id.to_string(),
            })?;
        self.download(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .agent
            .get(&url)
            .set("X-Figma-Token", &self.token)
            .call()
            .map_err(map_ureq)?;
        response
            .into_json()
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.agent.get(url).call().map_err(map_ureq)?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_IMAGE_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(bytes)
    }
}

impl FrameSource for FigmaClient {
    fn fetch_frame(
        &self,
        file_id: &FileId,
        node_id: &NodeId,
    ) -> Result<Option<RemoteFrame>, TransportError> {
        self.get_node(file_id, node_id)
    }

    fn export_image(
        &self,
        file_id: &FileId,
        node_id: &NodeId,
        options: ExportOptions,
    ) -> Result<Vec<u8>, TransportError> {
        FigmaClient::export_image(self, file_id, node_id, options)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodesResponse {
    #[serde(default)]
    name: String,
    last_modified: DateTime<Utc>,
    #[serde(default)]
    nodes: HashMap<String, NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    document: FrameNode,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    /// The API maps each requested id to a URL, or null when rendering
    /// failed for that node.
    #[serde(default)]
    images: HashMap<String, Option<String>>,
}

fn map_ureq(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Status(status, response) => TransportError::Api {
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => TransportError::Request(transport.to_string()),
    }
}

/// Node ids embed `:`, the only character in them that needs escaping
/// in a query string.
fn encode_id(id: &str) -> String {
    id.replace(':', "%3A")
}
