//! Remote frame document model.
//!
//! Figma node trees are deeply optional: any attribute may be absent on any
//! node, and nodes carry many attributes figsync never reads. Every field
//! here is `Option` or defaulted so an arbitrary `document` subtree
//! deserializes without error; unknown fields are ignored. Extraction
//! decides what is worth keeping.

use serde::{Deserialize, Serialize};

/// Normalized-float RGBA color as delivered by the remote API.
///
/// Channels are 0..1; a missing alpha means fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rgba {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

/// 2D offset used by shadow effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// A fill or stroke entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Paint {
    /// Type discriminator: `SOLID`, `GRADIENT_LINEAR`, `IMAGE`, ...
    #[serde(rename = "type")]
    pub paint_type: String,
    /// Absent means visible; only an explicit `false` hides the paint.
    pub visible: Option<bool>,
    pub color: Option<Rgba>,
    pub opacity: Option<f64>,
}

/// Typographic style block carried by text nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    pub font_size: Option<f64>,
    pub line_height_px: Option<f64>,
    pub line_height_percent: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<String>,
}

/// Axis-aligned bounding box of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// Layout constraints, passed through to specifications verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LayoutConstraints {
    #[serde(default)]
    pub vertical: String,
    #[serde(default)]
    pub horizontal: String,
}

/// A shadow-like or blur-like effect entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    /// Type discriminator: `DROP_SHADOW`, `INNER_SHADOW`, `LAYER_BLUR`, ...
    #[serde(rename = "type")]
    pub effect_type: String,
    pub visible: Option<bool>,
    pub color: Option<Rgba>,
    pub offset: Option<Vector>,
    pub radius: Option<f64>,
    pub spread: Option<f64>,
}

/// A node in the remote frame document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameNode {
    pub name: Option<String>,
    /// Literal text content, present on text nodes.
    pub characters: Option<String>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub item_spacing: Option<f64>,
    /// Auto-layout direction: `HORIZONTAL` or `VERTICAL`.
    pub layout_mode: Option<String>,
    pub background_color: Option<Rgba>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    /// Single weight shared by all strokes of the node.
    pub stroke_weight: Option<f64>,
    pub style: Option<TypeStyle>,
    pub absolute_bounding_box: Option<BoundingBox>,
    pub constraints: Option<LayoutConstraints>,
    pub layout_align: Option<String>,
    pub layout_grow: Option<f64>,
    pub effects: Vec<Effect>,
    pub corner_radius: Option<f64>,
    pub opacity: Option<f64>,
}
