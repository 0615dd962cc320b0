//! Design-specification extraction for figsync.
//!
//! [`extract`] turns a remote frame document into the minimal non-empty
//! [`Specification`]: the five categories (spacing, colors, typography,
//! layout, effects) are extracted independently and a category is present
//! only when it produced data. Extraction is pure and total — absent
//! fields simply contribute nothing, and nothing here can fail — and
//! deterministic: the same document always yields byte-identical output.
//!
//! Presence vs. truthiness follows the remote API's conventions: most
//! style fields are skipped when zero or empty (`letterSpacing: 0` is
//! noise), while `layoutGrow` is emitted whenever present (`0` is a
//! meaningful value there).

use serde::Serialize;

use figsync_core::node::{Effect, FrameNode, LayoutConstraints, Paint, Rgba, Vector};

// ---------------------------------------------------------------------------
// Specification types
// ---------------------------------------------------------------------------

/// Normalized design attributes of a frame.
///
/// Only categories whose extraction yielded data are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Specification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<Typography>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Effects>,
}

impl Specification {
    /// True when no category produced any data.
    pub fn is_empty(&self) -> bool {
        self.spacing.is_none()
            && self.colors.is_none()
            && self.typography.is_none()
            && self.layout.is_none()
            && self.effects.is_none()
    }
}

/// Padding in pixels per edge. Absent edges default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Spacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    /// Auto-layout item spacing in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    /// Layout direction tag, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// An encoded stroke: color plus the node's shared stroke weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Colors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Stroke>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    /// Literal text content of text nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Bounding-box width, rounded to the nearest pixel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<LayoutConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// Emitted on presence, not truthiness: a grow of 0 is still recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grow: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    /// Normalized type tag: lowercased, `_` replaced with `-`.
    #[serde(rename = "type")]
    pub shadow_type: String,
    pub color: String,
    pub offset: Vector,
    pub radius: f64,
    pub spread: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Blur {
    #[serde(rename = "type")]
    pub blur_type: String,
    pub radius: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadows: Vec<Shadow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blurs: Vec<Blur>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Only recorded when below 1 — full opacity is not worth noting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract the [`Specification`] of a frame document.
pub fn extract(node: &FrameNode) -> Specification {
    Specification {
        spacing: extract_spacing(node),
        colors: extract_colors(node),
        typography: extract_typography(node),
        layout: extract_layout(node),
        effects: extract_effects(node),
    }
}

fn extract_spacing(node: &FrameNode) -> Option<Spacing> {
    // Padding is keyed off the left edge; missing edges are zero.
    let padding = node.padding_left.map(|left| Padding {
        top: node.padding_top.unwrap_or(0.0),
        right: node.padding_right.unwrap_or(0.0),
        bottom: node.padding_bottom.unwrap_or(0.0),
        left,
    });
    let spacing = Spacing {
        padding,
        gap: node.item_spacing,
        layout: non_empty(node.layout_mode.as_deref()),
    };
    (spacing != Spacing::default()).then_some(spacing)
}

fn extract_colors(node: &FrameNode) -> Option<Colors> {
    let colors = Colors {
        background: node
            .background_color
            .as_ref()
            .map(|color| rgba_to_hex(color, 1.0)),
        fills: node
            .fills
            .iter()
            .filter(|paint| is_visible_solid(paint))
            .map(|paint| paint_hex(paint))
            .collect(),
        strokes: node
            .strokes
            .iter()
            .filter(|paint| is_visible_solid(paint))
            .map(|paint| Stroke {
                color: paint_hex(paint),
                weight: node.stroke_weight.unwrap_or(0.0),
            })
            .collect(),
    };
    (colors != Colors::default()).then_some(colors)
}

fn extract_typography(node: &FrameNode) -> Option<Typography> {
    let mut typography = Typography::default();
    if let Some(style) = &node.style {
        typography.font_family = non_empty(style.font_family.as_deref());
        typography.font_weight = non_zero(style.font_weight);
        typography.font_size = non_zero(style.font_size).map(px);
        // Percent-based line height wins when both are given; either way
        // the pixel field gates whether line height is emitted at all.
        if let Some(height) = non_zero(style.line_height_px) {
            typography.line_height = Some(match non_zero(style.line_height_percent) {
                Some(percent) => format!("{percent}%"),
                None => px(height),
            });
        }
        typography.letter_spacing = non_zero(style.letter_spacing).map(px);
        typography.text_align = non_empty(style.text_align_horizontal.as_deref())
            .map(|align| align.to_lowercase());
    }
    typography.content = non_empty(node.characters.as_deref());
    (typography != Typography::default()).then_some(typography)
}

fn extract_layout(node: &FrameNode) -> Option<Layout> {
    let (width, height) = match &node.absolute_bounding_box {
        Some(bounds) => (
            Some(bounds.width.round() as i64),
            Some(bounds.height.round() as i64),
        ),
        None => (None, None),
    };
    let layout = Layout {
        width,
        height,
        constraints: node.constraints.clone(),
        align: non_empty(node.layout_align.as_deref()),
        grow: node.layout_grow,
    };
    (layout != Layout::default()).then_some(layout)
}

fn extract_effects(node: &FrameNode) -> Option<Effects> {
    let effects = Effects {
        shadows: node
            .effects
            .iter()
            .filter(|effect| is_visible_kind(effect, "SHADOW"))
            .map(|effect| Shadow {
                shadow_type: normalize_effect_type(&effect.effect_type),
                color: rgba_to_hex(&effect.color.unwrap_or_default(), 1.0),
                offset: effect.offset.unwrap_or_default(),
                radius: effect.radius.unwrap_or(0.0),
                spread: effect.spread.unwrap_or(0.0),
            })
            .collect(),
        blurs: node
            .effects
            .iter()
            .filter(|effect| is_visible_kind(effect, "BLUR"))
            .map(|effect| Blur {
                blur_type: normalize_effect_type(&effect.effect_type),
                radius: effect.radius.unwrap_or(0.0),
            })
            .collect(),
        border_radius: node.corner_radius,
        opacity: node.opacity.filter(|opacity| *opacity != 1.0),
    };
    (effects != Effects::default()).then_some(effects)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Encode a normalized RGBA color as lowercase `#rrggbb`, appending a
/// rounded whole-number percentage when the combined alpha drops below
/// full opacity, e.g. `#ff0000 (50%)`. Lossy and directional — there is
/// no decode path.
pub fn rgba_to_hex(color: &Rgba, opacity: f64) -> String {
    let r = channel(color.r);
    let g = channel(color.g);
    let b = channel(color.b);
    let alpha = color.a.unwrap_or(1.0) * opacity;
    let hex = format!("#{r:02x}{g:02x}{b:02x}");
    if alpha < 1.0 {
        format!("{hex} ({}%)", (alpha * 100.0).round())
    } else {
        hex
    }
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn paint_hex(paint: &Paint) -> String {
    rgba_to_hex(
        &paint.color.unwrap_or_default(),
        paint.opacity.unwrap_or(1.0),
    )
}

fn is_visible_solid(paint: &Paint) -> bool {
    paint.visible != Some(false) && paint.paint_type == "SOLID"
}

fn is_visible_kind(effect: &Effect, kind: &str) -> bool {
    effect.visible != Some(false) && effect.effect_type.contains(kind)
}

fn normalize_effect_type(raw: &str) -> String {
    raw.to_lowercase().replace('_', "-")
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_owned)
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn px(value: f64) -> String {
    format!("{value}px")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figsync_core::node::{BoundingBox, TypeStyle};

    fn solid(r: f64, g: f64, b: f64) -> Paint {
        Paint {
            paint_type: "SOLID".to_string(),
            color: Some(Rgba {
                r,
                g,
                b,
                a: None,
            }),
            ..Paint::default()
        }
    }

    #[test]
    fn empty_node_yields_empty_specification() {
        let spec = extract(&FrameNode::default());
        assert!(spec.is_empty());
        assert_eq!(serde_json::to_string(&spec).unwrap(), "{}");
    }

    #[test]
    fn extraction_is_deterministic() {
        let node: FrameNode = serde_json::from_str(
            r#"{"cornerRadius": 8, "paddingLeft": 4, "itemSpacing": 12,
                "fills": [{"type": "SOLID", "color": {"r": 0.5, "g": 0.5, "b": 0.5}}]}"#,
        )
        .unwrap();
        let a = serde_json::to_string(&extract(&node)).unwrap();
        let b = serde_json::to_string(&extract(&node)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn corner_radius_with_full_opacity_yields_only_border_radius() {
        let node = FrameNode {
            corner_radius: Some(8.0),
            opacity: Some(1.0),
            ..FrameNode::default()
        };
        let spec = extract(&node);
        let effects = spec.effects.as_ref().unwrap();
        assert_eq!(effects.border_radius, Some(8.0));
        assert!(effects.opacity.is_none());
        assert_eq!(
            serde_json::to_string(&spec).unwrap(),
            r#"{"effects":{"borderRadius":8.0}}"#
        );
    }

    #[test]
    fn partial_opacity_is_recorded() {
        let node = FrameNode {
            opacity: Some(0.8),
            ..FrameNode::default()
        };
        assert_eq!(extract(&node).effects.unwrap().opacity, Some(0.8));
    }

    #[test]
    fn padding_keys_off_left_edge() {
        let only_top = FrameNode {
            padding_top: Some(8.0),
            ..FrameNode::default()
        };
        assert!(extract(&only_top).spacing.is_none());

        let node = FrameNode {
            padding_left: Some(16.0),
            padding_top: Some(8.0),
            ..FrameNode::default()
        };
        let spacing = extract(&node).spacing.unwrap();
        assert_eq!(
            spacing.padding,
            Some(Padding {
                top: 8.0,
                right: 0.0,
                bottom: 0.0,
                left: 16.0
            })
        );
    }

    #[test]
    fn layout_mode_passes_through_verbatim() {
        let node = FrameNode {
            layout_mode: Some("HORIZONTAL".to_string()),
            item_spacing: Some(12.0),
            ..FrameNode::default()
        };
        let spacing = extract(&node).spacing.unwrap();
        assert_eq!(spacing.layout.as_deref(), Some("HORIZONTAL"));
        assert_eq!(spacing.gap, Some(12.0));
    }

    #[test]
    fn red_fill_at_half_opacity_encodes_with_percentage() {
        let node = FrameNode {
            fills: vec![Paint {
                opacity: Some(0.5),
                ..solid(1.0, 0.0, 0.0)
            }],
            ..FrameNode::default()
        };
        let colors = extract(&node).colors.unwrap();
        assert_eq!(colors.fills, vec!["#ff0000 (50%)".to_string()]);
    }

    #[test]
    fn invisible_and_non_solid_fills_are_dropped() {
        let node = FrameNode {
            fills: vec![
                Paint {
                    visible: Some(false),
                    ..solid(1.0, 0.0, 0.0)
                },
                Paint {
                    paint_type: "GRADIENT_LINEAR".to_string(),
                    ..Paint::default()
                },
            ],
            ..FrameNode::default()
        };
        assert!(extract(&node).colors.is_none());
    }

    #[test]
    fn strokes_share_the_node_stroke_weight() {
        let node = FrameNode {
            strokes: vec![solid(0.0, 0.0, 0.0)],
            stroke_weight: Some(2.0),
            ..FrameNode::default()
        };
        let colors = extract(&node).colors.unwrap();
        assert_eq!(
            colors.strokes,
            vec![Stroke {
                color: "#000000".to_string(),
                weight: 2.0
            }]
        );
    }

    #[test]
    fn background_color_is_encoded() {
        let node = FrameNode {
            background_color: Some(Rgba {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: None,
            }),
            ..FrameNode::default()
        };
        let colors = extract(&node).colors.unwrap();
        assert_eq!(colors.background.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn typography_units_and_alignment() {
        let node = FrameNode {
            style: Some(TypeStyle {
                font_family: Some("Inter".to_string()),
                font_weight: Some(600.0),
                font_size: Some(16.0),
                line_height_px: Some(24.0),
                letter_spacing: Some(0.5),
                text_align_horizontal: Some("CENTER".to_string()),
                ..TypeStyle::default()
            }),
            ..FrameNode::default()
        };
        let typography = extract(&node).typography.unwrap();
        assert_eq!(typography.font_family.as_deref(), Some("Inter"));
        assert_eq!(typography.font_weight, Some(600.0));
        assert_eq!(typography.font_size.as_deref(), Some("16px"));
        assert_eq!(typography.line_height.as_deref(), Some("24px"));
        assert_eq!(typography.letter_spacing.as_deref(), Some("0.5px"));
        assert_eq!(typography.text_align.as_deref(), Some("center"));
    }

    #[test]
    fn percent_line_height_wins_over_pixels() {
        let node = FrameNode {
            style: Some(TypeStyle {
                line_height_px: Some(24.0),
                line_height_percent: Some(150.0),
                ..TypeStyle::default()
            }),
            ..FrameNode::default()
        };
        let typography = extract(&node).typography.unwrap();
        assert_eq!(typography.line_height.as_deref(), Some("150%"));
    }

    #[test]
    fn zero_letter_spacing_is_noise() {
        let node = FrameNode {
            style: Some(TypeStyle {
                letter_spacing: Some(0.0),
                ..TypeStyle::default()
            }),
            ..FrameNode::default()
        };
        assert!(extract(&node).typography.is_none());
    }

    #[test]
    fn text_content_is_kept_without_a_style_block() {
        let node = FrameNode {
            characters: Some("Sign up".to_string()),
            ..FrameNode::default()
        };
        let typography = extract(&node).typography.unwrap();
        assert_eq!(typography.content.as_deref(), Some("Sign up"));
    }

    #[test]
    fn bounding_box_dimensions_round_to_nearest_pixel() {
        let node = FrameNode {
            absolute_bounding_box: Some(BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 119.6,
                height: 40.4,
            }),
            ..FrameNode::default()
        };
        let layout = extract(&node).layout.unwrap();
        assert_eq!(layout.width, Some(120));
        assert_eq!(layout.height, Some(40));
    }

    #[test]
    fn layout_grow_zero_is_still_emitted() {
        let node = FrameNode {
            layout_grow: Some(0.0),
            ..FrameNode::default()
        };
        assert_eq!(extract(&node).layout.unwrap().grow, Some(0.0));
    }

    #[test]
    fn constraints_pass_through_verbatim() {
        let node = FrameNode {
            constraints: Some(LayoutConstraints {
                vertical: "TOP".to_string(),
                horizontal: "LEFT".to_string(),
            }),
            ..FrameNode::default()
        };
        let layout = extract(&node).layout.unwrap();
        assert_eq!(layout.constraints.as_ref().unwrap().vertical, "TOP");
    }

    #[test]
    fn effects_partition_into_shadows_and_blurs() {
        let node = FrameNode {
            effects: vec![
                Effect {
                    effect_type: "DROP_SHADOW".to_string(),
                    color: Some(Rgba {
                        r: 0.0,
                        g: 0.0,
                        b: 0.0,
                        a: Some(0.25),
                    }),
                    offset: Some(Vector { x: 0.0, y: 2.0 }),
                    radius: Some(4.0),
                    spread: None,
                    ..Effect::default()
                },
                Effect {
                    effect_type: "LAYER_BLUR".to_string(),
                    radius: Some(6.0),
                    ..Effect::default()
                },
                Effect {
                    effect_type: "INNER_SHADOW".to_string(),
                    visible: Some(false),
                    ..Effect::default()
                },
            ],
            ..FrameNode::default()
        };
        let effects = extract(&node).effects.unwrap();
        assert_eq!(effects.shadows.len(), 1);
        let shadow = &effects.shadows[0];
        assert_eq!(shadow.shadow_type, "drop-shadow");
        assert_eq!(shadow.color, "#000000 (25%)");
        assert_eq!(shadow.offset.y, 2.0);
        assert_eq!(shadow.spread, 0.0);
        assert_eq!(effects.blurs.len(), 1);
        assert_eq!(effects.blurs[0].blur_type, "layer-blur");
        assert_eq!(effects.blurs[0].radius, 6.0);
    }

    #[test]
    fn color_encoding_edge_cases() {
        let white = Rgba {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: Some(1.0),
        };
        assert_eq!(rgba_to_hex(&white, 1.0), "#ffffff");
        assert_eq!(rgba_to_hex(&white, 0.5), "#ffffff (50%)");

        let translucent = Rgba {
            r: 0.2,
            g: 0.4,
            b: 0.6,
            a: Some(0.5),
        };
        // 0.5 alpha x 0.5 opacity -> 25%.
        assert_eq!(rgba_to_hex(&translucent, 0.5), "#336699 (25%)");
    }
}
