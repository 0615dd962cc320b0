//! Specification-to-accordion formatting.
//!
//! Each populated category becomes one [`Section`] whose body is an
//! indented markdown list. Line shapes are fixed; rendering a category
//! twice from the same data yields identical text.

use serde::Serialize;

use figsync_extract::{Colors, Effects, Layout, Spacing, Specification, Typography};

/// One accordion of the rendered block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

/// Build the section list for a specification, in category order.
pub fn sections(spec: &Specification) -> Vec<Section> {
    let mut out = Vec::new();
    if let Some(spacing) = &spec.spacing {
        out.push(section("Spacing", spacing_lines(spacing)));
    }
    if let Some(colors) = &spec.colors {
        out.push(section("Colors", color_lines(colors)));
    }
    if let Some(typography) = &spec.typography {
        out.push(section("Typography", typography_lines(typography)));
    }
    if let Some(layout) = &spec.layout {
        out.push(section("Layout", layout_lines(layout)));
    }
    if let Some(effects) = &spec.effects {
        out.push(section("Effects", effect_lines(effects)));
    }
    out
}

fn section(title: &str, lines: Vec<String>) -> Section {
    let body = if lines.is_empty() {
        "    No specifications available.".to_string()
    } else {
        lines
            .iter()
            .map(|line| format!("    - {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Section {
        title: title.to_string(),
        body,
    }
}

fn spacing_lines(spacing: &Spacing) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(p) = &spacing.padding {
        lines.push(format!(
            "**Padding**: {}px {}px {}px {}px",
            p.top, p.right, p.bottom, p.left
        ));
    }
    if let Some(gap) = spacing.gap {
        lines.push(format!("**Gap**: {gap}px"));
    }
    if let Some(layout) = &spacing.layout {
        lines.push(format!("**Layout**: {}", layout.to_lowercase()));
    }
    lines
}

fn color_lines(colors: &Colors) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(background) = &colors.background {
        lines.push(format!("**Background**: `{background}`"));
    }
    if !colors.fills.is_empty() {
        let fills = colors
            .fills
            .iter()
            .map(|color| format!("`{color}`"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("**Fills**: {fills}"));
    }
    if !colors.strokes.is_empty() {
        let strokes = colors
            .strokes
            .iter()
            .map(|stroke| format!("`{}` ({}px)", stroke.color, stroke.weight))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("**Strokes**: {strokes}"));
    }
    lines
}

fn typography_lines(typography: &Typography) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(family) = &typography.font_family {
        lines.push(format!("**Font Family**: {family}"));
    }
    if let Some(weight) = typography.font_weight {
        lines.push(format!("**Font Weight**: {weight}"));
    }
    if let Some(size) = &typography.font_size {
        lines.push(format!("**Font Size**: {size}"));
    }
    if let Some(height) = &typography.line_height {
        lines.push(format!("**Line Height**: {height}"));
    }
    if let Some(spacing) = &typography.letter_spacing {
        lines.push(format!("**Letter Spacing**: {spacing}"));
    }
    if let Some(align) = &typography.text_align {
        lines.push(format!("**Text Align**: {align}"));
    }
    if let Some(content) = &typography.content {
        lines.push(format!("**Content**: \"{content}\""));
    }
    lines
}

fn layout_lines(layout: &Layout) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(width) = layout.width {
        lines.push(format!("**Width**: {width}px"));
    }
    if let Some(height) = layout.height {
        lines.push(format!("**Height**: {height}px"));
    }
    if let Some(constraints) = &layout.constraints {
        let encoded = serde_json::to_string(constraints).unwrap_or_default();
        lines.push(format!("**Constraints**: {encoded}"));
    }
    if let Some(align) = &layout.align {
        lines.push(format!("**Align**: {align}"));
    }
    if let Some(grow) = layout.grow {
        lines.push(format!("**Grow**: {grow}"));
    }
    lines
}

fn effect_lines(effects: &Effects) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, shadow) in effects.shadows.iter().enumerate() {
        lines.push(format!(
            "**Shadow {}**: `{}` offset({}px, {}px) blur({}px) spread({}px)",
            i + 1,
            shadow.color,
            shadow.offset.x,
            shadow.offset.y,
            shadow.radius,
            shadow.spread
        ));
    }
    for (i, blur) in effects.blurs.iter().enumerate() {
        lines.push(format!(
            "**Blur {}**: {} ({}px)",
            i + 1,
            blur.blur_type,
            blur.radius
        ));
    }
    if let Some(radius) = effects.border_radius {
        lines.push(format!("**Border Radius**: {radius}px"));
    }
    if let Some(opacity) = effects.opacity {
        lines.push(format!("**Opacity**: {}%", (opacity * 100.0).round()));
    }
    lines
}
