//! SVG reader — parses markup produced by the SVG builder back into a
//! [`Diagram`].
//!
//! Only the element subset the builder writes is understood: `rect`,
//! `line`, `circle` and `text` as direct children of the root.

use roxmltree::Node;

use super::primitives::{Diagram, DrawCommand, LineCap, Rgba, TextAnchor};

/// Parse SVG markup into a diagram.
pub fn read_svg(markup: &str) -> Result<Diagram, String> {
    let doc = roxmltree::Document::parse(markup).map_err(|e| format!("Failed to parse SVG: {e}"))?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(format!(
            "Expected <svg> root element, found <{}>",
            root.tag_name().name()
        ));
    }

    let mut diagram = Diagram::new(number(&root, "width")?, number(&root, "height")?);

    for node in root.children().filter(|n| n.is_element()) {
        let command = match node.tag_name().name() {
            "rect" => DrawCommand::Rect {
                x: number(&node, "x")?,
                y: number(&node, "y")?,
                width: number(&node, "width")?,
                height: number(&node, "height")?,
                fill: color(&node, "fill", "fill-opacity")?,
            },
            "line" => DrawCommand::Line {
                x1: number(&node, "x1")?,
                y1: number(&node, "y1")?,
                x2: number(&node, "x2")?,
                y2: number(&node, "y2")?,
                stroke: color(&node, "stroke", "stroke-opacity")?,
                width: number(&node, "stroke-width")?,
                cap: match node.attribute("stroke-linecap") {
                    Some("round") => LineCap::Round,
                    _ => LineCap::Butt,
                },
            },
            "circle" => DrawCommand::Circle {
                cx: number(&node, "cx")?,
                cy: number(&node, "cy")?,
                r: number(&node, "r")?,
                fill: color(&node, "fill", "fill-opacity")?,
            },
            "text" => DrawCommand::Text {
                x: number(&node, "x")?,
                y: number(&node, "y")?,
                content: node.text().unwrap_or_default().to_string(),
                size: number(&node, "font-size")?,
                bold: node.attribute("font-weight") == Some("bold"),
                fill: color(&node, "fill", "fill-opacity")?,
                anchor: match node.attribute("text-anchor") {
                    Some("middle") => TextAnchor::Middle,
                    Some("end") => TextAnchor::End,
                    _ => TextAnchor::Start,
                },
            },
            other => {
                log::debug!("Skipping unsupported SVG element <{other}>");
                continue;
            }
        };
        diagram.push(command);
    }

    Ok(diagram)
}

fn number(node: &Node, attr: &str) -> Result<f64, String> {
    let raw = node
        .attribute(attr)
        .ok_or_else(|| format!("<{}> is missing attribute '{attr}'", node.tag_name().name()))?;
    raw.trim()
        .parse()
        .map_err(|e| format!("<{}> attribute {attr}=\"{raw}\": {e}", node.tag_name().name()))
}

fn color(node: &Node, attr: &str, opacity_attr: &str) -> Result<Rgba, String> {
    let raw = node.attribute(attr).unwrap_or("black");
    let rgba = Rgba::parse(raw)
        .ok_or_else(|| format!("<{}> has unsupported color {attr}=\"{raw}\"", node.tag_name().name()))?;
    match node.attribute(opacity_attr) {
        Some(op) => {
            let op: f64 = op
                .trim()
                .parse()
                .map_err(|e| format!("<{}> attribute {opacity_attr}=\"{op}\": {e}", node.tag_name().name()))?;
            Ok(rgba.with_alpha((op.clamp(0.0, 1.0) * 255.0).round() as u8))
        }
        None => Ok(rgba),
    }
}
