//! SVG builder — accumulates SVG elements and produces the final string.

use super::constants::FONT_FAMILY;
use super::primitives::{Diagram, DrawCommand, LineCap, Rgba, TextAnchor};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn build(self) -> String {
        let (w, h) = (num(self.width), num(self.height));
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" style="font-family: {FONT_FAMILY};">"#
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect { x, y, width, height, fill } => self.rect(*x, *y, *width, *height, fill),
            DrawCommand::Line { x1, y1, x2, y2, stroke, width, cap } => {
                self.line(*x1, *y1, *x2, *y2, stroke, *width, *cap)
            }
            DrawCommand::Circle { cx, cy, r, fill } => self.circle(*cx, *cy, *r, fill),
            DrawCommand::Text { x, y, content, size, bold, fill, anchor } => {
                self.text(*x, *y, content, *size, *bold, fill, *anchor)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &Rgba, width: f64, cap: LineCap) {
        let cap = match cap {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        };
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"{} stroke-width="{}" stroke-linecap="{}"/>"#,
            num(x1), num(y1), num(x2), num(y2), color.to_hex(), opacity("stroke-opacity", color), num(width), cap
        ));
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &Rgba) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
            num(x), num(y), num(w), num(h), fill.to_hex(), opacity("fill-opacity", fill)
        ));
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &Rgba) {
        self.elements.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
            num(cx), num(cy), num(r), fill.to_hex(), opacity("fill-opacity", fill)
        ));
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, bold: bool, fill: &Rgba, anchor: TextAnchor) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        let weight = if bold { "bold" } else { "normal" };
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-size="{}" font-weight="{}" fill="{}"{} text-anchor="{}">{}</text>"#,
            num(x), num(y), num(size), weight, fill.to_hex(), opacity("fill-opacity", fill), anchor.as_svg(), escaped
        ));
    }
}

/// Serialize a diagram into a self-contained SVG document.
pub fn write_svg(diagram: &Diagram) -> String {
    let mut svg = SvgBuilder::new(diagram.width, diagram.height);
    for command in &diagram.commands {
        svg.command(command);
    }
    svg.build()
}

/// A standalone SVG holding a single command on a canvas of the given size.
/// The rasterizer uses this to hand text to the SVG text engine.
pub(super) fn single_command_svg(width: f64, height: f64, command: &DrawCommand) -> String {
    let mut svg = SvgBuilder::new(width, height);
    svg.command(command);
    svg.build()
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub(super) fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn opacity(attr: &str, color: &Rgba) -> String {
    if color.is_opaque() {
        String::new()
    } else {
        format!(r#" {attr}="{}""#, num(color.a as f64 / 255.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        assert_eq!(num(113.39999999999999), "113.4");
        assert_eq!(num(132.29999999999998), "132.3");
        assert_eq!(num(18.0), "18");
        assert_eq!(num(4.644), "4.64");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(0.0), "0");
    }

    #[test]
    fn text_is_escaped() {
        let mut svg = SvgBuilder::new(10.0, 10.0);
        svg.text(1.0, 2.0, "A<&>B", 12.0, true, &Rgba::BLACK, TextAnchor::Middle);
        let out = svg.build();
        assert!(out.contains("A&lt;&amp;&gt;B"));
        assert!(out.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn root_carries_size_and_namespace() {
        let out = write_svg(&Diagram::new(113.4, 132.3));
        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 113.4 132.3" width="113.4" height="132.3""#));
        assert!(out.ends_with("</svg>\n"));
    }

    #[test]
    fn translucent_fill_writes_opacity() {
        let mut svg = SvgBuilder::new(10.0, 10.0);
        svg.rect(0.0, 0.0, 10.0, 10.0, &Rgba::WHITE.with_alpha(0));
        assert!(svg.elements[0].contains(r#"fill-opacity="0""#));
    }
}
