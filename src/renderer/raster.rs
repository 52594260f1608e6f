//! Raster backend — paints a [`Diagram`] onto a pixel surface.
//!
//! Shapes are painted directly with tiny-skia. Text primitives go through
//! resvg one at a time so glyph shaping matches what a browser does with the
//! SVG output, while paint order is still driven by the command list.

use std::sync::Arc;

use resvg::usvg;
use tiny_skia::{FillRule, LineCap as SkiaLineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::primitives::{Diagram, DrawCommand, LineCap, Rgba};
use super::svg_builder::single_command_svg;

/// An RGBA pixel surface produced by the rasterizer.
#[derive(Clone)]
pub struct PixelSurface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PixelSurface {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA value at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Encode to PNG on the current thread.
    pub fn encode_png(&self) -> Result<Vec<u8>, String> {
        self.pixmap
            .encode_png()
            .map_err(|e| format!("PNG encoding error: {e}"))
    }
}

/// Encode a surface to PNG on the blocking pool and await the bytes.
///
/// Must be awaited from within a tokio runtime. A failed encode is returned
/// as an error; nothing is retried.
pub async fn encode_png(surface: PixelSurface) -> Result<Vec<u8>, String> {
    let result = tokio::task::spawn_blocking(move || surface.encode_png())
        .await
        .map_err(|e| format!("PNG encode task failed: {e}"))?;
    if let Err(ref e) = result {
        log::warn!("{e}");
    }
    result
}

/// Rasterize and encode `diagram` on the blocking pool.
///
/// Font lookup, glyph layout and painting are all synchronous, so the whole
/// pipeline runs off the async worker.
pub async fn rasterize_png(rasterizer: Arc<Rasterizer>, diagram: Diagram, scale: f64) -> Result<Vec<u8>, String> {
    tokio::task::spawn_blocking(move || rasterizer.rasterize(&diagram, scale)?.encode_png())
        .await
        .map_err(|e| format!("Raster task failed: {e}"))?
}

// ═══════════════════════════════════════════════════════════════════════
// Rasterizer
// ═══════════════════════════════════════════════════════════════════════

/// Paints diagrams onto pixmaps. Holds the font database used for text, so
/// one rasterizer can be reused across a batch.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Rasterizer using the bundled DejaVu Sans faces, so raster text looks
    /// the same on every host.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        load_bundled_fonts(options.fontdb_mut());
        Self { options }
    }

    /// Bundled faces plus the fonts installed on the system. Installed
    /// Helvetica or Arial take precedence over the bundled sans-serif.
    pub fn with_system_fonts() -> Self {
        let mut options = usvg::Options::default();
        let fontdb = options.fontdb_mut();
        load_bundled_fonts(fontdb);
        fontdb.load_system_fonts();
        Self { options }
    }

    /// Rasterizer using a caller-supplied font database.
    pub fn with_fonts(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        let options = usvg::Options {
            fontdb,
            ..usvg::Options::default()
        };
        Self { options }
    }

    /// Paint `diagram` at `scale` device pixels per user unit. The surface is
    /// the diagram size rounded up to whole pixels.
    pub fn rasterize(&self, diagram: &Diagram, scale: f64) -> Result<PixelSurface, String> {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        let width = (diagram.width * scale).ceil() as u32;
        let height = (diagram.height * scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| format!("Cannot allocate a {width}x{height} pixel surface"))?;

        let transform = Transform::from_scale(scale as f32, scale as f32);
        for command in &diagram.commands {
            self.paint(&mut pixmap, diagram, command, transform)?;
        }

        log::debug!(
            "Rasterized {} primitives onto {width}x{height} surface",
            diagram.commands.len()
        );
        Ok(PixelSurface { pixmap })
    }

    fn paint(
        &self,
        pixmap: &mut Pixmap,
        diagram: &Diagram,
        command: &DrawCommand,
        transform: Transform,
    ) -> Result<(), String> {
        match command {
            DrawCommand::Rect { x, y, width, height, fill } => {
                log::trace!("PAINT rect {x},{y} {width}x{height}");
                if let Some(rect) = Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32) {
                    pixmap.fill_rect(rect, &paint(fill), transform, None);
                }
            }
            DrawCommand::Line { x1, y1, x2, y2, stroke, width, cap } => {
                log::trace!("PAINT line {x1},{y1} -> {x2},{y2}");
                let mut pb = PathBuilder::new();
                pb.move_to(*x1 as f32, *y1 as f32);
                pb.line_to(*x2 as f32, *y2 as f32);
                if let Some(path) = pb.finish() {
                    let stroke_style = Stroke {
                        width: *width as f32,
                        line_cap: match cap {
                            LineCap::Butt => SkiaLineCap::Butt,
                            LineCap::Round => SkiaLineCap::Round,
                        },
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint(stroke), &stroke_style, transform, None);
                }
            }
            DrawCommand::Circle { cx, cy, r, fill } => {
                log::trace!("PAINT circle {cx},{cy} r={r}");
                if let Some(path) = PathBuilder::from_circle(*cx as f32, *cy as f32, *r as f32) {
                    pixmap.fill_path(&path, &paint(fill), FillRule::Winding, transform, None);
                }
            }
            DrawCommand::Text { content, .. } => {
                log::trace!("PAINT text {content:?}");
                let svg = single_command_svg(diagram.width, diagram.height, command);
                let tree = usvg::Tree::from_str(&svg, &self.options)
                    .map_err(|e| format!("Cannot lay out text {content:?}: {e}"))?;
                // usvg drops text it has no face for instead of failing.
                if tree.root().children().is_empty() && !content.trim().is_empty() {
                    log::warn!("No font face for text {content:?}");
                    return Err(format!("No font face available for text {content:?}"));
                }
                resvg::render(&tree, transform, &mut pixmap.as_mut());
            }
        }
        Ok(())
    }
}

const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Family name of the bundled faces, used as the generic sans-serif.
pub const BUNDLED_FONT_FAMILY: &str = "DejaVu Sans";

fn load_bundled_fonts(fontdb: &mut usvg::fontdb::Database) {
    fontdb.load_font_data(DEJAVU_SANS.to_vec());
    fontdb.load_font_data(DEJAVU_SANS_BOLD.to_vec());
    fontdb.set_sans_serif_family(BUNDLED_FONT_FAMILY);
}

fn paint(color: &Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(diagram: &Diagram) -> PixelSurface {
        Rasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()))
            .rasterize(diagram, 1.0)
            .unwrap()
    }

    #[test]
    fn surface_rounds_up_to_whole_pixels() {
        let s = surface(&Diagram::new(113.4, 132.3));
        assert_eq!((s.width(), s.height()), (114, 133));
    }

    #[test]
    fn empty_diagram_is_transparent() {
        let s = surface(&Diagram::new(4.0, 4.0));
        assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn later_commands_paint_over_earlier_ones() {
        let mut diagram = Diagram::new(10.0, 10.0);
        diagram.push(DrawCommand::Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0, fill: Rgba::WHITE });
        diagram.push(DrawCommand::Circle { cx: 5.0, cy: 5.0, r: 3.0, fill: Rgba::BLACK });
        let s = surface(&diagram);
        assert_eq!(s.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn scale_multiplies_surface_size() {
        let rasterizer = Rasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()));
        let s = rasterizer.rasterize(&Diagram::new(10.0, 5.0), 2.0).unwrap();
        assert_eq!((s.width(), s.height()), (20, 10));
    }

    #[test]
    fn zero_sized_diagram_fails() {
        let rasterizer = Rasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()));
        assert!(rasterizer.rasterize(&Diagram::new(0.0, 0.0), 1.0).is_err());
    }

    #[test]
    fn png_has_signature() {
        let png = surface(&Diagram::new(3.0, 3.0)).encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    fn text(content: &str, x: f64, y: f64, size: f64, fill: Rgba) -> DrawCommand {
        DrawCommand::Text {
            x,
            y,
            content: content.to_string(),
            size,
            bold: true,
            fill,
            anchor: crate::renderer::TextAnchor::Middle,
        }
    }

    fn dark_pixels(s: &PixelSurface, rows: std::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..s.width()).map(move |x| (x, y)))
            .filter_map(|(x, y)| s.pixel(x, y))
            .filter(|p| p[3] > 0 && p[0] < 0x80)
            .count()
    }

    #[test]
    fn bundled_font_draws_text() {
        let mut diagram = Diagram::new(60.0, 30.0);
        diagram.push(DrawCommand::Rect { x: 0.0, y: 0.0, width: 60.0, height: 30.0, fill: Rgba::WHITE });
        diagram.push(text("Am", 30.0, 20.0, 14.0, Rgba::BLACK));
        let s = Rasterizer::new().rasterize(&diagram, 1.0).unwrap();
        assert!(dark_pixels(&s, 0..s.height()) > 20);
    }

    #[test]
    fn text_without_any_font_is_an_error() {
        let mut diagram = Diagram::new(60.0, 30.0);
        diagram.push(text("Am", 30.0, 20.0, 14.0, Rgba::BLACK));
        let err = Rasterizer::with_fonts(Arc::new(usvg::fontdb::Database::new()))
            .rasterize(&diagram, 1.0)
            .unwrap_err();
        assert!(err.contains("Am"), "{err}");
    }

    #[test]
    fn empty_text_needs_no_font() {
        let mut diagram = Diagram::new(10.0, 10.0);
        diagram.push(text("", 5.0, 5.0, 10.0, Rgba::BLACK));
        assert!(surface(&diagram).pixel(5, 5).is_some());
    }

    #[tokio::test]
    async fn encode_png_awaits_blocking_encode() {
        let png = encode_png(surface(&Diagram::new(5.0, 5.0))).await.unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn rasterize_png_runs_off_thread() {
        let mut diagram = Diagram::new(8.0, 8.0);
        diagram.push(DrawCommand::Circle { cx: 4.0, cy: 4.0, r: 2.0, fill: Rgba::BLACK });
        let png = rasterize_png(Arc::new(Rasterizer::new()), diagram, 2.0).await.unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
