//! Chord diagram renderer — converts chords into drawing primitives and
//! serializes them to SVG or paints them onto a pixel surface.
//!
//! Every render is a pure function of its inputs: the layout is recomputed
//! per call and no state is shared between calls, so renders may run in
//! parallel freely.

pub mod constants;
mod diagram;
mod geometry;
mod primitives;
mod raster;
mod strip;
mod svg_builder;
mod svg_reader;

use serde::{Deserialize, Serialize};

use crate::model::Chord;

pub use diagram::compute_primitives;
pub use geometry::{compute_layout, DiagramLayout};
pub use primitives::{Diagram, DrawCommand, LineCap, Rgba, TextAnchor};
pub use raster::{encode_png, rasterize_png, PixelSurface, Rasterizer, BUNDLED_FONT_FAMILY};
pub use strip::{compose_strip, placeholder_primitives, strip_slots, MAX_STRIP_SLOTS, MIN_STRIP_SLOTS};
pub use svg_builder::write_svg;
pub use svg_reader::read_svg;

// ═══════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════

/// Canvas fill painted before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    White,
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub background: Background,
    /// Device pixels per user unit for raster output
    pub raster_scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Background::White,
            raster_scale: 1.0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render one chord into a diagram of the fixed canvas size.
pub fn render_chord(chord: &Chord, options: &RenderOptions) -> Diagram {
    let layout = compute_layout(chord.base_fret);
    Diagram {
        width: layout.width,
        height: layout.height,
        commands: compute_primitives(chord, &layout, options.background),
    }
}

/// Render one chord into a complete SVG string.
pub fn render_chord_to_svg(chord: &Chord, options: &RenderOptions) -> String {
    write_svg(&render_chord(chord, options))
}

/// Render one chord onto a pixel surface.
pub fn render_chord_to_raster(
    chord: &Chord,
    options: &RenderOptions,
    rasterizer: &Rasterizer,
) -> Result<PixelSurface, String> {
    rasterizer.rasterize(&render_chord(chord, options), options.raster_scale)
}

/// Render a strip of chord slots (padded to 6, truncated at 8).
pub fn render_strip(slots: &[Option<Chord>], options: &RenderOptions) -> Diagram {
    compose_strip(slots, options.background)
}

/// Render a strip of chord slots into a complete SVG string.
pub fn render_strip_to_svg(slots: &[Option<Chord>], options: &RenderOptions) -> String {
    write_svg(&render_strip(slots, options))
}

/// Render a strip of chord slots onto a pixel surface.
pub fn render_strip_to_raster(
    slots: &[Option<Chord>],
    options: &RenderOptions,
    rasterizer: &Rasterizer,
) -> Result<PixelSurface, String> {
    rasterizer.rasterize(&render_strip(slots, options), options.raster_scale)
}
