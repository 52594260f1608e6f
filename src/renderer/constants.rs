//! Shared constants for the diagram renderer (all in SVG user units unless
//! the name says otherwise).

use super::primitives::Rgba;

// ── Physical size ───────────────────────────────────────────────────
pub const PX_PER_CM: f64 = 37.8;
pub const DIAGRAM_WIDTH_CM: f64 = 3.0;
pub const DIAGRAM_HEIGHT_CM: f64 = 3.5;
pub const CANVAS_WIDTH: f64 = DIAGRAM_WIDTH_CM * PX_PER_CM; // 113.4
pub const CANVAS_HEIGHT: f64 = DIAGRAM_HEIGHT_CM * PX_PER_CM; // 132.3

// ── Margins ─────────────────────────────────────────────────────────
pub(super) const TITLE_HEIGHT: f64 = 24.0; // band holding the chord name
pub(crate) const TOP_MARGIN: f64 = 12.0; // band holding the X / open markers
pub(super) const BOTTOM_MARGIN: f64 = 8.0;
pub(super) const SIDE_MARGIN: f64 = 18.0; // wide enough for a two-digit base fret

// ── Grid ────────────────────────────────────────────────────────────
pub(super) const STRING_LINE_WIDTH: f64 = 1.0;
pub(super) const FRET_LINE_WIDTH: f64 = 1.0;
pub(super) const NUT_WIDTH: f64 = 3.5;
pub(super) const DOT_RADIUS_RATIO: f64 = 0.3;
pub(super) const BARRE_WIDTH_RATIO: f64 = 1.4; // barre stroke relative to dot radius

// ── Text ────────────────────────────────────────────────────────────
pub(super) const TITLE_FONT_SIZE: f64 = 14.0;
pub(super) const TITLE_BASELINE: f64 = 17.0;
pub(super) const MUTE_FONT_SIZE: f64 = 10.0;
pub(super) const MUTE_OFFSET_Y: f64 = 4.0; // baseline distance above the top fret line
pub(super) const FRET_NUMBER_FONT_SIZE: f64 = 10.0;
pub(super) const FRET_NUMBER_GAP: f64 = 4.0; // gap between label and first string
pub(super) const FINGER_FONT_RATIO: f64 = 1.6; // finger digit size relative to dot radius
pub(super) const BASELINE_SHIFT: f64 = 0.35; // em fraction from visual center to baseline

pub(super) const FONT_FAMILY: &str = "'Helvetica', 'Arial', sans-serif";

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const INK_COLOR: Rgba = Rgba::rgb(0x1a, 0x1a, 0x1a);
pub(super) const GRID_COLOR: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
pub(super) const DOT_COLOR: Rgba = Rgba::rgb(0x1a, 0x1a, 0x1a);
pub(super) const FINGER_TEXT_COLOR: Rgba = Rgba::WHITE;
pub(super) const BACKGROUND_COLOR: Rgba = Rgba::WHITE;
