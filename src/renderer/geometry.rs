//! Diagram geometry — the fixed layout every chord diagram is drawn into.

use serde::{Deserialize, Serialize};

use crate::model::{FRET_ROWS, STRING_COUNT};
use super::constants::*;

/// Layout descriptor for one diagram canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramLayout {
    pub width: f64,
    pub height: f64,
    pub diagram_top: f64,
    pub diagram_left: f64,
    pub diagram_width: f64,
    pub diagram_height: f64,
    pub string_spacing: f64,
    pub fret_spacing: f64,
    pub dot_radius: f64,
    pub show_fret_number: bool,
}

/// Compute the layout for a diagram whose top line is `base_fret`.
///
/// Only the fret-number flag depends on the chord; everything else comes
/// from the physical canvas size.
pub fn compute_layout(base_fret: i32) -> DiagramLayout {
    let width = CANVAS_WIDTH;
    let height = CANVAS_HEIGHT;
    let diagram_top = TITLE_HEIGHT + TOP_MARGIN;
    let diagram_left = SIDE_MARGIN;
    let diagram_width = width - 2.0 * SIDE_MARGIN;
    let diagram_height = height - diagram_top - BOTTOM_MARGIN;
    let string_spacing = diagram_width / (STRING_COUNT - 1) as f64;
    let fret_spacing = diagram_height / FRET_ROWS as f64;
    let dot_radius = DOT_RADIUS_RATIO * string_spacing.min(fret_spacing);

    DiagramLayout {
        width,
        height,
        diagram_top,
        diagram_left,
        diagram_width,
        diagram_height,
        string_spacing,
        fret_spacing,
        dot_radius,
        show_fret_number: base_fret > 1,
    }
}

impl DiagramLayout {
    /// X coordinate of string `string` (0-based).
    pub fn string_x(&self, string: usize) -> f64 {
        self.diagram_left + string as f64 * self.string_spacing
    }

    /// Y coordinate of fret line `line` (0 = top line, 4 = bottom line).
    pub fn fret_line_y(&self, line: usize) -> f64 {
        self.diagram_top + line as f64 * self.fret_spacing
    }

    /// Vertical center of fret row `row` (0-based from the top line).
    pub fn row_center_y(&self, row: usize) -> f64 {
        self.diagram_top + (row as f64 + 0.5) * self.fret_spacing
    }

    pub fn diagram_bottom(&self) -> f64 {
        self.diagram_top + self.diagram_height
    }

    pub fn diagram_right(&self) -> f64 {
        self.diagram_left + self.diagram_width
    }
}
