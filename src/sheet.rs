//! Sheet layout — fits a chord strip into a fixed page width for print.
//!
//! Works in centimetres and reports placement in millimetres, which is what
//! the PDF assembly expects.

use serde::{Deserialize, Serialize};

use crate::renderer::constants::{DIAGRAM_HEIGHT_CM, DIAGRAM_WIDTH_CM};

/// Tunables for [`layout_strip`]. The defaults are the print constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetConfig {
    pub diagram_width_cm: f64,
    pub diagram_height_cm: f64,
    /// Gap between neighbouring diagrams at scale 1.0
    pub spacing_cm: f64,
    /// Margin on each side of the page
    pub margin_cm: f64,
    /// Smallest margin the layout may shrink to when recovering width
    pub min_margin_cm: f64,
    /// Smallest legible scale
    pub min_scale: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            diagram_width_cm: DIAGRAM_WIDTH_CM,
            diagram_height_cm: DIAGRAM_HEIGHT_CM,
            spacing_cm: 0.2,
            margin_cm: 0.5,
            min_margin_cm: 0.5,
            min_scale: 0.6,
        }
    }
}

/// Placement of a strip on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLayout {
    pub scale: f64,
    pub margin_cm: f64,
    pub diagram_width_mm: f64,
    pub diagram_height_mm: f64,
    pub spacing_mm: f64,
    /// Left edge of the first diagram, from the page edge
    pub x_offset_mm: f64,
    /// Diagrams are drawn below the legible minimum
    pub warning: bool,
}

impl SheetLayout {
    /// Total width of the scaled group.
    pub fn group_width_mm(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        n as f64 * self.diagram_width_mm + (n - 1) as f64 * self.spacing_mm
    }
}

/// Natural width in centimetres of `n` diagrams with spacing, at scale 1.0.
pub fn natural_width_cm(n: usize, config: &SheetConfig) -> f64 {
    if n == 0 {
        return 0.0;
    }
    n as f64 * config.diagram_width_cm + (n - 1) as f64 * config.spacing_cm
}

/// Fit `n` diagrams into a page `page_width_cm` wide with the default config.
pub fn layout_strip(n: usize, page_width_cm: f64) -> SheetLayout {
    layout_strip_with(n, page_width_cm, &SheetConfig::default())
}

/// Fit `n` diagrams into a page `page_width_cm` wide.
///
/// Shrinks to fit when needed. Below `min_scale` the margin is reduced (not
/// below `min_margin_cm`) to hold `min_scale`; when even that does not fit
/// the scale stays at `min_scale` and `warning` is set.
pub fn layout_strip_with(n: usize, page_width_cm: f64, config: &SheetConfig) -> SheetLayout {
    let natural = natural_width_cm(n, config);
    let mut margin = config.margin_cm;
    let usable = page_width_cm - 2.0 * margin;

    let mut warning = false;
    let scale = if natural <= usable {
        1.0
    } else {
        let fit = if natural > 0.0 { usable / natural } else { 1.0 };
        if fit >= config.min_scale {
            fit
        } else {
            let needed = natural * config.min_scale;
            let recovered_margin = (page_width_cm - needed) / 2.0;
            let floor = config.min_margin_cm.min(config.margin_cm);
            if recovered_margin >= floor {
                margin = recovered_margin.min(config.margin_cm);
            } else {
                margin = floor;
                warning = true;
                log::warn!(
                    "{n} diagrams need {needed:.2}cm at minimum scale but the page is {page_width_cm:.2}cm wide"
                );
            }
            config.min_scale
        }
    };

    let usable = page_width_cm - 2.0 * margin;
    let scaled_width = natural * scale;
    let slack = (usable - scaled_width).max(0.0);
    let x_offset_cm = margin + slack / 2.0;

    SheetLayout {
        scale,
        margin_cm: margin,
        diagram_width_mm: config.diagram_width_cm * scale * 10.0,
        diagram_height_mm: config.diagram_height_cm * scale * 10.0,
        spacing_mm: config.spacing_cm * scale * 10.0,
        x_offset_mm: x_offset_cm * 10.0,
        warning,
    }
}
