//! Multi-chord strips — song banners and PDF chord rows built from
//! single-chord renders laid side by side.

use crate::model::Chord;
use super::constants::*;
use super::diagram::{compute_primitives, push_grid};
use super::geometry::compute_layout;
use super::primitives::{Diagram, DrawCommand};
use super::Background;

/// Fewest slots a strip shows; shorter slot lists are padded with
/// placeholder diagrams.
pub const MIN_STRIP_SLOTS: usize = 6;

/// Most slots a strip shows; longer slot lists are truncated.
pub const MAX_STRIP_SLOTS: usize = 8;

/// Normalize a slot list to the 6–8 slots a strip holds.
pub fn strip_slots(slots: &[Option<Chord>]) -> Vec<Option<Chord>> {
    if slots.len() > MAX_STRIP_SLOTS {
        log::warn!(
            "Strip has {} slots, keeping the first {MAX_STRIP_SLOTS}",
            slots.len()
        );
    }
    let mut out: Vec<Option<Chord>> = slots.iter().take(MAX_STRIP_SLOTS).cloned().collect();
    out.resize(out.len().max(MIN_STRIP_SLOTS), None);
    out
}

/// Compose a strip from `slots` (normalized with [`strip_slots`]).
///
/// Slot `i` occupies the canvas-width column starting at `i × CANVAS_WIDTH`.
/// Per-chord backgrounds are dropped; the strip gets one shared background
/// when `background` is white.
pub fn compose_strip(slots: &[Option<Chord>], background: Background) -> Diagram {
    let slots = strip_slots(slots);
    let mut strip = Diagram::new(slots.len() as f64 * CANVAS_WIDTH, CANVAS_HEIGHT);

    if background == Background::White {
        strip.push(DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: strip.width,
            height: strip.height,
            fill: BACKGROUND_COLOR,
        });
    }

    for (i, slot) in slots.iter().enumerate() {
        let dx = i as f64 * CANVAS_WIDTH;
        let commands = match slot {
            Some(chord) => {
                compute_primitives(chord, &compute_layout(chord.base_fret), Background::Transparent)
            }
            None => placeholder_primitives(),
        };
        strip
            .commands
            .extend(commands.iter().map(|c| c.translated(dx, 0.0)));
    }

    log::debug!(
        "Composed strip of {} slots ({} empty), {} primitives",
        slots.len(),
        slots.iter().filter(|s| s.is_none()).count(),
        strip.commands.len()
    );
    strip
}

/// Grid-only diagram for an empty slot, drawn as an open-position chart.
pub fn placeholder_primitives() -> Vec<DrawCommand> {
    let mut out = Vec::new();
    push_grid(&mut out, &compute_layout(1), true);
    out
}
