//! Chord editor session — the authoring state behind the editor canvas.
//!
//! The session is a plain value owned by the caller. Canvas clicks are
//! mapped to strings and fret rows with the same layout the renderer uses,
//! and [`EditorSession::snapshot`] produces the chord handed to the
//! renderer. The renderer never reads the session.

use serde::{Deserialize, Serialize};

use crate::model::{Chord, FRET_ROWS, MAX_BASE_FRET, MUTED, OPEN, STRING_COUNT};
use crate::renderer::constants::TOP_MARGIN;
use crate::renderer::{compute_layout, DiagramLayout};

/// What a canvas position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasHit {
    /// Inside the grid: a string and a visible fret row.
    Fret { string: usize, row: usize },
    /// The marker band above the grid, where open/muted is toggled.
    Marker { string: usize },
}

/// Map a canvas position to the string/row under it.
///
/// A string claims half a string spacing on either side; positions outside
/// the grid and the marker band return `None`.
pub fn hit_test(layout: &DiagramLayout, x: f64, y: f64) -> Option<CanvasHit> {
    let half = layout.string_spacing / 2.0;
    if x < layout.diagram_left - half || x > layout.diagram_right() + half {
        return None;
    }
    let string = (((x - layout.diagram_left) / layout.string_spacing).round().max(0.0) as usize)
        .min(STRING_COUNT - 1);

    if y >= layout.diagram_top - TOP_MARGIN && y < layout.diagram_top {
        return Some(CanvasHit::Marker { string });
    }
    if y >= layout.diagram_top && y <= layout.diagram_bottom() {
        let row = (((y - layout.diagram_top) / layout.fret_spacing).floor() as usize).min(FRET_ROWS - 1);
        return Some(CanvasHit::Fret { string, row });
    }
    None
}

/// Draft chord plus the editor's current finger selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSession {
    pub name: String,
    pub base_fret: i32,
    pub frets: [i32; STRING_COUNT],
    pub fingers: [u8; STRING_COUNT],
    pub barres: Vec<i32>,
    /// Finger assigned to newly placed positions (0 = none)
    pub selected_finger: u8,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_fret: 1,
            frets: [OPEN; STRING_COUNT],
            fingers: [0; STRING_COUNT],
            barres: Vec::new(),
            selected_finger: 1,
        }
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing chord.
    pub fn load(chord: &Chord) -> Self {
        Self {
            name: chord.name.clone(),
            base_fret: chord.base_fret.clamp(1, MAX_BASE_FRET),
            frets: chord.frets,
            fingers: chord.fingers,
            barres: chord.barres.clone(),
            selected_finger: 1,
        }
    }

    pub fn layout(&self) -> DiagramLayout {
        compute_layout(self.base_fret)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn select_finger(&mut self, finger: u8) {
        self.selected_finger = finger.min(4);
    }

    /// Move the visible window. Positions that leave the window are kept; they
    /// simply stop being drawn.
    pub fn set_base_fret(&mut self, base_fret: i32) {
        self.base_fret = base_fret.clamp(1, MAX_BASE_FRET);
    }

    /// Apply a click at canvas position (`x`, `y`). Returns the hit, if any.
    pub fn click(&mut self, x: f64, y: f64) -> Option<CanvasHit> {
        let hit = hit_test(&self.layout(), x, y)?;
        match hit {
            CanvasHit::Fret { string, row } => {
                self.toggle_position(string, self.base_fret.saturating_add(row as i32))
            }
            CanvasHit::Marker { string } => self.toggle_muted(string),
        }
        Some(hit)
    }

    /// Place the selected finger at `fret`, or clear the string back to open
    /// when that fret is already held.
    pub fn toggle_position(&mut self, string: usize, fret: i32) {
        if string >= STRING_COUNT {
            return;
        }
        if self.frets[string] == fret {
            self.frets[string] = OPEN;
            self.fingers[string] = 0;
        } else {
            self.frets[string] = fret;
            self.fingers[string] = self.selected_finger;
        }
    }

    /// Cycle a string between open and muted. A fretted string becomes muted.
    pub fn toggle_muted(&mut self, string: usize) {
        if string >= STRING_COUNT {
            return;
        }
        self.frets[string] = if self.frets[string] == MUTED { OPEN } else { MUTED };
        self.fingers[string] = 0;
    }

    /// Add or remove a barre at `fret`.
    pub fn toggle_barre(&mut self, fret: i32) {
        if let Some(pos) = self.barres.iter().position(|&b| b == fret) {
            self.barres.remove(pos);
        } else if fret > 0 {
            self.barres.push(fret);
            self.barres.sort_unstable();
        }
    }

    /// The chord as it would be saved: fingers cleared on open and muted
    /// strings.
    pub fn snapshot(&self) -> Chord {
        Chord::new(
            self.name.clone(),
            self.base_fret,
            self.frets,
            self.fingers,
            self.barres.clone(),
        )
        .normalized()
    }
}
