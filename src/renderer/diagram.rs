//! Single-chord rendering — turns one chord plus its layout into an ordered
//! primitive list.

use crate::model::{Chord, FRET_ROWS, STRING_COUNT};
use super::constants::*;
use super::geometry::DiagramLayout;
use super::primitives::{DrawCommand, LineCap, TextAnchor};
use super::Background;

/// Compute the primitives for `chord` in paint order.
///
/// Anything that cannot be placed (frets outside the four visible rows,
/// barres held by fewer than two strings) is skipped.
pub fn compute_primitives(
    chord: &Chord,
    layout: &DiagramLayout,
    background: Background,
) -> Vec<DrawCommand> {
    let mut out = Vec::new();

    if background == Background::White {
        out.push(DrawCommand::Rect {
            x: 0.0,
            y: 0.0,
            width: layout.width,
            height: layout.height,
            fill: BACKGROUND_COLOR,
        });
    }

    push_title(&mut out, layout, &chord.name);
    push_mute_marks(&mut out, chord, layout);
    if layout.show_fret_number {
        push_fret_number(&mut out, layout, chord.base_fret);
    }
    push_grid(&mut out, layout, chord.base_fret == 1);
    push_barres(&mut out, chord, layout);
    push_finger_dots(&mut out, chord, layout);

    log::debug!(
        "Rendered chord '{}' with {} primitives",
        chord.name,
        out.len()
    );
    out
}

// ═══════════════════════════════════════════════════════════════════════
// Labels
// ═══════════════════════════════════════════════════════════════════════

fn push_title(out: &mut Vec<DrawCommand>, layout: &DiagramLayout, name: &str) {
    out.push(DrawCommand::Text {
        x: layout.width / 2.0,
        y: TITLE_BASELINE,
        content: name.to_string(),
        size: TITLE_FONT_SIZE,
        bold: true,
        fill: INK_COLOR,
        anchor: TextAnchor::Middle,
    });
}

fn push_mute_marks(out: &mut Vec<DrawCommand>, chord: &Chord, layout: &DiagramLayout) {
    for string in (0..STRING_COUNT).filter(|&s| chord.is_muted(s)) {
        out.push(DrawCommand::Text {
            x: layout.string_x(string),
            y: layout.diagram_top - MUTE_OFFSET_Y,
            content: "X".to_string(),
            size: MUTE_FONT_SIZE,
            bold: false,
            fill: INK_COLOR,
            anchor: TextAnchor::Middle,
        });
    }
}

fn push_fret_number(out: &mut Vec<DrawCommand>, layout: &DiagramLayout, base_fret: i32) {
    out.push(DrawCommand::Text {
        x: layout.diagram_left - FRET_NUMBER_GAP,
        y: layout.row_center_y(0) + FRET_NUMBER_FONT_SIZE * BASELINE_SHIFT,
        content: base_fret.to_string(),
        size: FRET_NUMBER_FONT_SIZE,
        bold: false,
        fill: INK_COLOR,
        anchor: TextAnchor::End,
    });
}

// ═══════════════════════════════════════════════════════════════════════
// Grid
// ═══════════════════════════════════════════════════════════════════════

/// Six strings and five fret lines. The top line is the thick nut when
/// `nut` is set.
pub(super) fn push_grid(out: &mut Vec<DrawCommand>, layout: &DiagramLayout, nut: bool) {
    for string in 0..STRING_COUNT {
        let x = layout.string_x(string);
        out.push(DrawCommand::Line {
            x1: x,
            y1: layout.diagram_top,
            x2: x,
            y2: layout.diagram_bottom(),
            stroke: GRID_COLOR,
            width: STRING_LINE_WIDTH,
            cap: LineCap::Butt,
        });
    }

    for line in 0..=FRET_ROWS {
        let y = layout.fret_line_y(line);
        let width = if line == 0 && nut { NUT_WIDTH } else { FRET_LINE_WIDTH };
        out.push(DrawCommand::Line {
            x1: layout.diagram_left,
            y1: y,
            x2: layout.diagram_right(),
            y2: y,
            stroke: GRID_COLOR,
            width,
            cap: LineCap::Butt,
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Fingering
// ═══════════════════════════════════════════════════════════════════════

fn push_barres(out: &mut Vec<DrawCommand>, chord: &Chord, layout: &DiagramLayout) {
    let mut drawn: Vec<i32> = Vec::new();
    for &fret in &chord.barres {
        if fret <= 0 || drawn.contains(&fret) {
            continue;
        }
        let Some(row) = chord.fret_row(fret) else {
            log::debug!("Chord '{}': barre at fret {fret} is outside the window", chord.name);
            continue;
        };
        let strings = chord.barre_strings(fret);
        let (first, last) = match (strings.first(), strings.last()) {
            (Some(&first), Some(&last)) if strings.len() >= 2 => (first, last),
            _ => {
                log::warn!(
                    "Chord '{}': barre at fret {fret} is held by fewer than two strings",
                    chord.name
                );
                continue;
            }
        };
        drawn.push(fret);

        let y = layout.row_center_y(row);
        let (x1, x2) = (layout.string_x(first), layout.string_x(last));
        out.push(DrawCommand::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            stroke: DOT_COLOR,
            width: layout.dot_radius * BARRE_WIDTH_RATIO,
            cap: LineCap::Round,
        });
        push_dot(out, layout, x1, y);
        push_dot(out, layout, x2, y);

        let finger = chord.fingers[first];
        if finger > 0 {
            push_finger_label(out, layout, x1, y, finger);
            push_finger_label(out, layout, x2, y, finger);
        }
    }
}

fn push_finger_dots(out: &mut Vec<DrawCommand>, chord: &Chord, layout: &DiagramLayout) {
    for string in 0..STRING_COUNT {
        let fret = chord.frets[string];
        let finger = chord.fingers[string];
        if fret <= 0 || finger == 0 || chord.is_barre_covered(string) {
            continue;
        }
        let Some(row) = chord.fret_row(fret) else {
            continue;
        };
        let (x, y) = (layout.string_x(string), layout.row_center_y(row));
        push_dot(out, layout, x, y);
        push_finger_label(out, layout, x, y, finger);
    }
}

fn push_dot(out: &mut Vec<DrawCommand>, layout: &DiagramLayout, cx: f64, cy: f64) {
    out.push(DrawCommand::Circle {
        cx,
        cy,
        r: layout.dot_radius,
        fill: DOT_COLOR,
    });
}

fn push_finger_label(out: &mut Vec<DrawCommand>, layout: &DiagramLayout, cx: f64, cy: f64, finger: u8) {
    let size = layout.dot_radius * FINGER_FONT_RATIO;
    out.push(DrawCommand::Text {
        x: cx,
        y: cy + size * BASELINE_SHIFT,
        content: finger.to_string(),
        size,
        bold: true,
        fill: FINGER_TEXT_COLOR,
        anchor: TextAnchor::Middle,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::geometry::compute_layout;
    use pretty_assertions::assert_eq;

    fn render(chord: &Chord) -> Vec<DrawCommand> {
        compute_primitives(chord, &compute_layout(chord.base_fret), Background::Transparent)
    }

    fn circle_centers(cmds: &[DrawCommand]) -> Vec<(f64, f64)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { cx, cy, .. } => Some((*cx, *cy)),
                _ => None,
            })
            .collect()
    }

    fn finger_labels(cmds: &[DrawCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, fill, .. } if *fill == FINGER_TEXT_COLOR => Some(content.clone()),
                _ => None,
            })
            .collect()
    }

    fn top_line_width(cmds: &[DrawCommand], layout: &DiagramLayout) -> Option<f64> {
        cmds.iter().find_map(|c| match c {
            DrawCommand::Line { y1, y2, width, .. }
                if *y1 == layout.diagram_top && *y2 == layout.diagram_top =>
            {
                Some(*width)
            }
            _ => None,
        })
    }

    #[test]
    fn background_is_optional() {
        let chord = Chord::empty("C");
        let layout = compute_layout(1);
        let white = compute_primitives(&chord, &layout, Background::White);
        let clear = compute_primitives(&chord, &layout, Background::Transparent);
        assert!(matches!(white[0], DrawCommand::Rect { .. }));
        assert_eq!(white.len(), clear.len() + 1);
        assert!(!clear.iter().any(|c| matches!(c, DrawCommand::Rect { .. })));
    }

    #[test]
    fn open_position_draws_nut_without_label() {
        let chord = Chord::new("C", 1, [-1, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0], vec![]);
        let cmds = render(&chord);
        let layout = compute_layout(1);
        assert_eq!(top_line_width(&cmds, &layout), Some(NUT_WIDTH));
        assert!(!cmds
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { anchor: TextAnchor::End, .. })));
    }

    #[test]
    fn raised_position_draws_thin_top_line_and_label() {
        let chord = Chord::new("Bm", 2, [-1, 2, 4, 4, 3, 2], [0, 1, 3, 4, 2, 1], vec![2]);
        let cmds = render(&chord);
        let layout = compute_layout(2);
        assert_eq!(top_line_width(&cmds, &layout), Some(FRET_LINE_WIDTH));
        let label = cmds.iter().find_map(|c| match c {
            DrawCommand::Text { content, anchor: TextAnchor::End, x, .. } => Some((content.clone(), *x)),
            _ => None,
        });
        let (content, x) = label.expect("base fret label");
        assert_eq!(content, "2");
        assert!(x < layout.diagram_left);
    }

    #[test]
    fn paint_order_follows_layers() {
        let chord = Chord::new("F", 1, [1, 3, 3, 2, 1, 1], [1, 3, 4, 2, 1, 1], vec![1]);
        let cmds = render(&chord);
        // Title first, then 11 grid lines, then the barre line.
        assert!(matches!(&cmds[0], DrawCommand::Text { content, .. } if content == "F"));
        assert!(cmds[1..12].iter().all(|c| matches!(c, DrawCommand::Line { .. })));
        assert!(matches!(cmds[12], DrawCommand::Line { cap: LineCap::Round, .. }));
    }

    #[test]
    fn muted_string_gets_x_and_no_dot() {
        let chord = Chord::new("odd", 1, [-1, 2, 2, 0, 0, 0], [3, 2, 3, 0, 0, 0], vec![]);
        let cmds = render(&chord);
        let layout = compute_layout(1);
        let xs: Vec<f64> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, x, .. } if content == "X" => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![layout.string_x(0)]);
        assert!(circle_centers(&cmds).iter().all(|&(cx, _)| cx != layout.string_x(0)));
    }

    #[test]
    fn mute_mark_sits_at_fixed_offset() {
        let chord = Chord::new("D", 1, [-1, -1, 0, 2, 3, 2], [0, 0, 0, 1, 3, 2], vec![]);
        let cmds = render(&chord);
        let layout = compute_layout(1);
        for c in &cmds {
            if let DrawCommand::Text { content, y, .. } = c {
                if content == "X" {
                    assert_eq!(*y, layout.diagram_top - MUTE_OFFSET_Y);
                }
            }
        }
    }

    #[test]
    fn one_dot_per_fingered_string() {
        let chord = Chord::new("C", 1, [-1, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0], vec![]);
        let cmds = render(&chord);
        let layout = compute_layout(1);
        assert_eq!(
            circle_centers(&cmds),
            vec![
                (layout.string_x(1), layout.row_center_y(2)),
                (layout.string_x(2), layout.row_center_y(1)),
                (layout.string_x(4), layout.row_center_y(0)),
            ]
        );
        assert_eq!(finger_labels(&cmds), vec!["3", "2", "1"]);
    }

    #[test]
    fn barre_replaces_dots_on_covered_strings() {
        let chord = Chord::new("F", 1, [1, 3, 3, 2, 1, 1], [1, 3, 4, 2, 1, 1], vec![1]);
        let cmds = render(&chord);
        let layout = compute_layout(1);
        let y = layout.row_center_y(0);

        let barre = cmds.iter().find(|c| matches!(c, DrawCommand::Line { cap: LineCap::Round, .. }));
        match barre {
            Some(DrawCommand::Line { x1, x2, y1, y2, .. }) => {
                assert_eq!((*x1, *x2), (layout.string_x(0), layout.string_x(5)));
                assert_eq!((*y1, *y2), (y, y));
            }
            other => panic!("expected barre line, got {other:?}"),
        }

        let centers = circle_centers(&cmds);
        // Two barre caps plus dots on strings 2, 3 and 4.
        assert_eq!(centers.len(), 5);
        assert_eq!(centers[0], (layout.string_x(0), y));
        assert_eq!(centers[1], (layout.string_x(5), y));
        assert_eq!(centers.iter().filter(|&&(cx, _)| cx == layout.string_x(4)).count(), 0);
        assert_eq!(finger_labels(&cmds), vec!["1", "1", "3", "4", "2"]);
    }

    #[test]
    fn barre_without_finger_has_no_labels() {
        let chord = Chord::new("F", 1, [1, 3, 3, 2, 1, 1], [0, 3, 4, 2, 1, 1], vec![1]);
        let labels = finger_labels(&render(&chord));
        assert_eq!(labels, vec!["3", "4", "2"]);
    }

    #[test]
    fn barre_needs_two_strings() {
        let chord = Chord::new("C", 1, [-1, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0], vec![1, 5]);
        let cmds = render(&chord);
        assert!(!cmds.iter().any(|c| matches!(c, DrawCommand::Line { cap: LineCap::Round, .. })));
        assert_eq!(circle_centers(&cmds).len(), 3);
    }

    #[test]
    fn out_of_window_frets_are_skipped() {
        let chord = Chord::new("high", 3, [1, 7, 3, 0, 9, -1], [1, 2, 3, 0, 4, 0], vec![9]);
        let cmds = render(&chord);
        let layout = compute_layout(3);
        assert_eq!(circle_centers(&cmds), vec![(layout.string_x(2), layout.row_center_y(0))]);
    }

    #[test]
    fn all_muted_chord_still_renders_grid() {
        let chord = Chord::new("none", 1, [-1; 6], [0; 6], vec![]);
        let cmds = render(&chord);
        assert_eq!(cmds.iter().filter(|c| matches!(c, DrawCommand::Line { .. })).count(), 11);
        assert_eq!(cmds.iter().filter(|c| matches!(c, DrawCommand::Text { content, .. } if content == "X")).count(), 6);
        assert_eq!(circle_centers(&cmds).len(), 0);
    }
}
