//! Built-in chord tables.
//!
//! Common open and barre shapes, in the same record shape as user-authored
//! chords. Strings run from the low E (index 0) to the high E (index 5).

use crate::model::Chord;

struct Entry {
    name: &'static str,
    base_fret: i32,
    frets: [i32; 6],
    fingers: [u8; 6],
    barres: &'static [i32],
}

const fn entry(
    name: &'static str,
    base_fret: i32,
    frets: [i32; 6],
    fingers: [u8; 6],
    barres: &'static [i32],
) -> Entry {
    Entry {
        name,
        base_fret,
        frets,
        fingers,
        barres,
    }
}

#[rustfmt::skip]
const CHORDS: &[Entry] = &[
    entry("C",     1, [-1, 3, 2, 0, 1, 0],  [0, 3, 2, 0, 1, 0], &[]),
    entry("Cm",    3, [-1, 3, 5, 5, 4, 3],  [0, 1, 3, 4, 2, 1], &[3]),
    entry("C7",    1, [-1, 3, 2, 3, 1, 0],  [0, 3, 2, 4, 1, 0], &[]),
    entry("Cmaj7", 1, [-1, 3, 2, 0, 0, 0],  [0, 3, 2, 0, 0, 0], &[]),
    entry("D",     1, [-1, -1, 0, 2, 3, 2], [0, 0, 0, 1, 3, 2], &[]),
    entry("Dm",    1, [-1, -1, 0, 2, 3, 1], [0, 0, 0, 2, 3, 1], &[]),
    entry("D7",    1, [-1, -1, 0, 2, 1, 2], [0, 0, 0, 2, 1, 3], &[]),
    entry("E",     1, [0, 2, 2, 1, 0, 0],   [0, 2, 3, 1, 0, 0], &[]),
    entry("Em",    1, [0, 2, 2, 0, 0, 0],   [0, 2, 3, 0, 0, 0], &[]),
    entry("E7",    1, [0, 2, 0, 1, 0, 0],   [0, 2, 0, 1, 0, 0], &[]),
    entry("F",     1, [1, 3, 3, 2, 1, 1],   [1, 3, 4, 2, 1, 1], &[1]),
    entry("Fm",    1, [1, 3, 3, 1, 1, 1],   [1, 3, 4, 1, 1, 1], &[1]),
    entry("F#m",   2, [2, 4, 4, 2, 2, 2],   [1, 3, 4, 1, 1, 1], &[2]),
    entry("G",     1, [3, 2, 0, 0, 0, 3],   [2, 1, 0, 0, 0, 3], &[]),
    entry("G7",    1, [3, 2, 0, 0, 0, 1],   [3, 2, 0, 0, 0, 1], &[]),
    entry("A",     1, [-1, 0, 2, 2, 2, 0],  [0, 0, 1, 2, 3, 0], &[]),
    entry("Am",    1, [-1, 0, 2, 2, 1, 0],  [0, 0, 2, 3, 1, 0], &[]),
    entry("A7",    1, [-1, 0, 2, 0, 2, 0],  [0, 0, 2, 0, 3, 0], &[]),
    entry("Bb",    1, [-1, 1, 3, 3, 3, 1],  [0, 1, 2, 3, 4, 1], &[1]),
    entry("B7",    1, [-1, 2, 1, 2, 0, 2],  [0, 2, 1, 3, 0, 4], &[]),
    entry("Bm",    2, [-1, 2, 4, 4, 3, 2],  [0, 1, 3, 4, 2, 1], &[2]),
];

impl Entry {
    fn to_chord(&self) -> Chord {
        Chord::new(self.name, self.base_fret, self.frets, self.fingers, self.barres.to_vec())
    }
}

/// Root note of a chord name: the letter plus an optional `#` or `b`.
pub fn root_of(name: &str) -> &str {
    let end = match name.char_indices().nth(1) {
        Some((i, '#')) | Some((i, 'b')) => i + 1,
        Some((i, _)) => i,
        None => name.len(),
    };
    &name[..end]
}

/// Every built-in chord in table order.
pub fn all() -> Vec<Chord> {
    CHORDS.iter().map(Entry::to_chord).collect()
}

/// Look up a built-in chord by exact name.
pub fn find(name: &str) -> Option<Chord> {
    CHORDS.iter().find(|e| e.name == name).map(Entry::to_chord)
}

/// Built-in chords sharing `root`.
pub fn family(root: &str) -> Vec<Chord> {
    CHORDS
        .iter()
        .filter(|e| root_of(e.name) == root)
        .map(Entry::to_chord)
        .collect()
}

/// Families in table order as `(root, chords)`.
pub fn families() -> Vec<(String, Vec<Chord>)> {
    let mut out: Vec<(String, Vec<Chord>)> = Vec::new();
    for e in CHORDS {
        let root = root_of(e.name);
        match out.iter_mut().find(|(r, _)| r == root) {
            Some((_, chords)) => chords.push(e.to_chord()),
            None => out.push((root.to_string(), vec![e.to_chord()])),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots() {
        assert_eq!(root_of("F#m"), "F#");
        assert_eq!(root_of("Bb"), "Bb");
        assert_eq!(root_of("Bm"), "B");
        assert_eq!(root_of("Cmaj7"), "C");
        assert_eq!(root_of("G"), "G");
        assert_eq!(root_of(""), "");
    }

    #[test]
    fn every_entry_is_valid() {
        for chord in all() {
            chord.validate().unwrap();
            assert_eq!(chord, chord.normalized(), "{} has fingers on open strings", chord.name);
        }
    }

    #[test]
    fn every_barre_spans_two_strings() {
        for chord in all() {
            for &fret in &chord.barres {
                assert!(chord.barre_strings(fret).len() >= 2, "{}", chord.name);
            }
        }
    }

    #[test]
    fn families_keep_table_order() {
        let families = families();
        let roots: Vec<&str> = families.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(roots, vec!["C", "D", "E", "F", "F#", "G", "A", "Bb", "B"]);
        assert_eq!(family("C").len(), 4);
        assert_eq!(family("F#")[0].name, "F#m");
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("Am").map(|c| c.frets), Some([-1, 0, 2, 2, 1, 0]));
        assert!(find("H").is_none());
    }
}
