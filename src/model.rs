//! Data model for guitar chord fingerings and songs.
//!
//! A [`Chord`] is the record shape supplied by the data collaborator, whether
//! it comes from the built-in tables or from a user-authored record. The
//! renderer treats it as a read-only snapshot.

use serde::{Deserialize, Serialize};

/// Number of strings on the instrument. The diagram engine only supports six.
pub const STRING_COUNT: usize = 6;

/// Number of fret rows shown on every diagram.
pub const FRET_ROWS: usize = 4;

/// Fret value marking a muted (not played) string.
pub const MUTED: i32 = -1;

/// Fret value marking an open string.
pub const OPEN: i32 = 0;

/// Highest fret accepted by [`Chord::validate`].
pub const MAX_FRET: i32 = 24;

/// Highest base fret whose four-row window stays on the neck.
pub const MAX_BASE_FRET: i32 = MAX_FRET - FRET_ROWS as i32 + 1;

/// A named fingering across six strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    /// Display label (e.g. "F#m")
    pub name: String,
    /// Fret number of the diagram's top line (≥ 1)
    pub base_fret: i32,
    /// Absolute fret per string, `0` for open, `-1` for muted
    pub frets: [i32; STRING_COUNT],
    /// Finger label per string, `0` for none, `1..=4` otherwise
    pub fingers: [u8; STRING_COUNT],
    /// Absolute fret numbers that carry a barre
    #[serde(default)]
    pub barres: Vec<i32>,
}

impl Chord {
    pub fn new(
        name: impl Into<String>,
        base_fret: i32,
        frets: [i32; STRING_COUNT],
        fingers: [u8; STRING_COUNT],
        barres: Vec<i32>,
    ) -> Self {
        Self {
            name: name.into(),
            base_fret,
            frets,
            fingers,
            barres,
        }
    }

    /// A chord with every string open and no fingering.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, 1, [OPEN; STRING_COUNT], [0; STRING_COUNT], Vec::new())
    }

    /// Decode a chord record from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid chord record: {e}"))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("JSON serialization error: {e}"))
    }

    /// Check the record against the value ranges an editor can produce.
    ///
    /// Rendering never requires this: the renderer skips anything it cannot
    /// place. Validation is for collaborators accepting user input.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.chars().any(char::is_control) {
            return Err(format!("Chord name {:?} contains control characters", self.name));
        }
        if !(1..=MAX_BASE_FRET).contains(&self.base_fret) {
            return Err(format!(
                "Chord '{}': base fret {} outside 1..={MAX_BASE_FRET}",
                self.name, self.base_fret
            ));
        }
        for (i, &fret) in self.frets.iter().enumerate() {
            if !(MUTED..=MAX_FRET).contains(&fret) {
                return Err(format!(
                    "Chord '{}': string {} has fret {fret} outside {MUTED}..={MAX_FRET}",
                    self.name,
                    i + 1
                ));
            }
        }
        for (i, &finger) in self.fingers.iter().enumerate() {
            if finger > 4 {
                return Err(format!(
                    "Chord '{}': string {} has finger {finger} outside 0..=4",
                    self.name,
                    i + 1
                ));
            }
        }
        for &barre in &self.barres {
            if !(1..=MAX_FRET).contains(&barre) {
                return Err(format!(
                    "Chord '{}': barre fret {barre} outside 1..={MAX_FRET}",
                    self.name
                ));
            }
        }
        Ok(())
    }

    /// Copy of this chord with finger labels cleared on open and muted strings.
    pub fn normalized(&self) -> Self {
        let mut chord = self.clone();
        for (finger, &fret) in chord.fingers.iter_mut().zip(self.frets.iter()) {
            if fret <= OPEN {
                *finger = 0;
            }
        }
        chord
    }

    pub fn is_muted(&self, string: usize) -> bool {
        self.frets.get(string) == Some(&MUTED)
    }

    /// Strings (0-based, ascending) whose fret equals `fret`.
    pub fn barre_strings(&self, fret: i32) -> Vec<usize> {
        self.frets
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f == fret)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the fingered position on `string` is drawn as part of a barre.
    ///
    /// True when the string's fret is listed in `barres` and more than one
    /// string holds that fret. Finger labels are deliberately not compared.
    pub fn is_barre_covered(&self, string: usize) -> bool {
        let Some(&fret) = self.frets.get(string) else {
            return false;
        };
        self.barres.contains(&fret) && self.frets.iter().filter(|&&f| f == fret).count() > 1
    }

    /// Position of an absolute fret relative to the diagram window, if visible.
    pub fn fret_row(&self, fret: i32) -> Option<usize> {
        match fret.checked_sub(self.base_fret) {
            Some(pos) if (0..FRET_ROWS as i32).contains(&pos) => Some(pos as usize),
            _ => None,
        }
    }
}

/// A song as stored by the data collaborator: a title and an ordered list of
/// chord ids, where `None` marks a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub chord_ids: Vec<Option<String>>,
}

impl Song {
    /// Resolve chord ids into strip slots. Ids the lookup cannot find become
    /// empty slots so the banner keeps its shape.
    pub fn resolve_slots<F>(&self, mut lookup: F) -> Vec<Option<Chord>>
    where
        F: FnMut(&str) -> Option<Chord>,
    {
        self.chord_ids
            .iter()
            .map(|id| {
                let id = id.as_deref()?;
                let chord = lookup(id);
                if chord.is_none() {
                    log::warn!("Song '{}': chord id '{id}' not found, leaving slot empty", self.title);
                }
                chord
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f_major() -> Chord {
        Chord::new("F", 1, [1, 3, 3, 2, 1, 1], [1, 3, 4, 2, 1, 1], vec![1])
    }

    #[test]
    fn decodes_camel_case_record() {
        let json = r#"{"name":"Am","baseFret":1,"frets":[-1,0,2,2,1,0],"fingers":[0,0,2,3,1,0],"barres":[]}"#;
        let chord = Chord::from_json(json).unwrap();
        assert_eq!(chord.name, "Am");
        assert_eq!(chord.base_fret, 1);
        assert_eq!(chord.frets, [-1, 0, 2, 2, 1, 0]);
        assert!(chord.barres.is_empty());
    }

    #[test]
    fn barres_default_to_empty() {
        let json = r#"{"name":"E","baseFret":1,"frets":[0,2,2,1,0,0],"fingers":[0,2,3,1,0,0]}"#;
        let chord = Chord::from_json(json).unwrap();
        assert!(chord.barres.is_empty());
    }

    #[test]
    fn rejects_wrong_string_count() {
        let json = r#"{"name":"X","baseFret":1,"frets":[0,0,0],"fingers":[0,0,0]}"#;
        assert!(Chord::from_json(json).is_err());
    }

    #[test]
    fn validate_ranges() {
        assert!(f_major().validate().is_ok());

        let mut chord = f_major();
        chord.base_fret = 0;
        assert!(chord.validate().is_err());

        let mut chord = f_major();
        chord.fingers[2] = 5;
        assert!(chord.validate().is_err());

        let mut chord = f_major();
        chord.frets[0] = -2;
        assert!(chord.validate().is_err());
    }

    #[test]
    fn validate_caps_base_fret_to_the_neck() {
        let mut chord = f_major();
        chord.base_fret = MAX_BASE_FRET;
        assert!(chord.validate().is_ok());
        chord.base_fret = MAX_BASE_FRET + 1;
        assert!(chord.validate().is_err());
        chord.base_fret = i32::MAX;
        assert!(chord.validate().is_err());
    }

    #[test]
    fn validate_rejects_control_characters_in_name() {
        for name in ["C\0", "Am\n", "G\u{7}"] {
            let chord = Chord::new(name, 1, [0; STRING_COUNT], [0; STRING_COUNT], Vec::new());
            assert!(chord.validate().is_err(), "{name:?} accepted");
        }
        assert!(Chord::empty("F#m7b5").validate().is_ok());
    }

    #[test]
    fn fret_row_survives_extreme_base_frets() {
        let chord = Chord::new("x", i32::MIN, [1; STRING_COUNT], [0; STRING_COUNT], Vec::new());
        assert_eq!(chord.fret_row(1), None);
        let chord = Chord::new("x", i32::MAX, [-1; STRING_COUNT], [0; STRING_COUNT], Vec::new());
        assert_eq!(chord.fret_row(-1), None);
    }

    #[test]
    fn normalized_clears_fingers_on_open_and_muted() {
        let chord = Chord::new("odd", 1, [-1, 0, 2, 2, 2, 0], [3, 1, 1, 2, 3, 4], vec![]);
        assert_eq!(chord.normalized().fingers, [0, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn barre_coverage_is_per_string() {
        let chord = f_major();
        assert!(chord.is_barre_covered(0));
        assert!(chord.is_barre_covered(4));
        assert!(chord.is_barre_covered(5));
        assert!(!chord.is_barre_covered(1));
        assert!(!chord.is_barre_covered(3));
        assert_eq!(chord.barre_strings(1), vec![0, 4, 5]);
    }

    #[test]
    fn single_string_barre_is_inert() {
        let chord = Chord::new("lone", 1, [-1, 3, 2, 0, 1, 0], [0, 3, 2, 0, 1, 0], vec![1]);
        assert!(!chord.is_barre_covered(4));
    }

    #[test]
    fn fret_row_window() {
        let mut chord = f_major();
        chord.base_fret = 5;
        assert_eq!(chord.fret_row(4), None);
        assert_eq!(chord.fret_row(5), Some(0));
        assert_eq!(chord.fret_row(8), Some(3));
        assert_eq!(chord.fret_row(9), None);
    }

    #[test]
    fn song_resolves_gaps_and_unknown_ids() {
        let song = Song {
            title: "Test".into(),
            chord_ids: vec![Some("F".into()), None, Some("missing".into())],
        };
        let slots = song.resolve_slots(|id| (id == "F").then(f_major));
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].as_ref().map(|c| c.name.as_str()), Some("F"));
        assert!(slots[1].is_none());
        assert!(slots[2].is_none());
    }
}
