use crate::types::note::Note;
use anyhow::Result;
use std::fmt;

/// Suggested fingering for each hand (display only)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fingering {
    pub right: String,
    pub left: String,
}

impl Fingering {
    pub fn new(right: impl Into<String>, left: impl Into<String>) -> Self {
        Self {
            right: right.into(),
            left: left.into(),
        }
    }
}

/// A named chord voicing from the catalog
///
/// `notes` is the set of pitch classes required to match the chord. Order is kept
/// for display, membership is what matters. `frequencies` are the fundamentals to
/// sound when the chord is played and need not line up with `notes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    name: String,
    mood: String,
    notes: Vec<Note>,
    fingering: Fingering,
    frequencies: Vec<f32>,
}

impl Chord {
    /// Create a chord. Repeated notes collapse onto their first occurrence.
    pub fn new(
        name: impl Into<String>,
        notes: impl IntoIterator<Item = Note>,
        frequencies: Vec<f32>,
    ) -> Self {
        let mut unique = Vec::new();
        for note in notes {
            if !unique.contains(&note) {
                unique.push(note);
            }
        }

        Chord {
            name: name.into(),
            mood: String::new(),
            notes: unique,
            fingering: Fingering::default(),
            frequencies,
        }
    }

    /// Create a chord from note strings (e.g., &["C", "E", "G"])
    pub fn from_note_strings(
        name: impl Into<String>,
        note_strings: &[&str],
        frequencies: Vec<f32>,
    ) -> Result<Self> {
        let notes = note_strings
            .iter()
            .map(|s| s.parse::<Note>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, notes, frequencies))
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = mood.into();
        self
    }

    pub fn with_fingering(mut self, fingering: Fingering) -> Self {
        self.fingering = fingering;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    /// Required pitch classes, in declared order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn fingering(&self) -> &Fingering {
        &self.fingering
    }

    /// Fundamentals (Hz) to sound for this voicing
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    /// Check if the chord requires a specific pitch class
    pub fn contains(&self, note: &Note) -> bool {
        self.notes.contains(note)
    }

    /// Number of distinct pitch classes required
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.notes.iter().map(|n| n.name()).collect();
        write!(f, "{}: [{}]", self.name, names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmaj7() -> Chord {
        Chord::from_note_strings(
            "Cmaj7",
            &["C", "E", "G", "B"],
            vec![261.63, 329.63, 392.0, 493.88],
        )
        .unwrap()
    }

    #[test]
    fn test_chord_creation() {
        let chord = cmaj7()
            .with_mood("Warm & open")
            .with_fingering(Fingering::new("1-2-3-5", "5-3-2-1"));

        assert_eq!(chord.name(), "Cmaj7");
        assert_eq!(chord.mood(), "Warm & open");
        assert_eq!(chord.len(), 4);
        assert_eq!(chord.frequencies().len(), 4);
        assert_eq!(chord.fingering().right, "1-2-3-5");
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let chord = Chord::from_note_strings("odd", &["E", "C", "E", "Db", "C#"], vec![]).unwrap();
        let names: Vec<&str> = chord.notes().iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["E", "C", "C#"]);
    }

    #[test]
    fn test_contains_ignores_octave() {
        let chord = cmaj7();
        assert!(chord.contains(&"C5".parse().unwrap()));
        assert!(!chord.contains(&"D".parse().unwrap()));
    }

    #[test]
    fn test_invalid_note_string() {
        assert!(Chord::from_note_strings("bad", &["C", "X"], vec![]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(cmaj7().to_string(), "Cmaj7: [C, E, G, B]");
    }

    #[test]
    fn test_empty_chord() {
        let chord = Chord::new("empty", Vec::new(), vec![]);
        assert!(chord.is_empty());
    }
}
