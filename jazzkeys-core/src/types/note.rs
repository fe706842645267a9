use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// A pitch class on the 12-tone chromatic keyboard.
/// 0=C, 1=C#, 2=D, 3=D#, 4=E, 5=F, 6=F#, 7=G, 8=G#, 9=A, 10=A#, 11=B
///
/// Octave is deliberately not part of the value: every C is the same note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    pitch_class: u8,
}

/// Display names, indexed by pitch class
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// 12-TET frequencies for the 4th octave (C4-B4), A4 = 440Hz
const REFERENCE_FREQUENCIES: [f32; 12] = [
    261.63, // C4
    277.18, // C#4/Db4
    293.66, // D4
    311.13, // D#4/Eb4
    329.63, // E4
    349.23, // F4
    369.99, // F#4/Gb4
    392.00, // G4
    415.30, // G#4/Ab4
    440.00, // A4
    466.16, // A#4/Bb4
    493.88, // B4
];

impl Note {
    /// All twelve notes in chromatic order, as laid out on the keyboard
    pub const ALL: [Note; 12] = [
        Note { pitch_class: 0 },
        Note { pitch_class: 1 },
        Note { pitch_class: 2 },
        Note { pitch_class: 3 },
        Note { pitch_class: 4 },
        Note { pitch_class: 5 },
        Note { pitch_class: 6 },
        Note { pitch_class: 7 },
        Note { pitch_class: 8 },
        Note { pitch_class: 9 },
        Note { pitch_class: 10 },
        Note { pitch_class: 11 },
    ];

    /// Create a note from a chromatic pitch class (0-11)
    pub fn new(pitch_class: u8) -> Result<Self> {
        if pitch_class > 11 {
            return Err(anyhow!("Pitch class must be 0-11, got {}", pitch_class));
        }
        Ok(Note { pitch_class })
    }

    /// Pitch class of a MIDI key number (60 = middle C)
    pub fn from_midi(key: u8) -> Self {
        Note {
            pitch_class: key % 12,
        }
    }

    /// Get the chromatic pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    /// Symbol from the chromatic alphabet ("C", "C#", ...)
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[self.pitch_class as usize]
    }

    /// Frequency of this pitch class in the 4th octave, in Hz
    pub fn reference_frequency(&self) -> f32 {
        REFERENCE_FREQUENCIES[self.pitch_class as usize]
    }

    /// True for white keys
    pub fn is_natural(&self) -> bool {
        matches!(self.pitch_class, 0 | 2 | 4 | 5 | 7 | 9 | 11)
    }
}

impl FromStr for Note {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_uppercase();
        let mut chars = s.char_indices();
        let Some((_, letter)) = chars.next() else {
            return Err(anyhow!("Empty note name"));
        };

        // Letter, optional accidental, optional (ignored) octave
        let mut name_end = letter.len_utf8();
        if let Some((i, c)) = chars.next() {
            if c == '#' || c == 'B' || c == 'S' {
                name_end = i + c.len_utf8();
            }
        }

        let (name, octave) = s.split_at(name_end);

        let pitch_class = match name {
            "C" => 0,
            "D" => 2,
            "E" => 4,
            "F" => 5,
            "G" => 7,
            "A" => 9,
            "B" => 11,

            "C#" | "CS" => 1,
            "D#" | "DS" => 3,
            "F#" | "FS" => 6,
            "G#" | "GS" => 8,
            "A#" | "AS" => 10,

            "DB" => 1,
            "EB" => 3,
            "GB" => 6,
            "AB" => 8,
            "BB" => 10,

            _ => return Err(anyhow!("Invalid note name: {}", name)),
        };

        if !octave.is_empty() && octave.parse::<i8>().is_err() {
            return Err(anyhow!("Invalid octave: {}", octave));
        }

        Ok(Note { pitch_class })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Note {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Note {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_creation() {
        let c = Note::new(0).unwrap();
        assert_eq!(c.pitch_class(), 0);

        let invalid = Note::new(12);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_note_parsing() {
        let c: Note = "C".parse().unwrap();
        assert_eq!(c.pitch_class(), 0);

        let cs: Note = "C#".parse().unwrap();
        assert_eq!(cs.pitch_class(), 1);

        let fs: Note = "f#".parse().unwrap();
        assert_eq!(fs.pitch_class(), 6);

        let invalid: Result<Note> = "H".parse();
        assert!(invalid.is_err());

        let empty: Result<Note> = "".parse();
        assert!(empty.is_err());
    }

    #[test]
    fn test_flats_share_sharp_symbol() {
        let db: Note = "Db".parse().unwrap();
        let cs: Note = "C#".parse().unwrap();
        assert_eq!(db, cs);
        assert_eq!(db.to_string(), "C#");

        let bb: Note = "Bb".parse().unwrap();
        assert_eq!(bb.to_string(), "A#");
    }

    #[test]
    fn test_octave_is_ignored() {
        let c4: Note = "C4".parse().unwrap();
        let c2: Note = "C2".parse().unwrap();
        assert_eq!(c4, c2);

        let g: Note = "G-1".parse().unwrap();
        assert_eq!(g.pitch_class(), 7);

        let bad: Result<Note> = "Cx".parse();
        assert!(bad.is_err());
    }

    #[test]
    fn test_display_round_trips_keyboard() {
        for note in Note::ALL {
            let parsed: Note = note.to_string().parse().unwrap();
            assert_eq!(parsed, note);
        }
    }

    #[test]
    fn test_from_midi() {
        assert_eq!(Note::from_midi(60).name(), "C");
        assert_eq!(Note::from_midi(69).name(), "A");
        assert_eq!(Note::from_midi(61), Note::from_midi(73));
    }

    #[test]
    fn test_reference_frequency() {
        let a: Note = "A".parse().unwrap();
        assert!((a.reference_frequency() - 440.0).abs() < 0.01);
    }

    #[test]
    fn test_naturals() {
        let naturals: Vec<&str> = Note::ALL
            .iter()
            .filter(|n| n.is_natural())
            .map(|n| n.name())
            .collect();
        assert_eq!(naturals, vec!["C", "D", "E", "F", "G", "A", "B"]);
    }
}
