//! Chord catalog: the fixed library of voicings, progressions and reharmonizations
//!
//! The catalog is read-only content. It is built once (from the built-in data or a
//! JSON file) and replaced wholesale, never edited in place.

use crate::types::{Chord, Fingering, Note};
use anyhow::{anyhow, Result};

/// A named sequence of chord names (display data)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Chord names; these may reference chords missing from the catalog
    pub chords: Vec<String>,
}

/// A pop song recast with jazz harmony (display data)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reharmonization {
    pub song: String,
    pub artist: String,
    pub original: String,
    pub jazz: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vibe: String,
}

#[derive(Debug, Clone)]
pub struct ChordCatalog {
    chords: Vec<Chord>,
    progressions: Vec<Progression>,
    reharmonizations: Vec<Reharmonization>,
}

impl ChordCatalog {
    /// Build a catalog; chord names must be unique
    pub fn new(
        chords: Vec<Chord>,
        progressions: Vec<Progression>,
        reharmonizations: Vec<Reharmonization>,
    ) -> Result<Self> {
        for (i, chord) in chords.iter().enumerate() {
            if chords[..i].iter().any(|c| c.name() == chord.name()) {
                return Err(anyhow!("Duplicate chord name in catalog: {}", chord.name()));
            }
        }

        Ok(Self {
            chords,
            progressions,
            reharmonizations,
        })
    }

    /// The library that ships with the application
    pub fn builtin() -> Self {
        let chords = vec![
            builtin_chord(
                "Cmaj7",
                "Warm & open",
                &[0, 4, 7, 11],
                ("1-2-3-5 (C-E-G-B)", "5-3-2-1 (C-G-B-E)"),
                &[261.63, 329.63, 392.0, 493.88],
            ),
            builtin_chord(
                "Dm9",
                "Cool & sophisticated",
                &[2, 5, 9, 0, 4],
                ("1-2-3-4-5 (D-F-A-C-E)", "5-2-1 (D-A-E)"),
                &[293.66, 349.23, 440.0, 523.25, 659.25],
            ),
            builtin_chord(
                "G13",
                "Bright & restless",
                &[7, 11, 2, 5, 4],
                ("1-2-3-4-5 (G-B-D-F-E)", "5-2-1 (G-D-F)"),
                &[196.0, 246.94, 293.66, 349.23, 659.25],
            ),
            builtin_chord(
                "F#m7b5",
                "Tense & cinematic",
                &[6, 9, 0, 4],
                ("1-2-3-5 (F#-A-C-E)", "5-3-2-1 (F#-C-E-A)"),
                &[369.99, 440.0, 523.25, 659.25],
            ),
        ];

        let progressions = vec![
            progression(
                "II-V-I in C",
                "The cornerstone of jazz. Smooth resolution into home base.",
                &["Dm9", "G13", "Cmaj7"],
            ),
            progression(
                "Minor turnaround",
                "Moody and modern with a hint of suspense.",
                &["F#m7b5", "B7alt", "Em9"],
            ),
            progression(
                "Gospel glide",
                "Bright, uplifting movement with rich extensions.",
                &["Cmaj7", "Am9", "Dm9", "G13"],
            ),
        ];

        let reharmonizations = vec![
            reharmonization(
                "Someone Like You",
                "Adele",
                "I - V - vi - IV",
                "Imaj7 - III7alt - vi9 - II7 - V13",
                "Turn the ballad into a smoky jazz lounge tune.",
            ),
            reharmonization(
                "Let It Be",
                "The Beatles",
                "I - V - vi - IV",
                "Imaj7 - V13sus - ii9 - V13",
                "Adds gospel warmth and soft tension release.",
            ),
            reharmonization(
                "Stay",
                "Rihanna",
                "vi - IV - I - V",
                "vi9 - IVmaj7 - Imaj7 - V13",
                "Keeps the pop feel, deepens the harmony.",
            ),
        ];

        Self {
            chords,
            progressions,
            reharmonizations,
        }
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn progressions(&self) -> &[Progression] {
        &self.progressions
    }

    pub fn reharmonizations(&self) -> &[Reharmonization] {
        &self.reharmonizations
    }

    pub fn first(&self) -> Option<&Chord> {
        self.chords.first()
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Look up a chord by name: exact match first, then case-insensitive
    pub fn get(&self, name: &str) -> Option<&Chord> {
        let name = name.trim();
        self.chords
            .iter()
            .find(|c| c.name() == name)
            .or_else(|| self.chords.iter().find(|c| c.name().eq_ignore_ascii_case(name)))
    }

    /// Look up a progression by name: exact match first, then case-insensitive
    pub fn progression(&self, name: &str) -> Option<&Progression> {
        let name = name.trim();
        self.progressions
            .iter()
            .find(|p| p.name == name)
            .or_else(|| {
                self.progressions
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(name))
            })
    }

    /// The catalog chord a progression opens with, if the catalog has it
    pub fn first_playable(&self, progression: &Progression) -> Option<&Chord> {
        progression
            .chords
            .first()
            .and_then(|name| self.chords.iter().find(|c| c.name() == name))
    }
}

impl Default for ChordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_chord(
    name: &str,
    mood: &str,
    pitch_classes: &[u8],
    (right, left): (&str, &str),
    frequencies: &[f32],
) -> Chord {
    let notes = pitch_classes.iter().map(|&pc| Note::ALL[pc as usize]);
    Chord::new(name, notes, frequencies.to_vec())
        .with_mood(mood)
        .with_fingering(Fingering::new(right, left))
}

fn progression(name: &str, description: &str, chords: &[&str]) -> Progression {
    Progression {
        name: name.to_string(),
        description: description.to_string(),
        chords: chords.iter().map(|c| c.to_string()).collect(),
    }
}

fn reharmonization(
    song: &str,
    artist: &str,
    original: &str,
    jazz: &str,
    vibe: &str,
) -> Reharmonization {
    Reharmonization {
        song: song.to_string(),
        artist: artist.to_string(),
        original: original.to_string(),
        jazz: jazz.to_string(),
        vibe: vibe.to_string(),
    }
}

#[cfg(feature = "serde")]
mod file {
    use super::*;
    use anyhow::Context;
    use serde::Deserialize;

    /// One chord as written in a catalog file
    #[derive(Debug, Deserialize)]
    struct ChordRecord {
        name: String,
        #[serde(default)]
        mood: String,
        notes: Vec<String>,
        #[serde(default)]
        fingering: Fingering,
        frequencies: Vec<f32>,
    }

    #[derive(Debug, Deserialize)]
    struct CatalogFile {
        chords: Vec<ChordRecord>,
        #[serde(default)]
        progressions: Vec<Progression>,
        #[serde(default)]
        reharmonizations: Vec<Reharmonization>,
    }

    impl ChordRecord {
        fn into_chord(self) -> Result<Chord> {
            let notes = self
                .notes
                .iter()
                .map(|s| s.parse::<Note>())
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("chord {}", self.name))?;

            if let Some(bad) = self
                .frequencies
                .iter()
                .find(|f| !f.is_finite() || **f <= 0.0)
            {
                return Err(anyhow!(
                    "chord {}: frequency must be positive, got {}",
                    self.name,
                    bad
                ));
            }

            Ok(Chord::new(self.name, notes, self.frequencies)
                .with_mood(self.mood)
                .with_fingering(self.fingering))
        }
    }

    impl ChordCatalog {
        /// Parse a catalog from its JSON representation
        pub fn from_json(text: &str) -> Result<Self> {
            let file: CatalogFile =
                serde_json::from_str(text).context("Failed to parse catalog JSON")?;
            let chords = file
                .chords
                .into_iter()
                .map(ChordRecord::into_chord)
                .collect::<Result<Vec<_>>>()?;
            Self::new(chords, file.progressions, file.reharmonizations)
        }
    }
}
