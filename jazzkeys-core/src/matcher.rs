//! Chord recognition: compare the notes being held against a target chord
//!
//! Everything here is a pure function of its inputs. Callers recompute the
//! result whenever the target or the played notes change.

use crate::types::{Chord, Note, PlayedSet};
use std::fmt;

/// Missing-note allowance for a `Close` match when no wrong notes are held
pub const DEFAULT_CLOSE_THRESHOLD: usize = 2;

/// How strictly to grade a partial match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Maximum number of missing notes (with no extras) still graded `Close`
    pub close_threshold: usize,
}

impl MatchConfig {
    pub fn new(close_threshold: usize) -> Self {
        Self { close_threshold }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSE_THRESHOLD)
    }
}

/// Graded relationship between the played notes and the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Nothing played yet
    AwaitingInput,
    /// Every required note held, nothing else
    ExactMatch,
    /// No wrong notes and only a few missing
    Close,
    /// Wrong notes held, or too many missing
    Mismatch,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::AwaitingInput => "awaiting input",
            MatchStatus::ExactMatch => "exact match",
            MatchStatus::Close => "close",
            MatchStatus::Mismatch => "mismatch",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing played notes against a target chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Required but not played, in the chord's declared order
    pub missing: Vec<Note>,
    /// Played but not required, in the order they were added
    pub extra: Vec<Note>,
    pub status: MatchStatus,
}

impl MatchResult {
    pub fn is_exact(&self) -> bool {
        self.status == MatchStatus::ExactMatch
    }

    /// Human-readable feedback line
    pub fn feedback(&self) -> String {
        match self.status {
            MatchStatus::AwaitingInput => "Play notes to get feedback.".to_string(),
            MatchStatus::ExactMatch => "Perfect! That chord is locked in.".to_string(),
            MatchStatus::Close => format!("Almost there. Add: {}.", join_or_none(&self.missing)),
            MatchStatus::Mismatch => format!(
                "Close! Missing {}. Extra {}.",
                join_or_none(&self.missing),
                join_or_none(&self.extra)
            ),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.feedback())
    }
}

fn join_or_none(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "none".to_string();
    }
    notes
        .iter()
        .map(|n| n.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Grades played notes against target chords
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine {
    config: MatchConfig,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn classify(&self, target: &Chord, played: &PlayedSet) -> MatchResult {
        let missing: Vec<Note> = target
            .notes()
            .iter()
            .filter(|note| !played.contains(note))
            .copied()
            .collect();
        let extra: Vec<Note> = played
            .iter()
            .filter(|note| !target.contains(note))
            .copied()
            .collect();

        let status = if played.is_empty() {
            MatchStatus::AwaitingInput
        } else if missing.is_empty() && extra.is_empty() {
            MatchStatus::ExactMatch
        } else if extra.is_empty() && missing.len() <= self.config.close_threshold {
            MatchStatus::Close
        } else {
            MatchStatus::Mismatch
        };

        MatchResult {
            missing,
            extra,
            status,
        }
    }
}

/// Classify with the default close threshold
pub fn classify(target: &Chord, played: &PlayedSet) -> MatchResult {
    MatchEngine::default().classify(target, played)
}

/// Notes of `played` that the target requires, in played order
pub fn required_played(target: &Chord, played: &PlayedSet) -> Vec<Note> {
    played
        .iter()
        .filter(|note| target.contains(note))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(notes: &[&str]) -> Chord {
        Chord::from_note_strings("target", notes, vec![]).unwrap()
    }

    fn played(notes: &[&str]) -> PlayedSet {
        notes.iter().map(|s| s.parse::<Note>().unwrap()).collect()
    }

    fn names(notes: &[Note]) -> Vec<&'static str> {
        notes.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_awaiting_input() {
        let result = classify(&chord(&["C", "E", "G", "B"]), &PlayedSet::new());
        assert_eq!(result.status, MatchStatus::AwaitingInput);
        assert_eq!(result.feedback(), "Play notes to get feedback.");
    }

    #[test]
    fn test_exact_match_any_order() {
        let result = classify(&chord(&["C", "E", "G", "B"]), &played(&["B", "G", "C", "E"]));
        assert!(result.is_exact());
        assert!(result.missing.is_empty());
        assert!(result.extra.is_empty());
        assert_eq!(result.feedback(), "Perfect! That chord is locked in.");
    }

    #[test]
    fn test_close_lists_missing() {
        let result = classify(&chord(&["C", "E", "G", "B"]), &played(&["C", "E"]));
        assert_eq!(result.status, MatchStatus::Close);
        assert_eq!(names(&result.missing), vec!["G", "B"]);
        assert_eq!(result.feedback(), "Almost there. Add: G, B.");
    }

    #[test]
    fn test_mismatch_renders_none() {
        let result = classify(&chord(&["D", "F", "A", "C", "E"]), &played(&["D"]));
        assert_eq!(result.status, MatchStatus::Mismatch);
        assert_eq!(result.feedback(), "Close! Missing F, A, C, E. Extra none.");

        let result = classify(&chord(&["C", "E", "G"]), &played(&["C", "E", "G", "F#"]));
        assert_eq!(result.status, MatchStatus::Mismatch);
        assert_eq!(result.feedback(), "Close! Missing none. Extra F#.");
    }

    #[test]
    fn test_extra_keeps_played_order() {
        let result = classify(&chord(&["C", "E", "G"]), &played(&["A#", "C", "D", "F"]));
        assert_eq!(names(&result.extra), vec!["A#", "D", "F"]);
    }

    #[test]
    fn test_custom_threshold() {
        let strict = MatchEngine::new(MatchConfig::new(0));
        let result = strict.classify(&chord(&["C", "E", "G", "B"]), &played(&["C", "E", "G"]));
        assert_eq!(result.status, MatchStatus::Mismatch);

        let loose = MatchEngine::new(MatchConfig::new(3));
        let result = loose.classify(&chord(&["D", "F", "A", "C", "E"]), &played(&["D", "F"]));
        assert_eq!(result.status, MatchStatus::Close);
    }

    #[test]
    fn test_empty_target() {
        let empty = Chord::new("empty", Vec::new(), vec![]);
        assert_eq!(
            classify(&empty, &PlayedSet::new()).status,
            MatchStatus::AwaitingInput
        );
        let result = classify(&empty, &played(&["C"]));
        assert_eq!(result.status, MatchStatus::Mismatch);
        assert_eq!(names(&result.extra), vec!["C"]);
    }

    #[test]
    fn test_required_played() {
        let target = chord(&["C", "E", "G"]);
        let p = played(&["G", "D", "C"]);
        assert_eq!(names(&required_played(&target, &p)), vec!["G", "C"]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MatchStatus::ExactMatch.to_string(), "exact match");
        assert_eq!(MatchStatus::Close.label(), "close");
    }
}
