use crate::types::note::Note;
use std::fmt;

/// Notes the player currently has down, built one toggle at a time
///
/// Membership is a set (no duplicates, no counts) but insertion order is kept so
/// feedback can list wrong notes in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayedSet {
    notes: Vec<Note>,
}

impl PlayedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the note if absent, remove it if present.
    /// Returns true if the note is now held.
    pub fn toggle(&mut self, note: Note) -> bool {
        if self.remove(&note) {
            false
        } else {
            self.notes.push(note);
            true
        }
    }

    /// Add a note; returns false if it was already held
    pub fn insert(&mut self, note: Note) -> bool {
        if self.contains(&note) {
            return false;
        }
        self.notes.push(note);
        true
    }

    /// Remove a note; returns false if it was not held
    pub fn remove(&mut self, note: &Note) -> bool {
        match self.notes.iter().position(|n| n == note) {
            Some(index) => {
                self.notes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.notes.contains(note)
    }

    /// Reset to empty
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Held notes in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl FromIterator<Note> for PlayedSet {
    /// Builds the set by toggling each note in turn
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        let mut set = PlayedSet::new();
        for note in iter {
            set.toggle(note);
        }
        set
    }
}

impl fmt::Display for PlayedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.notes.iter().map(|n| n.name()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
