//! Practice session state: which chords are selected and which notes are held

use anyhow::{anyhow, Result};
use jazzkeys_core::{
    Chord, ChordCatalog, MatchEngine, MatchResult, Note, PlayedSet, Progression,
};

pub struct PracticeSession {
    catalog: ChordCatalog,
    /// Chord shown in the explorer
    featured: Chord,
    /// Chord the player is trying to match
    target: Chord,
    progression: Option<Progression>,
    played: PlayedSet,
    engine: MatchEngine,
}

impl PracticeSession {
    pub fn new(catalog: ChordCatalog, engine: MatchEngine) -> Result<Self> {
        let first = catalog
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("Catalog has no chords"))?;
        let progression = catalog.progressions().first().cloned();

        Ok(Self {
            catalog,
            featured: first.clone(),
            target: first,
            progression,
            played: PlayedSet::new(),
            engine,
        })
    }

    pub fn catalog(&self) -> &ChordCatalog {
        &self.catalog
    }

    pub fn featured(&self) -> &Chord {
        &self.featured
    }

    pub fn target(&self) -> &Chord {
        &self.target
    }

    pub fn progression(&self) -> Option<&Progression> {
        self.progression.as_ref()
    }

    pub fn played(&self) -> &PlayedSet {
        &self.played
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    fn find_chord(&self, name: &str) -> Result<Chord> {
        self.catalog
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown chord: {}", name.trim()))
    }

    /// Select the chord shown in the explorer
    pub fn select_featured(&mut self, name: &str) -> Result<&Chord> {
        self.featured = self.find_chord(name)?;
        Ok(&self.featured)
    }

    /// Set a new practice target; held notes are cleared
    pub fn select_target(&mut self, name: &str) -> Result<&Chord> {
        self.target = self.find_chord(name)?;
        self.played.clear();
        Ok(&self.target)
    }

    pub fn select_progression(&mut self, name: &str) -> Result<&Progression> {
        let progression = self
            .catalog
            .progression(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown progression: {}", name.trim()))?;
        Ok(self.progression.insert(progression))
    }

    /// Toggle one note and grade the result
    pub fn toggle(&mut self, note: Note) -> MatchResult {
        self.played.toggle(note);
        self.result()
    }

    pub fn reset(&mut self) {
        self.played.clear();
    }

    /// Grade the held notes against the target; recomputed on every call
    pub fn result(&self) -> MatchResult {
        self.engine.classify(&self.target, &self.played)
    }

    /// Frequencies for the held notes, one octave-4 tone each
    pub fn played_frequencies(&self) -> Vec<f32> {
        self.played.iter().map(|n| n.reference_frequency()).collect()
    }

    /// Frequencies of the selected progression's first chord, if it is in the catalog
    pub fn preview_frequencies(&self) -> Option<Vec<f32>> {
        let progression = self.progression.as_ref()?;
        self.catalog
            .first_playable(progression)
            .map(|c| c.frequencies().to_vec())
    }

    /// Swap in a reloaded catalog, keeping selections by name where possible
    pub fn replace_catalog(&mut self, catalog: ChordCatalog) -> Result<()> {
        let first = catalog
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("Catalog has no chords"))?;

        let featured = catalog
            .get(self.featured.name())
            .cloned()
            .unwrap_or_else(|| first.clone());
        let target = catalog
            .get(self.target.name())
            .cloned()
            .unwrap_or(first);
        let progression = self
            .progression
            .as_ref()
            .and_then(|p| catalog.progression(&p.name))
            .or_else(|| catalog.progressions().first())
            .cloned();

        if target != self.target {
            self.played.clear();
        }

        self.catalog = catalog;
        self.featured = featured;
        self.target = target;
        self.progression = progression;
        Ok(())
    }
}
