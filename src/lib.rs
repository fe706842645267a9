//! # Jazz Keys
//!
//! An interactive jazz chord trainer. It shows voicings and fingerings, plays
//! chords through the default audio device, and grades the notes you hold
//! against a target chord as you toggle them from the typed keyboard or a MIDI
//! controller.
//!
//! ## Modules
//!
//! - `audio`: Tone synthesis on top of cpal, and MIDI keyboard input.
//! - `commands`: The REPL command registry and handlers.
//! - `config`: Command-line flags and catalog file loading.
//! - `repl`: The interactive loop and catalog hot-reload.
//! - `session`: Selected chords and held notes for one practice session.
//!
//! Chord data and the matching rules live in `jazzkeys-core`.

pub mod audio;
pub mod commands;
pub mod config;
pub mod repl;
pub mod session;

// Re-export commonly used types for convenience
pub use crate::audio::{MidiKeyboard, ToneSynthesizer};
pub use crate::config::Config;
pub use crate::session::PracticeSession;
pub use jazzkeys_core::{Chord, ChordCatalog, MatchEngine, MatchResult, MatchStatus, Note};
