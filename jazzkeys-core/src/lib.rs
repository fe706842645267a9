//! # Jazz Keys Core
//!
//! I/O-free core of the Jazz Keys practice tool: notes and chord voicings, the
//! chord catalog, and the chord-match engine that grades what the player holds
//! against a target chord.
//!
//! ## Features
//!
//! - **serde**: Load catalogs from JSON
//!
//! ## Example
//!
//! ```
//! use jazzkeys_core::{classify, ChordCatalog, MatchStatus, PlayedSet};
//!
//! let catalog = ChordCatalog::builtin();
//! let target = catalog.get("Cmaj7").unwrap();
//!
//! let mut played = PlayedSet::new();
//! for name in ["C", "E", "G"] {
//!     played.toggle(name.parse().unwrap());
//! }
//!
//! let result = classify(target, &played);
//! assert_eq!(result.status, MatchStatus::Close);
//! assert_eq!(result.feedback(), "Almost there. Add: B.");
//! ```

pub mod catalog;
pub mod matcher;
pub mod types;

// Re-export commonly used types
pub use catalog::{ChordCatalog, Progression, Reharmonization};
pub use matcher::{classify, required_played, MatchConfig, MatchEngine, MatchResult, MatchStatus};
pub use types::{Chord, Fingering, Note, PlayedSet, ToneConfig, ToneEnvelope, Waveform};
