// jazzkeys-core/src/types/mod.rs

pub mod chord;
pub mod note;
pub mod played;
pub mod tone_config;

pub use chord::{Chord, Fingering};
pub use note::Note;
pub use played::PlayedSet;
pub use tone_config::{ToneConfig, ToneEnvelope, Waveform};
