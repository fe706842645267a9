pub mod midi;
pub mod oscillator;
pub mod synth;

pub use midi::{KeyEvent, MidiKeyboard};
pub use oscillator::Voice;
pub use synth::{OutputContext, ToneSynthesizer};
