//! Oscillator module for chord playback voices
//!
//! A `Voice` is one oscillating tone pinned to an absolute start frame on the
//! output clock. It renders its own envelope and reports when it has outlived
//! the envelope, so the mixer can drop it.

use jazzkeys_core::types::{ToneConfig, ToneEnvelope, Waveform};

/// One scheduled tone with a bounded lifetime
#[derive(Debug, Clone)]
pub struct Voice {
    frequency: f32,
    phase: f32,
    sample_rate: f32,
    waveform: Waveform,
    envelope: ToneEnvelope,
    /// Output-clock frame at which the voice begins
    start_frame: u64,
    /// Frames from start until the voice is finished
    lifetime_frames: u64,
}

impl Voice {
    pub fn new(frequency: f32, start_frame: u64, sample_rate: f32, config: &ToneConfig) -> Self {
        let lifetime_frames = (config.envelope.lifetime() * sample_rate).ceil() as u64;
        Self {
            frequency,
            phase: 0.0,
            sample_rate,
            waveform: config.waveform,
            envelope: config.envelope,
            start_frame,
            lifetime_frames,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn end_frame(&self) -> u64 {
        self.start_frame + self.lifetime_frames
    }

    /// Move a start that has already passed up to `frame`
    pub fn align_start(&mut self, frame: u64) {
        if self.start_frame < frame {
            self.start_frame = frame;
        }
    }

    /// Check if the voice has played out by `frame`
    pub fn is_finished(&self, frame: u64) -> bool {
        frame >= self.end_frame()
    }

    /// Envelope gain at an absolute output frame
    pub fn gain_at(&self, frame: u64) -> f32 {
        if frame < self.start_frame {
            return 0.0;
        }
        let t = (frame - self.start_frame) as f32 / self.sample_rate;
        self.envelope.gain_at(t)
    }

    /// Generate the sample for `frame`; silent before start and after the end
    pub fn next_sample(&mut self, frame: u64) -> f32 {
        if frame < self.start_frame || self.is_finished(frame) {
            return 0.0;
        }

        let value = self.waveform.value_at(self.phase);

        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        value * self.gain_at(frame)
    }
}
