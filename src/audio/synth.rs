//! Chord playback: renders a list of frequencies as simultaneous decaying tones
//!
//! `ToneSynthesizer` owns one output context, opened lazily on the first `play`.
//! Each `play` reads the output clock once and schedules every voice at that
//! frame, so a chord sounds as a block rather than an arpeggio. Voices end on
//! their own after the envelope lifetime and the mixer drops them.

use crate::audio::oscillator::Voice;
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use crossbeam_channel::{unbounded, Receiver, Sender};
use jazzkeys_core::types::ToneConfig;
use std::cell::OnceCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// An audio output that voices can be scheduled onto
pub trait OutputContext {
    fn sample_rate(&self) -> f32;

    /// Current position of the output clock, in frames
    fn current_frame(&self) -> u64;

    /// Hand a batch of voices to the output; the batch shares one start frame
    fn schedule(&self, voices: Vec<Voice>) -> Result<()>;
}

/// Opens the output context on first use
pub type ContextOpener = Box<dyn Fn() -> Result<Box<dyn OutputContext>>>;

pub struct ToneSynthesizer {
    config: ToneConfig,
    opener: ContextOpener,
    /// `Some(None)` once opening has failed; playback is then a no-op
    context: OnceCell<Option<Box<dyn OutputContext>>>,
}

impl ToneSynthesizer {
    /// Synthesizer backed by the default cpal output device
    pub fn new(config: ToneConfig) -> Self {
        Self::with_opener(config, Box::new(|| {
            CpalContext::open().map(|c| Box::new(c) as Box<dyn OutputContext>)
        }))
    }

    /// Synthesizer that never touches an audio device
    pub fn muted(config: ToneConfig) -> Self {
        Self::with_opener(config, Box::new(|| Err(anyhow!("audio output muted")))).into_muted()
    }

    /// Settle the context as closed without trying the opener
    fn into_muted(self) -> Self {
        let _ = self.context.set(None);
        log::debug!("Audio output muted");
        self
    }

    pub fn with_opener(config: ToneConfig, opener: ContextOpener) -> Self {
        Self {
            config,
            opener,
            context: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    /// True once an output context has been opened successfully
    pub fn is_available(&self) -> bool {
        matches!(self.context.get(), Some(Some(_)))
    }

    fn context(&self) -> Option<&dyn OutputContext> {
        self.context
            .get_or_init(|| match (self.opener)() {
                Ok(context) => Some(context),
                Err(e) => {
                    log::warn!("Audio output unavailable, playback disabled: {}", e);
                    None
                }
            })
            .as_deref()
    }

    /// Sound all frequencies together as one chord. Fire-and-forget.
    pub fn play(&self, frequencies: &[f32]) {
        let valid: Vec<f32> = frequencies
            .iter()
            .copied()
            .filter(|f| {
                let ok = f.is_finite() && *f > 0.0;
                if !ok {
                    log::debug!("Skipping invalid frequency {}", f);
                }
                ok
            })
            .collect();

        if valid.is_empty() {
            return;
        }

        let Some(context) = self.context() else {
            return;
        };

        let start = context.current_frame();
        let sample_rate = context.sample_rate();
        let voices: Vec<Voice> = valid
            .iter()
            .map(|&f| Voice::new(f, start, sample_rate, &self.config))
            .collect();

        log::debug!("Scheduling {} voices at frame {}", voices.len(), start);
        if let Err(e) = context.schedule(voices) {
            log::warn!("Failed to schedule voices: {}", e);
        }
    }
}

/// Mixes scheduled voices on the audio thread
///
/// Owns the active voice list outright; new voices only arrive through the channel.
pub struct VoiceMixer {
    voices: Vec<Voice>,
    incoming: Receiver<Vec<Voice>>,
    clock: Arc<AtomicU64>,
}

impl VoiceMixer {
    pub fn new(incoming: Receiver<Vec<Voice>>, clock: Arc<AtomicU64>) -> Self {
        Self {
            voices: Vec::new(),
            incoming,
            clock,
        }
    }

    /// Number of voices still sounding
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Render `frames` mono samples through `write`, advancing the shared clock
    pub fn render(&mut self, frames: usize, mut write: impl FnMut(usize, f32)) {
        let buffer_start = self.clock.load(Ordering::Acquire);

        while let Ok(mut batch) = self.incoming.try_recv() {
            // Late batches start now, all together
            for voice in &mut batch {
                voice.align_start(buffer_start);
            }
            self.voices.extend(batch);
        }

        for i in 0..frames {
            let frame = buffer_start + i as u64;
            let mut mixed = 0.0;
            for voice in &mut self.voices {
                mixed += voice.next_sample(frame);
            }
            write(i, mixed.clamp(-1.0, 1.0));
        }

        let buffer_end = buffer_start + frames as u64;
        self.voices.retain(|v| !v.is_finished(buffer_end));
        self.clock.store(buffer_end, Ordering::Release);
    }
}

/// The default output device, driven by a cpal stream
pub struct CpalContext {
    _stream: Stream,
    sender: Sender<Vec<Voice>>,
    clock: Arc<AtomicU64>,
    sample_rate: f32,
}

impl CpalContext {
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;
        let config = device.default_output_config()?;

        let sample_format = config.sample_format();
        let config: StreamConfig = config.into();

        let (sender, receiver) = unbounded();
        let clock = Arc::new(AtomicU64::new(0));
        let mixer = VoiceMixer::new(receiver, clock.clone());

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, mixer)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, mixer)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, mixer)?,
            _ => return Err(anyhow!("Unsupported sample format: {:?}", sample_format)),
        };
        stream
            .play()
            .map_err(|e| anyhow!("Failed to play stream: {}", e))?;

        log::info!(
            "Audio output opened: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "unknown device".to_string()),
            config.sample_rate.0,
            config.channels
        );

        Ok(Self {
            _stream: stream,
            sender,
            clock,
            sample_rate: config.sample_rate.0 as f32,
        })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        mut mixer: VoiceMixer,
    ) -> Result<Stream>
    where
        T: Sample + SizedSample + Send + 'static + cpal::FromSample<f32>,
    {
        let channels = config.channels as usize;
        let err_fn = |err| log::error!("an error occurred on the output audio stream: {}", err);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let frames = data.len() / channels;
                    mixer.render(frames, |i, value| {
                        let value: T = T::from_sample(value);
                        for sample in &mut data[i * channels..(i + 1) * channels] {
                            *sample = value;
                        }
                    });
                },
                err_fn,
                None,
            )
            .map_err(|e| anyhow!("Failed to build output stream: {}", e))?;

        Ok(stream)
    }
}

impl OutputContext for CpalContext {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn current_frame(&self) -> u64 {
        self.clock.load(Ordering::Acquire)
    }

    fn schedule(&self, voices: Vec<Voice>) -> Result<()> {
        self.sender
            .send(voices)
            .map_err(|e| anyhow!("Audio thread has stopped: {}", e))
    }
}
