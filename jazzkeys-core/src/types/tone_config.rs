//! Voice configuration for chord playback
//!
//! These pure data types carry no synthesis logic. They define the waveform and
//! the percussive envelope shared by every voice the synthesizer schedules, and
//! the envelope can be sampled directly for testing.

/// Available waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    /// Soft, keys-like: odd harmonics rolling off quickly
    #[default]
    Triangle,
}

impl Waveform {
    /// Parse waveform from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Waveform> {
        match s.to_lowercase().as_str() {
            "sine" | "sin" => Some(Waveform::Sine),
            "saw" | "sawtooth" => Some(Waveform::Saw),
            "square" | "sq" => Some(Waveform::Square),
            "triangle" | "tri" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Saw => "saw",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }

    /// Waveform value at a phase in [0, 1), range [-1, 1]
    pub fn value_at(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (2.0 * std::f32::consts::PI * phase).sin(),
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
        }
    }
}

/// Percussive amplitude envelope (times in seconds from voice start)
///
/// - `attack`: linear ramp from silence to `peak`
/// - `decay_end`: exponential fall from `peak` reaches `floor` here
/// - `stop`: voice is silent and finished from here on
/// - `peak`: maximum gain, kept well under 1.0 so stacked voices don't clip
/// - `floor`: near-silent level the decay aims for (must be > 0 for an exponential ramp)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    pub attack: f32,
    pub decay_end: f32,
    pub stop: f32,
    pub peak: f32,
    pub floor: f32,
}

impl ToneEnvelope {
    /// Create an envelope, clamped to a valid shape. Non-finite values fall
    /// back to the `keys()` shape.
    pub fn new(attack: f32, decay_end: f32, stop: f32, peak: f32, floor: f32) -> Self {
        let attack = finite_or(attack, 0.05).max(0.001); // Minimum 1ms to avoid clicks
        let decay_end = finite_or(decay_end, 1.4).max(attack + 0.001);
        let stop = finite_or(stop, 1.5).max(decay_end);
        let peak = finite_or(peak, 0.2).clamp(0.001, 1.0);
        let floor = finite_or(floor, 0.001).clamp(1e-6, peak);
        Self {
            attack,
            decay_end,
            stop,
            peak,
            floor,
        }
    }

    /// Keys-like pluck: 50ms attack to 0.2, decays to 0.001 by 1.4s, stops at 1.5s
    pub fn keys() -> Self {
        Self::new(0.05, 1.4, 1.5, 0.2, 0.001)
    }

    /// Same shape with a different peak gain
    pub fn with_peak(self, peak: f32) -> Self {
        Self::new(self.attack, self.decay_end, self.stop, peak, self.floor.min(peak))
    }

    /// Gain at `t` seconds after the voice starts
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.stop {
            0.0
        } else if t < self.attack {
            self.peak * t / self.attack
        } else if t < self.decay_end {
            let progress = (t - self.attack) / (self.decay_end - self.attack);
            self.peak * (self.floor / self.peak).powf(progress)
        } else {
            self.floor
        }
    }

    /// Total voice lifetime in seconds
    pub fn lifetime(&self) -> f32 {
        self.stop
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl Default for ToneEnvelope {
    fn default() -> Self {
        Self::keys()
    }
}

/// Everything a voice needs besides its frequency
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToneConfig {
    pub waveform: Waveform,
    pub envelope: ToneEnvelope,
}

impl ToneConfig {
    pub fn new(waveform: Waveform, envelope: ToneEnvelope) -> Self {
        Self { waveform, envelope }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_parsing() {
        assert_eq!(Waveform::from_str("sine"), Some(Waveform::Sine));
        assert_eq!(Waveform::from_str("SAW"), Some(Waveform::Saw));
        assert_eq!(Waveform::from_str("Square"), Some(Waveform::Square));
        assert_eq!(Waveform::from_str("tri"), Some(Waveform::Triangle));
        assert_eq!(Waveform::from_str("invalid"), None);
    }

    #[test]
    fn test_default_waveform_is_triangle() {
        assert_eq!(Waveform::default(), Waveform::Triangle);
    }

    #[test]
    fn test_waveform_range() {
        for waveform in [
            Waveform::Sine,
            Waveform::Saw,
            Waveform::Square,
            Waveform::Triangle,
        ] {
            for i in 0..100 {
                let v = waveform.value_at(i as f32 / 100.0);
                assert!(
                    (-1.0..=1.0).contains(&v),
                    "{} out of range: {}",
                    waveform.name(),
                    v
                );
            }
        }
    }

    #[test]
    fn test_envelope_starts_silent() {
        let env = ToneEnvelope::keys();
        assert_eq!(env.gain_at(0.0), 0.0);
        assert_eq!(env.gain_at(-0.5), 0.0);
    }

    #[test]
    fn test_envelope_reaches_peak_after_attack() {
        let env = ToneEnvelope::keys();
        assert!((env.gain_at(0.025) - 0.1).abs() < 1e-4);
        assert!((env.gain_at(0.05) - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_envelope_decays_monotonically() {
        let env = ToneEnvelope::keys();
        let mut last = env.gain_at(env.attack);
        let mut t = env.attack;
        while t < env.decay_end {
            let g = env.gain_at(t);
            assert!(g <= last + 1e-6, "gain rose during decay at {}", t);
            last = g;
            t += 0.01;
        }
    }

    #[test]
    fn test_envelope_is_silent_at_stop() {
        let env = ToneEnvelope::keys();
        assert!(env.gain_at(env.decay_end) <= env.floor + 1e-6);
        assert_eq!(env.gain_at(env.stop), 0.0);
        assert_eq!(env.gain_at(10.0), 0.0);
        assert_eq!(env.lifetime(), 1.5);
    }

    #[test]
    fn test_envelope_clamping() {
        let env = ToneEnvelope::new(0.0, 0.0, 0.0, 4.0, 0.0);
        assert!(env.attack >= 0.001);
        assert!(env.decay_end > env.attack);
        assert!(env.stop >= env.decay_end);
        assert!(env.peak <= 1.0);
        assert!(env.floor > 0.0);
    }

    #[test]
    fn test_envelope_rejects_non_finite_values() {
        let env = ToneEnvelope::new(0.05, 1.4, 1.5, f32::NAN, 0.001);
        assert_eq!(env.peak, 0.2);

        let env = ToneEnvelope::keys().with_peak(f32::NAN);
        assert_eq!(env, ToneEnvelope::keys());

        let env = ToneEnvelope::new(f32::INFINITY, f32::NAN, f32::INFINITY, 0.5, f32::NAN);
        assert_eq!(env.attack, 0.05);
        assert_eq!(env.decay_end, 1.4);
        assert_eq!(env.stop, 1.5);
        assert_eq!(env.floor, 0.001);
        assert!(env.gain_at(0.5).is_finite());
    }

    #[test]
    fn test_with_peak_keeps_timing() {
        let env = ToneEnvelope::keys().with_peak(0.1);
        assert_eq!(env.peak, 0.1);
        assert_eq!(env.decay_end, 1.4);
        assert_eq!(env.stop, 1.5);
    }
}
