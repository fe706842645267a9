//! Command-line configuration

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use jazzkeys_core::matcher::DEFAULT_CLOSE_THRESHOLD;
use jazzkeys_core::types::{ToneConfig, ToneEnvelope, Waveform};
use jazzkeys_core::{ChordCatalog, MatchConfig};
use std::path::{Path, PathBuf};

/// Learn jazz chords with fingerings, playback, and real-time feedback.
#[derive(Parser, Debug, Clone)]
#[command(name = "jazzkeys")]
#[command(about = "Jazz chord explorer and practice trainer")]
pub struct Config {
    /// JSON chord catalog to load instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Missing notes allowed (with no wrong notes) for a "close" grade
    #[arg(long, default_value_t = DEFAULT_CLOSE_THRESHOLD)]
    pub close_threshold: usize,

    /// Voice waveform: sine, saw, square or triangle
    #[arg(long, default_value = "triangle", value_parser = parse_waveform)]
    pub waveform: Waveform,

    /// Peak gain of each voice (0-1)
    #[arg(long, default_value_t = 0.2, value_parser = parse_gain)]
    pub gain: f32,

    /// Disable audio output
    #[arg(long)]
    pub mute: bool,

    /// Connect to the first MIDI input port containing this name at startup
    #[arg(long)]
    pub midi: Option<String>,
}

fn parse_waveform(s: &str) -> Result<Waveform, String> {
    Waveform::from_str(s).ok_or_else(|| format!("Unknown waveform: {}", s))
}

fn parse_gain(s: &str) -> Result<f32, String> {
    match s.parse::<f32>() {
        Ok(gain) if gain.is_finite() && gain > 0.0 && gain <= 1.0 => Ok(gain),
        Ok(_) => Err(format!("Gain must be between 0 and 1, got {}", s)),
        Err(e) => Err(e.to_string()),
    }
}

impl Config {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.close_threshold)
    }

    pub fn tone_config(&self) -> ToneConfig {
        ToneConfig::new(self.waveform, ToneEnvelope::keys().with_peak(self.gain))
    }

    /// The catalog named on the command line, or the built-in one
    pub fn load_catalog(&self) -> Result<ChordCatalog> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => Ok(ChordCatalog::builtin()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            waveform: Waveform::default(),
            gain: ToneEnvelope::keys().peak,
            mute: false,
            midi: None,
        }
    }
}

/// Read and validate a JSON catalog file
pub fn load_catalog(path: &Path) -> Result<ChordCatalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = ChordCatalog::from_json(&text)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    if catalog.is_empty() {
        return Err(anyhow!("Catalog {} has no chords", path.display()));
    }
    log::info!(
        "Loaded catalog {} ({} chords)",
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["jazzkeys"]);
        assert_eq!(config.close_threshold, 2);
        assert_eq!(config.waveform, Waveform::Triangle);
        assert!(!config.mute);
        assert_eq!(config.tone_config(), ToneConfig::default());
        assert_eq!(config.match_config(), MatchConfig::default());
    }

    #[test]
    fn test_flags() {
        let config = Config::parse_from([
            "jazzkeys",
            "--close-threshold",
            "1",
            "--waveform",
            "sine",
            "--gain",
            "0.1",
            "--mute",
            "--midi",
            "Keystation",
        ]);
        assert_eq!(config.match_config().close_threshold, 1);
        assert_eq!(config.tone_config().waveform, Waveform::Sine);
        assert_eq!(config.tone_config().envelope.peak, 0.1);
        assert!(config.mute);
        assert_eq!(config.midi.as_deref(), Some("Keystation"));
    }

    #[test]
    fn test_bad_waveform_rejected() {
        assert!(Config::try_parse_from(["jazzkeys", "--waveform", "noise"]).is_err());
    }

    #[test]
    fn test_bad_gain_rejected() {
        for gain in ["NaN", "inf", "0", "-0.5", "1.5", "loud"] {
            assert!(
                Config::try_parse_from(["jazzkeys", "--gain", gain]).is_err(),
                "gain {} accepted",
                gain
            );
        }
        let config = Config::try_parse_from(["jazzkeys", "--gain", "1"]).unwrap();
        assert_eq!(config.tone_config().envelope.peak, 1.0);
    }

    #[test]
    fn test_builtin_catalog_without_flag() {
        let catalog = Config::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_load_catalog_file() {
        let path = std::env::temp_dir().join(format!("jazzkeys-catalog-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "chords": [ { "name": "C6", "notes": ["C", "E", "G", "A"], "frequencies": [261.63] } ] }"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.first().unwrap().name(), "C6");
        std::fs::remove_file(&path).unwrap();

        assert!(load_catalog(&path).is_err());
    }
}
