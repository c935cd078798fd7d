//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for Weft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeftConfig {
    /// Audio output settings
    pub audio: AudioConfig,

    /// Texture voice settings
    #[serde(default)]
    pub texture: TextureConfig,

    /// Drum-mode envelope settings
    #[serde(default)]
    pub envelope: EnvelopeConfig,

    /// Automatic spectrum re-roll settings
    #[serde(default)]
    pub regenerate: RegenerateConfig,
}

impl WeftConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }
        if self.audio.buffer_size < 64 || self.audio.buffer_size > 8192 {
            bail!("Buffer size must be between 64 and 8192");
        }

        if self.texture.frequency < 20.0 || self.texture.frequency > 20000.0 {
            bail!("Frequency must be between 20 and 20000 Hz");
        }
        if self.texture.gain < 0.0 || self.texture.gain > 1.0 {
            bail!("Gain must be between 0.0 and 1.0");
        }
        if self.texture.inharmonic_gain < 0.0 || self.texture.inharmonic_gain > 1.0 {
            bail!("Inharmonic gain must be between 0.0 and 1.0");
        }
        if self.texture.harmonics_a < 1 || self.texture.harmonics_a > 16 {
            bail!("harmonics_a must be between 1 and 16");
        }
        if self.texture.harmonics_b < 1 || self.texture.harmonics_b > 16 {
            bail!("harmonics_b must be between 1 and 16");
        }
        if self.texture.lfo_frequency < 0.01 || self.texture.lfo_frequency > 100.0 {
            bail!("LFO frequency must be between 0.01 and 100 Hz");
        }

        if self.envelope.attack < 0.001 || self.envelope.attack > 60.0 {
            bail!("Envelope attack must be between 0.001 and 60 seconds");
        }
        if self.envelope.decay < 0.001 || self.envelope.decay > 60.0 {
            bail!("Envelope decay must be between 0.001 and 60 seconds");
        }
        if self.envelope.curve < -100.0 || self.envelope.curve > 100.0 {
            bail!("Envelope curve must be between -100 and 100");
        }

        if let Some(interval) = self.regenerate.interval {
            if interval < 0.1 || interval > 3600.0 {
                bail!("Regenerate interval must be between 0.1 and 3600 seconds");
            }
        }

        Ok(())
    }
}

/// Audio output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 48000)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Buffer size in samples (default: 512)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Output device name (None = default device)
    pub device: Option<String>,
}

fn default_sample_rate() -> u32 { 48000 }
fn default_buffer_size() -> usize { 512 }

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            buffer_size: default_buffer_size(),
            device: None,
        }
    }
}

/// Texture voice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureConfig {
    /// Fundamental frequency in Hz (default: 110)
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Output gain 0.0-1.0 (default: 0.25)
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// Inharmonic partial gain 0.0-1.0 (default: 0.5)
    #[serde(default = "default_inharmonic_gain")]
    pub inharmonic_gain: f64,

    /// Harmonic count for bank A, 1-16 (default: 16)
    #[serde(default = "default_harmonics_a")]
    pub harmonics_a: usize,

    /// Harmonic count for bank B, 1-16 (default: 2)
    #[serde(default = "default_harmonics_b")]
    pub harmonics_b: usize,

    /// Morph LFO frequency in Hz (default: 0.5)
    #[serde(default = "default_lfo_frequency")]
    pub lfo_frequency: f64,

    /// PRNG seed (None = fixed default seed, reproducible spectra)
    pub seed: Option<u32>,

    /// Percussive envelope mode (default: off)
    #[serde(default)]
    pub drum: bool,

    /// Phase-locked retrigger mode (default: off)
    #[serde(default)]
    pub sync: bool,
}

fn default_frequency() -> f64 { 110.0 }
fn default_gain() -> f64 { 0.25 }
fn default_inharmonic_gain() -> f64 { 0.5 }
fn default_harmonics_a() -> usize { 16 }
fn default_harmonics_b() -> usize { 2 }
fn default_lfo_frequency() -> f64 { 0.5 }

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            gain: default_gain(),
            inharmonic_gain: default_inharmonic_gain(),
            harmonics_a: default_harmonics_a(),
            harmonics_b: default_harmonics_b(),
            lfo_frequency: default_lfo_frequency(),
            seed: None,
            drum: false,
            sync: false,
        }
    }
}

/// Drum-mode envelope configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Attack time in seconds (default: 0.004)
    #[serde(default = "default_attack")]
    pub attack: f64,

    /// Decay time in seconds (default: 0.2)
    #[serde(default = "default_decay")]
    pub decay: f64,

    /// Curve shape, negative = front-loaded (default: -1.0)
    #[serde(default = "default_curve")]
    pub curve: f64,
}

fn default_attack() -> f64 { 0.004 }
fn default_decay() -> f64 { 0.2 }
fn default_curve() -> f64 { -1.0 }

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: default_attack(),
            decay: default_decay(),
            curve: default_curve(),
        }
    }
}

/// Automatic spectrum re-roll configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateConfig {
    /// Seconds between re-roll requests, alternating banks
    /// (None = never re-roll; default: 6.0)
    #[serde(default = "default_regen_interval")]
    pub interval: Option<f64>,
}

fn default_regen_interval() -> Option<f64> { Some(6.0) }

impl Default for RegenerateConfig {
    fn default() -> Self {
        Self {
            interval: default_regen_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_audio_config() {
        let yaml = "buffer_size: 1024";
        let config: AudioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_rate, 48000); // default
        assert_eq!(config.buffer_size, 1024);
    }

    #[test]
    fn test_texture_config_defaults() {
        let yaml = "frequency: 220.0";
        let config: TextureConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.frequency, 220.0);
        assert_eq!(config.gain, 0.25);
        assert_eq!(config.harmonics_a, 16);
        assert_eq!(config.harmonics_b, 2);
        assert_eq!(config.seed, None);
        assert!(!config.drum);
        assert!(!config.sync);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
audio:
  sample_rate: 48000
  buffer_size: 512

texture:
  frequency: 110.0
  gain: 0.25
  inharmonic_gain: 0.5
  harmonics_a: 16
  harmonics_b: 2
  lfo_frequency: 0.5
  seed: 42
  drum: true
  sync: true

envelope:
  attack: 0.004
  decay: 0.2
  curve: -1.0

regenerate:
  interval: 4.0
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.texture.seed, Some(42));
        assert!(config.texture.drum);
        assert_eq!(config.regenerate.interval, Some(4.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_validates() {
        let yaml = "audio: {}";
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.regenerate.interval, Some(6.0));
    }

    #[test]
    fn test_invalid_gain_rejected() {
        let yaml = r#"
audio: {}
texture:
  gain: 1.5
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_harmonics_rejected() {
        let yaml = r#"
audio: {}
texture:
  harmonics_a: 0
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());

        let yaml = r#"
audio: {}
texture:
  harmonics_b: 17
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_regen_interval_rejected() {
        let yaml = r#"
audio: {}
regenerate:
  interval: 0.0
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_regen_interval() {
        let yaml = r#"
audio: {}
regenerate:
  interval: null
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.regenerate.interval, None);
        assert!(config.validate().is_ok());
    }
}
