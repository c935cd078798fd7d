//! Audio engine for Weft
//!
//! Owns the texture voice and renders the sample stream consumed by
//! the player and the recorder.

pub mod player;
pub mod recorder;

pub use player::Player;
pub use recorder::Recorder;

use crate::config::WeftConfig;
use crate::synth::{BankId, TextureVoice, XorShift32};

/// The main audio engine
pub struct Engine {
    voice: TextureVoice,
    sample_rate: f64,
    harmonics_a: usize,
    harmonics_b: usize,
}

impl Engine {
    /// Create a new engine configured from the given settings
    pub fn new(config: WeftConfig) -> Self {
        let sample_rate = config.audio.sample_rate as f64;
        let seed = config.texture.seed.unwrap_or(XorShift32::DEFAULT_SEED);

        let mut voice = TextureVoice::new(
            sample_rate,
            seed,
            config.texture.harmonics_a,
            config.texture.harmonics_b,
        );
        voice.set_parameter("frequency", config.texture.frequency);
        voice.set_parameter("gain", config.texture.gain);
        voice.set_parameter("inharmonic_gain", config.texture.inharmonic_gain);
        voice.set_parameter("lfo_frequency", config.texture.lfo_frequency);
        voice.set_parameter("attack", config.envelope.attack);
        voice.set_parameter("decay", config.envelope.decay);
        voice.set_parameter("curve", config.envelope.curve);
        voice.set_drum_mode(config.texture.drum);
        voice.set_sync_mode(config.texture.sync);

        Self {
            voice,
            sample_rate,
            harmonics_a: config.texture.harmonics_a,
            harmonics_b: config.texture.harmonics_b,
        }
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Set a named voice parameter
    pub fn set_parameter(&mut self, name: &str, value: f64) {
        self.voice.set_parameter(name, value);
    }

    /// Get a named voice parameter
    pub fn get_parameter(&self, name: &str) -> Option<f64> {
        self.voice.get_parameter(name)
    }

    /// Latch a drum-mode trigger
    pub fn trigger(&mut self) {
        self.voice.trigger();
    }

    /// Stage a rebuild of one bank at an explicit harmonic count
    pub fn request_regenerate(&mut self, bank: BankId, harmonics: usize) {
        self.voice.request_regenerate(bank, harmonics);
    }

    /// Stage a re-roll of one bank at its configured harmonic count
    pub fn reroll(&mut self, bank: BankId) {
        let harmonics = match bank {
            BankId::A => self.harmonics_a,
            BankId::B => self.harmonics_b,
        };
        self.voice.request_regenerate(bank, harmonics);
    }

    /// The texture voice
    pub fn voice(&self) -> &TextureVoice {
        &self.voice
    }

    /// Generate the next mono sample
    pub fn process(&mut self) -> f64 {
        self.voice.process()
    }

    /// Fill a buffer with mono samples
    pub fn fill_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process() as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeftConfig;

    fn test_config() -> WeftConfig {
        serde_yaml::from_str("audio: {}").unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new(test_config());

        assert_eq!(engine.sample_rate(), 48000.0);
        assert_eq!(engine.get_parameter("frequency"), Some(110.0));
        assert_eq!(engine.get_parameter("gain"), Some(0.25));
        assert_eq!(engine.voice().bank_a().harmonics(), 16);
        assert_eq!(engine.voice().bank_b().harmonics(), 2);
    }

    #[test]
    fn test_engine_applies_config() {
        let yaml = r#"
audio: {}
texture:
  frequency: 220.0
  drum: true
  sync: true
envelope:
  attack: 0.01
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        let engine = Engine::new(config);

        assert_eq!(engine.get_parameter("frequency"), Some(220.0));
        assert_eq!(engine.get_parameter("attack"), Some(0.01));
        assert!(engine.voice().drum_mode());
        assert!(engine.voice().sync_mode());
    }

    #[test]
    fn test_engine_produces_audio() {
        let mut engine = Engine::new(test_config());

        let mut max_sample = 0.0f64;
        for _ in 0..1000 {
            let sample = engine.process();
            assert!(sample.is_finite());
            max_sample = max_sample.max(sample.abs());
        }
        assert!(max_sample > 0.0, "Expected non-zero audio output");
    }

    #[test]
    fn test_engine_fill_buffer() {
        let mut engine = Engine::new(test_config());

        let mut buffer = vec![0.0f32; 512];
        engine.fill_buffer(&mut buffer);

        let has_audio = buffer.iter().any(|&s| s.abs() > 0.0);
        assert!(has_audio);
    }

    #[test]
    fn test_engine_reroll_uses_configured_counts() {
        let mut engine = Engine::new(test_config());

        // Bank B's peak window is open at the LFO's start, so the
        // re-roll commits on the next sample and keeps the count.
        engine.reroll(BankId::B);
        engine.process();
        assert_eq!(engine.voice().bank_b().harmonics(), 2);
    }

    #[test]
    fn test_engine_seed_reproducibility() {
        let yaml = r#"
audio: {}
texture:
  seed: 42
"#;
        let config: WeftConfig = serde_yaml::from_str(yaml).unwrap();
        let mut first = Engine::new(config.clone());
        let mut second = Engine::new(config);

        for _ in 0..1000 {
            assert_eq!(first.process(), second.process());
        }
    }
}
