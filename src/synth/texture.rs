//! Morphing wavetable texture voice
//!
//! The per-sample render engine. Two oscillator banks play the same
//! wavetable phase; a raised-cosine LFO crossfades between them, and
//! in drum mode an attack-decay envelope shapes the mix. Regeneration
//! requests are staged into a bank's inactive buffer and committed at
//! the LFO extremum where that bank is nearly silent.

use super::{AdEnvelope, MorphLfo, OscillatorBank, RegenWindow, XorShift32, TABLE_SIZE};

/// Which oscillator bank a control request targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BankId {
    /// Gated at the LFO trough
    A,
    /// Gated at the LFO peak
    B,
}

/// A complete morphing texture voice
pub struct TextureVoice {
    sample_rate: f64,
    rng: XorShift32,

    bank_a: OscillatorBank,
    bank_b: OscillatorBank,
    lfo: MorphLfo,
    envelope: AdEnvelope,

    /// Playback position into the 2048-sample cycle, shared by both banks
    table_phase: f64,

    // Live control values
    frequency: f64,
    gain: f64,
    inharmonic_gain: f64,
    drum: bool,
    sync: bool,

    /// Trigger latch, consumed at the top of the next sample
    triggered: bool,
}

impl TextureVoice {
    /// Create a voice with both banks generated from the seeded PRNG
    pub fn new(sample_rate: f64, seed: u32, harmonics_a: usize, harmonics_b: usize) -> Self {
        let mut rng = XorShift32::new(seed);
        let bank_a = OscillatorBank::new(harmonics_a, RegenWindow::Trough, &mut rng);
        let bank_b = OscillatorBank::new(harmonics_b, RegenWindow::Peak, &mut rng);

        Self {
            sample_rate,
            rng,
            bank_a,
            bank_b,
            lfo: MorphLfo::new(sample_rate),
            envelope: AdEnvelope::new(sample_rate),
            table_phase: 0.0,
            frequency: 110.0,
            gain: 0.25,
            inharmonic_gain: 0.5,
            drum: false,
            sync: false,
            triggered: false,
        }
    }

    /// Set a named parameter with range clamping
    pub fn set_parameter(&mut self, name: &str, value: f64) {
        match name {
            "pitch" | "frequency" => {
                self.frequency = value.clamp(20.0, 20000.0);
            }
            "gain" | "volume" => {
                self.gain = value.clamp(0.0, 1.0);
            }
            "inharmonic_gain" | "inharmonic" => {
                self.inharmonic_gain = value.clamp(0.0, 1.0);
            }
            "lfo_frequency" | "morph_rate" => {
                self.lfo.set_frequency(value);
            }
            "attack" => {
                self.envelope.set_attack(value);
            }
            "decay" => {
                self.envelope.set_decay(value);
            }
            "curve" => {
                self.envelope.set_curve(value);
            }
            _ => {}
        }
    }

    /// Get a named parameter value
    pub fn get_parameter(&self, name: &str) -> Option<f64> {
        match name {
            "pitch" | "frequency" => Some(self.frequency),
            "gain" | "volume" => Some(self.gain),
            "inharmonic_gain" | "inharmonic" => Some(self.inharmonic_gain),
            "lfo_frequency" | "morph_rate" => Some(self.lfo.frequency()),
            "attack" => Some(self.envelope.attack()),
            "decay" => Some(self.envelope.decay()),
            "curve" => Some(self.envelope.curve()),
            _ => None,
        }
    }

    /// Enable or disable drum (percussive envelope) mode
    pub fn set_drum_mode(&mut self, on: bool) {
        self.drum = on;
    }

    /// Enable or disable phase-locked sync mode
    pub fn set_sync_mode(&mut self, on: bool) {
        self.sync = on;
    }

    pub fn drum_mode(&self) -> bool {
        self.drum
    }

    pub fn sync_mode(&self) -> bool {
        self.sync
    }

    /// Latch a trigger; it takes effect at the next processed sample
    pub fn trigger(&mut self) {
        self.triggered = true;
    }

    /// Stage a rebuild of one bank at a new harmonic count. The swap
    /// happens at that bank's gate window; a second request before the
    /// window replaces the staged spectrum.
    pub fn request_regenerate(&mut self, bank: BankId, harmonics: usize) {
        match bank {
            BankId::A => self.bank_a.stage_rebuild(harmonics, &mut self.rng),
            BankId::B => self.bank_b.stage_rebuild(harmonics, &mut self.rng),
        }
    }

    /// Set the sample rate
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.lfo.set_sample_rate(sample_rate);
        self.envelope.set_sample_rate(sample_rate);
    }

    pub fn bank_a(&self) -> &OscillatorBank {
        &self.bank_a
    }

    pub fn bank_b(&self) -> &OscillatorBank {
        &self.bank_b
    }

    pub fn lfo(&self) -> &MorphLfo {
        &self.lfo
    }

    pub fn envelope(&self) -> &AdEnvelope {
        &self.envelope
    }

    pub fn table_phase(&self) -> f64 {
        self.table_phase
    }

    /// Render one mono sample
    pub fn process(&mut self) -> f64 {
        // Consume a latched trigger. In drum+sync mode a trigger that
        // arrives while the envelope is idle re-anchors every phase,
        // so each hit replays the same waveform.
        if self.triggered {
            self.triggered = false;
            if self.drum {
                let was_idle = self.envelope.is_idle();
                self.envelope.trigger();
                if self.sync && was_idle {
                    self.table_phase = 0.0;
                    self.lfo.reset();
                    self.bank_a.re_anchor_partials();
                    self.bank_b.re_anchor_partials();
                }
            }
        }

        // Advance the shared playback position
        self.table_phase += self.frequency * TABLE_SIZE as f64 / self.sample_rate;
        if self.table_phase >= TABLE_SIZE as f64 {
            self.table_phase %= TABLE_SIZE as f64;
        }

        let index0 = self.table_phase as usize;
        let index1 = (index0 + 1) % TABLE_SIZE;
        let frac = self.table_phase - index0 as f64;

        // Swap in staged rebuilds while their bank is nearly silent
        self.bank_a.commit_if_gated(&self.lfo);
        self.bank_b.commit_if_gated(&self.lfo);

        let sample_a = self.gain
            * self.bank_a.process(
                index0,
                index1,
                frac,
                self.frequency,
                self.sample_rate,
                self.inharmonic_gain,
            );
        let sample_b = self.gain
            * self.bank_b.process(
                index0,
                index1,
                frac,
                self.frequency,
                self.sample_rate,
                self.inharmonic_gain,
            );

        let crossfade = self.lfo.process();
        let mut mix = crossfade * sample_a + (1.0 - crossfade) * sample_b;

        if self.drum {
            mix *= self.envelope.process();
        }

        mix
    }
}
