//! Wavetable construction from randomized harmonic spectra
//!
//! Each build draws a fresh random spectrum, normalizes it to a fixed
//! RMS target, and lays it down as cumulative-harmonic rows: row h is
//! a complete playable waveform containing harmonics 1..=h+1. Keeping
//! every prefix of the spectrum playable lets the renderer drop to a
//! lower harmonic count at high pitches without re-synthesizing
//! anything per sample.

use std::f64::consts::PI;

use super::XorShift32;

/// Samples per table row (one waveform cycle)
pub const TABLE_SIZE: usize = 2048;

/// Maximum number of harmonics per spectrum
pub const MAX_HARMONICS: usize = 16;

/// Maximum number of inharmonic partials per table
pub const MAX_PARTIALS: usize = MAX_HARMONICS - 1;

/// An additive sinusoid at a randomly detuned near-harmonic frequency
///
/// The initial phase is fixed at generation time; the running phase
/// advances every sample and is re-anchored to the initial phase on a
/// phase-locked retrigger, never reset to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct InharmonicPartial {
    /// Frequency as a multiple of the fundamental (integer + detune)
    pub freq_factor: f64,
    /// Amplitude, scaled by the spectrum's normalization factor
    pub amplitude: f64,
    /// Phase assigned at generation time
    pub initial_phase: f64,
    /// Phase advanced by the renderer, in cycles
    pub phase: f64,
}

/// One bank's complete timbre: cumulative-harmonic rows plus a set of
/// detuned inharmonic partials.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    rows: Vec<Vec<f64>>,
    partials: Vec<InharmonicPartial>,
    harmonics: usize,
}

impl Wavetable {
    /// Create an empty table; call [`generate`](Self::generate) to
    /// fill it before playback.
    pub fn new() -> Self {
        Self {
            rows: vec![vec![0.0; TABLE_SIZE]; MAX_HARMONICS],
            partials: Vec::with_capacity(MAX_PARTIALS),
            harmonics: 1,
        }
    }

    /// Rebuild the table in place from a freshly drawn spectrum
    ///
    /// `harmonics` is clamped to [1, 16]. Rows above `harmonics - 1`
    /// keep stale content; the renderer never reads them because the
    /// played level is always bounded by the harmonic count.
    pub fn generate(&mut self, harmonics: usize, rng: &mut XorShift32) {
        let h = harmonics.clamp(1, MAX_HARMONICS);
        self.harmonics = h;

        // Draw the spectrum and measure its RMS
        let mut amp = [0.0f64; MAX_HARMONICS];
        let mut phase = [0.0f64; MAX_HARMONICS];
        let mut mean_square = 0.0;
        for i in 0..h {
            amp[i] = rng.next_f64();
            phase[i] = 2.0 * PI * rng.next_f64();
            mean_square += amp[i] * amp[i];
        }
        let rms = (mean_square / 2.0).sqrt();

        // An all-zero draw would make the divisor zero; leave the
        // spectrum unscaled in that case so every value stays finite.
        let norm = if rms > 0.0 && rms.is_finite() { rms } else { 1.0 };
        for a in amp[..h].iter_mut() {
            *a /= norm;
        }

        // Fundamental
        let mut theta = phase[0];
        let theta_inc = 2.0 * PI / TABLE_SIZE as f64;
        for n in 0..TABLE_SIZE {
            self.rows[0][n] = amp[0] * theta.sin();
            theta += theta_inc;
        }

        // Each higher row adds one harmonic to the row below. The
        // increment never exceeds one turn per sample, so a single
        // conditional subtraction keeps theta in range.
        for r in 1..h {
            let mut theta = phase[r];
            let theta_inc = 2.0 * PI * (r + 1) as f64 / TABLE_SIZE as f64;
            for n in 0..TABLE_SIZE {
                self.rows[r][n] = amp[r] * theta.sin() + self.rows[r - 1][n];
                theta += theta_inc;
                if theta > 2.0 * PI {
                    theta -= 2.0 * PI;
                }
            }
        }

        // Detuned partials, one fewer than the harmonic count
        self.partials.clear();
        for i in 0..h - 1 {
            let freq_factor = rng.next_f64() + (i + 1) as f64;
            let amplitude = rng.next_f64() / norm;
            let initial_phase = 2.0 * PI * rng.next_f64();
            self.partials.push(InharmonicPartial {
                freq_factor,
                amplitude,
                initial_phase,
                phase: initial_phase,
            });
        }
    }

    /// Number of harmonics in the current spectrum
    pub fn harmonics(&self) -> usize {
        self.harmonics
    }

    /// A single cumulative row (0-based; row r holds harmonics 1..=r+1)
    pub fn row(&self, r: usize) -> &[f64] {
        &self.rows[r]
    }

    /// The inharmonic partial set
    pub fn partials(&self) -> &[InharmonicPartial] {
        &self.partials
    }

    /// Mutable access for the renderer's phase advances
    pub fn partials_mut(&mut self) -> &mut [InharmonicPartial] {
        &mut self.partials
    }

    /// Rewind every partial's running phase to its generation-time
    /// initial phase.
    pub fn re_anchor_partials(&mut self) {
        for partial in &mut self.partials {
            partial.phase = partial.initial_phase;
        }
    }
}

impl Default for Wavetable {
    fn default() -> Self {
        Self::new()
    }
}
