//! Oscillator bank with double-buffered wavetables
//!
//! Each bank owns two complete table sets and an active index. The
//! control context stages a rebuild into the inactive set; the render
//! context swaps the index only when the morph LFO reaches the
//! extremum at which this bank is nearly silent in the mix. The swap
//! is a single index flip, so the render path never observes a
//! half-written table.

use std::f64::consts::PI;

use super::{MorphLfo, Wavetable, XorShift32};

/// Pitch above which the harmonic level is capped to keep every
/// played partial below Nyquist
const AA_THRESHOLD_HZ: f64 = 1600.0;

/// The LFO extremum at which a bank's rebuild may commit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegenWindow {
    /// Crossfade below 0.01; bank A is nearly silent
    Trough,
    /// Crossfade above 0.99; bank B is nearly silent
    Peak,
}

/// Rebuild state for one bank. A single pending slot: a new request
/// before the window opens overwrites the staged set, never queues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegenState {
    Idle,
    PendingAtTrough,
    PendingAtPeak,
}

/// One oscillator bank: two buffered table sets, the active index,
/// and the pending-rebuild state machine.
pub struct OscillatorBank {
    tables: [Wavetable; 2],
    active: usize,
    window: RegenWindow,
    regen: RegenState,
}

impl OscillatorBank {
    /// Create a bank with its active set generated at the given
    /// harmonic count.
    pub fn new(harmonics: usize, window: RegenWindow, rng: &mut XorShift32) -> Self {
        let mut tables = [Wavetable::new(), Wavetable::new()];
        tables[0].generate(harmonics, rng);
        Self {
            tables,
            active: 0,
            window,
            regen: RegenState::Idle,
        }
    }

    /// Harmonic count of the active set
    pub fn harmonics(&self) -> usize {
        self.tables[self.active].harmonics()
    }

    /// The active table set
    pub fn table(&self) -> &Wavetable {
        &self.tables[self.active]
    }

    /// Current rebuild state
    pub fn regen_state(&self) -> RegenState {
        self.regen
    }

    /// Build the inactive set from a fresh spectrum and arm the bank.
    /// Called from the control context; the active set keeps playing
    /// untouched until [`commit_if_gated`](Self::commit_if_gated)
    /// swaps at the window.
    pub fn stage_rebuild(&mut self, harmonics: usize, rng: &mut XorShift32) {
        let inactive = self.active ^ 1;
        self.tables[inactive].generate(harmonics, rng);
        self.regen = match self.window {
            RegenWindow::Trough => RegenState::PendingAtTrough,
            RegenWindow::Peak => RegenState::PendingAtPeak,
        };
    }

    /// Swap in a staged rebuild if the bank's window is open. Called
    /// once per sample from the render context. Returns true when a
    /// swap happened.
    pub fn commit_if_gated(&mut self, lfo: &MorphLfo) -> bool {
        let open = match self.regen {
            RegenState::Idle => return false,
            RegenState::PendingAtTrough => lfo.at_trough(),
            RegenState::PendingAtPeak => lfo.at_peak(),
        };
        if open {
            self.active ^= 1;
            self.regen = RegenState::Idle;
        }
        open
    }

    /// Number of harmonics safe to play at the given pitch
    ///
    /// Above the threshold pitch the count is capped so the highest
    /// played harmonic stays below Nyquist; below it the configured
    /// count is used unchanged.
    pub fn level(&self, fund_freq: f64, sample_rate: f64) -> usize {
        let h = self.harmonics();
        if fund_freq >= AA_THRESHOLD_HZ {
            let cap = (sample_rate / (2.0 * fund_freq)).floor() as usize + 1;
            cap.clamp(1, h)
        } else {
            h
        }
    }

    /// Rewind every active-set partial to its generation-time phase
    pub fn re_anchor_partials(&mut self) {
        self.tables[self.active].re_anchor_partials();
    }

    /// Render this bank's contribution for one sample: interpolated
    /// table lookup at the selected level plus the active inharmonic
    /// partials. Output gain is applied by the caller.
    pub fn process(
        &mut self,
        index0: usize,
        index1: usize,
        frac: f64,
        fund_freq: f64,
        sample_rate: f64,
        inharmonic_gain: f64,
    ) -> f64 {
        let level = self.level(fund_freq, sample_rate);
        let table = &mut self.tables[self.active];

        let row = table.row(level - 1);
        let (s0, s1) = (row[index0], row[index1]);
        let mut sample = s0 + (s1 - s0) * frac;

        // Partials above the level cap stay frozen along with the
        // harmonics they sit between.
        for partial in &mut table.partials_mut()[..level - 1] {
            partial.phase += fund_freq * partial.freq_factor / sample_rate;
            if partial.phase >= 1.0 {
                partial.phase -= 1.0;
            }
            sample += inharmonic_gain * partial.amplitude * (2.0 * PI * partial.phase).sin();
        }

        sample
    }
}
