//! Synthesis core
//!
//! Deterministic randomized wavetables, two double-buffered oscillator
//! banks, a morph LFO, an attack-decay envelope, and the per-sample
//! render engine that combines them.

pub mod bank;
pub mod envelope;
pub mod lfo;
pub mod rng;
pub mod texture;
pub mod wavetable;

pub use bank::{OscillatorBank, RegenState, RegenWindow};
pub use envelope::{AdEnvelope, EnvelopeStage};
pub use lfo::MorphLfo;
pub use rng::XorShift32;
pub use texture::{BankId, TextureVoice};
pub use wavetable::{InharmonicPartial, Wavetable, MAX_HARMONICS, MAX_PARTIALS, TABLE_SIZE};
