//! Weft - continuously morphing wavetable texture synthesizer
//!
//! Two oscillator banks play wavetables built at runtime from
//! randomized harmonic spectra, layered with detuned inharmonic
//! partials. A raised-cosine LFO crossfades between the banks, and
//! fresh spectra are swapped in only at the moment the affected bank
//! is nearly silent.

pub mod config;
pub mod engine;
pub mod synth;

pub use config::WeftConfig;
pub use engine::Engine;
