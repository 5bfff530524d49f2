//! Low-level DSP primitives used by the synth engine.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so the engine can own them directly. They stay focused on the
//! signal-processing math; sequencing of a sample step lives in
//! [`crate::engine`].

/// Fixed-capacity circular buffer addressed by the shared cursor.
pub mod delay;
/// Gate-driven attack/sustain/fade gain curve.
pub mod envelope;
/// Bilinear-transform biquad lowpass.
pub mod filter;
/// Golden-ratio phase accumulators sampling the sine table.
pub mod oscillator;
/// Lossy comb bank and allpass diffusion chain.
pub mod reverb;
/// One-cycle sine lookup table.
pub mod wavetable;

pub use envelope::GateEnvelope;
pub use wavetable::SineTable;
