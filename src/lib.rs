pub mod control; // Lock-free control handoff from UI/driver threads
pub mod dsp;
pub mod engine; // Sample-rate context, shared cursor, the synth itself
pub mod params; // Parameter metadata and path-addressed access

pub use engine::{EngineState, PhiSynth, SampleRateContext, SynthConfig};
pub use params::ParamError;

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Entries in the shared sine table.
pub const TABLE_SIZE: usize = 65_536;

/// Lowest sample rate the engine derives constants for.
pub const MIN_SAMPLE_RATE: f32 = 1.0;
/// Highest sample rate the engine derives constants for.
pub const MAX_SAMPLE_RATE: f32 = 192_000.0;
