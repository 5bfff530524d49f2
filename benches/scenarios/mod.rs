//! Whole-engine benchmarks.
//!
//! These drive `PhiSynth::process` the way an audio callback does.

mod engine;

pub use engine::bench_engine;
