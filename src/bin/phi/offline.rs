//! Non-interactive modes: parameter listing and a dummy audio driver.

use std::mem::size_of;

use phi_synth::{
    dsp::{
        reverb::{ALLPASS_CAPACITIES, COMB_CAPACITY},
        SineTable,
    },
    params::{self, ParamKind},
    PhiSynth, SynthConfig, TABLE_SIZE,
};
use tracing::info;

use crate::meter::Meter;

pub const DEFAULT_BLOCKS: usize = 5;

/// Bytes held by the engine: the struct itself plus its delay buffers.
/// The sine table is shared and listed separately.
fn engine_bytes() -> usize {
    let comb = 8 * COMB_CAPACITY;
    let allpass: usize = ALLPASS_CAPACITIES.iter().sum();
    size_of::<PhiSynth>() + (comb + allpass) * size_of::<f32>()
}

pub fn print_info(config: &SynthConfig) {
    println!("phi_synth {}", env!("CARGO_PKG_VERSION"));
    println!("engine: {} bytes", engine_bytes());
    println!("sine table: {} bytes (shared)", TABLE_SIZE * size_of::<f32>());
    println!(
        "default config: {} Hz, {} frames per block",
        config.sample_rate, config.block_size
    );
    for (key, value) in params::metadata() {
        println!("  {key}: {value}");
    }
    println!();
    for spec in params::params() {
        match spec.kind {
            ParamKind::HorizontalSlider => println!(
                "{:<18} slider  default {:<6} [{}, {}] step {}",
                spec.path, spec.default, spec.min, spec.max, spec.step
            ),
            ParamKind::Button => println!(
                "{:<18} button  default {:<6} [{}, {}]",
                spec.path, spec.default, spec.min, spec.max
            ),
        }
    }
}

/// Render `blocks` blocks with the gate held open, logging levels per block.
pub fn render(config: &SynthConfig, blocks: usize) -> Vec<Meter> {
    let mut synth = PhiSynth::from_config(SineTable::shared(), config);
    synth.set_gate(true);

    let frames = config.block_size;
    let mut left = vec![0.0f32; frames];
    let mut right = vec![0.0f32; frames];
    let mut meters = Vec::with_capacity(blocks);

    for block in 0..blocks {
        synth.process(frames, &mut left, &mut right);
        let meter = Meter::measure(&left);
        info!(
            block,
            peak = meter.peak,
            rms = meter.rms,
            envelope = synth.envelope_level(),
            "rendered block"
        );
        meters.push(meter);
    }

    info!(
        blocks,
        frames_per_block = frames,
        cursor = synth.cursor(),
        "render finished"
    );
    meters
}
