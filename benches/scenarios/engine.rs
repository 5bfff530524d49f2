//! Benchmarks for complete engine blocks.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phi_synth::{control::ControlMessage, dsp::SineTable, PhiSynth, SynthConfig};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let table = SineTable::shared();
    let config = SynthConfig {
        sample_rate: SAMPLE_RATE,
        ..SynthConfig::default()
    };

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        // Note held for the whole run
        let mut synth = PhiSynth::from_config(table.clone(), &config);
        synth.set_gate(true);
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                synth.process(size, black_box(&mut left), black_box(&mut right));
            })
        });

        // Gate closed; the reverb tail still runs
        let mut synth = PhiSynth::from_config(table.clone(), &config);
        synth.set_gate(true);
        synth.process(size, &mut left, &mut right);
        synth.set_gate(false);
        group.bench_with_input(BenchmarkId::new("released", size), &size, |b, _| {
            b.iter(|| {
                synth.process(size, black_box(&mut left), black_box(&mut right));
            })
        });

        // Control drained every block, as the live driver does
        let mut synth = PhiSynth::from_config(table.clone(), &config);
        let mut rx = VecDeque::with_capacity(2);
        let mut hz = 432.0f32;
        group.bench_with_input(BenchmarkId::new("with_messages", size), &size, |b, _| {
            b.iter(|| {
                hz = if hz >= 1000.0 { 100.0 } else { hz + 1.0 };
                rx.push_back(ControlMessage::SetFrequency(hz));
                rx.push_back(ControlMessage::SetGate(true));
                synth.process_with(&mut rx, black_box(&mut left), black_box(&mut right));
            })
        });
    }

    group.finish();
}
