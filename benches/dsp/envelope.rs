//! Benchmarks for the gate envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phi_synth::dsp::GateEnvelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut env = GateEnvelope::new(SAMPLE_RATE as f32);
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(1.0)))
        });

        let mut env = GateEnvelope::new(SAMPLE_RATE as f32);
        env.render(&mut buffer, 1.0);
        group.bench_with_input(BenchmarkId::new("released", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), black_box(0.0)))
        });
    }

    group.finish();
}
