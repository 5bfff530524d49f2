//! Benchmarks for the four-tap oscillator bank.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phi_synth::dsp::{oscillator::OscillatorBank, SineTable};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let table = SineTable::shared();

    for &size in BLOCK_SIZES {
        let mut bank = OscillatorBank::new(table.clone(), SAMPLE_RATE as f32);
        group.bench_with_input(BenchmarkId::new("phi_taps", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += bank.next_sample(black_box(432.0));
                }
                sum
            })
        });

        // Top of the frequency range, where the φ² tap moves fastest
        let mut bank = OscillatorBank::new(table.clone(), SAMPLE_RATE as f32);
        group.bench_with_input(BenchmarkId::new("phi_taps_1khz", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += bank.next_sample(black_box(1000.0));
                }
                sum
            })
        });
    }

    group.finish();
}
