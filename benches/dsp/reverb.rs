//! Benchmarks for the comb/allpass network.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use phi_synth::dsp::reverb::PhiReverb;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0)
                } else {
                    (i as f32 * 0.05).sin() * 0.1
                }
            })
            .collect();

        for rate in [SAMPLE_RATE, 192_000] {
            let mut reverb = PhiReverb::new(rate as f32);
            let mut cursor = 0usize;
            group.bench_with_input(
                BenchmarkId::new(format!("network_{}k", rate / 1000), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut sum = 0.0f32;
                        for &sample in &input {
                            sum += reverb.process(black_box(sample), cursor);
                            cursor = cursor.wrapping_add(1);
                        }
                        sum
                    })
                },
            );
        }
    }

    group.finish();
}
