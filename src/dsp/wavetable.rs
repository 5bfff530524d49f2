use std::f32::consts::TAU;
use std::sync::Arc;

use crate::TABLE_SIZE;

/*
Sine Wavetable
==============

One full sine cycle sampled into a fixed-size lookup table. The table is
built once, before any engine runs, and then shared read-only by every
oscillator tap through an `Arc`. Nothing global: whoever builds the engine
builds (or reuses) the table and hands it in.

Generation
----------

The table is filled by a tiny one-sample-per-call generator rather than by
indexing `sin` directly. The generator keeps an integer phase index `k` and a
step that is 0 on the very first call and 1 afterwards:

    k[n] = (k[n-1] + step[n-1]) mod size
    table[n] = sin(2π · k[n] / size)

so `table[i] = sin(2π·i/size)` and the index never drifts: wrapping happens in
integers, not floats.

      1.0 ┤      ╭──╮
          │    ╭─╯  ╰─╮
      0.0 ┼───╯────────╰──────╮───────────┤ size
          │                   ╰─╮      ╭─╯
     -1.0 ┤                     ╰──────╯
*/

/// Integer-phase recurrence that yields one table entry per call.
struct SineGenerator {
    size: u32,
    step: u32,
    index: u32,
    radians_per_index: f32,
}

impl SineGenerator {
    fn new(size: usize) -> Self {
        let size = size.max(1) as u32;
        Self {
            size,
            step: 0,
            index: 0,
            radians_per_index: TAU / size as f32,
        }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        self.index = (self.index + self.step) % self.size;
        self.step = 1;
        (self.radians_per_index * self.index as f32).sin()
    }
}

/// Immutable one-cycle sine table.
#[derive(Debug)]
pub struct SineTable {
    samples: Box<[f32]>,
}

impl SineTable {
    /// Fill a table of `size` entries (at least one) with one sine cycle.
    pub fn build(size: usize) -> Self {
        let mut generator = SineGenerator::new(size);
        let samples = (0..size.max(1)).map(|_| generator.next_sample()).collect();
        Self { samples }
    }

    /// Build the standard-size table, ready to share between engines.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::build(TABLE_SIZE))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Entry at `index`, wrapped into the table.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.samples[index % self.samples.len()]
    }

    /// Look up a phase in `[0, 1)`.
    ///
    /// The index is `round(phase × size)` clamped to `[0, size - 1]`. A NaN
    /// phase casts to index 0.
    #[inline]
    pub fn lookup(&self, phase: f32) -> f32 {
        let last = self.samples.len() - 1;
        let index = (phase * self.samples.len() as f32).round() as isize;
        self.samples[index.clamp(0, last as isize) as usize]
    }
}
