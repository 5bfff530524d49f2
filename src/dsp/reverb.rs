//! Reverb - Comb Bank and Allpass Diffusion
//!
//! The tone is spread into a reverberant tail by a fixed Schroeder/Freeverb
//! style network: eight lossy comb filters in parallel, summed, then four
//! allpass stages in series.
//!
//! # Architecture
//!
//! ```text
//! Input ──┬──→ [Comb 1] ──┐
//!         ├──→ [Comb 2] ──┤
//!         │      ...      ├──→ (+) ──→ [AP 1] ──→ [AP 2] ──→ [AP 3] ──→ [AP 4] ──→ Output
//!         └──→ [Comb 8] ──┘
//! ```
//!
//! ## Comb Filters
//!
//! Each comb feeds back a one-pole smoothed copy of its own output:
//!
//! ```text
//! damped[n] = 0.5 * (damped[n-1] + y[n-1])
//! line[n]   = x[n] + 0.7 * damped[n]
//! y[n]      = line[n - delay]
//! ```
//!
//! The smoothing in the loop makes the comb lossy at high frequencies, so the
//! echo train darkens as it decays instead of ringing. Delay times are the
//! Freeverb tunings (1116..1617 samples at 44.1 kHz), scaled to the running
//! sample rate.
//!
//! ## Allpass Filters
//!
//! ```text
//! v[n]   = x[n] + 0.5 * d[n-1]
//! d[n]   = v[n - delay]
//! out[n] = d[n-1] - 0.5 * v[n]
//! ```
//!
//! Flat magnitude response, scrambled phase: the chain smears the comb echoes
//! into a smooth tail without adding resonances. Stage order matters, so the
//! chain is strictly serial.
//!
//! # Cursor
//!
//! None of the lines own a write position. Every `process` call takes the
//! engine's shared sample cursor, which advances once per sample after every
//! line has been read and written.

use crate::dsp::delay::DelayLine;

/// Physical size of each comb line.
pub const COMB_CAPACITY: usize = 8192;
/// Comb delay times in seconds.
pub const COMB_DELAYS_SECS: [f32; 8] = [
    0.025_306_122,
    0.026_938_776,
    0.028_956_916,
    0.030_748_298,
    0.032_244_9,
    0.033_809_524,
    0.035_306_122,
    0.036_666_665,
];
/// Feedback applied to the smoothed comb output.
pub const COMB_FEEDBACK: f32 = 0.7;

/// Physical size of each allpass line, in chain order.
pub const ALLPASS_CAPACITIES: [usize; 4] = [2048, 2048, 2048, 1024];
/// Allpass delay times in seconds, in chain order.
pub const ALLPASS_DELAYS_SECS: [f32; 4] = [0.012_607_709_5, 0.01, 0.007_732_426_3, 0.005_102_040_7];
/// Longest allpass delay in samples, whatever the sample rate.
pub const MAX_ALLPASS_DELAY: usize = 1024;
pub const ALLPASS_FEEDBACK: f32 = 0.5;

/// Delay in whole samples for `secs` at `sample_rate`, truncated, never negative.
#[inline]
pub fn delay_samples(secs: f32, sample_rate: f32) -> usize {
    (secs * sample_rate).max(0.0) as usize
}

/// Comb delays in samples for `sample_rate`.
pub fn comb_delays_for(sample_rate: f32) -> [usize; 8] {
    COMB_DELAYS_SECS.map(|secs| delay_samples(secs, sample_rate))
}

/// Allpass delays in samples for `sample_rate`, clamped to [`MAX_ALLPASS_DELAY`].
pub fn allpass_delays_for(sample_rate: f32) -> [usize; 4] {
    ALLPASS_DELAYS_SECS.map(|secs| delay_samples(secs, sample_rate).min(MAX_ALLPASS_DELAY))
}

/// Lossy feedback comb.
pub struct CombFilter {
    line: DelayLine,
    delay: usize,
    damped: f32,
    // Tap read on the previous sample; what the comb emits this sample
    delayed: f32,
}

impl CombFilter {
    pub fn new(delay: usize) -> Self {
        let line = DelayLine::new(COMB_CAPACITY);
        Self {
            delay: delay.min(line.capacity()),
            line,
            damped: 0.0,
            delayed: 0.0,
        }
    }

    pub fn set_delay(&mut self, delay: usize) {
        self.delay = delay.min(self.line.capacity());
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Push one sample; returns the comb output from the previous step.
    #[inline]
    pub fn process(&mut self, input: f32, cursor: usize) -> f32 {
        let emitted = self.delayed;
        self.damped = 0.5 * (self.damped + emitted);
        self.line.write(cursor, input + COMB_FEEDBACK * self.damped);
        self.delayed = self.line.read(cursor, self.delay);
        emitted
    }

    pub fn reset(&mut self) {
        self.line.reset();
        self.damped = 0.0;
        self.delayed = 0.0;
    }
}

/// Schroeder allpass stage.
pub struct AllpassFilter {
    line: DelayLine,
    delay: usize,
    delayed: f32,
}

impl AllpassFilter {
    pub fn new(capacity: usize, delay: usize) -> Self {
        let line = DelayLine::new(capacity);
        Self {
            delay: delay.min(MAX_ALLPASS_DELAY).min(line.capacity()),
            line,
            delayed: 0.0,
        }
    }

    pub fn set_delay(&mut self, delay: usize) {
        self.delay = delay.min(MAX_ALLPASS_DELAY).min(self.line.capacity());
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    pub fn capacity(&self) -> usize {
        self.line.capacity()
    }

    #[inline]
    pub fn process(&mut self, input: f32, cursor: usize) -> f32 {
        let previous = self.delayed;
        let fed = input + ALLPASS_FEEDBACK * previous;
        self.line.write(cursor, fed);
        self.delayed = self.line.read(cursor, self.delay);
        previous - ALLPASS_FEEDBACK * fed
    }

    pub fn reset(&mut self) {
        self.line.reset();
        self.delayed = 0.0;
    }
}

/// Eight combs in parallel feeding four allpasses in series.
pub struct PhiReverb {
    combs: [CombFilter; 8],
    allpasses: [AllpassFilter; 4],
}

impl PhiReverb {
    /// Allocate every line and size the delays for `sample_rate`.
    pub fn new(sample_rate: f32) -> Self {
        let combs = comb_delays_for(sample_rate).map(CombFilter::new);

        let allpass_delays = allpass_delays_for(sample_rate);
        let allpasses = std::array::from_fn(|stage| {
            AllpassFilter::new(ALLPASS_CAPACITIES[stage], allpass_delays[stage])
        });

        Self { combs, allpasses }
    }

    /// Resize delays (RT-safe, no allocation).
    ///
    /// Call this when the sample rate changes.
    pub fn configure(&mut self, comb_delays: [usize; 8], allpass_delays: [usize; 4]) {
        for (comb, delay) in self.combs.iter_mut().zip(comb_delays) {
            comb.set_delay(delay);
        }
        for (allpass, delay) in self.allpasses.iter_mut().zip(allpass_delays) {
            allpass.set_delay(delay);
        }
    }

    /// Process a single sample at `cursor`.
    #[inline]
    pub fn process(&mut self, input: f32, cursor: usize) -> f32 {
        // Sum outputs of all comb filters (parallel)
        let mut output = 0.0;
        for comb in &mut self.combs {
            output += comb.process(input, cursor);
        }

        // Pass through allpass filters (series)
        for allpass in &mut self.allpasses {
            output = allpass.process(output, cursor);
        }

        output
    }

    pub fn comb_delays(&self) -> [usize; 8] {
        let mut delays = [0; 8];
        for (slot, comb) in delays.iter_mut().zip(&self.combs) {
            *slot = comb.delay();
        }
        delays
    }

    pub fn allpass_delays(&self) -> [usize; 4] {
        let mut delays = [0; 4];
        for (slot, allpass) in delays.iter_mut().zip(&self.allpasses) {
            *slot = allpass.delay();
        }
        delays
    }

    /// Reset all filter states
    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
        for allpass in &mut self.allpasses {
            allpass.reset();
        }
    }
}
