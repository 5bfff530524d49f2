use std::sync::Arc;

use crate::dsp::wavetable::SineTable;

/*
Golden-Ratio Oscillator Bank
============================

Four phase accumulators run at golden-ratio multiples of one base frequency
and each reads the shared sine table:

  tap   ratio       at 432 Hz
  ---   --------    ---------
  0     1.0         432.0 Hz   (fundamental)
  1     1.618034    699.0 Hz   (φ)
  2     2.618034    1131.0 Hz  (φ²)
  3     0.618034    267.0 Hz   (1/φ)

None of these are harmonics of each other, so the mix never settles into a
periodic waveform: it shimmers.

Phase Wrap
----------

    phase[n] = frac(phase[n-1] + frequency × ratio / sample_rate)

`frac(x) = x - floor(x)` keeps the phase in [0, 1) for any increment,
including negative ones, without accumulating drift over long runs.

The first sample after a (re)initialization starts every accumulator from 0
instead of carrying whatever the previous run left behind.

Mix
---

    out = 0.25 × (tap0 + 0.5·tap1 + 0.25·tap2 + 0.3·tap3)
*/

/// Ratios to the base frequency, in tap order.
pub const PHI_RATIOS: [f32; 4] = [1.0, 1.618_034, 2.618_034, 0.618_034];

/// Per-tap weights inside the mix.
pub const TAP_WEIGHTS: [f32; 4] = [1.0, 0.5, 0.25, 0.3];

/// Overall scale applied to the weighted tap sum.
pub const MIX_GAIN: f32 = 0.25;

/// Phase increment per Hz of base frequency for each tap.
pub fn tap_increments(sample_rate: f32) -> [f32; 4] {
    PHI_RATIOS.map(|ratio| ratio / sample_rate)
}

/// Single wrapping phase in [0, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseAccumulator {
    phase: f32,
}

impl PhaseAccumulator {
    /// Advance by `increment` cycles. With `restart` set the recurrence
    /// starts from zero instead of the stored phase.
    #[inline]
    pub fn advance(&mut self, increment: f32, restart: bool) -> f32 {
        let next = if restart { 0.0 } else { self.phase + increment };
        let mut wrapped = next - next.floor();
        // frac() of a tiny negative value rounds up to exactly 1.0
        if wrapped >= 1.0 {
            wrapped = 0.0;
        }
        self.phase = wrapped;
        wrapped
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Four golden-ratio taps over one shared sine table.
pub struct OscillatorBank {
    table: Arc<SineTable>,
    phases: [PhaseAccumulator; 4],
    // Increment per unit of frequency for each tap: ratio / sample_rate
    increments_per_hz: [f32; 4],
    started: bool,
}

impl OscillatorBank {
    pub fn new(table: Arc<SineTable>, sample_rate: f32) -> Self {
        Self {
            table,
            phases: [PhaseAccumulator::default(); 4],
            increments_per_hz: tap_increments(sample_rate),
            started: false,
        }
    }

    /// Swap in per-tap increments for a new sample rate.
    pub fn configure(&mut self, increments_per_hz: [f32; 4]) {
        self.increments_per_hz = increments_per_hz;
    }

    /// Advance all taps one sample and return the weighted, unscaled-by-gain mix.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32) -> f32 {
        let restart = !self.started;
        self.started = true;

        let mut sum = 0.0;
        for ((acc, per_hz), weight) in self
            .phases
            .iter_mut()
            .zip(self.increments_per_hz)
            .zip(TAP_WEIGHTS)
        {
            let phase = acc.advance(frequency * per_hz, restart);
            sum += weight * self.table.lookup(phase);
        }
        MIX_GAIN * sum
    }

    /// Current phases in tap order.
    pub fn phases(&self) -> [f32; 4] {
        self.phases.map(|acc| acc.phase())
    }

    pub fn table(&self) -> &Arc<SineTable> {
        &self.table
    }

    pub fn reset(&mut self) {
        for acc in &mut self.phases {
            acc.reset();
        }
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(sample_rate: f32) -> OscillatorBank {
        OscillatorBank::new(Arc::new(SineTable::build(crate::TABLE_SIZE)), sample_rate)
    }

    #[test]
    fn first_sample_starts_from_zero_phase() {
        let mut osc = bank(48_000.0);
        let out = osc.next_sample(432.0);
        assert_eq!(out, 0.0);
        assert_eq!(osc.phases(), [0.0; 4]);
    }

    #[test]
    fn taps_advance_at_golden_ratios() {
        let mut osc = bank(1_000.0);
        osc.next_sample(100.0);
        osc.next_sample(100.0);
        let phases = osc.phases();
        for (phase, ratio) in phases.iter().zip(PHI_RATIOS) {
            let expected = (100.0 * ratio / 1_000.0) % 1.0;
            assert!((phase - expected).abs() < 1e-6, "{phase} vs {expected}");
        }
    }

    #[test]
    fn phases_stay_in_unit_interval() {
        let mut osc = bank(48_000.0);
        let frequencies = [432.0, 1_000.0, 100.0, 23_999.0, -250.0, 1.0e7, 0.0];
        for &freq in frequencies.iter().cycle().take(70_000) {
            osc.next_sample(freq);
            for phase in osc.phases() {
                assert!((0.0..1.0).contains(&phase), "phase escaped: {phase}");
            }
        }
    }

    #[test]
    fn tiny_negative_phase_wraps_below_one() {
        let mut acc = PhaseAccumulator::default();
        acc.advance(0.0, true);
        let phase = acc.advance(-1.0e-9, false);
        assert!((0.0..1.0).contains(&phase));
    }

    #[test]
    fn mix_is_bounded_by_weight_sum() {
        let mut osc = bank(48_000.0);
        let bound = MIX_GAIN * TAP_WEIGHTS.iter().sum::<f32>();
        for _ in 0..48_000 {
            assert!(osc.next_sample(432.0).abs() <= bound + 1e-6);
        }
    }

    #[test]
    fn reset_restarts_the_recurrence() {
        let mut osc = bank(48_000.0);
        for _ in 0..100 {
            osc.next_sample(432.0);
        }
        osc.reset();
        assert_eq!(osc.next_sample(432.0), 0.0);
    }
}
