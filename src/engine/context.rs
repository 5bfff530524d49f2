use crate::{
    dsp::{
        envelope::EnvelopeTimes,
        filter::LowpassCoefficients,
        oscillator::tap_increments,
        reverb::{allpass_delays_for, comb_delays_for},
    },
    MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
};

/// Every constant the engine derives from the sample rate.
///
/// Computed once per [`PhiSynth::initialize`](crate::PhiSynth::initialize)
/// and never touched by the per-sample loop. The requested rate is clamped to
/// `[MIN_SAMPLE_RATE, MAX_SAMPLE_RATE]` first, so a zero or absurd rate still
/// yields usable (if degenerate) constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRateContext {
    requested: u32,
    sample_rate: f32,
    lowpass: LowpassCoefficients,
    envelope: EnvelopeTimes,
    tap_increments: [f32; 4],
    comb_delays: [usize; 8],
    allpass_delays: [usize; 4],
}

impl SampleRateContext {
    pub fn new(requested: u32) -> Self {
        let sample_rate = (requested as f32).clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE);
        Self {
            requested,
            sample_rate,
            lowpass: LowpassCoefficients::new(sample_rate),
            envelope: EnvelopeTimes::new(sample_rate),
            tap_increments: tap_increments(sample_rate),
            comb_delays: comb_delays_for(sample_rate),
            allpass_delays: allpass_delays_for(sample_rate),
        }
    }

    /// Rate passed by the caller, before clamping.
    pub fn requested_rate(&self) -> u32 {
        self.requested
    }

    /// Rate the constants were derived from.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn was_clamped(&self) -> bool {
        self.requested as f32 != self.sample_rate
    }

    pub fn lowpass(&self) -> LowpassCoefficients {
        self.lowpass
    }

    pub fn envelope(&self) -> EnvelopeTimes {
        self.envelope
    }

    pub fn tap_increments(&self) -> [f32; 4] {
        self.tap_increments
    }

    pub fn comb_delays(&self) -> [usize; 8] {
        self.comb_delays
    }

    pub fn allpass_delays(&self) -> [usize; 4] {
        self.allpass_delays
    }
}
