//! The single-voice phi synth engine.
//!
//! Signal flow for one sample:
//!
//! ```text
//! frequency ──→ [Oscillator bank] ──┐
//!                                   (×) ──→ [Lowpass] ──→ [Comb bank ∥] ──→ [Allpass chain →] ──→ L = R
//! gate ───────→ [Gate envelope] ────┘
//! ```
//!
//! Lifecycle: `Uninitialized → Initialized(rate) → Running`. Only
//! [`PhiSynth::initialize`] recomputes derived constants; [`PhiSynth::reset`]
//! zeroes history and drops back to `Initialized`. All buffers are allocated
//! once in [`PhiSynth::new`] and reused for the life of the engine.

pub mod clock;
pub mod context;

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    control::{ControlMessage, MessageReceiver},
    dsp::{
        filter::Biquad, oscillator::OscillatorBank, reverb::PhiReverb, GateEnvelope, SineTable,
    },
    params::{self, ParamError, ParamId, DEFAULT_FREQUENCY},
};

pub use clock::SampleClock;
pub use context::SampleRateContext;

/// Sample rate used to size components before the first `initialize`.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Startup settings for an engine and its driver.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: u32,
    pub block_size: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: 512,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    /// Constants derived, history zeroed, nothing rendered yet
    Initialized { sample_rate: u32 },
    Running { sample_rate: u32 },
}

pub struct PhiSynth {
    state: EngineState,
    context: SampleRateContext,

    // Control inputs, read once per sample
    frequency: f32,
    gate: f32,

    clock: SampleClock,
    oscillators: OscillatorBank,
    envelope: GateEnvelope,
    lowpass: Biquad,
    reverb: PhiReverb,
}

impl PhiSynth {
    /// Allocate an engine around a shared sine table. Renders silence until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(table: Arc<SineTable>) -> Self {
        let context = SampleRateContext::new(DEFAULT_SAMPLE_RATE);
        let sample_rate = context.sample_rate();
        Self {
            state: EngineState::Uninitialized,
            context,
            frequency: DEFAULT_FREQUENCY,
            gate: 0.0,
            clock: SampleClock::new(),
            oscillators: OscillatorBank::new(table, sample_rate),
            envelope: GateEnvelope::new(sample_rate),
            lowpass: Biquad::lowpass(sample_rate),
            reverb: PhiReverb::new(sample_rate),
        }
    }

    /// Build and initialize in one go.
    pub fn from_config(table: Arc<SineTable>, config: &SynthConfig) -> Self {
        let mut synth = Self::new(table);
        synth.initialize(config.sample_rate);
        synth
    }

    /// Derive every constant for `sample_rate`, restore control defaults and
    /// zero all history.
    ///
    /// Rates outside `[1, 192000]` are clamped rather than rejected.
    pub fn initialize(&mut self, sample_rate: u32) {
        let context = SampleRateContext::new(sample_rate);
        if context.was_clamped() {
            warn!(
                requested = context.requested_rate(),
                used = context.sample_rate(),
                "sample rate out of range, clamped"
            );
        }

        self.oscillators.configure(context.tap_increments());
        self.envelope.configure(context.envelope());
        self.lowpass.configure(context.lowpass());
        self.reverb
            .configure(context.comb_delays(), context.allpass_delays());
        self.context = context;

        self.frequency = params::spec(ParamId::Frequency).default;
        self.gate = params::spec(ParamId::Gate).default;
        self.clear_history();

        let rate = context.sample_rate() as u32;
        self.state = EngineState::Initialized { sample_rate: rate };
        info!(
            sample_rate = rate,
            comb_delays = ?context.comb_delays(),
            allpass_delays = ?context.allpass_delays(),
            "phi synth initialized"
        );
    }

    /// Zero all history without touching derived constants. Releases the
    /// gate; frequency is kept.
    pub fn reset(&mut self) {
        self.clear_history();
        self.gate = 0.0;
        if let EngineState::Running { sample_rate } = self.state {
            self.state = EngineState::Initialized { sample_rate };
        }
        debug!("phi synth reset");
    }

    fn clear_history(&mut self) {
        self.clock.reset();
        self.oscillators.reset();
        self.envelope.reset();
        self.lowpass.reset();
        self.reverb.reset();
    }

    /// Takes effect from the next processed sample.
    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz;
    }

    pub fn set_gate(&mut self, on: bool) {
        self.gate = if on { 1.0 } else { 0.0 };
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::SetFrequency(hz) => self.set_frequency(hz),
            ControlMessage::SetGate(on) => self.set_gate(on),
            ControlMessage::Reset => self.reset(),
        }
    }

    /// Write a parameter by path or label. Sliders are clamped to range.
    pub fn set_param(&mut self, path: &str, value: f32) -> Result<(), ParamError> {
        let spec = params::find(path)?;
        let value = spec.normalize(value)?;
        match spec.id {
            ParamId::Frequency => self.frequency = value,
            ParamId::Gate => self.gate = value,
        }
        Ok(())
    }

    pub fn get_param(&self, path: &str) -> Result<f32, ParamError> {
        Ok(match params::find(path)?.id {
            ParamId::Frequency => self.frequency,
            ParamId::Gate => self.gate,
        })
    }

    /// Advance the engine one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let tone = self.oscillators.next_sample(self.frequency);
        let gain = self.envelope.next_sample(self.gate);
        let smoothed = self.lowpass.next_sample(tone * gain);
        let output = self.reverb.process(smoothed, self.clock.cursor());
        self.clock.advance();
        output
    }

    /// Render `frame_count` frames into both channels (identical signals).
    ///
    /// Frames beyond either buffer's length are skipped. Before
    /// [`initialize`](Self::initialize) this writes silence.
    pub fn process(&mut self, frame_count: usize, left: &mut [f32], right: &mut [f32]) {
        let frames = frame_count.min(left.len()).min(right.len());
        if frames == 0 {
            return;
        }

        let sample_rate = match self.state {
            EngineState::Uninitialized => {
                left[..frames].fill(0.0);
                right[..frames].fill(0.0);
                return;
            }
            EngineState::Initialized { sample_rate } | EngineState::Running { sample_rate } => {
                sample_rate
            }
        };
        self.state = EngineState::Running { sample_rate };

        for (l, r) in left[..frames].iter_mut().zip(&mut right[..frames]) {
            let sample = self.next_sample();
            *l = sample;
            *r = sample;
        }
    }

    /// Drain pending control messages, then render a full block.
    pub fn process_with<R: MessageReceiver>(
        &mut self,
        rx: &mut R,
        left: &mut [f32],
        right: &mut [f32],
    ) {
        while let Some(message) = rx.pop() {
            self.apply(message);
        }
        let frames = left.len().min(right.len());
        self.process(frames, left, right);
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn context(&self) -> &SampleRateContext {
        &self.context
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn gate(&self) -> bool {
        self.gate != 0.0
    }

    /// Oscillator phases in tap order (1, φ, φ², 1/φ).
    pub fn phases(&self) -> [f32; 4] {
        self.oscillators.phases()
    }

    /// Envelope gain applied to the most recent sample.
    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    pub fn cursor(&self) -> usize {
        self.clock.cursor()
    }

    pub fn table(&self) -> &Arc<SineTable> {
        self.oscillators.table()
    }
}
