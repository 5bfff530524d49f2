/*
Gate Envelope
=============

Turns a gate signal (0 = note off, nonzero = note on) into a gain curve.
Unlike a staged ADSR there is no explicit state enum: two counters carry all
the history and a closed-form expression is evaluated every sample.

Vocabulary
----------

  held        Gate value accumulated while the gate stays up. Restarts at
              the gate value on a rising edge and freezes while the gate is
              low, so it measures "how long the note has been held".

  off_count   Consecutive samples since the gate went low. Snaps back to 0
              the moment the gate is nonzero again.

The Shape
---------

    attack  = held / A                         A = 0.1 s in samples
    decay   = max(D × (A - held) + 1, 0.7)     D = 0.3 / (0.2 s in samples)
    fade    = 1 - off_count / R                R = 0.5 s in samples
    gain    = max(min(attack, decay) × fade, 0)

  Gain
    1.0 ┤    ╱╲
        │   ╱  ╲____________
    0.7 ┤  ╱                ╲
        │ ╱                  ╲
    0.0 └╱────────────────────╲──→ Time
        100ms  200ms   held    500ms fade

`attack` wins while the note is young, `decay` takes over after 100 ms and
bottoms out at the 0.7 sustain floor 300 ms in. Releasing freezes `held`, so
the frozen min(attack, decay) level is faded linearly to silence.

Toggling the gate faster than these windows simply yields a smaller,
lopsided envelope. That falls out of the formula and is kept as-is.
*/

/// Sustain floor the decay segment settles on.
pub const SUSTAIN_FLOOR: f32 = 0.7;
/// Attack ramp length in seconds.
pub const ATTACK_SECS: f32 = 0.1;
/// Time for the decay segment to fall from 1.0 to the sustain floor.
pub const DECAY_SECS: f32 = 0.2;
/// Release fade length in seconds.
pub const RELEASE_SECS: f32 = 0.5;

/// Envelope time constants, in samples, for one sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeTimes {
    pub attack_samples: f32,
    pub decay_slope: f32,
    pub release_rate: f32,
}

impl EnvelopeTimes {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            attack_samples: (ATTACK_SECS * sample_rate).max(1.0),
            decay_slope: (1.0 - SUSTAIN_FLOOR) / (DECAY_SECS * sample_rate).max(1.0),
            release_rate: 1.0 / (RELEASE_SECS * sample_rate).max(1.0),
        }
    }
}

pub struct GateEnvelope {
    times: EnvelopeTimes,
    previous_gate: f32,
    held: f32,
    off_count: u32,
    gain: f32,
}

impl GateEnvelope {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            times: EnvelopeTimes::new(sample_rate),
            previous_gate: 0.0,
            held: 0.0,
            off_count: 0,
            gain: 0.0,
        }
    }

    pub fn configure(&mut self, times: EnvelopeTimes) {
        self.times = times;
    }

    /// Advance one sample with the current gate value and return the gain.
    #[inline]
    pub fn next_sample(&mut self, gate: f32) -> f32 {
        self.off_count = if gate == 0.0 {
            self.off_count.saturating_add(1)
        } else {
            0
        };

        // Rising edge drops the accumulated hold time
        let keep = if self.previous_gate >= gate { 1.0 } else { 0.0 };
        self.held = gate + self.held * keep;
        self.previous_gate = gate;

        let EnvelopeTimes {
            attack_samples,
            decay_slope,
            release_rate,
        } = self.times;
        let attack = self.held / attack_samples;
        let decay = (decay_slope * (attack_samples - self.held) + 1.0).max(SUSTAIN_FLOOR);
        let fade = 1.0 - release_rate * self.off_count as f32;

        self.gain = (attack.min(decay) * fade).max(0.0);
        self.gain
    }

    /// Render a block of gain values for a constant gate.
    pub fn render(&mut self, buffer: &mut [f32], gate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(gate);
        }
    }

    /// Gain produced by the most recent sample.
    pub fn level(&self) -> f32 {
        self.gain
    }

    /// True while the envelope can still produce a nonzero gain.
    pub fn is_active(&self) -> bool {
        self.held > 0.0 && self.fade_remaining() > 0.0
    }

    fn fade_remaining(&self) -> f32 {
        1.0 - self.times.release_rate * self.off_count as f32
    }

    pub fn reset(&mut self) {
        self.previous_gate = 0.0;
        self.held = 0.0;
        self.off_count = 0;
        self.gain = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn run(env: &mut GateEnvelope, gate: f32, samples: usize) -> f32 {
        for _ in 0..samples {
            env.next_sample(gate);
        }
        env.level()
    }

    #[test]
    fn attack_reaches_full_gain_after_attack_time() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        let level = run(&mut env, 1.0, (ATTACK_SECS * SAMPLE_RATE) as usize);
        assert!((level - 1.0).abs() < 1e-5, "got {level}");
    }

    #[test]
    fn attack_ramps_linearly() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        let level = run(&mut env, 1.0, 50);
        assert!((level - 0.5).abs() < 1e-5, "got {level}");
    }

    #[test]
    fn sustain_settles_on_floor() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        let level = run(&mut env, 1.0, 2_000);
        assert_eq!(level, SUSTAIN_FLOOR);
    }

    #[test]
    fn release_fades_to_silence() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        run(&mut env, 1.0, 1_000);

        let halfway = run(&mut env, 0.0, 250);
        assert!((halfway - 0.5 * SUSTAIN_FLOOR).abs() < 1e-3, "got {halfway}");

        let level = run(&mut env, 0.0, 260);
        assert_eq!(level, 0.0);
        assert!(!env.is_active());
    }

    #[test]
    fn closed_gate_never_opens() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        for _ in 0..5_000 {
            assert_eq!(env.next_sample(0.0), 0.0);
        }
    }

    #[test]
    fn rapid_toggling_gives_reduced_envelope() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        let mut peak = 0.0f32;
        for i in 0..2_000 {
            let gate = if (i / 10) % 2 == 0 { 1.0 } else { 0.0 };
            let gain = env.next_sample(gate);
            assert!((0.0..=1.0).contains(&gain));
            peak = peak.max(gain);
        }
        assert!(peak <= 0.1 + 1e-6, "short notes cannot exceed their attack: {peak}");
    }

    #[test]
    fn gain_bounded_across_sample_rates() {
        for &rate in &[1.0, 8_000.0, 44_100.0, 48_000.0, 192_000.0] {
            let mut env = GateEnvelope::new(rate);
            for i in 0..20_000u32 {
                let gate = if i % 7_919 < 4_000 { 1.0 } else { 0.0 };
                let gain = env.next_sample(gate);
                assert!((0.0..=1.0).contains(&gain), "rate {rate}: {gain}");
            }
        }
    }

    #[test]
    fn reset_clears_history() {
        let mut env = GateEnvelope::new(SAMPLE_RATE);
        run(&mut env, 1.0, 300);
        env.reset();
        assert_eq!(env.level(), 0.0);
        assert!((env.next_sample(1.0) - 1.0 / 100.0).abs() < 1e-7);
    }
}
