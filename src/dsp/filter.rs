use std::f32::consts::{SQRT_2, TAU};

/*
Smoothing Lowpass
=================

Second-order (biquad) lowpass, Butterworth-shaped (Q = 1/√2), designed with
the bilinear transform. It takes the edge off the additive mix before it
reaches the reverb.

Coefficients
------------

With the tangent pre-warp `k = tan(ω / sr)` for `ω = 2π·1000`:

    a1   = 2 (1 - 1/k²)
    a2   = (1/k - √2) / k + 1
    norm = 1 / ((1/k + √2) / k + 1)

Recurrence (direct form II, three-sample state history):

    w[n] = x[n] - norm (a2·w[n-2] + a1·w[n-1])
    y[n] = norm (w[n-2] + w[n] + 2·w[n-1])

The audible result depends on these exact expressions, including the
pre-warp argument; they are derived once per sample rate.
*/

/// Angular design frequency fed to the tangent pre-warp.
pub const DESIGN_OMEGA: f32 = TAU * 1000.0;

/// Lowpass coefficients for one sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowpassCoefficients {
    pub a1: f32,
    pub a2: f32,
    pub norm: f32,
}

impl LowpassCoefficients {
    pub fn new(sample_rate: f32) -> Self {
        let k = (DESIGN_OMEGA / sample_rate).tan();
        let inv_k = 1.0 / k;
        Self {
            a1: 2.0 * (1.0 - 1.0 / (k * k)),
            a2: (inv_k - SQRT_2) / k + 1.0,
            norm: 1.0 / ((inv_k + SQRT_2) / k + 1.0),
        }
    }
}

pub struct Biquad {
    coeffs: LowpassCoefficients,
    // w[n], w[n-1], w[n-2]
    history: [f32; 3],
}

impl Biquad {
    pub fn lowpass(sample_rate: f32) -> Self {
        Self {
            coeffs: LowpassCoefficients::new(sample_rate),
            history: [0.0; 3],
        }
    }

    pub fn configure(&mut self, coeffs: LowpassCoefficients) {
        self.coeffs = coeffs;
    }

    /// Filter one sample. History shifts before returning.
    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let LowpassCoefficients { a1, a2, norm } = self.coeffs;
        let [_, w1, w2] = self.history;
        let w0 = input - norm * (a2 * w2 + a1 * w1);
        let output = norm * (w2 + w0 + 2.0 * w1);
        self.history = [w0, w0, w1];
        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn coefficients(&self) -> LowpassCoefficients {
        self.coeffs
    }

    pub fn reset(&mut self) {
        self.history = [0.0; 3];
    }
}
