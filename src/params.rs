//! Parameter metadata and path-addressed access.
//!
//! The synth exposes two controls under one group:
//!
//! ```text
//! /phi_synth/freq   horizontal slider   432 Hz   [100, 1000]  step 1
//! /phi_synth/gate   button              0        [0, 1]
//! ```
//!
//! Hosts and UIs can enumerate [`params`] to build widgets, then read and
//! write through [`PhiSynth::get_param`](crate::PhiSynth::get_param) and
//! [`PhiSynth::set_param`](crate::PhiSynth::set_param) with either the full
//! path or the short label.

#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

/// Group every parameter path lives under.
pub const GROUP: &str = "phi_synth";

pub const DEFAULT_FREQUENCY: f32 = 432.0;
pub const MIN_FREQUENCY: f32 = 100.0;
pub const MAX_FREQUENCY: f32 = 1000.0;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("no parameter at path `{0}`")]
    UnknownPath(String),
    #[error("value {value} for `{path}` is not finite")]
    NotFinite { path: &'static str, value: f32 },
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    Frequency,
    Gate,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    HorizontalSlider,
    Button,
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    pub label: &'static str,
    pub path: &'static str,
    pub kind: ParamKind,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamSpec {
    /// Clamp `value` into range; buttons collapse to 0 or 1.
    pub fn normalize(&self, value: f32) -> Result<f32, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite {
                path: self.path,
                value,
            });
        }
        Ok(match self.kind {
            ParamKind::HorizontalSlider => value.clamp(self.min, self.max),
            ParamKind::Button => {
                if value != 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
        })
    }
}

static PARAMS: [ParamSpec; 2] = [
    ParamSpec {
        id: ParamId::Frequency,
        label: "freq",
        path: "/phi_synth/freq",
        kind: ParamKind::HorizontalSlider,
        default: DEFAULT_FREQUENCY,
        min: MIN_FREQUENCY,
        max: MAX_FREQUENCY,
        step: 1.0,
    },
    ParamSpec {
        id: ParamId::Gate,
        label: "gate",
        path: "/phi_synth/gate",
        kind: ParamKind::Button,
        default: 0.0,
        min: 0.0,
        max: 1.0,
        step: 1.0,
    },
];

/// All parameters, in declaration order.
pub fn params() -> &'static [ParamSpec] {
    &PARAMS
}

/// Resolve a full path (`/phi_synth/freq`) or bare label (`freq`).
pub fn find(path: &str) -> Result<&'static ParamSpec, ParamError> {
    PARAMS
        .iter()
        .find(|spec| spec.path == path || spec.label == path)
        .ok_or_else(|| ParamError::UnknownPath(path.to_string()))
}

pub fn spec(id: ParamId) -> &'static ParamSpec {
    match id {
        ParamId::Frequency => &PARAMS[0],
        ParamId::Gate => &PARAMS[1],
    }
}

/// Key/value declarations describing the DSP.
pub fn metadata() -> &'static [(&'static str, &'static str)] {
    &[
        ("name", GROUP),
        ("filename", "phi_synth.dsp"),
        ("version", env!("CARGO_PKG_VERSION")),
        ("license", "MIT"),
        ("oscillators", "4 sine taps at 1, φ, φ², 1/φ"),
        ("reverb", "8 lossy combs into 4 allpass stages"),
    ]
}
