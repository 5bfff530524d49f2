//! Live mode: a cpal output stream drives the engine while the TUI runs on
//! the main thread.

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use phi_synth::{control::ControlMessage, dsp::SineTable, PhiSynth, SynthConfig, MAX_BLOCK_SIZE};
use rtrb::RingBuffer;

use crate::ui::{EngineStatus, UiApp};

const CONTROL_QUEUE: usize = 64;
/// About a third of a second at 48 kHz
const SCOPE_QUEUE: usize = 16_384;
const STATUS_QUEUE: usize = 16;

pub fn run() -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let supported = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = supported.sample_rate().0;
    let channels = supported.channels() as usize;
    if channels == 0 {
        bail!("default output device reports zero channels");
    }

    let config = SynthConfig {
        sample_rate,
        ..SynthConfig::default()
    };
    let mut synth = PhiSynth::from_config(SineTable::shared(), &config);
    let initial = EngineStatus::capture(&synth);

    let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE);
    let (mut status_tx, status_rx) = RingBuffer::<EngineStatus>::new(STATUS_QUEUE);

    let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut right = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for out in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let frames = out.len() / channels;
                    let (left, right) = (&mut left[..frames], &mut right[..frames]);
                    synth.process_with(&mut control_rx, left, right);

                    // Even channels carry left, odd carry right
                    for (frame, (&l, &r)) in out
                        .chunks_exact_mut(channels)
                        .zip(left.iter().zip(right.iter()))
                    {
                        for (ch, slot) in frame.iter_mut().enumerate() {
                            *slot = if ch % 2 == 0 { l } else { r };
                        }
                    }

                    // Scope is best-effort; drop samples when the UI lags
                    for &sample in left.iter() {
                        if scope_tx.push(sample).is_err() {
                            break;
                        }
                    }
                }
                let _ = status_tx.push(EngineStatus::capture(&synth));
            },
            |err| eprintln!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let mut terminal = ratatui::init();
    let mut ui = UiApp::new(control_tx, scope_rx, status_rx, initial, sample_rate);
    let result = ui.run(&mut terminal);
    ratatui::restore();

    drop(stream);
    result
}
