//! Spectrum analyzer widget
//!
//! Hann-windowed FFT of the scope buffer, folded into log-spaced bands. The
//! chart's x axis is `log10(Hz)`.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::{f32::consts::TAU, sync::Arc};

const BANDS: usize = 48;
const FLOOR_DB: f64 = -100.0;
const LOW_HZ: f64 = 20.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT bins `[start, end)` folded into each band
    bands: Vec<(usize, usize)>,
    /// (log10 of band centre, peak level in dB)
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
}

impl SpectrumAnalyzer {
    pub fn new(size: usize, sample_rate: u32) -> Self {
        let size = size.max(2);
        let fft = FftPlanner::new().plan_fft_forward(size);
        let window = (0..size)
            .map(|i| 0.5 - 0.5 * (TAU * i as f32 / (size - 1) as f32).cos())
            .collect();

        let rate = sample_rate.max(1) as f64;
        let high_hz = (rate / 2.0).max(LOW_HZ * 2.0);
        let hz_per_bin = rate / size as f64;
        let half = size / 2;
        let ratio = high_hz / LOW_HZ;

        let mut bands = Vec::with_capacity(BANDS);
        let mut points = Vec::with_capacity(BANDS);
        for band in 0..BANDS {
            let lo = LOW_HZ * ratio.powf(band as f64 / BANDS as f64);
            let hi = LOW_HZ * ratio.powf((band + 1) as f64 / BANDS as f64);
            let start = ((lo / hz_per_bin) as usize).min(half - 1);
            let end = ((hi / hz_per_bin).ceil() as usize).clamp(start + 1, half);
            bands.push((start, end));
            points.push(((lo * hi).sqrt().log10(), FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); size],
            bands,
            points,
            x_bounds: [LOW_HZ.log10(), high_hz.log10()],
        }
    }

    /// Ignores buffers that don't match the FFT size.
    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (&(start, end), point) in self.bands.iter().zip(self.points.iter_mut()) {
            let power = self.scratch[start..end]
                .iter()
                .map(|bin| bin.norm_sqr())
                .fold(0.0f32, f32::max)
                .max(1e-12);
            point.1 = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let points = analyzer.points();
    let top_db = points.iter().map(|&(_, db)| db).fold(FLOOR_DB, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(analyzer.x_bounds)
                .labels(vec![
                    format!("{LOW_HZ:.0}"),
                    format!("{:.1}k", 10f64.powf(analyzer.x_bounds[1]) / 1000.0),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, top_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
