//! Transport bar widget - frequency, gate, envelope and output levels

use phi_synth::EngineState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::EngineStatus;
use crate::meter::Meter;

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    status: &EngineStatus,
    sample_rate: u32,
    meter: &Meter,
) {
    let block = Block::default().title(" phi synth ").borders(Borders::ALL);

    let (gate_symbol, gate_label, gate_color) = if status.gate {
        ("●", "Gate open", Color::Green)
    } else {
        ("○", "Gate closed", Color::Yellow)
    };
    let state = match status.state {
        EngineState::Uninitialized => "idle",
        EngineState::Initialized { .. } => "ready",
        EngineState::Running { .. } => "running",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {:.0} Hz  ", status.frequency),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{gate_symbol} {gate_label}  "),
            Style::default().fg(gate_color),
        ),
        Span::styled(
            format!("Env: {:.2}  ", status.envelope_level),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{state}  {:.1}kHz  ", sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", meter.peak, meter.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
