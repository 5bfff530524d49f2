//! Terminal UI for live playback
//!
//! Sends control changes to the audio thread and shows what comes back:
//! engine status, a scope and a spectrum of the output.

mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use phi_synth::{
    control::ControlMessage,
    params::{self, ParamId},
    EngineState, PhiSynth,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use crate::meter::Meter;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::render_transport;
use waveform::render_waveform;

/// Scope length, also the FFT size
const VIS_BUFFER_SIZE: usize = 1024;

const COARSE_STEP_HZ: f32 = 10.0;
const FINE_STEP_HZ: f32 = 1.0;

/// Snapshot pushed by the audio thread once per callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineStatus {
    pub state: EngineState,
    pub frequency: f32,
    pub gate: bool,
    pub envelope_level: f32,
}

impl EngineStatus {
    pub fn capture(synth: &PhiSynth) -> Self {
        Self {
            state: synth.state(),
            frequency: synth.frequency(),
            gate: synth.gate(),
            envelope_level: synth.envelope_level(),
        }
    }
}

pub struct UiApp {
    control_tx: Producer<ControlMessage>,
    scope_rx: Consumer<f32>,
    status_rx: Consumer<EngineStatus>,
    /// Latest snapshot from the audio thread
    status: EngineStatus,
    sample_rate: u32,
    // What the UI has asked for; the engine may lag a callback behind
    frequency: f32,
    gate: bool,
    scope: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    dropped_messages: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        control_tx: Producer<ControlMessage>,
        scope_rx: Consumer<f32>,
        status_rx: Consumer<EngineStatus>,
        status: EngineStatus,
        sample_rate: u32,
    ) -> Self {
        Self {
            control_tx,
            scope_rx,
            status_rx,
            status,
            sample_rate,
            frequency: status.frequency,
            gate: status.gate,
            scope: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            dropped_messages: 0,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_status();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        let before = self.scope.len();
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() == before {
            return;
        }
        if self.scope.len() > VIS_BUFFER_SIZE {
            let excess = self.scope.len() - VIS_BUFFER_SIZE;
            self.scope.drain(..excess);
        }
        self.spectrum.update(&self.scope);
    }

    fn poll_status(&mut self) {
        while let Ok(status) = self.status_rx.pop() {
            self.status = status;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.gate = !self.gate;
                self.send(ControlMessage::SetGate(self.gate));
            }
            KeyCode::Up => self.nudge_frequency(COARSE_STEP_HZ),
            KeyCode::Down => self.nudge_frequency(-COARSE_STEP_HZ),
            KeyCode::Right => self.nudge_frequency(FINE_STEP_HZ),
            KeyCode::Left => self.nudge_frequency(-FINE_STEP_HZ),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                // Reset closes the gate on the engine side too
                self.gate = false;
                self.send(ControlMessage::Reset);
            }
            _ => {}
        }
    }

    fn nudge_frequency(&mut self, delta: f32) {
        let spec = params::spec(ParamId::Frequency);
        self.frequency = (self.frequency + delta).clamp(spec.min, spec.max);
        self.send(ControlMessage::SetFrequency(self.frequency));
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            self.dropped_messages += 1;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(8),    // Scope and spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_transport(
            frame,
            chunks[0],
            &self.status,
            self.sample_rate,
            &Meter::measure(&self.scope),
        );

        let views = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        render_waveform(frame, views[0], &self.scope);
        render_spectrum(frame, views[1], &self.spectrum);

        let mut help =
            String::from(" [Space] Gate  [↑/↓] ±10 Hz  [←/→] ±1 Hz  [R] Reset  [Q] Quit");
        if self.dropped_messages > 0 {
            help.push_str(&format!("  ({} dropped)", self.dropped_messages));
        }
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
}
