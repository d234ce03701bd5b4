//! TUI module for gamma40
//!
//! Polls the shared playback state every frame and draws the pulse
//! indicator, transport bar, waveform and spectrum. Keyboard input goes
//! straight to the shared atomics.

pub mod controls;
mod pulse;
mod spectrum;
mod transport;
mod waveform;

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::SetTitle,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use tracing::debug;

use gamma40::{io::ScopeReader, PlaybackSnapshot, PlaybackState, ToneGeometry};

use controls::{ControlAction, ControlOutcome};
use pulse::render_pulse;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, window_title, AudioStats};
use waveform::render_waveform;

/// Samples kept for the oscilloscope (~46ms at 44.1kHz, two pulses)
pub const VIS_BUFFER_SIZE: usize = 2048;
/// FFT size for the spectrum panel
const FFT_SIZE: usize = 2048;
/// Highest frequency shown in the spectrum panel
const SPECTRUM_MAX_HZ: f64 = 3_000.0;
/// Frame period (~60 fps)
const FRAME_POLL: Duration = Duration::from_millis(16);

/// UI application state
pub struct UiApp {
    /// Shared playback flags and clock
    state: Arc<PlaybackState>,
    geometry: ToneGeometry,
    /// Ring buffer receiver for rendered samples
    audio_rx: ScopeReader,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    started: Instant,
    /// Session second last written to the terminal title
    title_secs: Option<u64>,
    /// Feedback from the last key action, shown next to the key hints
    last_feedback: Option<&'static str>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(state: Arc<PlaybackState>, geometry: ToneGeometry, audio_rx: ScopeReader) -> Self {
        Self {
            state,
            geometry,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(FFT_SIZE, geometry.sample_rate(), SPECTRUM_MAX_HZ),
            started: Instant::now(),
            title_secs: None,
            last_feedback: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if self.audio_rx.drain_into(&mut self.audio_buffer, VIS_BUFFER_SIZE) > 0 {
                self.spectrum.update(&self.audio_buffer);
            }

            let snapshot = self.state.snapshot();
            let session = self.started.elapsed();
            self.update_title(session)?;

            terminal.draw(|frame| self.render(frame, &snapshot, session))?;

            if event::poll(FRAME_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = ControlAction::from_key(key.code) {
                            debug!(?action, "key");
                            match action.apply(&self.state) {
                                ControlOutcome::Feedback(line) => self.last_feedback = Some(line),
                                ControlOutcome::Quit => self.should_quit = true,
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn update_title(&mut self, session: Duration) -> EyreResult<()> {
        let secs = session.as_secs();
        if self.title_secs != Some(secs) {
            execute!(stdout(), SetTitle(window_title(session)))?;
            self.title_secs = Some(secs);
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame, snapshot: &PlaybackSnapshot, session: Duration) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Transport bar
                Constraint::Min(8),    // Pulse indicator + waveform
                Constraint::Length(8), // Spectrum
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, chunks[0], snapshot, &self.geometry, session, &stats);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);
        render_pulse(frame, middle[0], snapshot, &self.geometry);
        render_waveform(frame, middle[1], &self.audio_buffer, self.geometry.sample_rate());

        render_spectrum(frame, chunks[2], &self.spectrum);

        frame.render_widget(help_line(self.last_feedback), chunks[3]);
    }
}

/// Key hints, followed by the feedback from the last key action.
fn help_line(feedback: Option<&str>) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        " [Space] Play/Pause  [T] Test tone  [Q/Esc] Quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(line) = feedback {
        spans.push(Span::styled(
            format!("   {line}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    Paragraph::new(Line::from(spans))
}
