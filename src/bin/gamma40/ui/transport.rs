//! Transport bar widget - play state, mode, session time and audio stats

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use gamma40::{PlaybackSnapshot, ToneGeometry, ToneMode};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// `MM:SS`, minutes not wrapped.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the current hour, advancing once per whole minute.
pub fn hour_progress(elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs() / 60;
    (minutes % 60) as f64 / 60.0
}

/// Terminal title for the given session time.
pub fn window_title(elapsed: Duration) -> String {
    format!(
        "40Hz Stimulation | {} | SPACE:Pause  T:Test  Q:Quit",
        format_clock(elapsed)
    )
}

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    snapshot: &PlaybackSnapshot,
    geometry: &ToneGeometry,
    session: Duration,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" gamma40 ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let (play_symbol, play_state_str, play_color) = if snapshot.playing {
        ("▶", "Playing", Color::Green)
    } else {
        ("⏸", "Paused", Color::Yellow)
    };

    let (mode_str, mode_color) = match snapshot.mode {
        ToneMode::Pulsed => ("40Hz pulsed", Color::Green),
        ToneMode::Continuous => ("1kHz test tone", Color::Blue),
    };

    let audio_time = geometry.elapsed(snapshot.position);

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, play_state_str),
            Style::default().fg(play_color),
        ),
        Span::styled(format!("{}  ", mode_str), Style::default().fg(mode_color)),
        Span::styled(
            format!("Session {}  ", format_clock(session)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "Audio {}.{:01}  ",
                format_clock(audio_time),
                audio_time.subsec_millis() / 100
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Sample {}  ", snapshot.position),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(hour_progress(session))
        .label(format!("{} min this hour", (session.as_secs() / 60) % 60));
    frame.render_widget(gauge, rows[1]);
}
