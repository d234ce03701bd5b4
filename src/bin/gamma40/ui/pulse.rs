//! Pulse indicator - a block that swells while a tone burst is sounding

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use gamma40::{PlaybackSnapshot, ToneGeometry, ToneMode};

/// Fill colour for the current state.
pub fn indicator_color(snapshot: &PlaybackSnapshot, pulsing: bool) -> Color {
    if !snapshot.playing {
        return Color::Rgb(80, 80, 80);
    }
    match snapshot.mode {
        ToneMode::Continuous => Color::Rgb(50, 150, 255),
        ToneMode::Pulsed if pulsing => Color::Rgb(0, 255, 100),
        ToneMode::Pulsed => Color::Rgb(0, 100, 50),
    }
}

/// Centered square-ish rect, `scale` of the available area.
fn centered(area: Rect, scale: f32) -> Rect {
    let w = ((area.width as f32 * scale) as u16).max(1).min(area.width);
    let h = ((area.height as f32 * scale) as u16).max(1).min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Render the pulse indicator
pub fn render_pulse(
    frame: &mut Frame,
    area: Rect,
    snapshot: &PlaybackSnapshot,
    geometry: &ToneGeometry,
) {
    let block = Block::default().title(" Pulse ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let pulsing = geometry.is_pulsing(snapshot.position);
    let scale = if pulsing { 0.9 } else { 0.6 };
    let color = indicator_color(snapshot, pulsing);

    frame.render_widget(
        Block::default().style(Style::default().bg(color)),
        centered(inner, scale),
    );
}
