//! Spectrum widget
//!
//! Linear-frequency FFT of the latest output window. The pulse train shows up
//! as a line at 1kHz with sidebands every 40Hz; the test tone as a single
//! clean line.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Floor for empty or silent bins, in dB
const FLOOR_DB: f64 = -120.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Hz per FFT bin
    bin_width: f64,
    /// (frequency_hz, magnitude_db) for bins up to the display limit
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// `fft_len` samples per analysis, showing bins from DC to `max_freq`.
    pub fn new(fft_len: usize, sample_rate: u32, max_freq: f64) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_len);

        let window: Vec<f32> = (0..fft_len)
            .map(|i| {
                if fft_len > 1 {
                    let denom = (fft_len - 1) as f32;
                    0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let bin_width = sample_rate as f64 / fft_len.max(1) as f64;
        let nyquist_bins = (fft_len / 2).max(1);
        let shown = ((max_freq / bin_width).ceil() as usize).clamp(1, nyquist_bins);
        let spectrum = (0..shown).map(|k| (k as f64 * bin_width, FLOOR_DB)).collect();

        Self {
            window,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bin_width,
            spectrum,
        }
    }

    /// Analyze the newest `fft_len` samples. Shorter buffers are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        let n = self.window.len();
        if buffer.len() < n {
            return;
        }
        let recent = &buffer[buffer.len() - n..];

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (k, (_, db)) in self.spectrum.iter_mut().enumerate() {
            let power = self.scratch[k].norm_sqr().max(1e-12);
            *db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    /// Frequency of the strongest displayed bin (DC excluded).
    pub fn peak_frequency(&self) -> Option<f64> {
        self.spectrum
            .iter()
            .skip(1)
            .filter(|(_, db)| *db > FLOOR_DB)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| *f)
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render the spectrum chart
pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let title = match analyzer.peak_frequency() {
        Some(peak) => format!(" Spectrum (peak {peak:.0} Hz) "),
        None => " Spectrum ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let data = analyzer.data();
    let max_freq = data.last().map(|(f, _)| *f).unwrap_or(1.0).max(1.0);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec!["0".to_string(), format!("{:.0} Hz", max_freq)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, 60.0])
                .labels(vec!["-100", "-20", "60"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
