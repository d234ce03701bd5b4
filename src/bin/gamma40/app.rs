//! Stimulator - application builder and runner

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use cpal::traits::StreamTrait;
use tracing::{info, warn};

use gamma40::{
    io::scope_channel, PausePolicy, PlaybackDriver, PlaybackState, ToneGeometry, ToneMode,
    STIMULUS,
};

use super::audio::open_output;
use super::cli::Args;
use super::ui::{UiApp, VIS_BUFFER_SIZE};

/// Blocks of scope samples that may queue up between UI frames
const SCOPE_RING_BLOCKS: usize = 8;
/// Headless status cadence
const STATUS_PERIOD: Duration = Duration::from_secs(1);

/// Main application builder
pub struct Stimulator {
    playing: bool,
    mode: ToneMode,
    pause_policy: PausePolicy,
    buffer_frames: Option<u32>,
    headless: bool,
    duration: Option<Duration>,
}

impl Stimulator {
    /// Protocol defaults: playing, pulsed, 1024-frame buffers, with the UI
    pub fn new() -> Self {
        Self {
            playing: true,
            mode: ToneMode::Pulsed,
            pause_policy: PausePolicy::default(),
            buffer_frames: Some(1024),
            headless: false,
            duration: None,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let mut app = Self::new()
            .playing(!args.paused)
            .mode(ToneMode::from_continuous(args.test_tone))
            .pause_policy(args.pause_policy.into())
            .buffer_frames((args.buffer_frames > 0).then_some(args.buffer_frames));
        if args.headless {
            app = app.headless(args.duration.map(Duration::from_secs));
        }
        app
    }

    /// Start playing immediately (or paused)
    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    pub fn mode(mut self, mode: ToneMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn pause_policy(mut self, policy: PausePolicy) -> Self {
        self.pause_policy = policy;
        self
    }

    /// Device buffer size in frames; `None` for the device default
    pub fn buffer_frames(mut self, frames: Option<u32>) -> Self {
        self.buffer_frames = frames;
        self
    }

    /// Run without the TUI, optionally for a fixed time
    pub fn headless(mut self, duration: Option<Duration>) -> Self {
        self.headless = true;
        self.duration = duration;
        self
    }

    /// Run the application (takes over, plays audio)
    pub fn run(self) -> EyreResult<()> {
        println!("{}", banner(&STIMULUS, self.headless));

        let state = Arc::new(PlaybackState::new(self.playing, self.mode));
        let driver = PlaybackDriver::new(Arc::clone(&state)).with_pause_policy(self.pause_policy);
        let geometry = *driver.geometry();

        let (tap, scope_rx) = scope_channel(VIS_BUFFER_SIZE * SCOPE_RING_BLOCKS);
        let tap = (!self.headless).then_some(tap);

        let (stream, output) = open_output(driver, self.buffer_frames, tap)?;

        println!();
        println!("Audio device opened successfully.");
        println!(
            "  {} | {} Hz | {} ch | buffer {:?}",
            output.device_name, output.sample_rate, output.channels, output.buffer_size
        );
        println!("Starting 40Hz stimulation...");
        println!();

        stream.play().wrap_err("failed to start output stream")?;
        info!(
            playing = self.playing,
            mode = ?self.mode,
            pause_policy = ?self.pause_policy,
            "stimulation started"
        );

        let result = if self.headless {
            run_headless(&state, self.duration);
            Ok(())
        } else {
            let mut terminal = ratatui::init();
            let res = UiApp::new(Arc::clone(&state), geometry, scope_rx).run(&mut terminal);
            ratatui::restore();
            res
        };

        println!();
        println!("Stopping...");
        if let Err(err) = stream.pause() {
            warn!(%err, "failed to pause output stream");
        }
        drop(stream);
        info!(samples = state.position(), "stimulation stopped");
        println!("Done.");

        result
    }
}

impl Default for Stimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Log a status line once a second until `duration` has passed (forever if
/// `None`).
fn run_headless(state: &PlaybackState, duration: Option<Duration>) {
    let started = Instant::now();
    loop {
        thread::sleep(STATUS_PERIOD);

        let snapshot = state.snapshot();
        info!(
            elapsed_s = started.elapsed().as_secs(),
            position = snapshot.position,
            playing = snapshot.playing,
            mode = ?snapshot.mode,
            "status"
        );

        if duration.is_some_and(|limit| started.elapsed() >= limit) {
            break;
        }
    }
}

/// Startup banner. Headless runs have no keyboard, so they get the
/// Ctrl+C hint instead of the key bindings.
fn banner(geometry: &ToneGeometry, headless: bool) -> String {
    let mut lines = vec![
        "========================================".to_string(),
        "  40Hz Auditory Stimulation Generator".to_string(),
        "========================================".to_string(),
        String::new(),
        "Based on PNAS paper specifications:".to_string(),
        format!(
            "  - Tone frequency: {} Hz (1kHz pure tone)",
            geometry.tone_frequency()
        ),
        format!(
            "  - Tone duration:  {} ms ({} samples)",
            geometry.tone_duration().as_secs_f64() * 1000.0,
            geometry.samples_per_tone()
        ),
        format!(
            "  - Stimulus rate:  {} Hz (every {} ms)",
            geometry.stimulus_rate_hz(),
            geometry.interval().as_secs_f64() * 1000.0
        ),
        format!("  - Sample rate:    {} Hz", geometry.sample_rate()),
        String::new(),
    ];

    if headless {
        lines.push("Running headless: press Ctrl+C to stop.".to_string());
    } else {
        lines.extend(
            [
                "Controls:",
                "  [SPACE] - Pause/Resume",
                "  [T]     - Toggle continuous 1kHz tone (for testing)",
                "  [Q/ESC] - Quit",
            ]
            .map(String::from),
        );
    }

    lines.extend(
        [
            "",
            "WARNING: This is for research/educational purposes only.",
            "         Consult a medical professional before use.",
            "========================================",
        ]
        .map(String::from),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn args_map_onto_builder() {
        let args = Args::try_parse_from([
            "gamma40",
            "--paused",
            "--test-tone",
            "--pause-policy",
            "hold",
            "--buffer-frames",
            "0",
            "--headless",
            "--duration",
            "30",
        ])
        .unwrap();
        let app = Stimulator::from_args(&args);

        assert!(!app.playing);
        assert_eq!(app.mode, ToneMode::Continuous);
        assert_eq!(app.pause_policy, PausePolicy::Hold);
        assert_eq!(app.buffer_frames, None);
        assert!(app.headless);
        assert_eq!(app.duration, Some(Duration::from_secs(30)));
    }

    #[test]
    fn defaults_follow_protocol() {
        let app = Stimulator::default();
        assert!(app.playing);
        assert_eq!(app.mode, ToneMode::Pulsed);
        assert_eq!(app.buffer_frames, Some(1024));
        assert!(!app.headless);
    }

    #[test]
    fn headless_banner_omits_key_bindings() {
        let text = banner(&STIMULUS, true);
        assert!(text.contains("Ctrl+C"));
        assert!(!text.contains("[SPACE]"));
        assert!(text.contains("1000 Hz"));
    }

    #[test]
    fn interactive_banner_lists_controls() {
        let text = banner(&STIMULUS, false);
        assert!(text.contains("[SPACE] - Pause/Resume"));
        assert!(text.contains("[Q/ESC] - Quit"));
        assert!(!text.contains("Ctrl+C"));
    }
}
