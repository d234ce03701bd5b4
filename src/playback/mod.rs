//! Playback driver - turns the pure generator into a stream of buffers.
//!
//! The driver runs on the audio thread and owns the absolute sample clock.
//! Play/pause and the test-tone switch live in [`PlaybackState`], a set of
//! atomics shared with the control thread through an `Arc`. Nothing on the
//! render path locks, allocates or blocks.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{ToneGeometry, ToneMode, STIMULUS};

/// What the sample clock does while playback is paused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PausePolicy {
    /// Output is muted but the clock keeps counting, so the pulse schedule
    /// keeps its absolute phase across pause/resume.
    #[default]
    FreeRunning,
    /// The clock stops with the output; resuming continues from the exact
    /// sample where playback paused.
    Hold,
}

/// State shared between the audio thread and the control/UI thread.
///
/// The flags are written by the control surface and read per sample by the
/// driver. The position is written only by the driver and polled by the
/// display.
#[derive(Debug)]
pub struct PlaybackState {
    position: AtomicU64,
    playing: AtomicBool,
    continuous_tone: AtomicBool,
}

/// Copy of the shared state at one instant, for display.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub position: u64,
    pub playing: bool,
    pub mode: ToneMode,
}

impl PlaybackState {
    pub fn new(playing: bool, mode: ToneMode) -> Self {
        Self {
            position: AtomicU64::new(0),
            playing: AtomicBool::new(playing),
            continuous_tone: AtomicBool::new(mode.is_continuous()),
        }
    }

    /// Absolute sample position of the next sample to be rendered.
    pub fn position(&self) -> u64 {
        self.position.load(Ordering::Acquire)
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Relaxed);
    }

    /// Flip play/pause. Returns the new value.
    pub fn toggle_playing(&self) -> bool {
        !self.playing.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn tone_mode(&self) -> ToneMode {
        ToneMode::from_continuous(self.continuous_tone.load(Ordering::Relaxed))
    }

    pub fn set_tone_mode(&self, mode: ToneMode) {
        self.continuous_tone
            .store(mode.is_continuous(), Ordering::Relaxed);
    }

    /// Flip between the pulse train and the continuous test tone.
    /// Returns the new mode.
    pub fn toggle_continuous(&self) -> ToneMode {
        let was = self.continuous_tone.fetch_xor(true, Ordering::Relaxed);
        ToneMode::from_continuous(!was)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            position: self.position(),
            playing: self.is_playing(),
            mode: self.tone_mode(),
        }
    }

    fn store_position(&self, position: u64) {
        self.position.store(position, Ordering::Release);
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(true, ToneMode::Pulsed)
    }
}

/// Renders the stimulus into successive output buffers.
///
/// There is exactly one driver per [`PlaybackState`]; it is the only writer
/// of the position counter.
pub struct PlaybackDriver {
    state: Arc<PlaybackState>,
    geometry: ToneGeometry,
    pause_policy: PausePolicy,
}

impl PlaybackDriver {
    /// Driver for the protocol stimulus, starting at sample 0.
    pub fn new(state: Arc<PlaybackState>) -> Self {
        Self {
            state,
            geometry: STIMULUS,
            pause_policy: PausePolicy::default(),
        }
    }

    /// Use a different tone geometry.
    pub fn with_geometry(mut self, geometry: ToneGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Choose how the clock behaves while paused.
    pub fn with_pause_policy(mut self, policy: PausePolicy) -> Self {
        self.pause_policy = policy;
        self
    }

    /// Handle for the control surface and the display.
    pub fn state(&self) -> Arc<PlaybackState> {
        Arc::clone(&self.state)
    }

    pub fn geometry(&self) -> &ToneGeometry {
        &self.geometry
    }

    pub fn pause_policy(&self) -> PausePolicy {
        self.pause_policy
    }

    /// Fill `out` with the next `out.len()` samples.
    ///
    /// Flags are read per sample, so a toggle from the control thread may
    /// take effect mid-buffer.
    pub fn render_block(&mut self, out: &mut [f32]) {
        let mut clock = self.state.position();

        for slot in out.iter_mut() {
            if self.state.is_playing() {
                *slot = self.geometry.sample(clock, self.state.tone_mode());
                clock = clock.wrapping_add(1);
            } else {
                *slot = 0.0;
                if self.pause_policy == PausePolicy::FreeRunning {
                    clock = clock.wrapping_add(1);
                }
            }
        }

        self.state.store_position(clock);
    }

    /// Render `len` samples into a new buffer.
    ///
    /// Allocates; meant for offline use and tests, not the audio callback.
    pub fn render(&mut self, len: usize) -> Vec<f32> {
        let mut out = vec![0.0; len];
        self.render_block(&mut out);
        out
    }
}
