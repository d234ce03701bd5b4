use crate::{playback::PlaybackDriver, MAX_BLOCK_SIZE};

#[cfg(feature = "rtrb")]
use super::scope::ScopeTap;

/// Copy a mono block into an interleaved buffer, one copy per channel.
///
/// `out` must hold at least `block.len() * channels` samples.
pub fn write_mono_frames(block: &[f32], out: &mut [f32], channels: usize) {
    for (frame, &s) in out.chunks_exact_mut(channels).zip(block.iter()) {
        frame.fill(s);
    }
}

/// Adapts a [`PlaybackDriver`] to an interleaved device buffer.
///
/// The device buffer is rendered in chunks of at most [`MAX_BLOCK_SIZE`]
/// frames through a scratch buffer allocated up front, so `process` never
/// allocates.
pub struct StreamRenderer {
    driver: PlaybackDriver,
    channels: usize,
    scratch: Vec<f32>,
    #[cfg(feature = "rtrb")]
    tap: Option<ScopeTap>,
}

impl StreamRenderer {
    pub fn new(driver: PlaybackDriver, channels: usize) -> Self {
        Self {
            driver,
            channels: channels.max(1),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            #[cfg(feature = "rtrb")]
            tap: None,
        }
    }

    /// Also send every rendered mono sample to a scope.
    #[cfg(feature = "rtrb")]
    pub fn with_tap(mut self, tap: ScopeTap) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn driver(&self) -> &PlaybackDriver {
        &self.driver
    }

    /// Fill one interleaved device buffer.
    ///
    /// A trailing partial frame (if the device ever hands one over) is
    /// zeroed and does not advance the clock.
    pub fn process(&mut self, data: &mut [f32]) {
        let total_frames = data.len() / self.channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

            let block = &mut self.scratch[..frames_to_render];
            self.driver.render_block(block);

            let out_off = frames_written * self.channels;
            let out_end = out_off + frames_to_render * self.channels;
            write_mono_frames(block, &mut data[out_off..out_end], self.channels);

            #[cfg(feature = "rtrb")]
            if let Some(tap) = self.tap.as_mut() {
                tap.push_block(block);
            }

            frames_written += frames_to_render;
        }

        data[total_frames * self.channels..].fill(0.0);
    }
}
