//! Lock-free sample tap from the audio thread to the display.

use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Audio-thread end: pushes rendered samples, never blocks.
pub struct ScopeTap {
    tx: Producer<f32>,
}

/// UI end: drains samples into a rolling window.
pub struct ScopeReader {
    rx: Consumer<f32>,
}

/// Create a tap/reader pair with room for `capacity` samples in flight.
pub fn scope_channel(capacity: usize) -> (ScopeTap, ScopeReader) {
    let (tx, rx) = RingBuffer::<f32>::new(capacity);
    (ScopeTap { tx }, ScopeReader { rx })
}

impl ScopeTap {
    /// Push a block; whatever doesn't fit is dropped.
    pub fn push_block(&mut self, block: &[f32]) {
        for &s in block {
            if let Err(PushError::Full(_)) = self.tx.push(s) {
                break;
            }
        }
    }
}

impl ScopeReader {
    /// Append everything available to `window`, keeping only the newest
    /// `keep` samples. Returns how many samples were read.
    pub fn drain_into(&mut self, window: &mut Vec<f32>, keep: usize) -> usize {
        let mut read = 0;
        while let Ok(sample) = self.rx.pop() {
            window.push(sample);
            read += 1;
        }

        if window.len() > keep {
            let excess = window.len() - keep;
            window.drain(0..excess);
        }
        read
    }
}
