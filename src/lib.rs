pub mod dsp; // Tone geometry and pulse-train generation
pub mod io;
pub mod playback; // Sample clock, shared flags, buffer rendering

pub use dsp::{generate_sample, ToneGeometry, ToneMode, STIMULUS};
pub use playback::{PausePolicy, PlaybackDriver, PlaybackSnapshot, PlaybackState};

pub const MAX_BLOCK_SIZE: usize = 2048;
