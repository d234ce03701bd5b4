//! Signal generation for the stimulus.
//!
//! Everything here is allocation-free and realtime-safe. The generator is a
//! pure function of the absolute sample index, so the audio callback and any
//! offline renderer agree sample for sample.

/// Linear fade-in/fade-out gain for short tone bursts.
pub mod fade;
/// Tone geometry and the 40Hz pulse-train generator.
pub mod pulse;

pub use fade::LinearFade;
pub use pulse::{generate_sample, ToneGeometry, ToneMode, STIMULUS};
