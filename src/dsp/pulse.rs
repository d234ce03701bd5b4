use std::f64::consts::TAU;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::fade::LinearFade;

/*
40Hz Pulse Train
================

The stimulus is a train of short 1kHz tone bursts, one every 25ms:

  amp
   ▲  ▐▌                       ▐▌                       ▐▌
   │  ▐▌                       ▐▌                       ▐▌
   └──▐▌───────────────────────▐▌───────────────────────▐▌────→ t
      │1ms│        24ms         │
      │←──────── 25ms ─────────→│      (40 intervals per second)

Everything is keyed off one absolute sample index. The position inside the
current interval is `index % samples_per_interval`; the burst occupies the
first `samples_per_tone` positions and the rest is exact silence.

Inside a burst the sine phase restarts at zero every interval, so each burst
is the same 44-sample shape. The linear fade (see `fade.rs`) takes the edges
down to zero so no burst clicks.

Continuous-tone mode ignores the schedule and plays the same 1kHz sine
without gaps, driven by the same absolute index. It exists to check levels
and speaker response.

Sample counts are derived with integer arithmetic and truncate toward zero:

  samples_per_tone     = 44100 * 1ms  / 1000 = 44.1  -> 44
  samples_per_interval = 44100 * 25ms / 1000 = 1102.5 -> 1102
*/

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;
/// Pure tone frequency in Hz.
pub const TONE_FREQUENCY: f64 = 1_000.0;
/// Burst length in microseconds.
pub const TONE_DURATION_US: u32 = 1_000;
/// Burst period in microseconds (40Hz).
pub const STIMULUS_INTERVAL_US: u32 = 25_000;
/// Peak amplitude as a fraction of full scale.
pub const PEAK_AMPLITUDE: f64 = 0.5;

/// The protocol geometry used by the binary.
pub const STIMULUS: ToneGeometry = ToneGeometry::new(
    SAMPLE_RATE,
    TONE_FREQUENCY,
    TONE_DURATION_US,
    STIMULUS_INTERVAL_US,
    PEAK_AMPLITUDE,
);

pub const SAMPLES_PER_TONE: u32 = STIMULUS.samples_per_tone();
pub const SAMPLES_PER_INTERVAL: u32 = STIMULUS.samples_per_interval();

// A burst must leave room for silence inside its interval.
const _: () = assert!(SAMPLES_PER_TONE < SAMPLES_PER_INTERVAL);

/// Which waveform the generator emits.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneMode {
    /// 1ms bursts every 25ms (the stimulation protocol).
    #[default]
    Pulsed,
    /// Uninterrupted sine (test tone).
    Continuous,
}

impl ToneMode {
    pub fn from_continuous(continuous: bool) -> Self {
        if continuous {
            ToneMode::Continuous
        } else {
            ToneMode::Pulsed
        }
    }

    pub fn is_continuous(self) -> bool {
        matches!(self, ToneMode::Continuous)
    }
}

/// Fixed timing and level parameters of a pulse train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneGeometry {
    sample_rate: u32,
    tone_frequency: f64,
    tone_duration_us: u32,
    interval_us: u32,
    peak_amplitude: f64,
    samples_per_tone: u32,
    samples_per_interval: u32,
    fade: LinearFade,
}

impl ToneGeometry {
    /// Build a geometry from a sample rate and burst/period lengths.
    ///
    /// Panics (at compile time when used in a `const`) if the period rounds
    /// to zero samples or the burst does not fit inside it with room to spare.
    pub const fn new(
        sample_rate: u32,
        tone_frequency: f64,
        tone_duration_us: u32,
        interval_us: u32,
        peak_amplitude: f64,
    ) -> Self {
        let samples_per_tone = us_to_samples(sample_rate, tone_duration_us);
        let samples_per_interval = us_to_samples(sample_rate, interval_us);
        assert!(samples_per_interval > 0, "stimulus interval is shorter than one sample");
        assert!(
            samples_per_tone < samples_per_interval,
            "tone burst leaves no silence in its interval"
        );

        Self {
            sample_rate,
            tone_frequency,
            tone_duration_us,
            interval_us,
            peak_amplitude,
            samples_per_tone,
            samples_per_interval,
            fade: LinearFade::quarter(samples_per_tone),
        }
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub const fn tone_frequency(&self) -> f64 {
        self.tone_frequency
    }

    pub const fn peak_amplitude(&self) -> f64 {
        self.peak_amplitude
    }

    pub const fn samples_per_tone(&self) -> u32 {
        self.samples_per_tone
    }

    pub const fn samples_per_interval(&self) -> u32 {
        self.samples_per_interval
    }

    pub const fn fade_len(&self) -> u32 {
        self.fade.fade_len()
    }

    /// Nominal burst length.
    pub fn tone_duration(&self) -> Duration {
        Duration::from_micros(self.tone_duration_us as u64)
    }

    /// Nominal burst period.
    pub fn interval(&self) -> Duration {
        Duration::from_micros(self.interval_us as u64)
    }

    /// Bursts per second, from the nominal period (40 for the protocol).
    pub fn stimulus_rate_hz(&self) -> f64 {
        1_000_000.0 / self.interval_us as f64
    }

    /// Offset of `index` inside its interval.
    #[inline]
    pub fn position_in_interval(&self, index: u64) -> u32 {
        (index % self.samples_per_interval as u64) as u32
    }

    /// Whether `index` falls inside a burst.
    #[inline]
    pub fn is_pulsing(&self, index: u64) -> bool {
        self.position_in_interval(index) < self.samples_per_tone
    }

    /// Audio time represented by `index` samples.
    pub fn elapsed(&self, index: u64) -> Duration {
        let secs = index / self.sample_rate as u64;
        let rem = index % self.sample_rate as u64;
        let nanos = rem * 1_000_000_000 / self.sample_rate as u64;
        Duration::new(secs, nanos as u32)
    }

    /// One output sample for the absolute sample `index`.
    ///
    /// Pure and allocation-free; safe to call from the audio callback.
    #[inline]
    pub fn sample(&self, index: u64, mode: ToneMode) -> f32 {
        if mode.is_continuous() {
            let t = index as f64 / self.sample_rate as f64;
            return (self.peak_amplitude * (TAU * self.tone_frequency * t).sin()) as f32;
        }

        let pos = self.position_in_interval(index);
        if pos >= self.samples_per_tone {
            return 0.0;
        }

        let t = pos as f64 / self.sample_rate as f64;
        let sample = self.peak_amplitude * (TAU * self.tone_frequency * t).sin();
        (sample * self.fade.gain(pos)) as f32
    }
}

/// Convert microseconds to a whole sample count, truncating.
const fn us_to_samples(sample_rate: u32, us: u32) -> u32 {
    (sample_rate as u64 * us as u64 / 1_000_000) as u32
}

/// One sample of the protocol stimulus at `index`.
#[inline]
pub fn generate_sample(index: u64, mode: ToneMode) -> f32 {
    STIMULUS.sample(index, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_sine(pos: u64) -> f64 {
        0.5 * (TAU * 1000.0 * pos as f64 / 44_100.0).sin()
    }

    #[test]
    fn protocol_geometry() {
        assert_eq!(SAMPLES_PER_TONE, 44);
        assert_eq!(SAMPLES_PER_INTERVAL, 1102);
        assert_eq!(STIMULUS.fade_len(), 11);
        assert!((STIMULUS.stimulus_rate_hz() - 40.0).abs() < 1e-12);
        assert_eq!(STIMULUS.tone_duration(), Duration::from_millis(1));
        assert_eq!(STIMULUS.interval(), Duration::from_millis(25));
    }

    #[test]
    fn burst_starts_at_zero() {
        assert_eq!(generate_sample(0, ToneMode::Pulsed), 0.0);
        assert_eq!(generate_sample(1102 * 7, ToneMode::Pulsed), 0.0);
    }

    #[test]
    fn mid_fade_in_is_scaled() {
        let expected = expected_sine(10) * (10.0 / 11.0);
        let actual = generate_sample(10, ToneMode::Pulsed) as f64;
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn plateau_is_unscaled() {
        let expected = expected_sine(20);
        let actual = generate_sample(20, ToneMode::Pulsed) as f64;
        assert!((actual - expected).abs() < 1e-6, "expected {expected}, got {actual}");
    }

    #[test]
    fn silence_between_bursts() {
        assert_eq!(generate_sample(44, ToneMode::Pulsed), 0.0);
        assert_eq!(generate_sample(50, ToneMode::Pulsed), 0.0);
        assert_eq!(generate_sample(1101, ToneMode::Pulsed), 0.0);
    }

    #[test]
    fn repeats_every_interval() {
        for pos in 0..SAMPLES_PER_INTERVAL as u64 {
            let a = generate_sample(pos, ToneMode::Pulsed);
            let b = generate_sample(pos + 1102, ToneMode::Pulsed);
            let c = generate_sample(pos + 1102 * 1000, ToneMode::Pulsed);
            assert_eq!(a, b, "pos {pos}");
            assert_eq!(a, c, "pos {pos}");
        }
    }

    #[test]
    fn continuous_follows_absolute_index() {
        for index in [0u64, 10, 50, 1102, 44_100, 1_000_003] {
            let expected = expected_sine(index);
            let actual = generate_sample(index, ToneMode::Continuous) as f64;
            assert!((actual - expected).abs() < 1e-6, "index {index}");
        }
    }

    #[test]
    fn continuous_ignores_schedule() {
        // Index 50 is silent in pulsed mode.
        assert!(generate_sample(50, ToneMode::Continuous).abs() > 0.1);
    }

    #[test]
    fn pulse_queries() {
        assert!(STIMULUS.is_pulsing(0));
        assert!(STIMULUS.is_pulsing(43));
        assert!(!STIMULUS.is_pulsing(44));
        assert!(STIMULUS.is_pulsing(1102));
        assert_eq!(STIMULUS.position_in_interval(1105), 3);
    }

    #[test]
    fn elapsed_tracks_sample_rate() {
        assert_eq!(STIMULUS.elapsed(44_100), Duration::from_secs(1));
        assert_eq!(STIMULUS.elapsed(44_100 * 90 + 22_050), Duration::from_millis(90_500));
    }

    #[test]
    fn short_burst_geometry_has_no_fade() {
        // 2 samples per burst at 8kHz, 250us
        let geometry = ToneGeometry::new(8_000, 1_000.0, 250, 25_000, 0.5);
        assert_eq!(geometry.samples_per_tone(), 2);
        assert_eq!(geometry.fade_len(), 0);
        let s = geometry.sample(1, ToneMode::Pulsed) as f64;
        let expected = 0.5 * (TAU * 1000.0 / 8000.0).sin();
        assert!((s - expected).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "no silence")]
    fn burst_longer_than_interval_is_rejected() {
        ToneGeometry::new(44_100, 1_000.0, 30_000, 25_000, 0.5);
    }

    #[test]
    #[should_panic(expected = "no silence")]
    fn burst_filling_interval_is_rejected() {
        ToneGeometry::new(44_100, 1_000.0, 25_000, 25_000, 0.5);
    }
}
