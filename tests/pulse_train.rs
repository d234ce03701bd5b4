use std::f64::consts::TAU;
use std::sync::Arc;
use std::thread;

use gamma40::{
    dsp::pulse::{SAMPLES_PER_INTERVAL, SAMPLES_PER_TONE},
    generate_sample, PausePolicy, PlaybackDriver, PlaybackState, ToneMode,
};

/// A few seconds of indices plus some far into a long session.
fn sample_indices() -> impl Iterator<Item = u64> {
    (0..44_100u64 * 3).chain((0..5_000u64).map(|i| 44_100 * 3600 * 8 + i))
}

#[test]
fn pulsed_output_stays_within_peak() {
    for i in sample_indices() {
        let s = generate_sample(i, ToneMode::Pulsed);
        assert!((-0.5..=0.5).contains(&s), "index {i}: {s}");
    }
}

#[test]
fn pulsed_output_is_silent_outside_bursts() {
    for i in sample_indices() {
        if i % SAMPLES_PER_INTERVAL as u64 >= SAMPLES_PER_TONE as u64 {
            assert_eq!(generate_sample(i, ToneMode::Pulsed), 0.0, "index {i}");
        }
    }
}

#[test]
fn every_burst_starts_from_zero() {
    for k in 0..2_000u64 {
        let i = k * SAMPLES_PER_INTERVAL as u64;
        assert_eq!(generate_sample(i, ToneMode::Pulsed), 0.0);
    }
}

#[test]
fn continuous_tone_is_a_plain_sine() {
    for i in (0..44_100u64).step_by(7) {
        let expected = 0.5 * (TAU * 1000.0 * i as f64 / 44_100.0).sin();
        let actual = generate_sample(i, ToneMode::Continuous) as f64;
        assert!((actual - expected).abs() < 1e-6, "index {i}");
    }
}

#[test]
fn generator_is_repeatable() {
    for i in [0u64, 10, 33, 43, 50, 1102, 99_999] {
        for mode in [ToneMode::Pulsed, ToneMode::Continuous] {
            assert_eq!(generate_sample(i, mode), generate_sample(i, mode));
        }
    }
}

#[test]
fn reference_points() {
    assert_eq!(generate_sample(0, ToneMode::Pulsed), 0.0);

    let expected = 0.5 * (TAU * 1000.0 * 10.0 / 44_100.0).sin() * (10.0 / 11.0);
    let actual = generate_sample(10, ToneMode::Pulsed) as f64;
    assert!((actual - expected).abs() < 1e-6);

    assert_eq!(generate_sample(50, ToneMode::Pulsed), 0.0);
    assert_eq!(
        generate_sample(1102, ToneMode::Pulsed),
        generate_sample(0, ToneMode::Pulsed)
    );
}

#[test]
fn bursts_per_second() {
    let state = Arc::new(PlaybackState::default());
    let mut driver = PlaybackDriver::new(state);
    let second = driver.render(44_100);

    // Count burst onsets: a non-silent sample after a silent one.
    let onsets = second
        .windows(2)
        .filter(|w| w[0] == 0.0 && w[1] != 0.0)
        .count();
    assert_eq!(onsets, 41); // 44100 / 1102 = 40.02, so 41 bursts start in the first second
}

#[test]
fn paused_buffers_are_silent_under_both_policies() {
    for (policy, advance) in [(PausePolicy::FreeRunning, 1024), (PausePolicy::Hold, 0)] {
        let state = Arc::new(PlaybackState::new(false, ToneMode::Continuous));
        let mut driver = PlaybackDriver::new(Arc::clone(&state)).with_pause_policy(policy);

        let block = driver.render(1024);
        assert_eq!(block.len(), 1024);
        assert!(block.iter().all(|&s| s == 0.0), "{policy:?}");
        assert_eq!(state.position(), advance, "{policy:?}");
    }
}

#[test]
fn clock_advances_by_buffer_length_while_flags_flip() {
    let state = Arc::new(PlaybackState::default());
    let mut driver = PlaybackDriver::new(Arc::clone(&state));

    let control = {
        let state = Arc::clone(&state);
        thread::spawn(move || {
            for _ in 0..10_000 {
                state.toggle_playing();
                state.toggle_continuous();
            }
        })
    };

    let mut expected = 0u64;
    let mut buffer = vec![0.0f32; 256];
    for _ in 0..2_000 {
        driver.render_block(&mut buffer);
        expected += buffer.len() as u64;
        assert_eq!(state.position(), expected);
        assert!(buffer.iter().all(|s| s.abs() <= 0.5));
    }

    control.join().unwrap();
}
