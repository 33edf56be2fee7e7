//! End-to-end playback scenarios at the crate surface: profile in, samples
//! out, exactly as a keyboard frontend would drive it.

use keytone::dsp::{pitch, GeneratorState, PitchName, SignalProfile};

const BUFFER: usize = 128;

#[test]
fn default_profile_plays_a440() {
    let profile = SignalProfile::default();
    let sample_rate = 44_100.0;

    let mut tone = profile.tone(PitchName::A, 4, sample_rate);
    assert_eq!(tone.frequency(), 440.0);

    tone.start();
    let mut buffer = vec![0.0f32; BUFFER];
    tone.fill(&mut buffer);

    // First sample is envelope(0) * sin(0) = 0.5 * 0
    assert_eq!(buffer[0], 0.0);
    assert!(buffer.iter().any(|&s| s != 0.0));
    assert!(buffer.iter().all(|&s| s.abs() <= 0.5 + 1e-6));

    // Phase accumulates frequency / sample_rate per sample, wrapped at 1.0
    let blocks = 8;
    for _ in 1..blocks {
        tone.fill(&mut buffer);
    }
    let expected = (440.0 / sample_rate * (BUFFER * blocks) as f32).fract();
    assert!(
        (tone.phase() - expected).abs() < 1e-3,
        "phase {} vs expected {expected}",
        tone.phase()
    );
}

#[test]
fn c5_at_concert_pitch_is_523_25() {
    let profile = SignalProfile::default();
    let freq = profile.frequency(PitchName::C, 5);
    assert!((freq - 523.25).abs() < 1e-2, "got {freq}");

    let tone = profile.tone(PitchName::C, 5, 48_000.0);
    assert!((tone.frequency() - 523.25).abs() < 1e-2);
}

#[test]
fn octave_doubling_law_holds() {
    for &name in &PitchName::ALL {
        let at_four = pitch::frequency(name, 4, 440.0);
        for octave in 0..8 {
            let ratio = at_four / pitch::frequency(name, octave, 440.0);
            let expected = 2.0f32.powi(4 - octave);
            assert!(
                (ratio / expected - 1.0).abs() < 1e-4,
                "{name}{octave}: ratio {ratio}, expected {expected}"
            );
        }
    }
}

#[test]
fn degenerate_parameters_produce_full_length_silence() {
    let profile = SignalProfile::default();

    let mut zero_freq = keytone::ToneGenerator::new(0.0, profile, 44_100.0);
    zero_freq.start();
    let mut buffer = vec![1.0f32; 96];
    zero_freq.fill(&mut buffer);
    assert_eq!(buffer.len(), 96);
    assert!(buffer.iter().all(|&s| s == 0.0));

    let mut zero_rate = keytone::ToneGenerator::new(440.0, profile, 0.0);
    zero_rate.start();
    let mut buffer = vec![1.0f32; 96];
    zero_rate.fill(&mut buffer);
    assert!(buffer.iter().all(|&s| s == 0.0));
}

#[test]
fn repeated_transitions_match_single_ones() {
    let profile = SignalProfile::default();
    let mut tone = profile.tone(PitchName::E, 3, 48_000.0);

    tone.stop();
    assert_eq!(tone.state(), GeneratorState::Idle);

    tone.start();
    tone.start();
    assert_eq!(tone.state(), GeneratorState::Playing);
    assert_eq!(tone.phase(), 0.0);

    tone.stop();
    let state_after_one = tone.state();
    tone.stop();
    assert_eq!(tone.state(), state_after_one);
}

#[cfg(feature = "rtrb")]
mod shared {
    use super::*;
    use keytone::synth::SharedTone;
    use keytone::ToneSource;

    #[test]
    fn press_and_release_over_the_control_queue() {
        let profile = SignalProfile::default();
        let (mut shared, mut handle) = SharedTone::new(profile.tone(PitchName::A, 4, 48_000.0));
        let mut buffer = vec![0.0f32; BUFFER];

        // Nothing pressed yet
        shared.render_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));

        // Press
        handle.start();
        shared.render_block(&mut buffer);
        assert!(buffer.iter().any(|&s| s != 0.0));
        assert_eq!(shared.generator().state(), GeneratorState::Playing);

        // Release: fades along the release curve, then settles to silence
        handle.stop();
        shared.render_block(&mut buffer);
        assert_eq!(shared.generator().state(), GeneratorState::Releasing);

        for _ in 0..500 {
            shared.render_block(&mut buffer);
            if shared.generator().state() == GeneratorState::Idle {
                break;
            }
        }
        assert_eq!(shared.generator().state(), GeneratorState::Idle);
        shared.render_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
