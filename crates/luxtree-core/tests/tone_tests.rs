// Host-side tests for tone schedules.

use luxtree_core::constants::*;
use luxtree_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_schedule_is_playable(spec: &ToneSpec) {
    for points in [&spec.frequency[..], &spec.gain[..]] {
        let mut last = 0.0;
        for p in points {
            assert!(p.at_sec >= last, "automation times must not go backwards");
            assert!(p.at_sec <= spec.length_sec, "automation past oscillator stop");
            if p.ramp == Ramp::Exponential {
                assert!(p.value > 0.0, "exponential ramp target must be positive");
            }
            last = p.at_sec;
        }
    }
}

#[test]
fn feedback_frequency_stays_in_biased_band() {
    let mut rng = StdRng::seed_from_u64(99);
    for &bias in &[CUBE_PITCH_BIAS, SPHERE_PITCH_BIAS] {
        let upper = FEEDBACK_BASE_HZ + FEEDBACK_SPAN_HZ * bias;
        for _ in 0..500 {
            let hz = feedback_tone(&mut rng, bias).start_hz();
            assert!(hz >= FEEDBACK_BASE_HZ && hz <= upper, "{hz} outside band for {bias}");
        }
    }
}

#[test]
fn cube_pitch_reaches_higher_than_sphere_pitch() {
    let mut rng = StdRng::seed_from_u64(5);
    let max = |rng: &mut StdRng, bias: f32| {
        (0..1000)
            .map(|_| feedback_tone(rng, bias).start_hz())
            .fold(0.0, f32::max)
    };
    let cube = max(&mut rng, CUBE_PITCH_BIAS);
    let sphere = max(&mut rng, SPHERE_PITCH_BIAS);
    assert!(cube > FEEDBACK_BASE_HZ + FEEDBACK_SPAN_HZ * SPHERE_PITCH_BIAS);
    assert!(sphere <= FEEDBACK_BASE_HZ + FEEDBACK_SPAN_HZ * SPHERE_PITCH_BIAS);
}

#[test]
fn feedback_envelope_shape() {
    let spec = feedback_tone(&mut StdRng::seed_from_u64(1), 1.0);
    assert_eq!(spec.waveform, Waveform::Sine);
    assert_eq!(spec.length_sec, FEEDBACK_LENGTH_SEC);
    assert_eq!(spec.gain[0].value, 0.0);
    assert_eq!(spec.gain[1].at_sec, FEEDBACK_ATTACK_SEC);
    assert_eq!(spec.gain[1].ramp, Ramp::Linear);
    assert_eq!(spec.peak_gain(), FEEDBACK_PEAK_GAIN);
    let tail = spec.gain.last().unwrap();
    assert_eq!(tail.value, GAIN_FLOOR);
    assert_eq!(tail.at_sec, FEEDBACK_LENGTH_SEC);
    assert_schedule_is_playable(&spec);
}

#[test]
fn feedback_is_reproducible_with_seed() {
    let a = feedback_tone(&mut StdRng::seed_from_u64(12), 1.2);
    let b = feedback_tone(&mut StdRng::seed_from_u64(12), 1.2);
    assert_eq!(a, b);
}

#[test]
fn odd_pitch_bias_values_are_tamed() {
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(feedback_tone(&mut rng, -4.0).start_hz(), FEEDBACK_BASE_HZ);
    for _ in 0..100 {
        let hz = feedback_tone(&mut rng, f32::NAN).start_hz();
        assert!(hz.is_finite());
        assert!(hz <= FEEDBACK_BASE_HZ + FEEDBACK_SPAN_HZ);
    }
}

#[test]
fn confirmation_is_a_falling_triangle() {
    let spec = confirmation_tone();
    assert_eq!(spec.waveform, Waveform::Triangle);
    assert_eq!(spec.start_hz(), CONFIRM_START_HZ);
    assert_eq!(spec.frequency.last().unwrap().value, CONFIRM_END_HZ);
    assert_eq!(spec.peak_gain(), CONFIRM_GAIN);
    assert_eq!(spec.gain.last().unwrap().at_sec, CONFIRM_FADE_SEC);
    assert_eq!(spec.length_sec, CONFIRM_LENGTH_SEC);
    assert_schedule_is_playable(&spec);
}

#[test]
fn silent_sink_accepts_everything() {
    let mut sink = SilentSink;
    sink.play_feedback(1.2);
    sink.play_feedback(f32::NAN);
    sink.play_confirmation();
}
