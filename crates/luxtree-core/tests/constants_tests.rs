// Host-side tests for constants and their relationships.

use luxtree_core::constants::*;
use luxtree_core::CAPTIONS;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(DEFAULT_PARTICLE_COUNT > 0);
    assert!(CUBE_MORPH_RATE > 0.0 && SPHERE_MORPH_RATE > 0.0);
    assert!(CAPTION_TIMEOUT_SEC > 0.0);
    assert!(GAIN_FLOOR > 0.0, "exponential ramps need a positive floor");
    assert!(CONFIRM_END_HZ > 0.0);
    assert!(FEEDBACK_ATTACK_SEC < FEEDBACK_LENGTH_SEC);
    assert!(CONFIRM_FADE_SEC <= CONFIRM_LENGTH_SEC);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn group_personalities_differ() {
    assert!(CUBE_MORPH_RATE > SPHERE_MORPH_RATE);
    assert!(CUBE_PITCH_BIAS > SPHERE_PITCH_BIAS);
    assert!(SPHERE_WINDING > CUBE_WINDING);
    assert!(SPHERE_BOB_AMPLITUDE > CUBE_BOB_AMPLITUDE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scale_thresholds_are_ordered() {
    assert!(0.0 < SCALE_MEDIUM_THRESHOLD && SCALE_MEDIUM_THRESHOLD < SCALE_LARGE_THRESHOLD);
    assert!(SCALE_LARGE_THRESHOLD < 1.0);
    assert!(SCALE_SMALL < SCALE_MEDIUM && SCALE_MEDIUM < SCALE_LARGE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_limits_are_sane() {
    assert!(CAMERA_MIN_POLAR > 0.0);
    assert!(CAMERA_MAX_POLAR > std::f32::consts::FRAC_PI_2);
    assert!(CAMERA_MAX_POLAR < std::f32::consts::PI);
    assert!(CAMERA_ZNEAR < CAMERA_DISTANCE && CAMERA_DISTANCE < CAMERA_ZFAR);
}

#[test]
fn srgb_conversion_endpoints() {
    assert_eq!(srgb_to_linear([0.0, 1.0, 0.0]).to_array(), [0.0, 1.0, 0.0]);
    let mid = srgb_to_linear([0.5, 0.5, 0.5]);
    assert!((mid.x - 0.214).abs() < 1e-2);
}

#[test]
fn caption_table_is_complete() {
    assert_eq!(CAPTIONS.len(), 15);
    for c in CAPTIONS {
        assert!(!c.text.is_empty());
        assert!(!c.author.is_empty());
    }
}
