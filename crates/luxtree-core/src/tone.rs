//! Platform-free descriptions of the two feedback tones.
//!
//! A `ToneSpec` is a schedule relative to "now": oscillator shape, a frequency
//! path and gain automation points. Audio backends turn it into real nodes.

use crate::constants::*;
use rand::Rng;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ramp {
    /// Jump to the value at `at_sec`.
    Set,
    Linear,
    Exponential,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutomationPoint {
    pub at_sec: f64,
    pub value: f32,
    pub ramp: Ramp,
}

impl AutomationPoint {
    const fn new(at_sec: f64, value: f32, ramp: Ramp) -> Self {
        Self { at_sec, value, ramp }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub frequency: SmallVec<[AutomationPoint; 2]>,
    pub gain: SmallVec<[AutomationPoint; 3]>,
    /// Oscillator stop time; no node outlives this.
    pub length_sec: f64,
}

impl ToneSpec {
    pub fn start_hz(&self) -> f32 {
        self.frequency.first().map(|p| p.value).unwrap_or(0.0)
    }

    pub fn peak_gain(&self) -> f32 {
        self.gain.iter().map(|p| p.value).fold(0.0, f32::max)
    }
}

/// Short sine chime for hover/tap. Frequency is `base + u * span * pitch_bias`.
pub fn feedback_tone<R: Rng + ?Sized>(rng: &mut R, pitch_bias: f32) -> ToneSpec {
    let bias = if pitch_bias.is_finite() {
        pitch_bias.max(0.0)
    } else {
        1.0
    };
    let hz = FEEDBACK_BASE_HZ + rng.gen::<f32>() * FEEDBACK_SPAN_HZ * bias;
    ToneSpec {
        waveform: Waveform::Sine,
        frequency: smallvec![AutomationPoint::new(0.0, hz, Ramp::Set)],
        gain: smallvec![
            AutomationPoint::new(0.0, 0.0, Ramp::Set),
            AutomationPoint::new(FEEDBACK_ATTACK_SEC, FEEDBACK_PEAK_GAIN, Ramp::Linear),
            AutomationPoint::new(FEEDBACK_LENGTH_SEC, GAIN_FLOOR, Ramp::Exponential),
        ],
        length_sec: FEEDBACK_LENGTH_SEC,
    }
}

/// Low triangle thud with a falling pitch, used for mode toggles.
pub fn confirmation_tone() -> ToneSpec {
    ToneSpec {
        waveform: Waveform::Triangle,
        frequency: smallvec![
            AutomationPoint::new(0.0, CONFIRM_START_HZ, Ramp::Set),
            AutomationPoint::new(CONFIRM_LENGTH_SEC, CONFIRM_END_HZ, Ramp::Exponential),
        ],
        gain: smallvec![
            AutomationPoint::new(0.0, CONFIRM_GAIN, Ramp::Set),
            AutomationPoint::new(CONFIRM_FADE_SEC, GAIN_FLOOR, Ramp::Exponential),
        ],
        length_sec: CONFIRM_LENGTH_SEC,
    }
}

/// Fire-and-forget tone output. Implementations must return immediately and
/// silently do nothing when no audio output is available.
pub trait ToneSink {
    fn play_feedback(&mut self, pitch_bias: f32);
    fn play_confirmation(&mut self);
}

/// Sink that drops everything; used before audio exists and in headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn play_feedback(&mut self, _pitch_bias: f32) {}
    fn play_confirmation(&mut self) {}
}
