use luxtree_core::{
    confirmation_tone, feedback_tone, AutomationPoint, Ramp, ToneSink, ToneSpec, Waveform,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsValue;
use web_sys as web;

/// WebAudio backend for the scene's tone sink.
///
/// Owns at most one `AudioContext`. Without one every call returns at once.
/// The context is closed when the synthesizer is released or dropped.
pub struct ToneSynthesizer {
    ctx: Option<web::AudioContext>,
    rng: StdRng,
}

impl ToneSynthesizer {
    pub fn detached() -> Self {
        Self {
            ctx: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Browsers only allow this to produce sound when called from a user gesture.
    pub fn acquire() -> Self {
        let ctx = match web::AudioContext::new() {
            Ok(ctx) => {
                log::info!("[audio] context created at {} Hz", ctx.sample_rate());
                Some(ctx)
            }
            Err(e) => {
                log::warn!("[audio] AudioContext unavailable: {:?}", e);
                None
            }
        };
        Self {
            ctx,
            rng: StdRng::from_entropy(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.ctx.is_some()
    }

    fn ready_context(&self) -> Option<&web::AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web::AudioContextState::Suspended {
            if let Err(e) = ctx.resume() {
                log::warn!("[audio] resume failed: {:?}", e);
            }
        }
        Some(ctx)
    }

    pub fn play(&self, spec: &ToneSpec) {
        let Some(ctx) = self.ready_context() else {
            return;
        };
        if let Err(e) = schedule(ctx, spec) {
            log::warn!("[audio] tone dropped: {:?}", e);
        }
    }

    pub fn release(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            let _ = ctx.close();
            log::info!("[audio] context closed");
        }
    }
}

impl Drop for ToneSynthesizer {
    fn drop(&mut self) {
        self.release();
    }
}

impl ToneSink for ToneSynthesizer {
    fn play_feedback(&mut self, pitch_bias: f32) {
        if !self.is_active() {
            return;
        }
        let spec = feedback_tone(&mut self.rng, pitch_bias);
        self.play(&spec);
    }

    fn play_confirmation(&mut self) {
        if !self.is_active() {
            return;
        }
        self.play(&confirmation_tone());
    }
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, JsValue> {
    let g = web::GainNode::new(ctx).map_err(|e| {
        log::error!("[audio] {} GainNode error: {:?}", label, e);
        e
    })?;
    g.gain().set_value(value);
    Ok(g)
}

fn apply_automation(
    param: &web::AudioParam,
    t0: f64,
    points: &[AutomationPoint],
) -> Result<(), JsValue> {
    for p in points {
        let at = t0 + p.at_sec;
        match p.ramp {
            Ramp::Set => param.set_value_at_time(p.value, at)?,
            Ramp::Linear => param.linear_ramp_to_value_at_time(p.value, at)?,
            Ramp::Exponential => param.exponential_ramp_to_value_at_time(p.value, at)?,
        };
    }
    Ok(())
}

// One oscillator and one gain per tone, both released by the graph after stop
fn schedule(ctx: &web::AudioContext, spec: &ToneSpec) -> Result<(), JsValue> {
    let src = web::OscillatorNode::new(ctx)?;
    match spec.waveform {
        Waveform::Sine => src.set_type(web::OscillatorType::Sine),
        Waveform::Triangle => src.set_type(web::OscillatorType::Triangle),
    }
    let gain = create_gain(ctx, 0.0, "tone")?;
    let now = ctx.current_time();
    apply_automation(&src.frequency(), now, &spec.frequency)?;
    apply_automation(&gain.gain(), now, &spec.gain)?;
    src.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    src.start_with_when(now)?;
    src.stop_with_when(now + spec.length_sec)?;
    Ok(())
}
