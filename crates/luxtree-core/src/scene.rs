//! Top-level scene controller: lifecycle, mode, groups and captions.
//!
//! Everything here runs on the single UI/render thread. Input handlers call
//! `handle_pointer`/`toggle_mode`, the frame callback calls `frame`, and
//! nothing else mutates scene state.

use crate::animator::{GroupConfig, ParticleGroup};
use crate::caption::CaptionBoard;
use crate::captions::Caption;
use crate::constants::{CAPTION_TIMEOUT_SEC, DUST_COUNT};
use crate::dust::DustField;
use crate::interaction::{InteractionRouter, PointerInput, RouteOutcome};
use crate::layout::LayoutError;
use crate::picking::{pick_nearest, InstanceHit};
use crate::tone::ToneSink;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    Assembled,
    Scattered,
}

impl SceneMode {
    #[inline]
    pub fn morph_target(self) -> f32 {
        match self {
            SceneMode::Assembled => 1.0,
            SceneMode::Scattered => 0.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SceneMode::Assembled => SceneMode::Scattered,
            SceneMode::Scattered => SceneMode::Assembled,
        }
    }

    /// Label for the control that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            SceneMode::Assembled => "DISPERSE",
            SceneMode::Scattered => "ASSEMBLE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    NotStarted,
    Started,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub groups: Vec<GroupConfig>,
    pub caption_timeout_sec: f64,
    pub dust_count: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            groups: vec![GroupConfig::gold_cubes(), GroupConfig::emerald_spheres()],
            caption_timeout_sec: CAPTION_TIMEOUT_SEC,
            dust_count: DUST_COUNT,
        }
    }
}

pub struct Scene {
    lifecycle: Lifecycle,
    mode: SceneMode,
    groups: Vec<ParticleGroup>,
    dust: DustField,
    router: InteractionRouter,
    captions: CaptionBoard,
    elapsed: f64,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Self, LayoutError> {
        let groups = config
            .groups
            .iter()
            .cloned()
            .map(|g| ParticleGroup::new(g, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            lifecycle: Lifecycle::NotStarted,
            mode: SceneMode::Scattered,
            router: InteractionRouter::new(groups.len()),
            dust: DustField::new(config.dust_count, rng),
            groups,
            captions: CaptionBoard::new(config.caption_timeout_sec),
            elapsed: 0.0,
        })
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.lifecycle == Lifecycle::Started
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn group(&self, group: usize) -> Option<&ParticleGroup> {
        self.groups.get(group)
    }

    pub fn dust(&self) -> &DustField {
        &self.dust
    }

    pub fn highlight(&self, group: usize) -> Option<usize> {
        self.router.highlight(group)
    }

    pub fn captions(&self) -> &CaptionBoard {
        &self.captions
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.captions.current()
    }

    /// One-way `NotStarted -> Started`. Returns true only on the transition.
    pub fn start(&mut self) -> bool {
        if self.is_started() {
            return false;
        }
        self.lifecycle = Lifecycle::Started;
        log::info!("[scene] started with {} groups", self.groups.len());
        true
    }

    pub fn toggle_mode(&mut self, tone: &mut dyn ToneSink) -> Option<SceneMode> {
        if !self.is_started() {
            return None;
        }
        tone.play_confirmation();
        self.mode = self.mode.toggled();
        log::info!("[scene] mode -> {:?}", self.mode);
        Some(self.mode)
    }

    pub fn handle_pointer(
        &mut self,
        input: PointerInput,
        now: f64,
        tone: &mut dyn ToneSink,
    ) -> RouteOutcome {
        if !self.is_started() {
            return RouteOutcome::Ignored;
        }
        let outcome = self.router.route(input, &self.groups, tone);
        match outcome {
            RouteOutcome::Highlighted { caption, .. } => self.captions.show(caption, now),
            RouteOutcome::DismissCaption => self.captions.dismiss(),
            RouteOutcome::Cleared { .. } | RouteOutcome::Ignored => {}
        }
        outcome
    }

    /// Resolve a world-space ray against what was drawn last frame.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<InstanceHit> {
        if !self.is_started() {
            return None;
        }
        pick_nearest(ray_origin, ray_dir, &self.groups)
    }

    /// Per-frame step. Caption expiry always runs; animation only once started.
    pub fn frame(&mut self, dt_sec: f32, now: f64) {
        self.captions.tick(now);
        if !self.is_started() {
            return;
        }
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.elapsed += f64::from(dt_sec);
        }
        let mode = self.mode;
        let elapsed = self.elapsed;
        for (i, group) in self.groups.iter_mut().enumerate() {
            group.animate(mode, dt_sec, elapsed, self.router.highlight(i));
        }
        self.dust.animate(elapsed);
    }

    /// Recreate one group's descriptors; its morph and highlight start over.
    /// Returns `Ok(false)` if `group` does not exist.
    pub fn resize_group<R: Rng + ?Sized>(
        &mut self,
        group: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<bool, LayoutError> {
        let Some(g) = self.groups.get_mut(group) else {
            return Ok(false);
        };
        g.rebuild(count, rng)?;
        self.router.clear_group(group);
        Ok(true)
    }
}
