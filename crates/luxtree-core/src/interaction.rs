//! Pointer/tap routing onto per-group highlight state.

use crate::animator::ParticleGroup;
use crate::captions::Caption;
use crate::picking::InstanceHit;
use crate::tone::ToneSink;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInput {
    Enter(InstanceHit),
    Tap(InstanceHit),
    Leave { group: usize },
    BackgroundTap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Ignored,
    Highlighted { hit: InstanceHit, caption: Caption },
    Cleared { group: usize },
    DismissCaption,
}

/// Owns one highlight slot per particle group.
#[derive(Clone, Debug)]
pub struct InteractionRouter {
    highlights: SmallVec<[Option<usize>; 4]>,
}

impl InteractionRouter {
    pub fn new(group_count: usize) -> Self {
        Self {
            highlights: SmallVec::from_elem(None, group_count),
        }
    }

    pub fn highlight(&self, group: usize) -> Option<usize> {
        self.highlights.get(group).copied().flatten()
    }

    pub fn clear_group(&mut self, group: usize) {
        if let Some(slot) = self.highlights.get_mut(group) {
            *slot = None;
        }
    }

    /// Apply one input. Hits outside the current group/count are ignored
    /// without touching any state or playing anything.
    pub fn route(
        &mut self,
        input: PointerInput,
        groups: &[ParticleGroup],
        tone: &mut dyn ToneSink,
    ) -> RouteOutcome {
        match input {
            PointerInput::Enter(hit) | PointerInput::Tap(hit) => {
                let Some(group) = groups.get(hit.group) else {
                    return RouteOutcome::Ignored;
                };
                let Some(descriptor) = group.descriptor(hit.index) else {
                    return RouteOutcome::Ignored;
                };
                let Some(slot) = self.highlights.get_mut(hit.group) else {
                    return RouteOutcome::Ignored;
                };
                *slot = Some(hit.index);
                tone.play_feedback(group.config.pitch_bias);
                RouteOutcome::Highlighted {
                    hit,
                    caption: descriptor.caption,
                }
            }
            PointerInput::Leave { group } => match self.highlights.get_mut(group) {
                Some(slot) => {
                    *slot = None;
                    RouteOutcome::Cleared { group }
                }
                None => RouteOutcome::Ignored,
            },
            PointerInput::BackgroundTap => RouteOutcome::DismissCaption,
        }
    }
}

/// Turns a stream of per-move hover hits into enter/leave transitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoverTracker {
    current: Option<InstanceHit>,
}

impl HoverTracker {
    pub fn current(&self) -> Option<InstanceHit> {
        self.current
    }

    pub fn update(&mut self, hit: Option<InstanceHit>) -> SmallVec<[PointerInput; 2]> {
        let mut out = SmallVec::new();
        if hit == self.current {
            return out;
        }
        if let Some(prev) = self.current {
            out.push(PointerInput::Leave { group: prev.group });
        }
        if let Some(next) = hit {
            out.push(PointerInput::Enter(next));
        }
        self.current = hit;
        out
    }

    /// A tap on `hit`. The tapped particle becomes the tracked one, so the
    /// pointer-leave that follows a touch clears its highlight.
    pub fn tap(&mut self, hit: InstanceHit) -> SmallVec<[PointerInput; 2]> {
        let mut out = SmallVec::new();
        if let Some(prev) = self.current.filter(|prev| *prev != hit) {
            out.push(PointerInput::Leave { group: prev.group });
        }
        out.push(PointerInput::Tap(hit));
        self.current = Some(hit);
        out
    }

    /// Pointer left the surface entirely.
    pub fn reset(&mut self) -> Option<PointerInput> {
        self.current
            .take()
            .map(|prev| PointerInput::Leave { group: prev.group })
    }
}
