//! Per-frame animation of one instanced particle group.
//!
//! Each frame the group's morph value is smoothed toward the scene mode's
//! target, eased, and used to blend every particle between its scattered and
//! assembled position. The result is a flat `InstanceData` slice that the
//! renderer uploads as-is.

use crate::constants::*;
use crate::layout::{generate_layout, LayoutError, ParticleDescriptor, ShapeCategory};
use crate::scene::SceneMode;
use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// One instance as laid out in the GPU instance buffer.
///
/// `color.w` carries the emissive amount rather than alpha.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub scale: f32,
    pub rotation: [f32; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(position: Vec3, scale: f32, rotation: Quat, color: Vec3, emissive: f32) -> Self {
        Self {
            position: position.to_array(),
            scale,
            rotation: rotation.to_array(),
            color: [color.x, color.y, color.z, emissive],
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn rgb(&self) -> Vec3 {
        Vec3::new(self.color[0], self.color[1], self.color[2])
    }
}

/// Hermite ease on [0, 1]; inputs outside the range are clamped.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Blend progress between scattered (0) and assembled (1).
#[derive(Clone, Copy, Debug)]
pub struct MorphState {
    value: f32,
    rate: f32,
}

impl MorphState {
    pub fn new(rate: f32) -> Self {
        Self { value: 0.0, rate }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Frame-rate independent exponential approach toward `target`.
    ///
    /// The blend factor stays in [0, 1] for any non-negative `dt`, so the value
    /// never passes its target.
    pub fn step(&mut self, target: f32, dt: f32) -> f32 {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        let alpha = 1.0 - (-self.rate * dt).exp();
        let target = target.clamp(0.0, 1.0);
        self.value = (self.value + (target - self.value) * alpha).clamp(0.0, 1.0);
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BobWave {
    Sine,
    Cosine,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleBob {
    pub wave: BobWave,
    pub amplitude: f32,
}

impl IdleBob {
    #[inline]
    pub fn offset(&self, phase: f32) -> f32 {
        match self.wave {
            BobWave::Sine => phase.sin() * self.amplitude,
            BobWave::Cosine => phase.cos() * self.amplitude,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GroupConfig {
    pub shape: ShapeCategory,
    pub count: usize,
    pub morph_rate: f32,
    pub bob: IdleBob,
    /// Yaw rate of the whole group around +Y, rad/s.
    pub spin: f32,
    /// Per-axis tumble rates; x and z fade out as the tree assembles.
    pub tumble: Option<Vec3>,
    pub base_color_srgb: [f32; 3],
    pub highlight_color_srgb: [f32; 3],
    pub brightness_base: f32,
    pub brightness_span: f32,
    pub pick_radius: f32,
    pub pitch_bias: f32,
}

impl GroupConfig {
    pub fn gold_cubes() -> Self {
        Self {
            shape: ShapeCategory::Cube,
            count: DEFAULT_PARTICLE_COUNT,
            morph_rate: CUBE_MORPH_RATE,
            bob: IdleBob {
                wave: BobWave::Sine,
                amplitude: CUBE_BOB_AMPLITUDE,
            },
            spin: CUBE_GROUP_SPIN,
            tumble: Some(Vec3::from_array(CUBE_TUMBLE_RATES)),
            base_color_srgb: GOLD_SRGB,
            highlight_color_srgb: GOLD_HIGHLIGHT_SRGB,
            brightness_base: 1.0,
            brightness_span: 0.0,
            pick_radius: CUBE_PICK_RADIUS,
            pitch_bias: CUBE_PITCH_BIAS,
        }
    }

    pub fn emerald_spheres() -> Self {
        Self {
            shape: ShapeCategory::Sphere,
            count: DEFAULT_PARTICLE_COUNT,
            morph_rate: SPHERE_MORPH_RATE,
            bob: IdleBob {
                wave: BobWave::Cosine,
                amplitude: SPHERE_BOB_AMPLITUDE,
            },
            spin: 0.0,
            tumble: None,
            base_color_srgb: EMERALD_SRGB,
            highlight_color_srgb: EMERALD_HIGHLIGHT_SRGB,
            brightness_base: SPHERE_BRIGHTNESS_BASE,
            brightness_span: SPHERE_BRIGHTNESS_SPAN,
            pick_radius: SPHERE_PICK_RADIUS,
            pitch_bias: SPHERE_PITCH_BIAS,
        }
    }
}

/// `angle` reduced to one turn in f64, then narrowed.
#[inline]
pub fn wrap_turn(angle: f64) -> f32 {
    angle.rem_euclid(std::f64::consts::TAU) as f32
}

fn orientation(tumble: Option<Vec3>, seed: Vec3, elapsed: f64, eased: f32) -> Quat {
    let angles = match tumble {
        Some(rates) => {
            let settle = 1.0 - eased;
            Vec3::new(
                seed.x + wrap_turn(elapsed * f64::from(rates.x * settle)),
                seed.y + wrap_turn(elapsed * f64::from(rates.y)),
                seed.z + wrap_turn(elapsed * f64::from(rates.z * settle)),
            )
        }
        None => seed,
    };
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

pub struct ParticleGroup {
    pub config: GroupConfig,
    descriptors: Vec<ParticleDescriptor>,
    morph: MorphState,
    yaw: f32,
    base_color: Vec3,
    highlight_color: Vec3,
    instances: Vec<InstanceData>,
}

impl ParticleGroup {
    pub fn new<R: Rng + ?Sized>(config: GroupConfig, rng: &mut R) -> Result<Self, LayoutError> {
        let descriptors = generate_layout(config.count, config.shape, rng)?;
        Ok(Self {
            morph: MorphState::new(config.morph_rate),
            yaw: 0.0,
            base_color: srgb_to_linear(config.base_color_srgb),
            highlight_color: srgb_to_linear(config.highlight_color_srgb),
            instances: Vec::with_capacity(descriptors.len()),
            descriptors,
            config,
        })
    }

    /// Regenerate descriptors for a new count; morph starts over from scattered.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<(), LayoutError> {
        self.descriptors = generate_layout(count, self.config.shape, rng)?;
        self.config.count = count;
        self.morph.reset();
        self.instances.clear();
        self.instances.reserve(count);
        log::debug!("[group] rebuilt {:?} group with {} particles", self.config.shape, count);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn descriptor(&self, index: usize) -> Option<&ParticleDescriptor> {
        self.descriptors.get(index)
    }

    pub fn descriptors(&self) -> &[ParticleDescriptor] {
        &self.descriptors
    }

    pub fn morph(&self) -> f32 {
        self.morph.value()
    }

    /// Instances computed by the last `animate` call.
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    pub fn animate(
        &mut self,
        mode: SceneMode,
        dt: f32,
        elapsed: f64,
        highlight: Option<usize>,
    ) -> &[InstanceData] {
        let raw = self.morph.step(mode.morph_target(), dt);
        let eased = smoothstep(raw);
        if dt.is_finite() && dt > 0.0 {
            self.yaw = (self.yaw + self.config.spin * dt) % TAU;
        }
        let spin = Quat::from_rotation_y(self.yaw);
        let brightness = self.config.brightness_base + self.config.brightness_span * eased;
        let base = self.base_color * brightness;
        let highlight_color = self.highlight_color;
        let bob = self.config.bob;
        let tumble = self.config.tumble;

        self.instances.clear();
        for (i, d) in self.descriptors.iter().enumerate() {
            let mut pos = d.scattered_position.lerp(d.assembled_position, eased);
            pos.y += bob.offset(wrap_turn(elapsed + i as f64));
            let rotation = spin * orientation(tumble, d.rotation_seed, elapsed, eased);
            let scale = d.scale_class.multiplier();
            let instance = if highlight == Some(i) {
                InstanceData::new(
                    spin * pos,
                    scale * HIGHLIGHT_SCALE,
                    rotation,
                    highlight_color,
                    HIGHLIGHT_EMISSIVE,
                )
            } else {
                InstanceData::new(spin * pos, scale, rotation, base, 0.0)
            };
            self.instances.push(instance);
        }
        &self.instances
    }
}
