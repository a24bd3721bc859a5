//! Ambient gold motes drifting through the scene. Not interactive.

use crate::animator::{wrap_turn, InstanceData};
use crate::constants::*;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
struct Mote {
    origin: Vec3,
    phase: f32,
    speed: f32,
}

pub struct DustField {
    motes: Vec<Mote>,
    color: Vec3,
    instances: Vec<InstanceData>,
}

impl DustField {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let half = DUST_EXTENT * 0.5;
        let motes = (0..count)
            .map(|_| Mote {
                origin: Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ),
                phase: rng.gen::<f32>() * TAU,
                speed: 0.5 + rng.gen::<f32>(),
            })
            .collect::<Vec<_>>();
        Self {
            instances: Vec::with_capacity(motes.len()),
            motes,
            color: srgb_to_linear(GOLD_SRGB),
        }
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// Positions wrap vertically so the field stays inside its cube.
    pub fn animate(&mut self, elapsed: f64) -> &[InstanceData] {
        let half = DUST_EXTENT * 0.5;
        self.instances.clear();
        for m in &self.motes {
            let rise = elapsed * f64::from(DUST_RISE_SPEED * m.speed);
            let y = (f64::from(m.origin.y + half) + rise).rem_euclid(f64::from(DUST_EXTENT)) as f32 - half;
            let twinkle = 0.5 + 0.5 * (wrap_turn(elapsed * f64::from(2.0 * m.speed)) + m.phase).sin();
            let pos = Vec3::new(m.origin.x, y, m.origin.z);
            self.instances.push(InstanceData::new(
                pos,
                DUST_SIZE * (0.4 + 0.6 * twinkle),
                Quat::IDENTITY,
                self.color * twinkle,
                DUST_EMISSIVE * twinkle,
            ));
        }
        &self.instances
    }
}
