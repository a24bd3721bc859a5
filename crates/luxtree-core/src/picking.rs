use crate::animator::{InstanceData, ParticleGroup};
use glam::Vec3;

/// Which group and instance a pointer resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceHit {
    pub group: usize,
    pub index: usize,
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest instance along the ray, as `(index, distance)`.
pub fn pick_instance(
    ray_origin: Vec3,
    ray_dir: Vec3,
    instances: &[InstanceData],
    pick_radius: f32,
) -> Option<(usize, f32)> {
    let mut best = None::<(usize, f32)>;
    for (i, inst) in instances.iter().enumerate() {
        let radius = pick_radius * inst.scale;
        if let Some(t) = ray_sphere(ray_origin, ray_dir, inst.position(), radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}

/// Nearest instance across all groups; groups that have not animated yet
/// have no instances and are never hit.
pub fn pick_nearest(
    ray_origin: Vec3,
    ray_dir: Vec3,
    groups: &[ParticleGroup],
) -> Option<InstanceHit> {
    let mut best = None::<(InstanceHit, f32)>;
    for (g, group) in groups.iter().enumerate() {
        let found = pick_instance(ray_origin, ray_dir, group.instances(), group.config.pick_radius);
        if let Some((index, t)) = found {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((InstanceHit { group: g, index }, t)),
            }
        }
    }
    best.map(|(hit, _)| hit)
}
