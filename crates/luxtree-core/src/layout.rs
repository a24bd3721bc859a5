//! Static per-particle descriptors for one particle group.
//!
//! The assembled (tree) position is a pure function of `(index, count, shape)`;
//! everything randomized is drawn from the caller's RNG so tests can pass a
//! seeded `StdRng` and assert exact output.

use crate::captions::{caption_for_index, Caption};
use crate::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Cube,
    Sphere,
}

impl ShapeCategory {
    /// Spiral winding in half-turns from tip to base.
    pub fn winding(self) -> f32 {
        match self {
            ShapeCategory::Cube => CUBE_WINDING,
            ShapeCategory::Sphere => SPHERE_WINDING,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleClass {
    Small,
    Medium,
    Large,
}

impl ScaleClass {
    /// Map a uniform draw in [0, 1) onto the weighted classes.
    pub fn from_draw(u: f32) -> Self {
        if u > SCALE_LARGE_THRESHOLD {
            ScaleClass::Large
        } else if u > SCALE_MEDIUM_THRESHOLD {
            ScaleClass::Medium
        } else {
            ScaleClass::Small
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            ScaleClass::Small => SCALE_SMALL,
            ScaleClass::Medium => SCALE_MEDIUM,
            ScaleClass::Large => SCALE_LARGE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleDescriptor {
    pub scattered_position: Vec3,
    pub assembled_position: Vec3,
    pub rotation_seed: Vec3,
    pub scale_class: ScaleClass,
    pub caption: Caption,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("particle group must contain at least one particle")]
    EmptyGroup,
}

/// Point on the tree spiral for particle `index` of `count`.
///
/// Angle grows with progress times the shape's winding, radius widens
/// linearly from [`TREE_MIN_RADIUS`], height falls linearly from the tip.
pub fn spiral_position(index: usize, count: usize, shape: ShapeCategory) -> Vec3 {
    let t = if count == 0 {
        0.0
    } else {
        index as f32 / count as f32
    };
    let angle = t * PI * shape.winding();
    let radius = TREE_MIN_RADIUS + t * TREE_RADIUS_SPAN;
    let y = (1.0 - t) * TREE_HEIGHT + TREE_BASE_Y;
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

fn scatter_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * SCATTER_EXTENT[0],
        (rng.gen::<f32>() - 0.5) * SCATTER_EXTENT[1],
        (rng.gen::<f32>() - 0.5) * SCATTER_EXTENT[2],
    )
}

pub fn generate_layout<R: Rng + ?Sized>(
    count: usize,
    shape: ShapeCategory,
    rng: &mut R,
) -> Result<Vec<ParticleDescriptor>, LayoutError> {
    if count == 0 {
        return Err(LayoutError::EmptyGroup);
    }
    let descriptors = (0..count)
        .map(|i| {
            let scattered_position = scatter_position(rng);
            let rotation_seed = Vec3::new(
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
            );
            let scale_class = ScaleClass::from_draw(rng.gen::<f32>());
            ParticleDescriptor {
                scattered_position,
                assembled_position: spiral_position(i, count, shape),
                rotation_seed,
                scale_class,
                caption: caption_for_index(i),
            }
        })
        .collect::<Vec<_>>();
    log::debug!("[layout] generated {} {:?} descriptors", count, shape);
    Ok(descriptors)
}
