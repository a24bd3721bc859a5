//! Orbiting perspective camera shared by rendering and picking.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed camera orbiting `target` on a sphere of radius `distance`.
///
/// `polar` is measured from +Y (0 = straight above, PI/2 = level).
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub auto_rotate: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: CAMERA_DISTANCE,
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            auto_rotate: CAMERA_AUTO_ROTATE,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.distance
    }

    pub fn advance(&mut self, dt_sec: f32) {
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.azimuth = (self.azimuth + self.auto_rotate * dt_sec) % std::f32::consts::TAU;
        }
    }

    /// Apply a drag of `delta_px` pixels; the polar angle stays inside its limits.
    pub fn orbit_by(&mut self, delta_px: Vec2) {
        self.azimuth -= delta_px.x * CAMERA_ORBIT_SENSITIVITY;
        self.polar = (self.polar - delta_px.y * CAMERA_ORBIT_SENSITIVITY)
            .clamp(CAMERA_MIN_POLAR, CAMERA_MAX_POLAR);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through normalized device coordinates `ndc` (x right, y up).
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> (Vec3, Vec3) {
        let inv = self.view_proj(aspect).inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let ro = self.eye();
        let rd = (p1 - p0).normalize();
        (ro, rd)
    }
}

/// Pixel position in a `width` x `height` surface to NDC.
#[inline]
pub fn pixel_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((2.0 * px.x / w) - 1.0, 1.0 - (2.0 * px.y / h))
}
