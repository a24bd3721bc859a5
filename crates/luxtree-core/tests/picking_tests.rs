// Host-side tests for ray picking and the orbit camera.

use glam::{Quat, Vec2, Vec3};
use luxtree_core::constants::*;
use luxtree_core::*;

fn instance_at(pos: Vec3, scale: f32) -> InstanceData {
    InstanceData::new(pos, scale, Quat::IDENTITY, Vec3::ONE, 0.0)
}

#[test]
fn ray_sphere_basic_hit() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0);
    assert_eq!(t, Some(4.0));
}

#[test]
fn ray_sphere_miss() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 5.0), 1.0);
    assert!(t.is_none());
}

#[test]
fn ray_sphere_tangent() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(2.0, 0.0, 5.0), 2.0);
    assert_eq!(t, Some(5.0));
}

#[test]
fn ray_sphere_behind_origin_is_ignored() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0);
    assert!(t.is_none());
}

#[test]
fn pick_instance_returns_nearest() {
    let instances = [
        instance_at(Vec3::new(0.0, 0.0, -8.0), 1.0),
        instance_at(Vec3::new(0.0, 0.0, -3.0), 1.0),
        instance_at(Vec3::new(4.0, 0.0, -3.0), 1.0),
    ];
    let hit = pick_instance(Vec3::ZERO, -Vec3::Z, &instances, 0.2);
    assert_eq!(hit.map(|(i, _)| i), Some(1));
}

#[test]
fn pick_radius_scales_with_instance() {
    let off_axis = Vec3::new(0.5, 0.0, -5.0);
    let small = [instance_at(off_axis, 1.0)];
    let large = [instance_at(off_axis, 3.0)];
    assert!(pick_instance(Vec3::ZERO, -Vec3::Z, &small, 0.2).is_none());
    assert!(pick_instance(Vec3::ZERO, -Vec3::Z, &large, 0.2).is_some());
    assert!(pick_instance(Vec3::ZERO, -Vec3::Z, &[], 0.2).is_none());
}

#[test]
fn default_camera_looks_at_origin_from_front() {
    let cam = OrbitCamera::default();
    assert!((cam.eye() - Vec3::new(0.0, 0.0, CAMERA_DISTANCE)).length() < 1e-4);
    let (ro, rd) = cam.ray_from_ndc(Vec2::ZERO, 16.0 / 9.0);
    assert!((ro - cam.eye()).length() < 1e-6);
    assert!((rd - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-3);
}

#[test]
fn ndc_ray_tilts_toward_the_pointer() {
    let cam = OrbitCamera::default();
    let (_, right) = cam.ray_from_ndc(Vec2::new(0.8, 0.0), 1.0);
    let (_, up) = cam.ray_from_ndc(Vec2::new(0.0, 0.8), 1.0);
    assert!(right.x > 0.0);
    assert!(up.y > 0.0);
}

#[test]
fn pixel_to_ndc_corners() {
    assert_eq!(pixel_to_ndc(Vec2::new(50.0, 25.0), 100.0, 50.0), Vec2::ZERO);
    assert_eq!(pixel_to_ndc(Vec2::ZERO, 100.0, 50.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pixel_to_ndc(Vec2::new(100.0, 50.0), 100.0, 50.0), Vec2::new(1.0, -1.0));
    // Zero-sized surfaces do not divide by zero
    assert!(pixel_to_ndc(Vec2::new(3.0, 3.0), 0.0, 0.0).is_finite());
}

#[test]
fn orbit_keeps_polar_inside_limits() {
    let mut cam = OrbitCamera::default();
    cam.orbit_by(Vec2::new(0.0, -100_000.0));
    assert_eq!(cam.polar, CAMERA_MAX_POLAR);
    cam.orbit_by(Vec2::new(0.0, 100_000.0));
    assert_eq!(cam.polar, CAMERA_MIN_POLAR);
    assert!(cam.eye().y > 0.0);
}

#[test]
fn auto_rotate_advances_azimuth_only() {
    let mut cam = OrbitCamera::default();
    let polar = cam.polar;
    cam.advance(1.0);
    assert!((cam.azimuth - CAMERA_AUTO_ROTATE).abs() < 1e-6);
    assert_eq!(cam.polar, polar);
    cam.advance(-1.0);
    cam.advance(f32::NAN);
    assert!((cam.azimuth - CAMERA_AUTO_ROTATE).abs() < 1e-6);
    assert!((cam.eye().length() - CAMERA_DISTANCE).abs() < 1e-3);
}
