// Host-side tests for morph smoothing and per-frame instance output.

use luxtree_core::constants::*;
use luxtree_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: f32 = 1.0 / 60.0;

fn group(config: GroupConfig) -> ParticleGroup {
    ParticleGroup::new(config, &mut StdRng::seed_from_u64(11)).unwrap()
}

fn small(mut config: GroupConfig, count: usize) -> GroupConfig {
    config.count = count;
    config
}

#[test]
fn smoothstep_endpoints_and_clamp() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(smoothstep(-3.0), 0.0);
    assert_eq!(smoothstep(7.0), 1.0);
    assert!(smoothstep(0.25) < 0.25);
    assert!(smoothstep(0.75) > 0.75);
}

#[test]
fn morph_never_overshoots_for_any_dt() {
    let dts = [0.0, FRAME, 0.5, 3.0, 0.001, 100.0, 1e9, f32::INFINITY];
    let mut m = MorphState::new(CUBE_MORPH_RATE);
    let mut prev = m.value();
    for dt in dts {
        let v = m.step(1.0, dt);
        assert!((0.0..=1.0).contains(&v), "out of range for dt {dt}: {v}");
        assert!(v >= prev, "moved away from target for dt {dt}");
        prev = v;
    }
    assert_eq!(m.value(), 1.0);

    for dt in dts {
        let v = m.step(0.0, dt);
        assert!((0.0..=1.0).contains(&v));
        assert!(v <= prev);
        prev = v;
    }
    assert_eq!(m.value(), 0.0);
}

#[test]
fn morph_ignores_negative_and_nan_dt() {
    let mut m = MorphState::new(SPHERE_MORPH_RATE);
    m.step(1.0, 0.5);
    let before = m.value();
    assert_eq!(m.step(0.0, -1.0), before);
    assert_eq!(m.step(0.0, f32::NAN), before);
}

#[test]
fn morph_rapid_toggling_stays_in_range_and_converges_to_last_target() {
    let mut m = MorphState::new(CUBE_MORPH_RATE);
    for i in 0..200 {
        let target = if i % 2 == 0 { 1.0 } else { 0.0 };
        let v = m.step(target, FRAME);
        assert!((0.0..=1.0).contains(&v));
    }
    // Last set target is "scattered"
    for _ in 0..600 {
        m.step(0.0, FRAME);
    }
    assert!(m.value() < 1e-3, "did not converge: {}", m.value());
}

#[test]
fn morph_is_frame_rate_independent() {
    let mut coarse = MorphState::new(SPHERE_MORPH_RATE);
    let mut fine = MorphState::new(SPHERE_MORPH_RATE);
    for _ in 0..30 {
        coarse.step(1.0, 2.0 * FRAME);
    }
    for _ in 0..60 {
        fine.step(1.0, FRAME);
    }
    assert!((coarse.value() - fine.value()).abs() < 1e-4);
}

#[test]
fn cube_group_leads_sphere_group() {
    let mut cubes = group(small(GroupConfig::gold_cubes(), 8));
    let mut spheres = group(small(GroupConfig::emerald_spheres(), 8));
    for i in 0..30 {
        let t = f64::from(i as f32 * FRAME);
        cubes.animate(SceneMode::Assembled, FRAME, t, None);
        spheres.animate(SceneMode::Assembled, FRAME, t, None);
    }
    assert!(cubes.morph() > spheres.morph());
}

#[test]
fn scattered_frame_places_particles_at_scatter_plus_bob() {
    let mut g = group(small(GroupConfig::gold_cubes(), 10));
    let out = g.animate(SceneMode::Scattered, 0.0, 0.0, None).to_vec();
    assert_eq!(out.len(), 10);
    for (i, inst) in out.iter().enumerate() {
        let d = g.descriptor(i).unwrap();
        let expected = d.scattered_position
            + glam::Vec3::new(0.0, (i as f32).sin() * CUBE_BOB_AMPLITUDE, 0.0);
        assert!(
            (inst.position() - expected).length() < 1e-4,
            "instance {i} at {:?}, expected {:?}",
            inst.position(),
            expected
        );
        assert_eq!(inst.scale, d.scale_class.multiplier());
    }
}

#[test]
fn assembled_spheres_converge_to_tree_plus_bob() {
    let mut g = group(small(GroupConfig::emerald_spheres(), 12));
    for _ in 0..1200 {
        g.animate(SceneMode::Assembled, FRAME, 0.0, None);
    }
    let out = g.animate(SceneMode::Assembled, FRAME, 0.0, None).to_vec();
    for (i, inst) in out.iter().enumerate() {
        let d = g.descriptor(i).unwrap();
        let expected = d.assembled_position
            + glam::Vec3::new(0.0, (i as f32).cos() * SPHERE_BOB_AMPLITUDE, 0.0);
        assert!((inst.position() - expected).length() < 1e-3);
    }
}

#[test]
fn highlighted_instance_is_doubled_and_recolored() {
    let mut g = group(small(GroupConfig::gold_cubes(), 6));
    let out = g.animate(SceneMode::Scattered, FRAME, 1.0, Some(3)).to_vec();
    let base = srgb_to_linear(GOLD_SRGB);
    let highlight = srgb_to_linear(GOLD_HIGHLIGHT_SRGB);
    for (i, inst) in out.iter().enumerate() {
        let d = g.descriptor(i).unwrap();
        if i == 3 {
            assert_eq!(inst.scale, d.scale_class.multiplier() * HIGHLIGHT_SCALE);
            assert!((inst.rgb() - highlight).length() < 1e-6);
            assert_eq!(inst.color[3], HIGHLIGHT_EMISSIVE);
        } else {
            assert_eq!(inst.scale, d.scale_class.multiplier());
            assert!((inst.rgb() - base).length() < 1e-6);
            assert_eq!(inst.color[3], 0.0);
        }
    }
}

#[test]
fn highlight_out_of_range_changes_nothing() {
    let mut g = group(small(GroupConfig::gold_cubes(), 4));
    let plain = g.animate(SceneMode::Scattered, 0.0, 0.0, None).to_vec();
    let with_bogus = g.animate(SceneMode::Scattered, 0.0, 0.0, Some(99)).to_vec();
    assert_eq!(plain, with_bogus);
}

#[test]
fn sphere_brightness_rises_with_assembly() {
    let mut g = group(small(GroupConfig::emerald_spheres(), 3));
    let base = srgb_to_linear(EMERALD_SRGB);
    let scattered = g.animate(SceneMode::Scattered, FRAME, 0.0, None)[0].rgb();
    assert!((scattered - base * SPHERE_BRIGHTNESS_BASE).length() < 1e-6);
    for _ in 0..1200 {
        g.animate(SceneMode::Assembled, FRAME, 0.0, None);
    }
    let assembled = g.animate(SceneMode::Assembled, FRAME, 0.0, None)[0].rgb();
    let full = base * (SPHERE_BRIGHTNESS_BASE + SPHERE_BRIGHTNESS_SPAN);
    assert!((assembled - full).length() < 1e-4);
}

#[test]
fn rebuild_resets_morph_and_count() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut g = ParticleGroup::new(small(GroupConfig::gold_cubes(), 20), &mut rng).unwrap();
    for _ in 0..60 {
        g.animate(SceneMode::Assembled, FRAME, 0.0, None);
    }
    assert!(g.morph() > 0.0);
    g.rebuild(5, &mut rng).unwrap();
    assert_eq!(g.len(), 5);
    assert_eq!(g.morph(), 0.0);
    assert!(g.instances().is_empty());
    assert_eq!(g.animate(SceneMode::Assembled, FRAME, 0.0, None).len(), 5);
    assert_eq!(g.rebuild(0, &mut rng), Err(LayoutError::EmptyGroup));
}

#[test]
fn instance_layout_matches_gpu_stride() {
    assert_eq!(std::mem::size_of::<InstanceData>(), 48);
    let mut g = group(small(GroupConfig::emerald_spheres(), 2));
    let out = g.animate(SceneMode::Scattered, FRAME, 0.0, None);
    let bytes: &[u8] = bytemuck::cast_slice(out);
    assert_eq!(bytes.len(), 96);
}

#[test]
fn idle_motion_keeps_precision_after_hours() {
    let mut g = group(small(GroupConfig::emerald_spheres(), 16));
    let start = g.animate(SceneMode::Scattered, 0.0, 0.0, None).to_vec();
    // a whole number of turns, about eleven days in
    let later = std::f64::consts::TAU * 150_000.0;
    let out = g.animate(SceneMode::Scattered, 0.0, later, None).to_vec();
    for (a, b) in start.iter().zip(&out) {
        assert!(
            (a.position() - b.position()).length() < 1e-4,
            "{:?} drifted to {:?}",
            a.position(),
            b.position()
        );
    }
}

#[test]
fn wrap_turn_stays_within_one_turn() {
    assert_eq!(wrap_turn(0.0), 0.0);
    assert!((wrap_turn(std::f64::consts::PI) - std::f32::consts::PI).abs() < 1e-6);
    assert!((wrap_turn(-1.0) - (std::f32::consts::TAU - 1.0)).abs() < 1e-5);
    let big = wrap_turn(1.0e9);
    assert!((0.0..std::f32::consts::TAU).contains(&big));
    assert!((big - (1.0e9_f64 % std::f64::consts::TAU) as f32).abs() < 1e-5);
}

#[test]
fn dust_stays_in_its_cube_for_long_sessions() {
    let mut dust = DustField::new(64, &mut StdRng::seed_from_u64(5));
    let half = DUST_EXTENT * 0.5;
    for elapsed in [0.0, 12.5, 3_600.0 * 24.0, 1.0e9] {
        for inst in dust.animate(elapsed) {
            let p = inst.position();
            assert!(p.is_finite());
            assert!(p.y >= -half && p.y <= half, "mote at {p:?} for t={elapsed}");
            assert!(inst.scale > 0.0 && inst.scale <= DUST_SIZE * 1.0001);
        }
    }
}
