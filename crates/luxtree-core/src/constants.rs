use glam::Vec3;

// Shared visual/audio tuning constants for the scene core.

// Particle groups
pub const DEFAULT_PARTICLE_COUNT: usize = 400; // particles per group
pub const CUBE_WINDING: f32 = 25.0; // half-turns of the cube spiral, top to bottom
pub const SPHERE_WINDING: f32 = 35.0; // half-turns of the sphere spiral

// Assembled (tree) silhouette
pub const TREE_MIN_RADIUS: f32 = 0.1; // spiral radius at the tip
pub const TREE_RADIUS_SPAN: f32 = 4.5; // added radius at the base
pub const TREE_HEIGHT: f32 = 10.0; // tip-to-base height
pub const TREE_BASE_Y: f32 = -5.0; // y of the lowest particle

// Scattered cloud bounding box (full extent per axis)
pub const SCATTER_EXTENT: [f32; 3] = [30.0, 25.0, 20.0];

// Scale classes: draw thresholds and render multipliers
pub const SCALE_LARGE_THRESHOLD: f32 = 0.9; // draws above this are large (~10%)
pub const SCALE_MEDIUM_THRESHOLD: f32 = 0.6; // draws above this are medium (~30%)
pub const SCALE_LARGE: f32 = 1.5;
pub const SCALE_MEDIUM: f32 = 0.8;
pub const SCALE_SMALL: f32 = 0.4;

// Morph smoothing rates (1/s); cubes lead, spheres trail
pub const CUBE_MORPH_RATE: f32 = 1.5;
pub const SPHERE_MORPH_RATE: f32 = 1.2;

// Idle motion
pub const CUBE_BOB_AMPLITUDE: f32 = 0.05;
pub const SPHERE_BOB_AMPLITUDE: f32 = 0.08;
pub const CUBE_GROUP_SPIN: f32 = 0.05; // rad/s yaw of the whole cube group
pub const CUBE_TUMBLE_RATES: [f32; 3] = [0.5, 0.3, 0.5]; // rad/s per axis

// Highlight
pub const HIGHLIGHT_SCALE: f32 = 2.0;
pub const HIGHLIGHT_EMISSIVE: f32 = 0.6;

// Palette (sRGB hex components)
pub const GOLD_SRGB: [f32; 3] = [1.0, 0.784, 0.0]; // #FFC800
pub const GOLD_HIGHLIGHT_SRGB: [f32; 3] = [1.0, 1.0, 1.0]; // #FFFFFF
pub const EMERALD_SRGB: [f32; 3] = [0.043, 0.275, 0.157]; // #0B4628
pub const EMERALD_HIGHLIGHT_SRGB: [f32; 3] = [0.31, 1.0, 0.69]; // #4FFFB0

// Sphere group brightens as the tree assembles
pub const SPHERE_BRIGHTNESS_BASE: f32 = 0.8;
pub const SPHERE_BRIGHTNESS_SPAN: f32 = 0.5;

// Picking: bounding-sphere radius of one unit-scale instance
pub const CUBE_PICK_RADIUS: f32 = 0.2; // 0.35 box edge
pub const SPHERE_PICK_RADIUS: f32 = 0.2;

// Feedback pitch bias per group
pub const CUBE_PITCH_BIAS: f32 = 1.2;
pub const SPHERE_PITCH_BIAS: f32 = 0.8;

// Feedback tone (hover/tap): sine, frequency drawn from base + span * bias
pub const FEEDBACK_BASE_HZ: f32 = 600.0;
pub const FEEDBACK_SPAN_HZ: f32 = 800.0;
pub const FEEDBACK_PEAK_GAIN: f32 = 0.1;
pub const FEEDBACK_ATTACK_SEC: f64 = 0.05;
pub const FEEDBACK_LENGTH_SEC: f64 = 1.5;

// Confirmation tone (mode toggle): triangle, descending sweep
pub const CONFIRM_START_HZ: f32 = 100.0;
pub const CONFIRM_END_HZ: f32 = 0.01;
pub const CONFIRM_GAIN: f32 = 0.5;
pub const CONFIRM_FADE_SEC: f64 = 1.0;
pub const CONFIRM_LENGTH_SEC: f64 = 1.5;

// Exponential ramps cannot reach zero; this is "silent"
pub const GAIN_FLOOR: f32 = 0.001;

// Caption display
pub const CAPTION_TIMEOUT_SEC: f64 = 3.5;

// Dust field
pub const DUST_COUNT: usize = 400;
pub const DUST_EXTENT: f32 = 20.0; // cube edge centred on the origin
pub const DUST_RISE_SPEED: f32 = 0.4; // units/s
pub const DUST_SIZE: f32 = 0.06;
pub const DUST_EMISSIVE: f32 = 0.8;

// Camera
pub const CAMERA_DISTANCE: f32 = 16.0;
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const CAMERA_AUTO_ROTATE: f32 = 0.052; // rad/s, a full orbit every two minutes
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::PI / 1.6; // lowest allowed viewpoint
pub const CAMERA_MIN_POLAR: f32 = 0.05;
pub const CAMERA_ORBIT_SENSITIVITY: f32 = 0.005; // rad per pixel of drag

#[inline]
pub fn srgb_to_linear(c: [f32; 3]) -> Vec3 {
    let f = |v: f32| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(f(c[0]), f(c[1]), f(c[2]))
}
