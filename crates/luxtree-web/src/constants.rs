// Rendering and pointer tuning constants for the browser front-end

// Mesh sizes (world units)
pub const CUBE_EDGE: f32 = 0.35;
pub const SPHERE_RADIUS: f32 = 0.2;
pub const SPHERE_STACKS: u32 = 16;
pub const SPHERE_SLICES: u32 = 16;
pub const DUST_STACKS: u32 = 4;
pub const DUST_SLICES: u32 = 6;

// Pointer handling
pub const TAP_SLOP_PX: f32 = 6.0; // CSS px of travel before a press becomes a drag

// Post chain
pub const EXPOSURE: f32 = 1.2;
pub const BLOOM_THRESHOLD: f32 = 0.9; // luminance above which pixels bloom
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const CHROMA_OFFSET: f32 = 0.001; // uv units
pub const GRAIN_OPACITY: f32 = 0.05;
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 1.0;

// Scene background (linear)
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
