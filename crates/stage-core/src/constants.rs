// Shared scene, carousel and timeline tuning constants used by the web frontend.

// Scene layout
pub const OBJECT_COUNT: usize = 15;
pub const PARTICLE_COUNT: usize = 1000;
pub const OBJECT_SPREAD: [f32; 3] = [100.0, 50.0, 100.0]; // placement box for shapes
pub const PARTICLE_SPREAD: f32 = 200.0; // edge of the particle cube
pub const PARTICLE_SIZE: f32 = 0.5;
pub const PARTICLE_OPACITY: f32 = 0.8;

// Ground grid
pub const GRID_SIZE: f32 = 200.0;
pub const GRID_DIVISIONS: u32 = 50;
pub const GRID_Y: f32 = -50.0;
pub const GRID_COLOR: u32 = 0x00ffff;
pub const GRID_OPACITY: f32 = 0.2;

// Materials
pub const PALETTE: [u32; 5] = [0xff0080, 0x00ffff, 0x00ff41, 0xff4000, 0x8000ff];
pub const EMISSIVE_INTENSITY: f32 = 0.3;
pub const OBJECT_OPACITY: f32 = 0.8;

// Light rig
pub const AMBIENT_COLOR: u32 = 0x404040;
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const DIRECTIONAL_COLOR: u32 = 0x00ffff;
pub const DIRECTIONAL_POSITION: [f32; 3] = [10.0, 10.0, 5.0];
pub const POINT_LIGHTS: [(u32, [f32; 3]); 2] = [
    (0xff0080, [50.0, 50.0, 50.0]),   // magenta key
    (0x00ff41, [-50.0, 50.0, -50.0]), // green rim
];
pub const POINT_LIGHT_INTENSITY: f32 = 2.0;
pub const POINT_LIGHT_RANGE: f32 = 100.0;

// Per-frame motion
pub const ROTATION_STEP: f32 = 0.005; // radians per frame for object 0
pub const ROTATION_STEP_PER_INDEX: f32 = 0.001; // extra radians per frame per object index
pub const BOB_AMPLITUDE: f32 = 0.5; // world units of vertical bob
pub const BOB_RATE_PER_MS: f64 = 0.001;
pub const PARTICLE_SPIN_STEP: f32 = 0.001;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_BASE_Z: f32 = 50.0;
pub const CAMERA_SCROLL_Z: f32 = 0.01; // z units per scrolled pixel
pub const CAMERA_SCROLL_PITCH: f32 = 0.0001; // radians per scrolled pixel
pub const CAMERA_POINTER_RANGE: f32 = 5.0; // world units at full pointer deflection
pub const CAMERA_SMOOTHING: f32 = 0.05; // fraction of remaining distance per frame

// Carousel
pub const CAROUSEL_RADIUS: f32 = 8.0;
pub const CARD_SIZE: [f32; 2] = [4.0, 5.0];
pub const GLOW_SIZE: [f32; 2] = [4.2, 5.2];
pub const GLOW_DEPTH_OFFSET: f32 = 0.01;
pub const CARD_OPACITY: f32 = 0.8;
pub const GLOW_OPACITY: f32 = 0.2;
pub const FOCUS_SCALE: f32 = 1.1;
pub const FOCUS_LIFT: f32 = 0.5;
pub const CAROUSEL_SPIN_STEP: f32 = 0.005;
pub const CAROUSEL_CAMERA_Z: f32 = 15.0;
pub const AUTO_ADVANCE_MS: f64 = 4000.0;
pub const SELECT_COOLDOWN_MS: f64 = 10_000.0;

// Visibility-gated entrances
pub const VISIBILITY_THRESHOLD: f64 = 0.3;
pub const HERO_INTRO_DELAY_MS: f64 = 1000.0;

// Cursor trail
pub const TRAIL_SPAWN_PER_MOVE: usize = 3;
pub const TRAIL_MAX_PARTICLES: usize = 200;
pub const TRAIL_JITTER_PX: f32 = 10.0;
pub const TRAIL_MAX_SPEED: f32 = 2.0;
pub const TRAIL_DRAG: f32 = 0.99;
pub const TRAIL_LIFE_DECAY: f32 = 0.02;
pub const TRAIL_RADIUS_PX: f32 = 3.0;
