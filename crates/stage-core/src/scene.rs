//! Background scene graph: camera, light rig, floating shapes, particle cloud
//! and ground grid.
//!
//! Construction is the only place randomness is used. Afterwards the object
//! list and the particle buffers never change size; the loop driver only
//! rewrites transforms.

use crate::camera::Camera;
use crate::color::{hex_to_rgb, hsl_to_rgb};
use crate::constants::*;
use crate::mesh::Geometry;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;

/// Inverse golden ratio; stepping hue by this never lands twice on the same
/// value and keeps neighbours far apart on the color wheel.
const HUE_STEP: f32 = 0.618_034;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderableObject {
    pub geometry: Geometry,
    pub material: Material,
    /// Placement chosen at build time; the bob is applied relative to it.
    pub base_position: Vec3,
    pub base_rotation: Vec3,
    pub position: Vec3,
    pub rotation: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub range: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: Vec3,
    pub ambient_intensity: f32,
    pub directional_color: Vec3,
    pub directional_intensity: f32,
    /// Position the directional light shines from, toward the origin.
    pub directional_position: Vec3,
    pub points: SmallVec<[PointLight; 4]>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: hex_to_rgb(AMBIENT_COLOR),
            ambient_intensity: AMBIENT_INTENSITY,
            directional_color: hex_to_rgb(DIRECTIONAL_COLOR),
            directional_intensity: 1.0,
            directional_position: Vec3::from_array(DIRECTIONAL_POSITION),
            points: POINT_LIGHTS
                .iter()
                .map(|&(color, pos)| PointLight {
                    color: hex_to_rgb(color),
                    intensity: POINT_LIGHT_INTENSITY,
                    position: Vec3::from_array(pos),
                    range: POINT_LIGHT_RANGE,
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub hues: Vec<f32>,
    pub yaw: f32,
    pub size: f32,
    pub opacity: f32,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub size: f32,
    pub divisions: u32,
    pub y: f32,
    pub color: Vec3,
    pub opacity: f32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            divisions: GRID_DIVISIONS,
            y: GRID_Y,
            color: hex_to_rgb(GRID_COLOR),
            opacity: GRID_OPACITY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<RenderableObject>,
    pub lights: LightRig,
    pub particles: PointCloud,
    pub grid: Grid,
}

/// Build parameters for the background scene.
///
/// - `object_count`: number of floating shapes
/// - `particle_count`: number of points in the cloud
/// - `seed`: fixed seed for reproducible placement; `None` draws from entropy
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub object_count: usize,
    pub particle_count: usize,
    pub seed: Option<u64>,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            object_count: OBJECT_COUNT,
            particle_count: PARTICLE_COUNT,
            seed: None,
        }
    }
}

/// Convenience wrapper over [`build_scene`] with default seeding.
pub fn build(object_count: usize, particle_count: usize) -> Scene {
    build_scene(&SceneParams {
        object_count,
        particle_count,
        seed: None,
    })
}

pub fn build_scene(params: &SceneParams) -> Scene {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    build_with_rng(params.object_count, params.particle_count, &mut rng)
}

pub fn build_with_rng<R: Rng + ?Sized>(
    object_count: usize,
    particle_count: usize,
    rng: &mut R,
) -> Scene {
    let objects = (0..object_count).map(|_| random_object(rng)).collect();
    let particles = random_particles(particle_count, rng);
    log::debug!(
        "[scene] built objects={} particles={}",
        object_count,
        particle_count
    );
    Scene {
        camera: Camera::new(Vec3::new(0.0, 0.0, CAMERA_BASE_Z), 1.0),
        objects,
        lights: LightRig::default(),
        particles,
        grid: Grid::default(),
    }
}

fn random_object<R: Rng + ?Sized>(rng: &mut R) -> RenderableObject {
    let geometry = *Geometry::SOLIDS.choose(rng).unwrap_or(&Geometry::Cube);
    let color = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
    let emissive = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
    let spread = Vec3::from_array(OBJECT_SPREAD);
    let position = Vec3::new(
        (rng.gen::<f32>() - 0.5) * spread.x,
        (rng.gen::<f32>() - 0.5) * spread.y,
        (rng.gen::<f32>() - 0.5) * spread.z,
    );
    let rotation = Vec3::new(
        rng.gen::<f32>() * std::f32::consts::PI,
        rng.gen::<f32>() * std::f32::consts::PI,
        rng.gen::<f32>() * std::f32::consts::PI,
    );
    RenderableObject {
        geometry,
        material: Material {
            color: hex_to_rgb(color),
            emissive: hex_to_rgb(emissive),
            emissive_intensity: EMISSIVE_INTENSITY,
            opacity: OBJECT_OPACITY,
        },
        base_position: position,
        base_rotation: rotation,
        position,
        rotation,
    }
}

fn random_particles<R: Rng + ?Sized>(count: usize, rng: &mut R) -> PointCloud {
    let hue0 = rng.gen::<f32>();
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    let mut hues = Vec::with_capacity(count);
    for i in 0..count {
        positions.push(Vec3::new(
            (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
        ));
        let hue = (hue0 + i as f32 * HUE_STEP).fract();
        hues.push(hue);
        colors.push(hsl_to_rgb(hue, 1.0, 0.5));
    }
    PointCloud {
        positions,
        colors,
        hues,
        yaw: 0.0,
        size: PARTICLE_SIZE,
        opacity: PARTICLE_OPACITY,
    }
}
