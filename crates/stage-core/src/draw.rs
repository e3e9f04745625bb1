//! Flattening of a [`Scene`] or carousel into GPU-ready instance data.

use crate::carousel::CarouselController;
use crate::constants::CARD_OPACITY;
use crate::constants::GLOW_OPACITY;
use crate::mesh::Geometry;
use crate::scene::{LightRig, Scene};
use glam::{EulerRot, Mat4, Vec3};

pub const MAX_POINT_LIGHTS: usize = 4;
const GEOMETRY_SLOTS: usize = Geometry::ALL.len();

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    /// rgb + opacity
    pub color: [f32; 4],
    /// rgb pre-scaled by intensity; w = 1 for lit, 0 for flat color
    pub emissive: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Model matrix for the point cloud (yaw only).
    pub cloud: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// rgb * intensity
    pub ambient: [f32; 4],
    /// xyz direction toward the light, w unused
    pub dir_direction: [f32; 4],
    pub dir_color: [f32; 4],
    /// xyz position, w range
    pub point_position: [[f32; 4]; MAX_POINT_LIGHTS],
    pub point_color: [[f32; 4]; MAX_POINT_LIGHTS],
    /// x point light count, y cloud opacity, z grid opacity
    pub counts: [f32; 4],
    pub grid_color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub uniform: FrameUniform,
    /// One instance batch per [`Geometry::index`] slot.
    pub batches: [Vec<InstanceRaw>; GEOMETRY_SLOTS],
    pub draw_cloud: bool,
    pub draw_grid: bool,
}

impl DrawList {
    pub fn clear(&mut self) {
        for b in self.batches.iter_mut() {
            b.clear();
        }
        self.draw_cloud = false;
        self.draw_grid = false;
    }

    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn push(&mut self, geometry: Geometry, instance: InstanceRaw) {
        self.batches[geometry.index()].push(instance);
    }
}

fn lights_into(uniform: &mut FrameUniform, rig: &LightRig) {
    uniform.ambient = (rig.ambient * rig.ambient_intensity).extend(1.0).to_array();
    uniform.dir_direction = rig.directional_position.normalize_or_zero().extend(0.0).to_array();
    uniform.dir_color = (rig.directional_color * rig.directional_intensity)
        .extend(1.0)
        .to_array();
    let n = rig.points.len().min(MAX_POINT_LIGHTS);
    for (i, p) in rig.points.iter().take(n).enumerate() {
        uniform.point_position[i] = p.position.extend(p.range).to_array();
        uniform.point_color[i] = (p.color * p.intensity).extend(1.0).to_array();
    }
    uniform.counts[0] = n as f32;
}

/// Static point data; uploaded once since the cloud never reallocates.
pub fn cloud_vertices(scene: &Scene) -> Vec<PointVertex> {
    scene
        .particles
        .positions
        .iter()
        .zip(&scene.particles.colors)
        .map(|(p, c)| PointVertex {
            position: p.to_array(),
            color: c.to_array(),
        })
        .collect()
}

pub fn scene_into(scene: &Scene, out: &mut DrawList) {
    out.clear();
    let u = &mut out.uniform;
    u.view_proj = scene.camera.view_projection().to_cols_array_2d();
    u.eye = scene.camera.eye.extend(1.0).to_array();
    u.cloud = Mat4::from_rotation_y(scene.particles.yaw).to_cols_array_2d();
    u.counts[1] = scene.particles.opacity;
    u.counts[2] = scene.grid.opacity;
    u.grid_color = scene.grid.color.extend(1.0).to_array();
    lights_into(u, &scene.lights);

    for obj in &scene.objects {
        let r = obj.rotation;
        let model = Mat4::from_translation(obj.position)
            * Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        let m = &obj.material;
        out.push(
            obj.geometry,
            InstanceRaw {
                model: model.to_cols_array_2d(),
                color: m.color.extend(m.opacity).to_array(),
                emissive: (m.emissive * m.emissive_intensity).extend(1.0).to_array(),
            },
        );
    }
    out.draw_cloud = !scene.particles.is_empty();
    out.draw_grid = true;
}

/// Cards are flat-colored: glows in the accent color, cards in a pale tint
/// of it standing in for their image.
pub fn carousel_into(carousel: &CarouselController, out: &mut DrawList) {
    out.clear();
    let u = &mut out.uniform;
    u.view_proj = carousel.camera().view_projection().to_cols_array_2d();
    u.eye = carousel.camera().eye.extend(1.0).to_array();
    u.counts = [0.0; 4];
    for pose in carousel.poses() {
        out.push(
            Geometry::Plane,
            InstanceRaw {
                model: pose.glow.to_cols_array_2d(),
                color: pose.accent.extend(GLOW_OPACITY).to_array(),
                emissive: [0.0; 4],
            },
        );
        let tint = pose.accent.lerp(Vec3::ONE, 0.6);
        out.push(
            Geometry::Plane,
            InstanceRaw {
                model: pose.card.to_cols_array_2d(),
                color: tint.extend(CARD_OPACITY).to_array(),
                emissive: [0.0; 4],
            },
        );
    }
}
