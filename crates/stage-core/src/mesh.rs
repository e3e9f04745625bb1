//! Procedural meshes for the fixed geometry catalog.
//!
//! All meshes are centered on the origin and sized like the shapes the page
//! was designed around (2-unit cube, 1.5 radius sphere, ...). Normals are
//! per-vertex; flat-shaded shapes duplicate vertices per face.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Shapes available to the scene and the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Geometry {
    Cube,
    Sphere,
    Cone,
    Octahedron,
    Torus,
    /// Flat card, 1×1 in the XY plane facing +Z; scaled per instance.
    Plane,
}

impl Geometry {
    /// Shapes the background scene picks from.
    pub const SOLIDS: [Geometry; 5] = [
        Geometry::Cube,
        Geometry::Sphere,
        Geometry::Cone,
        Geometry::Octahedron,
        Geometry::Torus,
    ];

    pub const ALL: [Geometry; 6] = [
        Geometry::Cube,
        Geometry::Sphere,
        Geometry::Cone,
        Geometry::Octahedron,
        Geometry::Torus,
        Geometry::Plane,
    ];

    /// Stable slot used by the renderer to index per-geometry buffers.
    pub fn index(self) -> usize {
        match self {
            Geometry::Cube => 0,
            Geometry::Sphere => 1,
            Geometry::Cone => 2,
            Geometry::Octahedron => 3,
            Geometry::Torus => 4,
            Geometry::Plane => 5,
        }
    }

    pub fn mesh(self) -> MeshData {
        match self {
            Geometry::Cube => cube(2.0),
            Geometry::Sphere => sphere(1.5, 16, 16),
            Geometry::Cone => cone(1.0, 2.0, 8),
            Geometry::Octahedron => octahedron(1.5),
            Geometry::Torus => torus(1.0, 0.3, 8, 16),
            Geometry::Plane => plane(1.0, 1.0),
        }
    }
}

impl MeshData {
    fn push_face(&mut self, corners: &[Vec3], normal: Vec3) {
        let base = self.vertices.len() as u16;
        for c in corners {
            self.vertices.push(Vertex {
                position: c.to_array(),
                normal: normal.to_array(),
            });
        }
        for i in 1..corners.len() as u16 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }
}

pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let mut mesh = MeshData::default();
    let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    for n in axes {
        // Two tangents forming a right-handed basis with the face normal.
        let u = if n.y.abs() > 0.5 { Vec3::X } else { Vec3::Y.cross(n) };
        let v = n.cross(u);
        let c = n * h;
        let corners = [
            c - u * h - v * h,
            c + u * h - v * h,
            c + u * h + v * h,
            c - u * h + v * h,
        ];
        mesh.push_face(&corners, n);
    }
    mesh
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        let theta = v * PI;
        for x in 0..=width_segments {
            let u = x as f32 / width_segments as f32;
            let phi = u * TAU;
            let n = Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
            });
        }
    }
    let row = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let a = (y * row + x) as u16;
            let b = (y * row + x + 1) as u16;
            let c = ((y + 1) * row + x) as u16;
            let d = ((y + 1) * row + x + 1) as u16;
            if y != 0 {
                mesh.indices.extend_from_slice(&[a, c, b]);
            }
            if y != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height * 0.5;
    let apex = Vec3::new(0.0, half, 0.0);
    let slope = radius / height;
    for i in 0..radial_segments {
        let a0 = i as f32 / radial_segments as f32 * TAU;
        let a1 = (i + 1) as f32 / radial_segments as f32 * TAU;
        let p0 = Vec3::new(a0.sin() * radius, -half, a0.cos() * radius);
        let p1 = Vec3::new(a1.sin() * radius, -half, a1.cos() * radius);
        let mid = (a0 + a1) * 0.5;
        let n = Vec3::new(mid.sin(), slope, mid.cos()).normalize();
        mesh.push_face(&[p0, p1, apex], n);
        mesh.push_face(&[Vec3::new(0.0, -half, 0.0), p1, p0], Vec3::NEG_Y);
    }
    mesh
}

pub fn octahedron(radius: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let px = Vec3::X * radius;
    let nx = Vec3::NEG_X * radius;
    let py = Vec3::Y * radius;
    let ny = Vec3::NEG_Y * radius;
    let pz = Vec3::Z * radius;
    let nz = Vec3::NEG_Z * radius;
    let faces = [
        [px, py, pz],
        [pz, py, nx],
        [nx, py, nz],
        [nz, py, px],
        [px, pz, ny],
        [pz, nx, ny],
        [nx, nz, ny],
        [nz, px, ny],
    ];
    for f in faces {
        let n = (f[1] - f[0]).cross(f[2] - f[0]).normalize();
        mesh.push_face(&f, n);
    }
    mesh
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: (p - center).normalize().to_array(),
            });
        }
    }
    let row = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = (row * j + i - 1) as u16;
            let b = (row * (j - 1) + i - 1) as u16;
            let c = (row * (j - 1) + i) as u16;
            let d = (row * j + i) as u16;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

pub fn plane(width: f32, height: f32) -> MeshData {
    let (w, h) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::default();
    mesh.push_face(
        &[
            Vec3::new(-w, -h, 0.0),
            Vec3::new(w, -h, 0.0),
            Vec3::new(w, h, 0.0),
            Vec3::new(-w, h, 0.0),
        ],
        Vec3::Z,
    );
    mesh
}

/// Line-list vertices for a square grid in the XZ plane at `y`.
pub fn grid_lines(size: f32, divisions: u32, y: f32) -> Vec<[f32; 3]> {
    let half = size * 0.5;
    let step = size / divisions.max(1) as f32;
    let mut out = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        out.push([-half, y, k]);
        out.push([half, y, k]);
        out.push([k, y, -half]);
        out.push([k, y, half]);
    }
    out
}
