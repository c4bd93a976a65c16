//! Triangle meshes for every decorative shape kind.
//!
//! Polyhedra are flat shaded (one normal per face); the sphere, torus and
//! petal carry smooth per-vertex normals.

mod petal;
mod primitives;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::Vertex;

pub use petal::petal;
pub use primitives::{cuboid, icosahedron, octahedron, torus, uv_sphere};

/// Indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Build a flat-shaded mesh from shared positions and triangle faces.
    /// Faces are rewound where needed so every normal points away from the origin.
    pub(crate) fn flat(positions: &[Vec3], faces: &[[usize; 3]]) -> Self {
        let mut mesh = Mesh::default();
        for face in faces {
            let (a, mut b, mut c) = (positions[face[0]], positions[face[1]], positions[face[2]]);
            let mut normal = (b - a).cross(c - a).normalize();
            if normal.dot(a + b + c) < 0.0 {
                std::mem::swap(&mut b, &mut c);
                normal = -normal;
            }
            let base = mesh.vertices.len() as u32;
            for p in [a, b, c] {
                mesh.vertices.push(Vertex::new(p.to_array(), normal.to_array()));
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
        mesh
    }

    /// Replace normals with the area-weighted average of adjacent face normals
    pub(crate) fn recompute_smooth_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let a = Vec3::from_array(self.vertices[i0].position);
            let b = Vec3::from_array(self.vertices[i1].position);
            let c = Vec3::from_array(self.vertices[i2].position);
            let n = (b - a).cross(c - a);
            sums[i0] += n;
            sums[i1] += n;
            sums[i2] += n;
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = sum.try_normalize().unwrap_or(Vec3::Z).to_array();
        }
    }
}

/// Geometry kind of a decorative shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cube,
    Sphere,
    Torus,
    Octahedron,
    Icosahedron,
    Petal,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Cube,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Octahedron,
        ShapeKind::Icosahedron,
        ShapeKind::Petal,
    ];

    pub const SOLIDS: [ShapeKind; 5] = [
        ShapeKind::Cube,
        ShapeKind::Sphere,
        ShapeKind::Torus,
        ShapeKind::Octahedron,
        ShapeKind::Icosahedron,
    ];

    /// Dense index used to address per-kind GPU buffers
    pub const fn index(self) -> usize {
        match self {
            ShapeKind::Cube => 0,
            ShapeKind::Sphere => 1,
            ShapeKind::Torus => 2,
            ShapeKind::Octahedron => 3,
            ShapeKind::Icosahedron => 4,
            ShapeKind::Petal => 5,
        }
    }

    pub fn mesh(self) -> Mesh {
        match self {
            ShapeKind::Cube => cuboid(1.2),
            ShapeKind::Sphere => uv_sphere(0.9, 32, 32),
            ShapeKind::Torus => torus(0.7, 0.25, 16, 100),
            ShapeKind::Octahedron => octahedron(1.0),
            ShapeKind::Icosahedron => icosahedron(1.0),
            ShapeKind::Petal => petal(1.6, 0.55, 24, 10),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Icosahedron => "icosahedron",
            ShapeKind::Petal => "petal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_indices_are_dense() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn flat_mesh_rewinds_inward_faces() {
        let positions = [Vec3::X, Vec3::Y, Vec3::Z];
        // Clockwise when seen from outside
        let mesh = Mesh::flat(&positions, &[[0, 2, 1]]);
        let n = Vec3::from_array(mesh.vertices[0].normal);
        assert!(n.dot(Vec3::ONE) > 0.0);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ShapeKind::Icosahedron).unwrap();
        assert_eq!(json, "\"icosahedron\"");
    }
}
