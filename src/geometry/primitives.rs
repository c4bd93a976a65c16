use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::Mesh;
use crate::types::Vertex;

/// Axis-aligned cube with edge length `size`, centred on the origin
pub fn cuboid(size: f32) -> Mesh {
    let h = size * 0.5;
    // (normal, u, v) with u x v = normal so each quad winds counter-clockwise
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = Mesh::default();
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let centre = normal * h;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = centre + u * (su * h) + v * (sv * h);
            mesh.vertices.push(Vertex::new(p.to_array(), normal.to_array()));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Latitude/longitude sphere
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let mut mesh = Mesh::default();

    for ring in 0..=rings {
        let theta = ring as f32 / rings as f32 * PI;
        for seg in 0..=segments {
            let phi = seg as f32 / segments as f32 * TAU;
            let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            mesh.vertices
                .push(Vertex::new((n * radius).to_array(), n.to_array()));
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Ring torus in the XY plane
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let mut mesh = Mesh::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let n = (p - centre).normalize();
            mesh.vertices.push(Vertex::new(p.to_array(), n.to_array()));
        }
    }

    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

pub fn octahedron(radius: f32) -> Mesh {
    let positions = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
    .map(|p| p * radius);

    let faces = [
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ];
    Mesh::flat(&positions, &faces)
}

pub fn icosahedron(radius: f32) -> Mesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let positions = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|p| p.normalize() * radius);

    let faces = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    Mesh::flat(&positions, &faces)
}
