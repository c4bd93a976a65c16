use std::f32::consts::PI;

use glam::Vec3;

use super::Mesh;
use crate::types::Vertex;

/// Cupped, slightly curled petal centred on the origin.
///
/// The blade runs along +Y; `length_segments` x `width_segments` quads.
pub fn petal(length: f32, width: f32, length_segments: u32, width_segments: u32) -> Mesh {
    let mut mesh = Mesh::default();

    for i in 0..=length_segments {
        let u = i as f32 / length_segments as f32;
        // Rounded base, pointed tip; never fully zero so the tip stays non-degenerate
        let half_width = width * 0.5 * (PI * (0.04 + 0.92 * u)).sin().powf(0.8) * (1.0 - 0.25 * u);
        let curl = 0.18 * length * u * u;

        for j in 0..=width_segments {
            let v = j as f32 / width_segments as f32 * 2.0 - 1.0;
            let cup = 0.35 * half_width * v * v;
            let p = Vec3::new(v * half_width, u * length - length * 0.5, cup + curl);
            mesh.vertices.push(Vertex::new(p.to_array(), Vec3::Z.to_array()));
        }
    }

    let stride = width_segments + 1;
    for i in 0..length_segments {
        for j in 0..width_segments {
            let a = i * stride + j;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    mesh.recompute_smooth_normals();
    mesh
}
