use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, RngCore};

use super::{random_transform, ShapeFactory, Variant, FLOAT_TIME_SCALE};
use crate::config::SpawnBounds;
use crate::geometry::ShapeKind;
use crate::math::Color;
use crate::scene::{
    AmbientLight, DirectionalLight, Lighting, Material, Modulation, PointLight, Shape, ShapeParams,
};

pub const GEOMETRIC_COUNT: usize = 16;
pub const GEOMETRIC_OPACITY: f32 = 0.85;

pub const PALETTE: [u32; 6] = [0x3fa7ff, 0xffd700, 0x8e54e9, 0x43e97b, 0xf857a6, 0x23272f];

/// Glossy solids in a cool/warm gradient palette
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricFactory;

impl ShapeFactory for GeometricFactory {
    fn variant(&self) -> Variant {
        Variant::Geometric
    }

    fn default_count(&self) -> usize {
        GEOMETRIC_COUNT
    }

    fn background(&self) -> Color {
        Color::from_hex(0x181818)
    }

    fn lighting(&self) -> Lighting {
        Lighting {
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.7,
            },
            directional: DirectionalLight {
                color: Color::from_hex(0x3fa7ff),
                intensity: 1.1,
                position: Vec3::new(8.0, 12.0, 10.0),
            },
            point: PointLight {
                color: Color::from_hex(0xffd700),
                intensity: 0.7,
                range: 100.0,
                position: Vec3::new(-10.0, -8.0, 10.0),
            },
        }
    }

    fn spawn(&self, bounds: &SpawnBounds, rng: &mut dyn RngCore) -> Shape {
        let kind = ShapeKind::SOLIDS[rng.gen_range(0..ShapeKind::SOLIDS.len())];
        let base_color = Color::from_hex(PALETTE[rng.gen_range(0..PALETTE.len())]);
        let (position, rotation, scale) = random_transform(bounds, rng);

        let params = ShapeParams {
            base_y: position.y,
            float_speed: rng.gen_range(0.3_f32..0.6) * FLOAT_TIME_SCALE,
            float_phase: rng.gen_range(0.0..TAU),
            rot_speed: rng.gen_range(0.003..0.007),
            base_color,
            base_opacity: GEOMETRIC_OPACITY,
            modulation: Modulation::Whiten,
        };

        Shape {
            kind,
            position,
            rotation,
            scale,
            color: base_color,
            opacity: GEOMETRIC_OPACITY,
            material: Material::GLOSSY,
            params,
        }
    }
}
