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

pub const PETAL_COUNT: usize = 12;
/// Lowest opacity of the breathing cycle, as a fraction of the base opacity
pub const PULSE_DEPTH: f32 = 0.55;

/// Slow, translucent blossom petals in pinks and peach
#[derive(Debug, Clone, Copy, Default)]
pub struct PetalFactory;

impl PetalFactory {
    fn random_color(rng: &mut dyn RngCore) -> Color {
        // Rose through coral, wrapping over hue 0
        let hue = rng.gen_range(0.9..1.06_f32).rem_euclid(1.0);
        let saturation = rng.gen_range(0.25..0.6);
        let value = rng.gen_range(0.9..=1.0);
        Color::from_hsv(hue, saturation, value).clamped()
    }
}

impl ShapeFactory for PetalFactory {
    fn variant(&self) -> Variant {
        Variant::Petals
    }

    fn default_count(&self) -> usize {
        PETAL_COUNT
    }

    fn background(&self) -> Color {
        Color::from_hex(0x1a1418)
    }

    fn lighting(&self) -> Lighting {
        Lighting {
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.8,
            },
            directional: DirectionalLight {
                color: Color::from_hex(0xffe4ec),
                intensity: 0.9,
                position: Vec3::new(6.0, 10.0, 8.0),
            },
            point: PointLight {
                color: Color::from_hex(0xff9ecb),
                intensity: 0.6,
                range: 100.0,
                position: Vec3::new(-10.0, -8.0, 10.0),
            },
        }
    }

    fn spawn(&self, bounds: &SpawnBounds, rng: &mut dyn RngCore) -> Shape {
        let base_color = Self::random_color(rng);
        let (position, rotation, scale) = random_transform(bounds, rng);
        let base_opacity = rng.gen_range(0.6..0.9);

        let params = ShapeParams {
            base_y: position.y,
            float_speed: rng.gen_range(0.2_f32..0.45) * FLOAT_TIME_SCALE,
            float_phase: rng.gen_range(0.0..TAU),
            rot_speed: rng.gen_range(0.002..0.005),
            base_color,
            base_opacity,
            modulation: Modulation::Pulse {
                speed: rng.gen_range(0.6..1.2),
                phase: rng.gen_range(0.0..TAU),
                depth: PULSE_DEPTH,
            },
        };

        Shape {
            kind: ShapeKind::Petal,
            position,
            rotation,
            scale,
            color: base_color,
            opacity: base_opacity,
            material: Material::SATIN,
            params,
        }
    }
}
