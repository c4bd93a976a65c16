//! Shape-factory strategies, one per animation variant.

mod geometric;
mod petals;

use std::f32::consts::PI;

use glam::Vec3;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::SpawnBounds;
use crate::math::Color;
use crate::scene::{Lighting, Shape};

pub use geometric::GeometricFactory;
pub use petals::PetalFactory;

/// The source clock ran at 0.8 units/s and the float term doubled it, so a
/// speed drawn in source units becomes rad/s after this factor
pub const FLOAT_TIME_SCALE: f32 = 1.6;
pub const FLOAT_AMPLITUDE: f32 = 1.1;

/// Which shape set to animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Geometric,
    Petals,
}

impl Variant {
    pub fn factory(self) -> Box<dyn ShapeFactory> {
        match self {
            Variant::Geometric => Box::new(GeometricFactory),
            Variant::Petals => Box::new(PetalFactory),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Geometric => "geometric",
            Variant::Petals => "petals",
        }
    }
}

/// Builds the randomized shapes and fixed surroundings of one variant
pub trait ShapeFactory {
    fn variant(&self) -> Variant;

    /// Shape count when the config does not override it
    fn default_count(&self) -> usize;

    fn background(&self) -> Color;

    fn lighting(&self) -> Lighting;

    /// Create one shape with randomized kind, colour, transform and animation params
    fn spawn(&self, bounds: &SpawnBounds, rng: &mut dyn RngCore) -> Shape;

    fn spawn_all(&self, count: usize, bounds: &SpawnBounds, rng: &mut dyn RngCore) -> Vec<Shape> {
        (0..count).map(|_| self.spawn(bounds, rng)).collect()
    }
}

/// Random position inside `bounds`, rotation in [0, π) per axis, uniform scale
pub(crate) fn random_transform(bounds: &SpawnBounds, rng: &mut dyn RngCore) -> (Vec3, Vec3, f32) {
    let [hx, hy, hz] = bounds.half_extent();
    let position = Vec3::new(
        rng.gen_range(-hx..=hx),
        rng.gen_range(-hy..=hy),
        rng.gen_range(-hz..=hz),
    );
    let rotation = Vec3::new(
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
        rng.gen_range(0.0..PI),
    );
    let scale = rng.gen_range(bounds.scale_min..=bounds.scale_max);
    (position, rotation, scale)
}
