use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::geometry::ShapeKind;
use crate::math::Color;
use crate::types::{InstanceData, LightUniform};

/// Surface response of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub sheen: f32,
}

impl Material {
    /// Glossy coated look of the geometric solids
    pub const GLOSSY: Material = Material {
        metalness: 0.6,
        roughness: 0.25,
        clearcoat: 0.7,
        sheen: 1.0,
    };

    /// Soft satin look of the petals
    pub const SATIN: Material = Material {
        metalness: 0.0,
        roughness: 0.6,
        clearcoat: 0.1,
        sheen: 0.8,
    };

    pub fn to_array(self) -> [f32; 4] {
        [self.metalness, self.roughness, self.clearcoat, self.sheen]
    }
}

/// How a shape's appearance follows time and pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    /// Ease colour toward a whitened base as the pointer leaves the centre
    Whiten,
    /// Breathe opacity with a second sine wave
    Pulse { speed: f32, phase: f32, depth: f32 },
}

/// Randomized per-shape animation parameters, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub base_y: f32,
    /// Angular frequency of the vertical float in rad/s
    pub float_speed: f32,
    pub float_phase: f32,
    /// Rotation increment per frame before pointer scaling
    pub rot_speed: f32,
    pub base_color: Color,
    pub base_opacity: f32,
    pub modulation: Modulation,
}

/// One decorative mesh instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub position: Vec3,
    /// Euler angles (XYZ order)
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Color,
    pub opacity: f32,
    pub material: Material,
    pub params: ShapeParams,
}

impl Shape {
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }

    pub fn to_instance(&self) -> InstanceData {
        InstanceData {
            model: self.model_matrix().to_cols_array_2d(),
            color: self.color.with_alpha(self.opacity),
            material: self.material.to_array(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    /// Light shines from here toward the origin
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
    pub position: Vec3,
}

/// Fixed lighting rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl Lighting {
    pub fn to_uniform(&self) -> LightUniform {
        let scaled = |c: Color, i: f32, w: f32| [c.r * i, c.g * i, c.b * i, w];
        LightUniform {
            ambient: scaled(self.ambient.color, self.ambient.intensity, 0.0),
            directional_position: self.directional.position.extend(0.0).to_array(),
            directional_color: scaled(self.directional.color, self.directional.intensity, 0.0),
            point_position: self.point.position.extend(self.point.range).to_array(),
            point_color: scaled(self.point.color, self.point.intensity, 0.0),
        }
    }
}

/// Ordered shapes plus lighting; the shape list never changes length once built
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: Vec<Shape>,
    pub lighting: Lighting,
    pub background: Color,
}

impl Scene {
    pub fn new(shapes: Vec<Shape>, lighting: Lighting, background: Color) -> Self {
        Self {
            shapes,
            lighting,
            background,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to each shape; the slice cannot grow or shrink
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Swap in a freshly generated collection of the same size
    pub(crate) fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        debug_assert_eq!(shapes.len(), self.shapes.len());
        self.shapes = shapes;
    }

    /// GPU instances sorted far-to-near from `eye` so blending composes correctly.
    /// Returns the shape kind alongside each instance to select its mesh.
    pub fn instances_back_to_front(&self, eye: Vec3) -> Vec<(ShapeKind, InstanceData)> {
        let mut order: Vec<(f32, usize)> = self
            .shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.position.distance_squared(eye), i))
            .collect();
        order.sort_by(|a, b| b.0.total_cmp(&a.0));

        order
            .into_iter()
            .map(|(_, i)| {
                let shape = &self.shapes[i];
                (shape.kind, shape.to_instance())
            })
            .collect()
    }
}
