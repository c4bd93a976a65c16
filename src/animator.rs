use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::ParallaxCamera;
use crate::config::AnimatorConfig;
use crate::core::PointerState;
use crate::math::{damping_over, float_offset, opacity_pulse, Color};
use crate::scene::{Modulation, Scene, Shape};
use crate::scenes::{ShapeFactory, FLOAT_AMPLITUDE};
use crate::window::Viewport;

/// Per-frame weight of the colour ease toward the hover colour
pub const COLOR_EASE: f32 = 0.08;
/// Whitening of the hover colour with the pointer at the centre
pub const HOVER_WHITEN_BASE: f32 = 0.18;
/// Extra whitening per unit of |pointer.x + pointer.y|
pub const HOVER_WHITEN_GAIN: f32 = 0.18;
/// Rotation speeds, damping and colour easing are per frame at this rate
pub const REFERENCE_FRAME_RATE: f32 = 60.0;
/// Longest gap between steps that still advances rotation and easing
pub const MAX_FRAME_GAP: f32 = 0.25;

/// Owns the scene, camera and pointer state of one running animation
pub struct SceneAnimator {
    config: AnimatorConfig,
    factory: Box<dyn ShapeFactory>,
    rng: StdRng,
    scene: Scene,
    camera: ParallaxCamera,
    pointer: PointerState,
    viewport: Viewport,
    shape_count: usize,
    /// Elapsed time of the previous `frame_step`
    last_time: Option<f32>,
}

impl SceneAnimator {
    /// Build the camera, lighting and the full randomized shape collection
    pub fn initialize(config: AnimatorConfig, viewport: Viewport) -> Self {
        let factory = config.variant.factory();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let shape_count = config.effective_shape_count();

        let shapes = factory.spawn_all(shape_count, &config.spawn, &mut rng);
        for (i, shape) in shapes.iter().enumerate() {
            debug!(
                "shape {}: {} at ({:.2}, {:.2}, {:.2}) scale {:.2}",
                i,
                shape.kind.name(),
                shape.position.x,
                shape.position.y,
                shape.position.z,
                shape.scale
            );
        }
        let scene = Scene::new(shapes, factory.lighting(), factory.background());

        info!(
            "Animator initialized: {} variant, {} shapes, seed {:?}",
            config.variant.name(),
            shape_count,
            config.seed
        );

        Self {
            camera: ParallaxCamera::new(viewport),
            config,
            factory,
            rng,
            scene,
            pointer: PointerState::default(),
            viewport,
            shape_count,
            last_time: None,
        }
    }

    /// Throw away the current shapes and scatter a fresh set of the same size
    pub fn reinitialize(&mut self) {
        let shapes = self
            .factory
            .spawn_all(self.shape_count, &self.config.spawn, &mut self.rng);
        self.scene.replace_shapes(shapes);
        info!("Shape field regenerated ({} shapes)", self.shape_count);
    }

    /// Store normalized pointer coordinates in [-1, 1]
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = PointerState::new(x, y);
    }

    /// Track a new viewport; zero-sized viewports (minimised) are ignored
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() {
            return;
        }
        self.viewport = viewport;
        self.camera.set_viewport(viewport);
    }

    /// Advance the animation to `elapsed` seconds since start.
    ///
    /// Float and pulse are pure functions of `elapsed`. Rotation, camera
    /// damping and colour easing are scaled by the time since the previous
    /// step so they run at the same speed on any refresh rate; the first
    /// step counts as one reference frame.
    pub fn frame_step(&mut self, elapsed: f32) {
        let frames = self.reference_frames(elapsed);
        let damping = damping_over(self.config.damping, frames);
        self.camera.ease_toward(self.pointer, damping);

        let pointer = self.pointer;
        let color_ease = damping_over(COLOR_EASE, frames);
        for shape in self.scene.shapes_mut() {
            Self::animate_shape(shape, elapsed, frames, color_ease, pointer);
        }
        self.last_time = Some(elapsed);
    }

    /// Reference frames covered since the previous step
    fn reference_frames(&self, elapsed: f32) -> f32 {
        match self.last_time {
            Some(previous) => (elapsed - previous).clamp(0.0, MAX_FRAME_GAP) * REFERENCE_FRAME_RATE,
            None => 1.0,
        }
    }

    fn animate_shape(shape: &mut Shape, time: f32, frames: f32, color_ease: f32, pointer: PointerState) {
        let params = shape.params;

        shape.position.y =
            params.base_y + float_offset(time, params.float_speed, params.float_phase, FLOAT_AMPLITUDE);

        let spin = params.rot_speed * frames;
        shape.rotation.x += spin * (0.7 + pointer.y * 0.3);
        shape.rotation.y += spin * (1.1 + pointer.x * 0.5);

        match params.modulation {
            Modulation::Whiten => {
                let whiten = HOVER_WHITEN_BASE + HOVER_WHITEN_GAIN * pointer.diagonal_magnitude();
                let hover = params.base_color.lerp(Color::WHITE, whiten);
                shape.color = shape.color.lerp(hover, color_ease).clamped();
            }
            Modulation::Pulse {
                speed,
                phase,
                depth,
            } => {
                shape.opacity = opacity_pulse(params.base_opacity, time, speed, phase, depth);
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &ParallaxCamera {
        &self.camera
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }
}
