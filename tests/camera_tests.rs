use glam::Vec3;
use shape_drift::camera::ParallaxCamera;
use shape_drift::config::AnimatorConfig;
use shape_drift::core::PointerState;
use shape_drift::window::Viewport;
use shape_drift::SceneAnimator;

fn animator() -> SceneAnimator {
    let config = AnimatorConfig {
        seed: Some(1),
        ..Default::default()
    };
    SceneAnimator::initialize(config, Viewport::new(1280, 720))
}

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_camera_converges_without_overshoot() {
        let mut a = animator();
        a.on_pointer_move(0.8, -0.5);
        let target = Vec3::new(0.8 * 2.2, 0.5 * 1.1, 18.0);

        let mut last_distance = a.camera().position.distance(target);
        for step in 0..600 {
            a.frame_step(step as f32 / 60.0);
            let p = a.camera().position;
            let distance = p.distance(target);
            assert!(distance <= last_distance + 1e-6, "camera moved away at step {}", step);
            assert!(p.x <= target.x + 1e-6, "overshoot in x: {}", p.x);
            assert!(p.y <= target.y + 1e-6, "overshoot in y: {}", p.y);
            last_distance = distance;
        }
        assert!(last_distance < 1e-3);
    }

    #[test]
    fn test_single_step_uses_damping() {
        let mut a = animator();
        a.on_pointer_move(1.0, 0.0);
        a.frame_step(0.0);
        assert!((a.camera().position.x - 2.2 * 0.04).abs() < 1e-6);
        assert_eq!(a.camera().position.z, 18.0);
    }

    #[test]
    fn test_camera_follows_pointer_reversal() {
        let mut a = animator();
        a.on_pointer_move(1.0, 1.0);
        for step in 0..200 {
            a.frame_step(step as f32 / 60.0);
        }
        assert!(a.camera().position.x > 2.0);
        assert!(a.camera().position.y < -1.0);

        a.on_pointer_move(-1.0, -1.0);
        for step in 200..800 {
            a.frame_step(step as f32 / 60.0);
        }
        assert!((a.camera().position.x + 2.2).abs() < 1e-2);
        assert!((a.camera().position.y - 1.1).abs() < 1e-2);
    }

    #[test]
    fn test_resize_updates_aspect_and_viewport() {
        let mut a = animator();
        a.on_resize(1024, 512);
        assert_eq!(a.camera().aspect, 2.0);
        assert_eq!(a.viewport(), Viewport::new(1024, 512));

        a.on_resize(333, 777);
        assert!((a.camera().aspect - 333.0 / 777.0).abs() < 1e-6);
        assert_eq!(a.viewport(), Viewport::new(333, 777));
    }

    #[test]
    fn test_camera_uniform_carries_eye() {
        let mut camera = ParallaxCamera::new(Viewport::new(800, 600));
        camera.ease_toward(PointerState::new(-1.0, 0.5), 1.0);
        let uniform = camera.to_uniform();
        assert!((uniform.eye[0] + 2.2).abs() < 1e-6);
        assert!((uniform.eye[1] + 0.55).abs() < 1e-6);
        assert_eq!(uniform.eye[2], 18.0);
    }
}
