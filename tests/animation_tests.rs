use std::f32::consts::{PI, TAU};

use shape_drift::config::AnimatorConfig;
use shape_drift::math::Color;
use shape_drift::scene::Modulation;
use shape_drift::scenes::Variant;
use shape_drift::window::Viewport;
use shape_drift::SceneAnimator;

fn animator(variant: Variant, seed: u64) -> SceneAnimator {
    let config = AnimatorConfig {
        variant,
        seed: Some(seed),
        ..Default::default()
    };
    SceneAnimator::initialize(config, Viewport::new(1280, 720))
}

#[cfg(test)]
mod animation_tests {
    use super::*;

    #[test]
    fn test_float_is_periodic() {
        let reference = animator(Variant::Geometric, 17);
        let t = 2.75;
        for (i, shape) in reference.scene().shapes().iter().enumerate() {
            let period = TAU / shape.params.float_speed;

            let mut a = animator(Variant::Geometric, 17);
            a.frame_step(t);
            let mut b = animator(Variant::Geometric, 17);
            b.frame_step(t + period);

            let ya = a.scene().shapes()[i].position.y;
            let yb = b.scene().shapes()[i].position.y;
            assert!((ya - yb).abs() < 1e-3, "shape {}: {} vs {}", i, ya, yb);
        }
    }

    #[test]
    fn test_float_returns_to_base_height() {
        let reference = animator(Variant::Petals, 3);
        for (i, shape) in reference.scene().shapes().iter().enumerate() {
            let p = shape.params;
            // sin argument lands on 2π
            let t = (TAU - p.float_phase) / p.float_speed;
            let mut a = animator(Variant::Petals, 3);
            a.frame_step(t);
            let y = a.scene().shapes()[i].position.y;
            assert!((y - p.base_y).abs() < 1e-4, "shape {}: {} vs base {}", i, y, p.base_y);
        }
    }

    #[test]
    fn test_float_amplitude_bounded() {
        let mut a = animator(Variant::Geometric, 21);
        for step in 0..400 {
            a.frame_step(step as f32 / 60.0);
            for shape in a.scene().shapes() {
                assert!((shape.position.y - shape.params.base_y).abs() <= 1.1 + 1e-5);
            }
        }
    }

    #[test]
    fn test_rotation_advances_every_frame() {
        let mut a = animator(Variant::Geometric, 4);
        let before: Vec<_> = a.scene().shapes().iter().map(|s| s.rotation).collect();
        a.frame_step(0.016);
        for (shape, old) in a.scene().shapes().iter().zip(before) {
            // Pointer centred: x gains 0.7 * speed, y gains 1.1 * speed
            let rot = shape.params.rot_speed;
            assert!((shape.rotation.x - old.x - 0.7 * rot).abs() < 1e-6);
            assert!((shape.rotation.y - old.y - 1.1 * rot).abs() < 1e-6);
            assert_eq!(shape.rotation.z, old.z);
        }
    }

    #[test]
    fn test_geometric_colors_stay_in_unit_range() {
        let mut a = animator(Variant::Geometric, 9);
        let pointers = [(1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (0.3, 0.9)];
        for step in 0..600 {
            let (x, y) = pointers[(step / 150) % pointers.len()];
            a.on_pointer_move(x, y);
            a.frame_step(step as f32 / 60.0);
            for shape in a.scene().shapes() {
                for c in shape.color.to_array() {
                    assert!((0.0..=1.0).contains(&c), "colour component {} out of range", c);
                }
            }
        }
    }

    #[test]
    fn test_geometric_color_settles_on_hover_tint() {
        let mut a = animator(Variant::Geometric, 12);
        a.on_pointer_move(1.0, 1.0);
        for step in 0..400 {
            a.frame_step(step as f32 / 60.0);
        }
        for shape in a.scene().shapes() {
            let expected = shape.params.base_color.lerp(Color::WHITE, 0.18 + 0.18 * 2.0);
            assert!((shape.color.r - expected.r).abs() < 1e-3);
            assert!((shape.color.g - expected.g).abs() < 1e-3);
            assert!((shape.color.b - expected.b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_geometric_opacity_constant() {
        let mut a = animator(Variant::Geometric, 12);
        for step in 0..120 {
            a.frame_step(step as f32 / 60.0);
        }
        for shape in a.scene().shapes() {
            assert_eq!(shape.opacity, 0.85);
        }
    }

    #[test]
    fn test_petal_opacity_within_base() {
        let mut a = animator(Variant::Petals, 6);
        for step in 0..1200 {
            a.frame_step(step as f32 / 30.0);
            for shape in a.scene().shapes() {
                let base = shape.params.base_opacity;
                let depth = match shape.params.modulation {
                    Modulation::Pulse { depth, .. } => depth,
                    Modulation::Whiten => panic!("petal without pulse"),
                };
                assert!(shape.opacity >= 0.0 && shape.opacity <= 1.0);
                assert!(shape.opacity <= base + 1e-6);
                assert!(shape.opacity >= base * depth - 1e-6);
            }
        }
    }

    #[test]
    fn test_petal_opacity_actually_varies() {
        let mut a = animator(Variant::Petals, 6);
        a.frame_step(0.0);
        let first: Vec<f32> = a.scene().shapes().iter().map(|s| s.opacity).collect();
        a.frame_step(PI);
        let later: Vec<f32> = a.scene().shapes().iter().map(|s| s.opacity).collect();
        assert_ne!(first, later);
    }

    #[test]
    fn test_petal_colors_untouched() {
        let mut a = animator(Variant::Petals, 6);
        a.on_pointer_move(1.0, 1.0);
        for step in 0..60 {
            a.frame_step(step as f32 / 60.0);
        }
        for shape in a.scene().shapes() {
            assert_eq!(shape.color, shape.params.base_color);
        }
    }

    #[test]
    fn test_initializing_twice_leaves_one_collection() {
        let first = animator(Variant::Geometric, 30);
        let second = animator(Variant::Geometric, 31);
        assert_eq!(first.scene().len(), 16);
        assert_eq!(second.scene().len(), 16);
    }

    #[test]
    fn test_reinitialize_keeps_count_and_reshuffles() {
        let mut a = animator(Variant::Geometric, 30);
        let before = a.scene().shapes().to_vec();
        a.reinitialize();
        a.reinitialize();
        assert_eq!(a.scene().len(), 16);
        assert_ne!(a.scene().shapes(), before.as_slice());
    }

    #[test]
    fn test_shape_count_fixed_over_time() {
        let mut a = animator(Variant::Petals, 2);
        for step in 0..300 {
            a.on_pointer_move((step as f32 * 0.1).sin(), (step as f32 * 0.07).cos());
            a.frame_step(step as f32 / 60.0);
            assert_eq!(a.scene().len(), 12);
        }
    }

    #[test]
    fn test_motion_independent_of_refresh_rate() {
        let run = |hz: u32| {
            let mut a = animator(Variant::Geometric, 40);
            a.on_pointer_move(0.9, -0.6);
            for frame in 0..=hz {
                a.frame_step(frame as f32 / hz as f32);
            }
            a
        };
        let slow = run(60);
        let fast = run(144);

        let camera_gap = slow.camera().position.distance(fast.camera().position);
        assert!(camera_gap < 1e-3, "camera differs by {}", camera_gap);
        for (s, f) in slow.scene().shapes().iter().zip(fast.scene().shapes()) {
            assert!((s.rotation - f.rotation).length() < 1e-3);
            assert!((s.color.r - f.color.r).abs() < 1e-3);
            assert!((s.color.g - f.color.g).abs() < 1e-3);
            assert!((s.color.b - f.color.b).abs() < 1e-3);
        }
    }
}
