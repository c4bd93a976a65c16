pub mod animator;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod geometry;
pub mod hud;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod types;
pub mod window;

pub use animator::SceneAnimator;
pub use config::AnimatorConfig;
pub use scenes::{ShapeFactory, Variant};
