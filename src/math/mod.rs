mod color;
mod easing;
mod wave;

pub use color::{hsv_to_rgb, linear_to_srgb, srgb_to_linear, Color};
pub use easing::{damp_toward, damp_vec3, damping_over};
pub use wave::{float_offset, opacity_pulse};
