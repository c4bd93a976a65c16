use glam::Vec3;

/// One damped step of `current` toward `target`.
///
/// With `damping` in (0, 1] the result always lies between `current` and
/// `target`, so repeated steps approach a constant target without overshoot.
pub fn damp_toward(current: f32, target: f32, damping: f32) -> f32 {
    current + (target - current) * damping
}

pub fn damp_vec3(current: Vec3, target: Vec3, damping: f32) -> Vec3 {
    current + (target - current) * damping
}

/// Weight that matches `frames` consecutive steps of `damping`; fractional
/// frame counts are allowed and zero frames give zero weight
pub fn damping_over(damping: f32, frames: f32) -> f32 {
    1.0 - (1.0 - damping.clamp(0.0, 1.0)).powf(frames.max(0.0))
}
