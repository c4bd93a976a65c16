/// Vertical float displacement: `amplitude * sin(time * speed + phase)`.
/// `speed` is an angular frequency in rad/s, so the period is `2π / speed`.
pub fn float_offset(time: f32, speed: f32, phase: f32, amplitude: f32) -> f32 {
    (time * speed + phase).sin() * amplitude
}

/// Opacity breathing between `depth` and 1.0 of `base`, clamped to [0, 1]
pub fn opacity_pulse(base: f32, time: f32, speed: f32, phase: f32, depth: f32) -> f32 {
    let depth = depth.clamp(0.0, 1.0);
    let wave = 0.5 + 0.5 * (time * speed + phase).sin();
    (base * (depth + (1.0 - depth) * wave)).clamp(0.0, 1.0)
}
