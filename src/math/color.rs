use serde::{Deserialize, Serialize};

/// Linear RGB colour with components in [0, 1].
///
/// Hex and HSV inputs are sRGB and get decoded on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed sRGB 0xRRGGBB value, decoded to linear
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::new(channel(16), channel(8), channel(0))
    }

    /// HSV in sRGB space, decoded to linear
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let [r, g, b] = hsv_to_rgb(h, s, v).map(srgb_to_linear);
        Self::new(r, g, b)
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

/// sRGB transfer function decode, input in [0, 1]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function encode, input in [0, 1]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = (h.rem_euclid(1.0) * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_red() {
        let rgb = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((rgb[0] - 1.0).abs() < 0.01);
        assert!(rgb[1].abs() < 0.01);
        assert!(rgb[2].abs() < 0.01);
    }

    #[test]
    fn test_hsv_to_rgb_wraps_hue() {
        let a = hsv_to_rgb(0.25, 0.8, 0.9);
        let b = hsv_to_rgb(1.25, 0.8, 0.9);
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_from_hex_decodes_srgb() {
        let c = Color::from_hex(0x3fa7ff);
        assert!((c.r - srgb_to_linear(63.0 / 255.0)).abs() < 1e-6);
        assert!((c.g - srgb_to_linear(167.0 / 255.0)).abs() < 1e-6);
        assert_eq!(c.b, 1.0);
        assert!(c.r < 63.0 / 255.0);
    }

    #[test]
    fn test_background_hex_survives_srgb_surface() {
        // An sRGB surface encodes the linear clear colour on write
        let clear = Color::from_hex(0x181818).to_wgpu();
        for channel in [clear.r, clear.g, clear.b] {
            let byte = (linear_to_srgb(channel as f32) * 255.0).round() as u32;
            assert_eq!(byte, 0x18);
        }
    }

    #[test]
    fn test_every_byte_round_trips() {
        for byte in 0..=255u32 {
            let c = Color::from_hex(byte * 0x010101);
            let back = (linear_to_srgb(c.r) * 255.0).round() as u32;
            assert_eq!(back, byte);
        }
    }

    #[test]
    fn test_from_hsv_matches_hex() {
        // Pure yellow in both notations
        let a = Color::from_hsv(1.0 / 6.0, 1.0, 1.0);
        let b = Color::from_hex(0xffff00);
        assert!((a.r - b.r).abs() < 1e-5);
        assert!((a.g - b.g).abs() < 1e-5);
        assert!((a.b - b.b).abs() < 1e-5);
    }

    #[test]
    fn test_lerp_endpoints() {
        let base = Color::from_hex(0x8e54e9);
        assert_eq!(base.lerp(Color::WHITE, 0.0), base);
        assert_eq!(base.lerp(Color::WHITE, 1.0), Color::WHITE);
    }

    #[test]
    fn test_lerp_clamps_weight() {
        let c = Color::BLACK.lerp(Color::WHITE, 3.0);
        assert_eq!(c, Color::WHITE);
        let c = Color::WHITE.lerp(Color::BLACK, -1.0);
        assert_eq!(c, Color::WHITE);
    }
}
