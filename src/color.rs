//! sRGB colors and HSL conversion.

use glam::Vec3;

/// An opaque 8-bit sRGB color. Alpha is supplied per draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from HSL values.
    ///
    /// * `hue` - degrees, wraps at 360
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid)
    /// * `lightness` - 0.0 (black) to 1.0 (white)
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let rgb = hsl_to_rgb(hue, saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
        Self::from_vec3(rgb)
    }

    /// Color from 0.0-1.0 float channels (clamped).
    pub fn from_vec3(v: Vec3) -> Self {
        let v = (v.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        Self::rgb(v.x as u8, v.y as u8, v.z as u8)
    }
}

fn hsl_to_rgb(hue: f32, s: f32, l: f32) -> Vec3 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}
