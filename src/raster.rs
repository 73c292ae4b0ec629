//! CPU raster canvas.
//!
//! [`Raster`] implements [`Canvas`] over an `image::RgbaImage`. The image
//! stays fully opaque; every draw blends source-over into the RGB channels in
//! sRGB space, the way a 2D browser canvas composites. Shapes are
//! anti-aliased by pixel coverage against their exact distance field.

use crate::canvas::Canvas;
use crate::color::Color;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Software drawing surface.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
    /// Per-pixel stroke coverage, reused by `stroke_polyline`.
    coverage: Vec<f32>,
    /// Pixels with non-zero coverage in `coverage`.
    touched: Vec<u32>,
}

impl Raster {
    /// Opaque black raster. Zero dimensions are raised to one pixel.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            coverage: vec![0.0; (width * height) as usize],
            touched: Vec::new(),
        }
    }

    /// The underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA8 bytes, row-major, `width * 4` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Color::rgb(r, g, b)
    }

    /// Fill the whole raster with an opaque color.
    pub fn clear(&mut self, color: Color) {
        for px in self.image.pixels_mut() {
            *px = Rgba([color.r, color.g, color.b, 255]);
        }
    }

    /// Write the raster to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        let px = self.image.get_pixel_mut(x, y);
        let mix = |dst: u8, src: u8| {
            (dst as f32 + (src as f32 - dst as f32) * alpha).round() as u8
        };
        px.0[0] = mix(px.0[0], color.r);
        px.0[1] = mix(px.0[1], color.g);
        px.0[2] = mix(px.0[2], color.b);
    }

    /// Pixel rectangle covering `[min, max]`, clipped to the raster.
    /// `None` when entirely off-surface.
    fn pixel_span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w as f32 - 1.0);
        let y1 = max.y.ceil().min(h as f32 - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Accumulate the coverage of one stroked segment, keeping the maximum
    /// per pixel so joints of a strip are not painted twice.
    fn cover_segment(&mut self, from: Vec2, to: Vec2, half_width: f32) {
        let pad = Vec2::splat(half_width + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };
        let width = self.image.width();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let c = (half_width + 0.5 - segment_distance(center, from, to)).clamp(0.0, 1.0);
                if c <= 0.0 {
                    continue;
                }
                let idx = (y * width + x) as usize;
                if self.coverage[idx] == 0.0 {
                    self.touched.push(idx as u32);
                }
                self.coverage[idx] = self.coverage[idx].max(c);
            }
        }
    }

    fn flush_coverage(&mut self, color: Color, alpha: f32) {
        let width = self.image.width();
        let touched = std::mem::take(&mut self.touched);
        for &idx in &touched {
            let c = std::mem::replace(&mut self.coverage[idx as usize], 0.0);
            self.blend(idx % width, idx / width, color, alpha * c);
        }
        self.touched = touched;
        self.touched.clear();
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Canvas for Raster {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn wash(&mut self, color: Color, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let alpha = alpha.min(1.0);
        // Move each channel at least one step toward the target so repeated
        // washes converge instead of stalling on rounding.
        let mix = |dst: u8, src: u8| {
            let delta = (src as f32 - dst as f32) * alpha;
            let step = if delta > 0.0 { delta.ceil() } else { delta.floor() };
            (dst as f32 + step).clamp(0.0, 255.0) as u8
        };
        for px in self.image.pixels_mut() {
            px.0[0] = mix(px.0[0], color.r);
            px.0[1] = mix(px.0[1], color.g);
            px.0[2] = mix(px.0[2], color.b);
        }
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let pad = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(center - pad, center + pad) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let c = (radius + 0.5 - d).clamp(0.0, 1.0);
                self.blend(x, y, color, alpha * c);
            }
        }
    }

    fn glow(&mut self, center: Vec2, radius: f32, blur: f32, color: Color, alpha: f32) {
        if blur <= 0.0 || alpha <= 0.0 {
            return;
        }
        let outer = radius + blur;
        let pad = Vec2::splat(outer + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(center - pad, center + pad) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if d >= outer {
                    continue;
                }
                let falloff = 1.0 - ((d - radius).max(0.0) / blur);
                self.blend(x, y, color, alpha * 0.5 * falloff * falloff);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, alpha: f32) {
        self.stroke_polyline(&[from, to], width, color, alpha);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color, alpha: f32) {
        if points.len() < 2 || width <= 0.0 || alpha <= 0.0 {
            return;
        }
        let half_width = width / 2.0;
        for segment in points.windows(2) {
            self.cover_segment(segment[0], segment[1], half_width);
        }
        self.flush_coverage(color, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque_black() {
        let raster = Raster::new(4, 3);
        assert_eq!((raster.width(), raster.height()), (4, 3));
        assert_eq!(raster.as_bytes().len(), 4 * 3 * 4);
        assert!(raster.as_bytes().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_disc_covers_center_only() {
        let mut raster = Raster::new(20, 20);
        raster.fill_disc(Vec2::new(10.0, 10.0), 3.0, Color::WHITE, 1.0);
        assert_eq!(raster.pixel(10, 10), Color::WHITE);
        assert_eq!(raster.pixel(0, 0), Color::BLACK);
        assert_eq!(raster.pixel(19, 10), Color::BLACK);
    }

    #[test]
    fn test_alpha_blends() {
        let mut raster = Raster::new(8, 8);
        raster.fill_disc(Vec2::new(4.0, 4.0), 3.0, Color::WHITE, 0.5);
        let c = raster.pixel(4, 4);
        assert!((126..=129).contains(&c.r));
    }

    #[test]
    fn test_offscreen_shapes_are_ignored() {
        let mut raster = Raster::new(8, 8);
        raster.fill_disc(Vec2::new(-100.0, -100.0), 3.0, Color::WHITE, 1.0);
        raster.stroke_line(Vec2::new(-50.0, 50.0), Vec2::new(-10.0, 90.0), 2.0, Color::WHITE, 1.0);
        assert!(raster.as_bytes().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_polyline_joints_not_doubled() {
        let mut raster = Raster::new(40, 10);
        let strip = [Vec2::new(0.0, 5.0), Vec2::new(20.0, 5.0), Vec2::new(40.0, 5.0)];
        raster.stroke_polyline(&strip, 2.0, Color::WHITE, 0.3);
        assert_eq!(raster.pixel(20, 4), raster.pixel(10, 4));
    }

    #[test]
    fn test_wash_converges_to_black() {
        let mut raster = Raster::new(4, 4);
        raster.clear(Color::WHITE);
        for _ in 0..400 {
            raster.wash(Color::BLACK, 0.05);
        }
        assert_eq!(raster.pixel(2, 2), Color::BLACK);
    }

    #[test]
    fn test_zero_size_is_one_pixel() {
        let raster = Raster::new(0, 0);
        assert_eq!((raster.width(), raster.height()), (1, 1));
    }
}
