//! Drawing surface abstraction.
//!
//! Every render pass in the crate draws through [`Canvas`], so the field can
//! be composited onto the CPU [`Raster`](crate::Raster) or any other surface
//! that can fill discs and stroke lines. Coordinates are pixels with the
//! origin at the top-left corner; `alpha` is 0.0-1.0 and blends over what is
//! already on the surface.

use crate::color::Color;
use glam::Vec2;

/// A 2D surface the field is composited onto.
pub trait Canvas {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Blend `color` at `alpha` over the entire surface.
    fn wash(&mut self, color: Color, alpha: f32);

    /// Fill a disc.
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Soft halo around a disc of `radius`, fading out over `blur` pixels.
    fn glow(&mut self, center: Vec2, radius: f32, blur: f32, color: Color, alpha: f32);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, alpha: f32);

    /// Stroke a connected line strip through `points`.
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color, alpha: f32) {
        for segment in points.windows(2) {
            self.stroke_line(segment[0], segment[1], width, color, alpha);
        }
    }
}
