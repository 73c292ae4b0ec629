//! Layered sinusoidal wave field.
//!
//! The wave is a row of evenly spaced points across the viewport. Each point
//! carries its own phase, frequency and amplitude; its height is
//! `baseline_y + sin(phase + time) * amplitude`, derived on demand and never
//! stored. Rendering stacks several copies of the curve, each shifted down
//! and swaying with its own offset.

use crate::bounds::Bounds;
use crate::canvas::Canvas;
use crate::color::Color;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// One sample of the wave curve.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePoint {
    /// Horizontal position, fixed at spawn.
    pub x: f32,
    /// Rest height, fixed at spawn.
    pub baseline_y: f32,
    /// Phase angle in radians, advanced by `frequency` every step.
    pub phase: f32,
    /// Peak deviation from the baseline, in [20, 70).
    pub amplitude: f32,
    /// Phase advance per step, in [0.01, 0.03).
    pub frequency: f32,
}

impl WavePoint {
    /// Height of the point at `time` seconds.
    #[inline]
    pub fn y(&self, time: f32) -> f32 {
        self.baseline_y + (self.phase + time).sin() * self.amplitude
    }
}

/// Appearance of the stacked wave curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveStyle {
    pub layers: usize,
    /// Vertical offset between consecutive layers.
    pub spacing: f32,
    /// Amplitude of each layer's extra sway.
    pub sway: f32,
    pub color: Color,
    pub alpha: f32,
    pub line_width: f32,
}

/// Fixed-size sequence of wave points.
#[derive(Debug, Clone)]
pub struct WaveField {
    points: Vec<WavePoint>,
    time: f32,
    /// Scratch buffer reused for layer polylines.
    strip: Vec<Vec2>,
}

impl WaveField {
    /// Create `resolution + 1` points spanning the width of `bounds`.
    ///
    /// A resolution of zero is treated as one.
    pub fn spawn<R: Rng>(resolution: usize, bounds: &Bounds, rng: &mut R) -> Self {
        let resolution = resolution.max(1);
        let step = bounds.width() / resolution as f32;
        let baseline_y = bounds.height() / 2.0;

        let points = (0..=resolution)
            .map(|i| WavePoint {
                x: step * i as f32,
                baseline_y,
                phase: TAU / resolution as f32 * i as f32,
                amplitude: rng.gen_range(20.0..70.0),
                frequency: rng.gen_range(0.01..0.03),
            })
            .collect();

        Self {
            points,
            time: 0.0,
            strip: Vec::with_capacity(resolution + 1),
        }
    }

    pub fn points(&self) -> &[WavePoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Global time of the last step, in seconds.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance every phase by its frequency and record `global_time`.
    pub fn step(&mut self, global_time: f32) {
        for point in &mut self.points {
            point.phase += point.frequency;
        }
        self.time = global_time;
    }

    /// Current `(x, y)` of every point.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().map(|p| Vec2::new(p.x, p.y(self.time)))
    }

    /// Vertical offset applied to every point of `layer`, the first point
    /// included, so each layer is a rigidly shifted copy of the curve.
    pub fn layer_offset(&self, layer: usize, style: &WaveStyle) -> f32 {
        let layer = layer as f32;
        layer * style.spacing + (self.time + layer).sin() * style.sway
    }

    /// Stroke every layer as a line strip. Takes `&mut self` only to reuse
    /// the scratch buffer; wave state is untouched.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, style: &WaveStyle) {
        for layer in 0..style.layers {
            let offset = self.layer_offset(layer, style);
            let time = self.time;
            self.strip.clear();
            self.strip.extend(
                self.points
                    .iter()
                    .map(|p| Vec2::new(p.x, p.y(time) + offset)),
            );
            canvas.stroke_polyline(&self.strip, style.line_width, style.color, style.alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn field(resolution: usize) -> WaveField {
        let bounds = Bounds::new(800, 600).unwrap();
        WaveField::spawn(resolution, &bounds, &mut SmallRng::seed_from_u64(11))
    }

    #[test]
    fn test_spawn_layout() {
        let wave = field(100);
        assert_eq!(wave.len(), 101);
        assert_eq!(wave.points()[0].x, 0.0);
        assert!((wave.points()[100].x - 800.0).abs() < 1e-3);
        for (i, p) in wave.points().iter().enumerate() {
            assert!((p.x - 8.0 * i as f32).abs() < 1e-3);
            assert_eq!(p.baseline_y, 300.0);
            assert!((20.0..70.0).contains(&p.amplitude));
            assert!((0.01..0.03).contains(&p.frequency));
            assert!((p.phase - TAU / 100.0 * i as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_resolution_still_spans() {
        let wave = field(0);
        assert_eq!(wave.len(), 2);
        assert_eq!(wave.points()[1].x, 800.0);
    }

    #[test]
    fn test_step_advances_phase_only() {
        let mut wave = field(10);
        let before = wave.points().to_vec();
        wave.step(1.5);
        for (old, new) in before.iter().zip(wave.points()) {
            assert!((new.phase - (old.phase + old.frequency)).abs() < 1e-6);
            assert_eq!(new.x, old.x);
            assert_eq!(new.amplitude, old.amplitude);
        }
        assert_eq!(wave.time(), 1.5);
    }

    #[test]
    fn test_heights_stay_within_amplitude() {
        let mut wave = field(100);
        for frame in 0..5000 {
            wave.step(frame as f32 * 0.016);
            for (p, pos) in wave.points().iter().zip(wave.positions()) {
                assert!(pos.y >= p.baseline_y - p.amplitude - 1e-3);
                assert!(pos.y <= p.baseline_y + p.amplitude + 1e-3);
            }
        }
    }

    #[test]
    fn test_layer_offset() {
        let mut wave = field(4);
        wave.step(0.0);
        let style = WaveStyle {
            layers: 3,
            spacing: 50.0,
            sway: 20.0,
            color: Color::WHITE,
            alpha: 0.3,
            line_width: 2.0,
        };
        assert_eq!(wave.layer_offset(0, &style), 0.0);
        assert!((wave.layer_offset(2, &style) - (100.0 + 2.0f32.sin() * 20.0)).abs() < 1e-4);
    }

    /// Records stroked strips and ignores everything else.
    #[derive(Default)]
    struct StripRecorder {
        strips: Vec<Vec<Vec2>>,
    }

    impl Canvas for StripRecorder {
        fn width(&self) -> u32 {
            800
        }
        fn height(&self) -> u32 {
            600
        }
        fn wash(&mut self, _: Color, _: f32) {}
        fn fill_disc(&mut self, _: Vec2, _: f32, _: Color, _: f32) {}
        fn glow(&mut self, _: Vec2, _: f32, _: f32, _: Color, _: f32) {}
        fn stroke_line(&mut self, _: Vec2, _: Vec2, _: f32, _: Color, _: f32) {}
        fn stroke_polyline(&mut self, points: &[Vec2], _: f32, _: Color, _: f32) {
            self.strips.push(points.to_vec());
        }
    }

    #[test]
    fn test_layers_shift_every_point_including_first() {
        let mut wave = field(10);
        wave.step(0.7);
        let style = WaveStyle {
            layers: 3,
            spacing: 50.0,
            sway: 20.0,
            color: Color::WHITE,
            alpha: 0.3,
            line_width: 2.0,
        };
        let mut canvas = StripRecorder::default();
        wave.draw(&mut canvas, &style);

        assert_eq!(canvas.strips.len(), 3);
        let base: Vec<Vec2> = wave.positions().collect();
        for (layer, strip) in canvas.strips.iter().enumerate() {
            let offset = wave.layer_offset(layer, &style);
            assert_eq!(strip.len(), base.len());
            for (drawn, rest) in strip.iter().zip(&base) {
                assert_eq!(drawn.x, rest.x);
                assert!((drawn.y - (rest.y + offset)).abs() < 1e-4);
            }
        }
    }
}
