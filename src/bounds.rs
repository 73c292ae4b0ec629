//! Viewport bounds.

use glam::Vec2;
use rand::Rng;

/// The drawing surface rectangle `[0, width] x [0, height]` in pixels.
///
/// A `Bounds` always has a strictly positive area; construction from a
/// degenerate viewport fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    /// Bounds for a viewport, or `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Self::from_f32(width as f32, height as f32)
    }

    /// Bounds from float dimensions, or `None` unless both are finite and positive.
    pub fn from_f32(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether `p` lies inside the closed rectangle.
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp `p` into the closed rectangle.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, self.size())
    }

    /// Uniformly random point inside the rectangle.
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(0.0..self.width),
            rng.gen_range(0.0..self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_degenerate() {
        assert!(Bounds::new(0, 600).is_none());
        assert!(Bounds::new(800, 0).is_none());
        assert!(Bounds::from_f32(-1.0, 10.0).is_none());
        assert!(Bounds::from_f32(f32::NAN, 10.0).is_none());
        assert!(Bounds::new(800, 600).is_some());
    }

    #[test]
    fn test_clamp_and_contains() {
        let b = Bounds::new(800, 600).unwrap();
        assert_eq!(b.clamp(Vec2::new(803.0, -2.0)), Vec2::new(800.0, 0.0));
        assert!(b.contains(Vec2::new(800.0, 600.0)));
        assert!(!b.contains(Vec2::new(800.1, 10.0)));
    }

    #[test]
    fn test_random_point_inside() {
        let b = Bounds::new(40, 30).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(b.contains(b.random_point(&mut rng)));
        }
    }
}
