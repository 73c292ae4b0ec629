//! Proximity lines between nearby particles.
//!
//! Every unordered pair of particles closer than the connector radius is
//! joined by a faint line. Edges are derived fresh each frame from particle
//! positions; nothing is stored between frames.
//!
//! Small fields use the direct pairwise scan. Above [`GRID_THRESHOLD`]
//! particles the scan is bucketed into a uniform grid with cells the size of
//! the radius, so each particle is only tested against its own and the
//! neighboring cells. Both paths produce the same pairs in the same order.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::particle::Particle;
use glam::Vec2;
use std::collections::HashMap;

/// Particle count above which the grid-bucketed pass is used.
pub const GRID_THRESHOLD: usize = 256;

/// Derives and draws proximity edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityConnector {
    radius: f32,
    pub color: Color,
    pub alpha: f32,
    pub line_width: f32,
}

impl ProximityConnector {
    pub fn new(radius: f32, color: Color, alpha: f32, line_width: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            color,
            alpha,
            line_width,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Index pairs `(i, j)`, `i < j`, of particles strictly closer than the
    /// radius, sorted.
    pub fn pairs(&self, particles: &[Particle]) -> Vec<(usize, usize)> {
        let positions: Vec<Vec2> = particles.iter().map(|p| p.position).collect();
        if positions.len() > GRID_THRESHOLD && self.radius > 0.0 {
            grid_pairs(&positions, self.radius)
        } else {
            brute_force_pairs(&positions, self.radius)
        }
    }

    /// Stroke a line for every close pair. Does not mutate particles.
    pub fn draw(&self, particles: &[Particle], canvas: &mut dyn Canvas) {
        for (i, j) in self.pairs(particles) {
            canvas.stroke_line(
                particles[i].position,
                particles[j].position,
                self.line_width,
                self.color,
                self.alpha,
            );
        }
    }
}

/// Direct O(n^2) scan over every unordered pair.
pub fn brute_force_pairs(positions: &[Vec2], radius: f32) -> Vec<(usize, usize)> {
    let radius_sq = radius * radius;
    let mut pairs = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i].distance_squared(positions[j]) < radius_sq {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Uniform-grid scan. `radius` must be positive.
///
/// Cell indices are 64-bit and neighbor offsets saturate, so very small radii
/// (huge cell coordinates) stay correct instead of overflowing.
pub fn grid_pairs(positions: &[Vec2], radius: f32) -> Vec<(usize, usize)> {
    let radius_sq = radius * radius;
    let cell_size = f64::from(radius);
    let cell_of = |p: Vec2| {
        (
            (f64::from(p.x) / cell_size).floor() as i64,
            (f64::from(p.y) / cell_size).floor() as i64,
        )
    };

    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, &p) in positions.iter().enumerate() {
        cells.entry(cell_of(p)).or_default().push(i);
    }

    let mut pairs = Vec::new();
    for (i, &p) in positions.iter().enumerate() {
        let (cx, cy) = cell_of(p);
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let cell = (cx.saturating_add(dx), cy.saturating_add(dy));
                let Some(bucket) = cells.get(&cell) else {
                    continue;
                };
                for &j in bucket {
                    if j > i && p.distance_squared(positions[j]) < radius_sq {
                        pairs.push((i, j));
                    }
                }
            }
        }
    }
    // Saturated offsets can visit one cell twice
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}
