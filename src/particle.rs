//! Drifting particles.
//!
//! A [`ParticleSystem`] owns a fixed number of particles for the lifetime of
//! one viewport. Particles are never removed: when a particle outlives its
//! `max_life` it is respawned in place with a fresh position and velocity,
//! keeping its size, opacity, color and lifespan.
//!
//! Each step, per particle and in order:
//!
//! 1. integrate velocity into position
//! 2. age by one frame
//! 3. accelerate toward the pointer when within the force radius
//! 4. reflect velocity on any axis where the moved position left the bounds
//! 5. clamp the position back into the bounds
//! 6. respawn if `life > max_life`

use crate::bounds::Bounds;
use crate::canvas::Canvas;
use crate::color::Color;
use glam::Vec2;
use rand::Rng;

/// Hue range of spawned particles, in degrees.
const HUE_RANGE: std::ops::Range<f32> = 200.0..260.0;
const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.7;

/// A single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Disc radius in pixels, in [1, 4).
    pub size: f32,
    /// Base opacity in [0.2, 0.7).
    pub opacity: f32,
    pub color: Color,
    /// Frames lived since the last (re)spawn.
    pub life: u32,
    /// Lifespan in frames, in [100, 200).
    pub max_life: f32,
}

impl Particle {
    /// Spawn a particle with every attribute randomized.
    pub fn random<R: Rng>(bounds: &Bounds, rng: &mut R) -> Self {
        Self {
            position: bounds.random_point(rng),
            velocity: random_velocity(rng),
            size: rng.gen_range(1.0..4.0),
            opacity: rng.gen_range(0.2..0.7),
            color: Color::hsl(rng.gen_range(HUE_RANGE), SATURATION, LIGHTNESS),
            life: rng.gen_range(0..100),
            max_life: rng.gen_range(100.0..200.0),
        }
    }

    /// Fraction of the lifespan still remaining, in [0, 1].
    pub fn remaining_life(&self) -> f32 {
        (1.0 - self.life as f32 / self.max_life).clamp(0.0, 1.0)
    }

    /// Opacity after fading by age.
    pub fn render_alpha(&self) -> f32 {
        self.opacity * self.remaining_life()
    }

    fn respawn<R: Rng>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.life = 0;
        self.position = bounds.random_point(rng);
        self.velocity = random_velocity(rng);
    }
}

fn random_velocity<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
}

/// Pointer attraction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerForce {
    /// Pointer position this frame, if any has been reported.
    pub position: Option<Vec2>,
    /// Particles at or beyond this distance are unaffected.
    pub radius: f32,
    /// Velocity gained at zero distance.
    pub strength: f32,
}

impl PointerForce {
    /// Velocity change for a particle at `at`.
    ///
    /// Linear falloff from `strength` at the pointer to zero at `radius`,
    /// directed toward the pointer. A particle exactly on the pointer gets no
    /// force since the direction is undefined.
    pub fn acceleration(&self, at: Vec2) -> Vec2 {
        let Some(pointer) = self.position else {
            return Vec2::ZERO;
        };
        let delta = pointer - at;
        let distance = delta.length();
        if distance >= self.radius || distance == 0.0 {
            return Vec2::ZERO;
        }
        let force = (self.radius - distance) / self.radius;
        delta / distance * force * self.strength
    }
}

/// Fixed-size collection of particles.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Spawn `count` random particles inside `bounds`.
    pub fn spawn<R: Rng>(count: usize, bounds: &Bounds, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::random(bounds, rng)).collect();
        Self { particles }
    }

    /// Wrap an existing set of particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle by one frame.
    pub fn step<R: Rng>(&mut self, bounds: &Bounds, pointer: &PointerForce, rng: &mut R) {
        for p in &mut self.particles {
            p.position += p.velocity;
            p.life += 1;

            p.velocity += pointer.acceleration(p.position);

            // Reflect against the moved, unclamped position
            if p.position.x < 0.0 || p.position.x > bounds.width() {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > bounds.height() {
                p.velocity.y = -p.velocity.y;
            }

            p.position = bounds.clamp(p.position);

            if p.life as f32 > p.max_life {
                p.respawn(bounds, rng);
            }
        }
    }

    /// Draw every particle as a glowing disc. Does not mutate state.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for p in &self.particles {
            let alpha = p.render_alpha();
            if alpha <= 0.0 {
                continue;
            }
            canvas.fill_disc(p.position, p.size, p.color, alpha);
            canvas.glow(p.position, p.size, p.size * 2.0, p.color, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0xD21F7)
    }

    fn bounds() -> Bounds {
        Bounds::new(800, 600).unwrap()
    }

    fn no_pointer() -> PointerForce {
        PointerForce {
            position: None,
            radius: 100.0,
            strength: 0.1,
        }
    }

    fn particle_at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            size: 2.0,
            opacity: 0.5,
            color: Color::WHITE,
            life: 0,
            max_life: 150.0,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let b = bounds();
        let system = ParticleSystem::spawn(500, &b, &mut rng());
        assert_eq!(system.len(), 500);
        for p in system.particles() {
            assert!(b.contains(p.position));
            assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
            assert!((1.0..4.0).contains(&p.size));
            assert!((0.2..0.7).contains(&p.opacity));
            assert!(p.life < 100);
            assert!((100.0..200.0).contains(&p.max_life));
        }
    }

    #[test]
    fn test_reflection_at_right_edge() {
        let mut system = ParticleSystem::from_particles(vec![particle_at(798.0, 300.0, 5.0, 0.0)]);
        system.step(&bounds(), &no_pointer(), &mut rng());
        let p = &system.particles()[0];
        assert_eq!(p.position.x, 800.0);
        assert_eq!(p.velocity.x, -5.0);
        assert_eq!(p.position.y, 300.0);
    }

    #[test]
    fn test_reflection_axes_independent() {
        let mut system = ParticleSystem::from_particles(vec![particle_at(10.0, 1.0, 1.0, -3.0)]);
        system.step(&bounds(), &no_pointer(), &mut rng());
        let p = &system.particles()[0];
        assert_eq!(p.velocity, Vec2::new(1.0, 3.0));
        assert_eq!(p.position, Vec2::new(11.0, 0.0));
    }

    #[test]
    fn test_respawn_after_max_life() {
        let mut p = particle_at(400.0, 300.0, 0.0, 0.0);
        p.life = 100;
        p.max_life = 100.0;
        let (size, opacity, color) = (p.size, p.opacity, p.color);
        let mut system = ParticleSystem::from_particles(vec![p]);
        system.step(&bounds(), &no_pointer(), &mut rng());

        let p = &system.particles()[0];
        assert_eq!(p.life, 0);
        assert!(bounds().contains(p.position));
        assert_eq!(p.max_life, 100.0);
        assert_eq!((p.size, p.opacity, p.color), (size, opacity, color));
    }

    #[test]
    fn test_no_respawn_at_max_life() {
        let mut p = particle_at(400.0, 300.0, 0.0, 0.0);
        p.life = 99;
        p.max_life = 100.0;
        let mut system = ParticleSystem::from_particles(vec![p]);
        system.step(&bounds(), &no_pointer(), &mut rng());
        assert_eq!(system.particles()[0].life, 100);
        assert_eq!(system.particles()[0].position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_pointer_force_magnitude() {
        let force = PointerForce {
            position: Some(Vec2::new(100.0, 100.0)),
            radius: 100.0,
            strength: 0.1,
        };
        let accel = force.acceleration(Vec2::new(150.0, 100.0));
        assert!((accel.x + 0.05).abs() < 1e-6);
        assert_eq!(accel.y, 0.0);

        assert_eq!(force.acceleration(Vec2::new(200.0, 100.0)), Vec2::ZERO);
        assert_eq!(force.acceleration(Vec2::new(300.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_on_particle_is_no_force() {
        let force = PointerForce {
            position: Some(Vec2::new(42.0, 42.0)),
            radius: 100.0,
            strength: 0.1,
        };
        let accel = force.acceleration(Vec2::new(42.0, 42.0));
        assert_eq!(accel, Vec2::ZERO);
        assert!(accel.is_finite());
    }

    #[test]
    fn test_pointer_force_applied_after_move() {
        let force = PointerForce {
            position: Some(Vec2::new(100.0, 100.0)),
            radius: 100.0,
            strength: 0.1,
        };
        let mut system = ParticleSystem::from_particles(vec![particle_at(150.0, 100.0, 0.0, 0.0)]);
        system.step(&bounds(), &force, &mut rng());
        let p = &system.particles()[0];
        assert_eq!(p.position, Vec2::new(150.0, 100.0));
        assert!((p.velocity.x + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_hold_over_many_steps() {
        let b = bounds();
        let mut r = rng();
        let mut system = ParticleSystem::spawn(200, &b, &mut r);
        let force = PointerForce {
            position: Some(Vec2::new(-50.0, 620.0)),
            radius: 100.0,
            strength: 0.1,
        };
        for _ in 0..2000 {
            system.step(&b, &force, &mut r);
            assert_eq!(system.len(), 200);
            for p in system.particles() {
                assert!(b.contains(p.position), "{:?} escaped", p.position);
                assert!(p.life as f32 <= p.max_life);
            }
        }
    }

    #[test]
    fn test_render_alpha_fades_with_age() {
        let mut p = particle_at(0.0, 0.0, 0.0, 0.0);
        p.opacity = 0.6;
        p.max_life = 120.0;
        p.life = 0;
        assert!((p.render_alpha() - 0.6).abs() < 1e-6);
        p.life = 60;
        assert!((p.render_alpha() - 0.3).abs() < 1e-6);
        p.life = 120;
        assert_eq!(p.render_alpha(), 0.0);
    }
}
