//! Field configuration.
//!
//! All values have defaults matching the stock background. Configuration is
//! fixed for the lifetime of an [`Engine`](crate::Engine); viewport resizes
//! re-spawn the field with the same settings.
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_particle_count(80)
//!     .with_connector_radius(120.0);
//! ```

use crate::color::Color;

/// Particle count used when none is configured.
pub const DEFAULT_PARTICLE_COUNT: usize = 50;
/// Wave segments used when none is configured (yields 101 points).
pub const DEFAULT_WAVE_RESOLUTION: usize = 100;
/// Radius around the pointer inside which particles are attracted.
pub const DEFAULT_POINTER_FORCE_RADIUS: f32 = 100.0;
/// Velocity gained per frame at the pointer's position.
pub const DEFAULT_POINTER_STRENGTH: f32 = 0.1;
/// Particles closer than this are joined by a line.
pub const DEFAULT_CONNECTOR_RADIUS: f32 = 80.0;

/// Wave stroke color (`#4a90e2`).
pub const WAVE_COLOR: Color = Color::rgb(0x4a, 0x90, 0xe2);
/// Alpha shared by every wave layer.
pub const WAVE_ALPHA: f32 = 0.3;
/// Wave stroke width in pixels.
pub const WAVE_LINE_WIDTH: f32 = 2.0;
/// Proximity line color.
pub const CONNECTOR_COLOR: Color = Color::WHITE;
/// Proximity line alpha.
pub const CONNECTOR_ALPHA: f32 = 0.2;
/// Proximity line width in pixels.
pub const CONNECTOR_LINE_WIDTH: f32 = 1.0;

/// Settings for the particle field, wave field and proximity pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Number of particles spawned on mount and after every resize.
    pub particle_count: usize,
    /// Number of wave segments; the wave has `wave_resolution + 1` points.
    pub wave_resolution: usize,
    /// Pointer attraction radius in pixels.
    pub pointer_force_radius: f32,
    /// Pointer attraction scale applied to the normalized force.
    pub pointer_strength: f32,
    /// Proximity line threshold in pixels.
    pub connector_radius: f32,
    /// Number of stacked wave curves.
    pub wave_layers: usize,
    /// Vertical distance between wave layers.
    pub wave_layer_spacing: f32,
    /// Amplitude of the per-layer sway.
    pub wave_layer_sway: f32,
    /// Alpha of the black wash painted before each frame (motion trails).
    pub trail_fade: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            wave_resolution: DEFAULT_WAVE_RESOLUTION,
            pointer_force_radius: DEFAULT_POINTER_FORCE_RADIUS,
            pointer_strength: DEFAULT_POINTER_STRENGTH,
            connector_radius: DEFAULT_CONNECTOR_RADIUS,
            wave_layers: 3,
            wave_layer_spacing: 50.0,
            wave_layer_sway: 20.0,
            trail_fade: 0.05,
        }
    }
}

impl FieldConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the number of wave segments (minimum 1).
    pub fn with_wave_resolution(mut self, resolution: usize) -> Self {
        self.wave_resolution = resolution.max(1);
        self
    }

    /// Set the pointer attraction radius.
    pub fn with_pointer_force_radius(mut self, radius: f32) -> Self {
        self.pointer_force_radius = radius.max(0.0);
        self
    }

    /// Set the pointer attraction strength.
    pub fn with_pointer_strength(mut self, strength: f32) -> Self {
        self.pointer_strength = strength;
        self
    }

    /// Set the proximity line threshold.
    pub fn with_connector_radius(mut self, radius: f32) -> Self {
        self.connector_radius = radius.max(0.0);
        self
    }

    /// Set the number of stacked wave curves.
    pub fn with_wave_layers(mut self, layers: usize) -> Self {
        self.wave_layers = layers;
        self
    }

    /// Set the trail fade alpha (0 keeps everything, 1 clears every frame).
    pub fn with_trail_fade(mut self, alpha: f32) -> Self {
        self.trail_fade = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.wave_resolution, 100);
        assert_eq!(config.pointer_force_radius, 100.0);
        assert_eq!(config.connector_radius, 80.0);
        assert_eq!(config.wave_layers, 3);
    }

    #[test]
    fn test_builder_clamps() {
        let config = FieldConfig::new()
            .with_wave_resolution(0)
            .with_connector_radius(-5.0)
            .with_trail_fade(3.0);
        assert_eq!(config.wave_resolution, 1);
        assert_eq!(config.connector_radius, 0.0);
        assert_eq!(config.trail_fade, 1.0);
    }
}
