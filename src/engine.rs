//! The background engine.
//!
//! An [`Engine`] owns everything the animation needs: the configured field,
//! the current [`Scene`] (particles and waves sized to the viewport), the
//! pointer mailbox, and the frame scheduler with its FPS counter. There is no
//! global state; dropping the engine releases all of it.
//!
//! # Lifecycle
//!
//! ```ignore
//! let mut engine = Engine::new(FieldConfig::default());
//! let mut ticket = engine.mount(width, height);   // spawn + start
//!
//! // Each display refresh:
//! if let Some(t) = ticket.take() {
//!     ticket = engine.tick(t, Instant::now(), Some(&mut raster));
//! }
//!
//! engine.resize(new_width, new_height);           // full re-spawn
//! engine.teardown();                              // stop + discard
//! ```

use crate::bounds::Bounds;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::{
    FieldConfig, CONNECTOR_ALPHA, CONNECTOR_COLOR, CONNECTOR_LINE_WIDTH, WAVE_ALPHA, WAVE_COLOR,
    WAVE_LINE_WIDTH,
};
use crate::connector::ProximityConnector;
use crate::particle::{ParticleSystem, PointerForce};
use crate::pointer::PointerTracker;
use crate::scheduler::{FrameScheduler, FrameTicket, SchedulerState};
use crate::time::FrameClock;
use crate::wave::{WaveField, WaveStyle};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Instant;

/// Particles and waves for one viewport size.
///
/// A scene is replaced as a whole on resize, so a frame always sees bounds,
/// particles and waves that belong together.
#[derive(Debug, Clone)]
pub struct Scene {
    bounds: Bounds,
    particles: ParticleSystem,
    waves: WaveField,
}

impl Scene {
    fn spawn(config: &FieldConfig, bounds: Bounds, rng: &mut SmallRng) -> Self {
        Self {
            bounds,
            particles: ParticleSystem::spawn(config.particle_count, &bounds, rng),
            waves: WaveField::spawn(config.wave_resolution, &bounds, rng),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn waves(&self) -> &WaveField {
        &self.waves
    }
}

/// Result of spending a frame ticket.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was simulated and composited.
    Rendered,
    /// No surface or no scene; nothing changed.
    Skipped,
    /// The ticket belonged to a stopped loop.
    Stale,
}

/// The animated background.
pub struct Engine {
    config: FieldConfig,
    scene: Option<Scene>,
    pointer: PointerTracker,
    scheduler: FrameScheduler,
    connector: ProximityConnector,
    wave_style: WaveStyle,
    clock: FrameClock,
    rng: SmallRng,
    last_outcome: Option<FrameOutcome>,
}

impl Engine {
    /// Create an unmounted engine with entropy-seeded randomness.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create an unmounted engine with a fixed seed.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: SmallRng) -> Self {
        let now = Instant::now();
        let connector = ProximityConnector::new(
            config.connector_radius,
            CONNECTOR_COLOR,
            CONNECTOR_ALPHA,
            CONNECTOR_LINE_WIDTH,
        );
        let wave_style = WaveStyle {
            layers: config.wave_layers,
            spacing: config.wave_layer_spacing,
            sway: config.wave_layer_sway,
            color: WAVE_COLOR,
            alpha: WAVE_ALPHA,
            line_width: WAVE_LINE_WIDTH,
        };
        Self {
            config,
            scene: None,
            pointer: PointerTracker::new(),
            scheduler: FrameScheduler::new(now),
            connector,
            wave_style,
            clock: FrameClock::new(now),
            rng,
            last_outcome: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// The current scene, if mounted on a valid viewport.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The instant global animation time is measured from.
    pub fn epoch(&self) -> Instant {
        self.clock.start_instant()
    }

    /// A handle to the pointer mailbox, for the input layer.
    pub fn pointer(&self) -> PointerTracker {
        self.pointer.clone()
    }

    /// Latest measured frames per second.
    pub fn fps(&self) -> u32 {
        self.scheduler.fps()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// What happened to the most recently spent ticket.
    pub fn last_outcome(&self) -> Option<&FrameOutcome> {
        self.last_outcome.as_ref()
    }

    /// Spawn the field for a `width` x `height` viewport and start the loop.
    ///
    /// A degenerate viewport leaves the engine without a scene (frames are
    /// skipped until a valid resize arrives) but still starts the loop.
    pub fn mount(&mut self, width: u32, height: u32) -> Option<FrameTicket> {
        match Bounds::new(width, height) {
            Some(bounds) => {
                self.scene = Some(Scene::spawn(&self.config, bounds, &mut self.rng));
                log::info!(
                    "mounted {}x{} with {} particles",
                    width,
                    height,
                    self.config.particle_count
                );
            }
            None => log::warn!("mounted on empty viewport {}x{}", width, height),
        }
        self.start()
    }

    /// Re-spawn the field for a new viewport size.
    ///
    /// All particle and wave state is discarded. Zero-sized viewports are
    /// ignored and the previous scene kept. The run state is unchanged.
    /// Returns whether the resize was applied.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Some(bounds) = Bounds::new(width, height) else {
            log::warn!("ignoring resize to {}x{}", width, height);
            return false;
        };
        let scene = Scene::spawn(&self.config, bounds, &mut self.rng);
        self.scene = Some(scene);
        log::info!("resized to {}x{}", width, height);
        true
    }

    /// Stop the loop and discard the scene.
    pub fn teardown(&mut self) {
        self.scheduler.stop();
        self.scene = None;
        log::info!("torn down");
    }

    /// Start the frame loop; `None` if it is already running.
    pub fn start(&mut self) -> Option<FrameTicket> {
        self.scheduler.start()
    }

    /// Stop the frame loop. The last frame stays on the surface.
    pub fn stop(&mut self) -> bool {
        self.scheduler.stop()
    }

    /// Play/pause toggle. Returns a ticket when this resumed the loop.
    pub fn toggle(&mut self) -> Option<FrameTicket> {
        self.scheduler.toggle()
    }

    /// Run one frame: step the field, composite it onto `canvas`, count it.
    ///
    /// Returns the ticket for the next frame while the loop keeps running.
    /// Without a canvas or a scene the frame is skipped with no state change,
    /// but the loop continues.
    pub fn tick(
        &mut self,
        ticket: FrameTicket,
        now: Instant,
        canvas: Option<&mut dyn Canvas>,
    ) -> Option<FrameTicket> {
        if !self.scheduler.accepts(&ticket) {
            self.last_outcome = Some(FrameOutcome::Stale);
            return None;
        }

        let outcome = match (canvas, self.scene.as_mut()) {
            (Some(canvas), Some(scene)) => {
                let pointer = PointerForce {
                    position: self.pointer.current_position(),
                    radius: self.config.pointer_force_radius,
                    strength: self.config.pointer_strength,
                };
                scene.particles.step(&scene.bounds, &pointer, &mut self.rng);
                scene.waves.step(self.clock.seconds(now));

                canvas.wash(Color::BLACK, self.config.trail_fade);
                scene.particles.draw(canvas);
                scene.waves.draw(canvas, &self.wave_style);
                self.connector.draw(scene.particles.particles(), canvas);

                self.scheduler.record_frame(now);
                FrameOutcome::Rendered
            }
            _ => FrameOutcome::Skipped,
        };
        self.last_outcome = Some(outcome);

        self.scheduler.advance(ticket)
    }
}
