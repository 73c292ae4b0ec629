//! # driftfield
//!
//! An animated generative background: drifting particles, layered sine waves
//! and proximity lines, composited with a fading trail and steered by the
//! pointer.
//!
//! The simulation and compositing run on the CPU against a [`Canvas`]; the
//! windowed runner uploads the resulting [`Raster`] to the GPU and blits it to
//! the surface once per frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Background::new()
//!         .with_config(FieldConfig::default().with_particle_count(80))
//!         .with_title("drift")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Engine
//!
//! [`Engine`] owns the field, the pointer mailbox and the frame scheduler.
//! `mount` spawns a [`Scene`] for the viewport and hands out the first
//! [`FrameTicket`]; each `tick` spends one ticket and returns the next while
//! the loop is running.
//!
//! ```ignore
//! let mut engine = Engine::new(FieldConfig::default());
//! let mut raster = Raster::new(800, 600);
//! let mut ticket = engine.mount(800, 600);
//! while let Some(t) = ticket.take() {
//!     ticket = engine.tick(t, Instant::now(), Some(&mut raster));
//! }
//! ```
//!
//! ### Frame composition
//!
//! Every rendered frame is painted in a fixed order:
//!
//! 1. translucent black wash (motion trails)
//! 2. particles, each a disc with a soft glow
//! 3. wave layers, stroked as polylines
//! 4. lines between particles closer than the connector radius
//!
//! ### Play / pause
//!
//! Stopping the loop invalidates any outstanding ticket, so a paused frame
//! never advances the field. Starting an already running loop hands out
//! nothing, so there is never more than one live ticket.
//!
//! ## Headless rendering
//!
//! [`Snapshot`] drives the engine against a raster with a simulated clock and
//! writes a PNG, which needs no window or GPU.

pub mod background;
pub mod bounds;
pub mod canvas;
pub mod color;
pub mod config;
pub mod connector;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod particle;
pub mod pointer;
pub mod raster;
pub mod scheduler;
pub mod snapshot;
pub mod time;
pub mod wave;

pub use background::Background;
pub use bounds::Bounds;
pub use canvas::Canvas;
pub use color::Color;
pub use config::FieldConfig;
pub use connector::ProximityConnector;
pub use engine::{Engine, FrameOutcome, Scene};
pub use error::{GpuError, RunError, SnapshotError};
pub use glam::Vec2;
pub use particle::{Particle, ParticleSystem, PointerForce};
pub use pointer::PointerTracker;
pub use raster::Raster;
pub use scheduler::{FrameScheduler, FrameTicket, SchedulerState};
pub use snapshot::Snapshot;
pub use time::{FpsCounter, FrameClock};
pub use wave::{WaveField, WavePoint, WaveStyle};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::Background;
    pub use crate::canvas::Canvas;
    pub use crate::color::Color;
    pub use crate::config::FieldConfig;
    pub use crate::engine::{Engine, FrameOutcome};
    pub use crate::error::{RunError, SnapshotError};
    pub use crate::raster::Raster;
    pub use crate::scheduler::FrameTicket;
    pub use crate::snapshot::Snapshot;
    pub use crate::Vec2;
    #[cfg(feature = "egui")]
    pub use egui;
}
