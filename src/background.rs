//! Windowed runner.
//!
//! [`Background`] opens a window, mounts an [`Engine`] on it and drives the
//! frame loop from winit redraw requests:
//!
//! - window creation mounts the engine at the window's size
//! - `Resized` re-spawns the field and reallocates the raster
//! - `CursorMoved` feeds the pointer mailbox
//! - Space (or the overlay button) toggles play/pause
//! - `RedrawRequested` spends the pending frame ticket, presents the raster
//!   and requests the next redraw while the loop runs
//! - `CloseRequested` tears the engine down and exits
//!
//! While paused no redraws are requested; when the system asks for one
//! anyway (exposure, resize) the last raster is presented unchanged.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::engine::Engine;
use crate::error::RunError;
use crate::gpu::Presenter;
use crate::raster::Raster;
use crate::scheduler::FrameTicket;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;

/// Builder for the windowed background.
///
/// ```ignore
/// Background::new()
///     .with_config(FieldConfig::default().with_particle_count(80))
///     .with_title("drift")
///     .run()?;
/// ```
pub struct Background {
    config: FieldConfig,
    title: String,
    window_size: (u32, u32),
}

impl Background {
    /// Create a runner with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            title: "driftfield".to_string(),
            window_size: (1280, 720),
        }
    }

    /// Replace the field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title prefix.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial logical window size.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Run until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    title: String,
    window_size: (u32, u32),
    engine: Engine,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    raster: Option<Raster>,
    ticket: Option<FrameTicket>,
    shown_fps: Option<(u32, bool)>,
    error: Option<RunError>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
}

impl App {
    fn new(background: Background) -> Self {
        Self {
            title: background.title,
            window_size: background.window_size,
            engine: Engine::new(background.config),
            window: None,
            presenter: None,
            raster: None,
            ticket: None,
            shown_fps: None,
            error: None,
            #[cfg(feature = "egui")]
            egui: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(
                presenter.device(),
                presenter.surface_format(),
                &window,
            ));
        }

        let size = window.inner_size();
        self.raster = Some(Raster::new(size.width, size.height));
        self.presenter = Some(presenter);
        self.ticket = self.engine.mount(size.width, size.height);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn toggle(&mut self) {
        match self.engine.toggle() {
            Some(ticket) => {
                log::debug!("playing");
                self.ticket = Some(ticket);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            None => log::debug!("paused"),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(winit::dpi::PhysicalSize::new(width, height));
        }
        if self.engine.resize(width, height) {
            self.raster = Some(Raster::new(width, height));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(ticket) = self.ticket.take() {
            let canvas = self.raster.as_mut().map(|r| r as &mut dyn Canvas);
            self.ticket = self.engine.tick(ticket, Instant::now(), canvas);
        }

        self.update_title();
        self.present(event_loop);

        if self.ticket.is_some() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn present(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(presenter), Some(raster)) = (self.presenter.as_mut(), self.raster.as_ref()) else {
            return;
        };

        let frame = match presenter.begin(raster) {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                presenter.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("skipped frame: {:?}", e);
                return;
            }
        };

        #[cfg(feature = "egui")]
        let (frame, toggle_requested) = {
            let mut frame = frame;
            let mut clicked = false;
            if let (Some(egui), Some(window)) = (self.egui.as_mut(), self.window.as_ref()) {
                let (output, response) =
                    egui.run(window, self.engine.fps(), self.engine.is_running());
                egui.paint(presenter, &mut frame, &output);
                clicked = response.toggle_clicked;
            }
            (frame, clicked)
        };
        #[cfg(not(feature = "egui"))]
        let toggle_requested = false;

        presenter.finish(frame);

        if toggle_requested {
            self.toggle();
        }
    }

    fn update_title(&mut self) {
        let shown = (self.engine.fps(), self.engine.is_running());
        if self.shown_fps == Some(shown) {
            return;
        }
        self.shown_fps = Some(shown);
        if let Some(window) = &self.window {
            let (fps, running) = shown;
            let state = if running { "" } else { " | paused" };
            window.set_title(&format!("{} | FPS: {}{}", self.title, fps, state));
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.engine.teardown();
        self.ticket = None;
        self.raster = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            if egui.on_window_event(window, &event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.engine
                    .pointer()
                    .set_position(position.x as f32, position.y as f32);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.toggle(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
