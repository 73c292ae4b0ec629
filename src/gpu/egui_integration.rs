//! Egui overlay for the FPS readout and play/pause button.
//!
//! Only built with the `egui` feature. Without it the window title carries
//! the FPS readout and Space toggles playback.

use std::sync::Arc;
use winit::window::Window;

use super::{PresentFrame, Presenter};

/// Egui integration state.
///
/// Wraps egui context, winit state, and wgpu renderer.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Output from egui frame processing.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// What the user did with the overlay this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlayResponse {
    pub toggle_clicked: bool,
}

impl EguiIntegration {
    /// Create new egui integration.
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self { ctx, state, renderer }
    }

    /// Process a winit event.
    ///
    /// Returns true if egui consumed the event.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Lay out the overlay: play/pause button top-left, FPS readout top-right.
    pub fn run(
        &mut self,
        window: &Window,
        fps: u32,
        playing: bool,
    ) -> (EguiFrameOutput, OverlayResponse) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);

        let mut response = OverlayResponse::default();
        let panel = egui::Frame::default()
            .fill(egui::Color32::from_black_alpha(128))
            .inner_margin(egui::Margin::symmetric(8, 4))
            .corner_radius(4.0);

        egui::Area::new(egui::Id::new("playback"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(20.0, 20.0))
            .show(&self.ctx, |ui| {
                let label = if playing { "PAUSE" } else { "PLAY" };
                if ui.button(label).clicked() {
                    response.toggle_clicked = true;
                }
            });

        egui::Area::new(egui::Id::new("fps"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
            .show(&self.ctx, |ui| {
                panel.show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("FPS: {}", fps))
                            .small()
                            .color(egui::Color32::WHITE),
                    );
                });
            });

        let full_output = self.ctx.end_pass();
        self.state.handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let output = EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        };
        (output, response)
    }

    /// Record the overlay into `frame` on top of the blitted field.
    pub fn paint(&mut self, presenter: &Presenter, frame: &mut PresentFrame, output: &EguiFrameOutput) {
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [presenter.config.width, presenter.config.height],
            pixels_per_point: output.pixels_per_point,
        };

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(presenter.device(), presenter.queue(), *id, image_delta);
        }
        self.renderer.update_buffers(
            presenter.device(),
            presenter.queue(),
            &mut frame.encoder,
            &output.paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(
                &mut render_pass.forget_lifetime(),
                &output.paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
