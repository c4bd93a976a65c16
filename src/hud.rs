use glam::Vec3;
use winit::window::Window;

use crate::core::PointerState;

/// Numbers shown in the overlay, gathered by the app each frame
#[derive(Debug, Clone, Copy)]
pub struct HudStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub variant: &'static str,
    pub shape_count: usize,
    pub pointer: PointerState,
    pub camera_position: Vec3,
    pub resolution: (u32, u32),
    pub time: f32,
}

/// egui debug overlay drawn on top of the shapes
pub struct Hud {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());

        Self { ctx, state, renderer }
    }

    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Record the overlay into `encoder`; returns egui's own command buffers,
    /// which must be submitted before the encoder
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        size_in_pixels: [u32; 2],
        stats: &HudStats,
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| Self::ui(ctx, stats));

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, self.ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: window.scale_factor() as f32,
        };

        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        command_buffers
    }

    fn ui(ctx: &egui::Context, stats: &HudStats) {
        egui::Window::new("Debug Info")
            .title_bar(true)
            .resizable(false)
            .fixed_pos(egui::pos2(10.0, 10.0))
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading(
                    egui::RichText::new(format!("{:.0} FPS", stats.fps))
                        .size(28.0)
                        .color(egui::Color32::from_rgb(74, 158, 255)),
                );
                ui.label(
                    egui::RichText::new(format!("{:.2} ms", stats.frame_time_ms))
                        .size(14.0)
                        .color(egui::Color32::GRAY),
                );

                ui.add_space(8.0);
                ui.separator();

                ui.label(
                    egui::RichText::new("Scene")
                        .size(16.0)
                        .color(egui::Color32::from_rgb(200, 150, 100)),
                );
                ui.monospace(format!("Variant: {}", stats.variant));
                ui.monospace(format!("Shapes: {}", stats.shape_count));
                ui.monospace(format!("Time: {:.2}s", stats.time));

                ui.add_space(8.0);
                ui.separator();

                ui.label(
                    egui::RichText::new("Parallax")
                        .size(16.0)
                        .color(egui::Color32::from_rgb(100, 200, 100)),
                );
                ui.monospace(format!(
                    "Pointer: ({:+.2}, {:+.2})",
                    stats.pointer.x, stats.pointer.y
                ));
                ui.monospace(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    stats.camera_position.x, stats.camera_position.y, stats.camera_position.z
                ));
                ui.monospace(format!(
                    "Resolution: {}x{}",
                    stats.resolution.0, stats.resolution.1
                ));
            });
    }
}
