use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use shape_drift::animator::SceneAnimator;
use shape_drift::cli::Cli;
use shape_drift::config::AnimatorConfig;
use shape_drift::core::{FpsMeter, PointerTracker, ShutdownToken};
use shape_drift::frame::FrameTimeline;
use shape_drift::hud::HudStats;
use shape_drift::renderer::ShapeRenderer;
use shape_drift::window::{Viewport, Window as SurfaceWindow};

/// Everything that only exists once the event loop has handed us a window
struct Running {
    window: SurfaceWindow,
    renderer: ShapeRenderer,
    animator: SceneAnimator,
    pointer: PointerTracker,
}

struct App {
    config: AnimatorConfig,
    shutdown: ShutdownToken,
    frames: FrameTimeline,
    fps: FpsMeter,
    running: Option<Running>,
    failed: bool,
}

impl App {
    fn new(config: AnimatorConfig, shutdown: ShutdownToken) -> Self {
        Self {
            frames: FrameTimeline::new(config.duration),
            config,
            shutdown,
            fps: FpsMeter::default(),
            running: None,
            failed: false,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let window = event_loop.create_window(
            Window::default_attributes()
                .with_title("Shape Drift")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.width,
                    self.config.height,
                )),
        )?;
        let window = Arc::new(window);
        let viewport: Viewport = window.inner_size().into();

        let animator = SceneAnimator::initialize(self.config.clone(), viewport);
        let renderer = pollster::block_on(ShapeRenderer::new(
            window.clone(),
            &animator,
            self.config.hud,
        ))?;

        Ok(Running {
            window: SurfaceWindow::new(window),
            renderer,
            animator,
            pointer: PointerTracker::new(viewport),
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };
        let Some(frame) = self.frames.next() else {
            if let Some(limit) = self.frames.limit() {
                info!("Duration of {:.1}s reached", limit);
            }
            self.shutdown.cancel();
            return;
        };

        self.fps.record(frame.delta);
        running.animator.frame_step(frame.elapsed);

        let camera = running.animator.camera();
        let viewport = running.renderer.viewport();
        let stats = HudStats {
            fps: self.fps.fps(),
            frame_time_ms: self.fps.frame_time_ms(),
            variant: self.config.variant.name(),
            shape_count: running.animator.scene().len(),
            pointer: running.animator.pointer(),
            camera_position: camera.position,
            resolution: (viewport.width, viewport.height),
            time: frame.elapsed,
        };

        match running
            .renderer
            .render(&running.animator, running.window.inner(), &stats)
        {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                running.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, shutting down");
                self.failed = true;
                self.shutdown.cancel();
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                error!("Failed to start: {:#}", e);
                self.failed = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(running) = &mut self.running {
            if running
                .renderer
                .handle_event(running.window.inner(), &event)
            {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown.cancel(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyR),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(running) = &mut self.running {
                    running.animator.reinitialize();
                }
            }
            WindowEvent::CursorMoved { .. } => {
                if let Some(running) = &mut self.running {
                    if let Some(p) = running.pointer.process_event(&event) {
                        running.animator.on_pointer_move(p.x, p.y);
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(running) = &mut self.running {
                    running.pointer.process_event(&event);
                    running.animator.on_resize(size.width, size.height);
                    running.renderer.resize(size.into());
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown.is_cancelled() {
            event_loop.exit();
            return;
        }
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match AnimatorConfig::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, ShutdownToken::new());

    info!("Shape Drift - move the pointer for parallax, R to reshuffle, Escape to quit");
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
