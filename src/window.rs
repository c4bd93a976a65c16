use std::sync::Arc;

use winit::window::Window as WinitWindow;

/// Drawable area in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Wrapper around the winit window that serves as the rendering surface
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
