use winit::event::WindowEvent;

use crate::window::Viewport;

/// Normalized pointer coordinates.
///
/// Both axes span [-1, 1] across the viewport; y grows downward, so the top
/// edge is -1 and the bottom edge is +1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Map a physical cursor position onto [-1, 1] for the given viewport
    pub fn from_cursor(cursor_x: f32, cursor_y: f32, viewport: Viewport) -> Self {
        let w = viewport.width.max(1) as f32;
        let h = viewport.height.max(1) as f32;
        Self {
            x: ((cursor_x / w) * 2.0 - 1.0).clamp(-1.0, 1.0),
            y: ((cursor_y / h) * 2.0 - 1.0).clamp(-1.0, 1.0),
        }
    }

    /// |x + y|, the whitening drive used by the geometric variant
    pub fn diagonal_magnitude(&self) -> f32 {
        (self.x + self.y).abs()
    }
}

/// Bridges winit cursor events to a normalized `PointerState`
#[derive(Debug, Clone)]
pub struct PointerTracker {
    viewport: Viewport,
    /// Last raw cursor position in physical pixels
    cursor: Option<(f32, f32)>,
    state: PointerState,
}

impl PointerTracker {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cursor: None,
            state: PointerState::default(),
        }
    }

    /// Process a winit WindowEvent; returns the new state when the pointer moved
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<PointerState> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.move_to(position.x as f32, position.y as f32))
            }
            WindowEvent::Resized(size) => {
                self.resize(Viewport::new(size.width, size.height));
                None
            }
            _ => None,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> PointerState {
        self.cursor = Some((x, y));
        self.state = PointerState::from_cursor(x, y, self.viewport);
        self.state
    }

    /// Track a new viewport size; zero sizes (minimised windows) are ignored
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.viewport = viewport;
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_is_centred() {
        let tracker = PointerTracker::new(Viewport::new(800, 600));
        assert_eq!(tracker.state(), PointerState::new(0.0, 0.0));
        assert_eq!(tracker.cursor(), None);
    }

    #[test]
    fn test_corners_map_to_unit_square() {
        let vp = Viewport::new(800, 600);
        assert_eq!(PointerState::from_cursor(0.0, 0.0, vp), PointerState::new(-1.0, -1.0));
        assert_eq!(PointerState::from_cursor(800.0, 600.0, vp), PointerState::new(1.0, 1.0));
        assert_eq!(PointerState::from_cursor(400.0, 300.0, vp), PointerState::new(0.0, 0.0));
    }

    #[test]
    fn test_outside_window_is_clamped() {
        let vp = Viewport::new(100, 100);
        let p = PointerState::from_cursor(-50.0, 250.0, vp);
        assert_eq!(p, PointerState::new(-1.0, 1.0));
    }

    #[test]
    fn test_move_uses_current_viewport() {
        let mut tracker = PointerTracker::new(Viewport::new(100, 100));
        tracker.resize(Viewport::new(200, 100));
        let p = tracker.move_to(150.0, 25.0);
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y + 0.5).abs() < 1e-6);
        assert_eq!(tracker.cursor(), Some((150.0, 25.0)));
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut tracker = PointerTracker::new(Viewport::new(100, 100));
        tracker.resize(Viewport::new(0, 0));
        let p = tracker.move_to(100.0, 100.0);
        assert_eq!(p, PointerState::new(1.0, 1.0));
    }

    #[test]
    fn test_diagonal_magnitude() {
        assert_eq!(PointerState::new(0.5, 0.25).diagonal_magnitude(), 0.75);
        assert_eq!(PointerState::new(-1.0, -1.0).diagonal_magnitude(), 2.0);
        assert_eq!(PointerState::new(1.0, -1.0).diagonal_magnitude(), 0.0);
    }
}
