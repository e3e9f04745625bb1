//! Pointer/scroll state written by event listeners and read once per frame.

use glam::Vec2;

/// Last known input, owned by the view that mounted the scene.
///
/// Pointer is normalized to \[-1, 1\] on both axes with +y pointing up, the
/// same convention as clip space. Scroll is the page offset in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub pointer: Vec2,
    pub scroll_y: f32,
    pub viewport: Vec2,
}

impl InputState {
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Record a pointer position given in client (CSS pixel) coordinates.
    pub fn set_pointer_client(&mut self, client_x: f32, client_y: f32) {
        self.pointer = normalize_pointer(client_x, client_y, self.viewport.x, self.viewport.y);
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.max(0.0);
    }
}

#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (client_x / width) * 2.0 - 1.0;
    let y = -(client_y / height) * 2.0 + 1.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_corners_map_to_unit_square() {
        assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn degenerate_viewport_yields_center() {
        assert_eq!(normalize_pointer(10.0, 10.0, 0.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn last_write_wins() {
        let mut input = InputState::default();
        input.set_viewport(100.0, 100.0);
        input.set_pointer_client(0.0, 0.0);
        input.set_pointer_client(100.0, 50.0);
        assert_eq!(input.pointer, Vec2::new(1.0, 0.0));
        input.set_scroll(-20.0);
        assert_eq!(input.scroll_y, 0.0);
    }
}
