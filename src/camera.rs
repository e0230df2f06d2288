//! View transform between screen pixels and canvas space.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::config::EngineConfig;
use crate::geometry::Point;

/// Camera state for pan/zoom over the canvas.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.pan_x) / self.zoom, y: (screen.y - self.pan_y) / self.zoom }
    }

    /// Convert a canvas-space point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point { x: canvas.x * self.zoom + self.pan_x, y: canvas.y * self.zoom + self.pan_y }
    }

    /// Convert a screen-space distance to a canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set the zoom directly, clamped to the configured limits.
    pub fn set_zoom(&mut self, zoom: f64, config: &EngineConfig) {
        self.zoom = zoom.clamp(config.min_zoom, config.max_zoom);
    }

    /// Zoom about a fixed screen point so the canvas point under it stays put.
    pub fn zoom_about(&mut self, screen: Point, zoom: f64, config: &EngineConfig) {
        let new_zoom = zoom.clamp(config.min_zoom, config.max_zoom);
        let ratio = new_zoom / self.zoom;
        self.pan_x = screen.x - (screen.x - self.pan_x) * ratio;
        self.pan_y = screen.y - (screen.y - self.pan_y) * ratio;
        self.zoom = new_zoom;
    }

    /// One zoom step in about `screen`.
    pub fn zoom_in(&mut self, screen: Point, config: &EngineConfig) {
        self.zoom_about(screen, self.zoom * config.zoom_factor, config);
    }

    /// One zoom step out about `screen`.
    pub fn zoom_out(&mut self, screen: Point, config: &EngineConfig) {
        self.zoom_about(screen, self.zoom / config.zoom_factor, config);
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
