//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 4.0;

/// Multiplier applied per wheel notch when zooming in.
pub const WHEEL_ZOOM_IN: f64 = 1.25;
/// Multiplier applied per wheel notch when zooming out.
pub const WHEEL_ZOOM_OUT: f64 = 0.75;

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling), converting
/// between screen coordinates and world coordinates. The zoom pivot is
/// the world origin: wheel zoom never touches the pan offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen units.
    pub pan: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the origin with 100% zoom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering (world to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to world coordinates:
    /// `world = (screen - pan) / zoom` per axis.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan.x,
            world.y * self.zoom + self.pan.y,
        )
    }

    /// Replace the pan offset.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Scale the zoom level by a factor, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Apply a wheel notch. Positive scroll (wheel down) zooms out,
    /// negative zooms in. Pan is unaffected.
    pub fn wheel_zoom(&mut self, scroll: f64) {
        let factor = if scroll > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_by(factor);
    }

    /// Reset camera to the origin at 100% zoom.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
