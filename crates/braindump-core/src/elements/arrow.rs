//! Arrow payload.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum envelope extent (width or height) for an arrow drag to
/// materialize an element, in world units.
pub const ARROW_MIN_EXTENT: f64 = 10.0;

/// Directional payload of an arrow element. The start/end points are
/// stored verbatim, independent of the bounding box, so direction is
/// preserved regardless of box normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowBody {
    /// World-space tail point.
    pub start: Point,
    /// World-space tip point (where the head is drawn).
    pub end: Point,
}

impl ArrowBody {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Axis-aligned envelope spanning start and end.
    pub fn envelope(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Whether the envelope clears the materialization threshold.
    pub fn clears_min_extent(&self) -> bool {
        let envelope = self.envelope();
        envelope.width() > ARROW_MIN_EXTENT || envelope.height() > ARROW_MIN_EXTENT
    }

    /// Normalized direction vector from start to end.
    /// Degenerate arrows point along +x.
    pub fn direction(&self) -> Vec2 {
        let d = self.end - self.start;
        let len = d.hypot();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            d / len
        }
    }

    /// Length of the shaft.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_normalizes_corners() {
        let arrow = ArrowBody::new(Point::new(160.0, 100.0), Point::new(100.0, 140.0));
        let envelope = arrow.envelope();
        assert_eq!(envelope, Rect::new(100.0, 100.0, 160.0, 140.0));
    }

    #[test]
    fn min_extent_threshold() {
        let tiny = ArrowBody::new(Point::new(100.0, 100.0), Point::new(105.0, 102.0));
        assert!(!tiny.clears_min_extent());

        let horizontal = ArrowBody::new(Point::new(100.0, 100.0), Point::new(160.0, 100.0));
        assert!(horizontal.clears_min_extent());
    }

    #[test]
    fn direction_is_normalized() {
        let arrow = ArrowBody::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let dir = arrow.direction();
        assert!((dir.x - 1.0).abs() < f64::EPSILON);
        assert!(dir.y.abs() < f64::EPSILON);
        assert!((arrow.length() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_direction_defaults() {
        let arrow = ArrowBody::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert_eq!(arrow.direction(), Vec2::new(1.0, 0.0));
    }
}
