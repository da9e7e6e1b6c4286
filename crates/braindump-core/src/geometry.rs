//! Hit-testing and resize-handle geometry.

use crate::elements::{Element, MIN_SIZE};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit radius in world units (compared at zoom 1).
pub const HANDLE_RADIUS: f64 = 10.0;

/// The eight resize handles of an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    North,
    South,
    East,
    West,
}

impl HandleKind {
    /// Fixed enumeration order; hit-test ties resolve to the first match.
    pub const ALL: [HandleKind; 8] = [
        HandleKind::NorthWest,
        HandleKind::NorthEast,
        HandleKind::SouthWest,
        HandleKind::SouthEast,
        HandleKind::North,
        HandleKind::South,
        HandleKind::East,
        HandleKind::West,
    ];

    /// Position of this handle on a bounding box.
    pub fn anchor(self, bounds: Rect) -> Point {
        let cx = (bounds.x0 + bounds.x1) / 2.0;
        let cy = (bounds.y0 + bounds.y1) / 2.0;
        match self {
            HandleKind::NorthWest => Point::new(bounds.x0, bounds.y0),
            HandleKind::NorthEast => Point::new(bounds.x1, bounds.y0),
            HandleKind::SouthWest => Point::new(bounds.x0, bounds.y1),
            HandleKind::SouthEast => Point::new(bounds.x1, bounds.y1),
            HandleKind::North => Point::new(cx, bounds.y0),
            HandleKind::South => Point::new(cx, bounds.y1),
            HandleKind::East => Point::new(bounds.x1, cy),
            HandleKind::West => Point::new(bounds.x0, cy),
        }
    }

    /// Whether this handle moves the right edge.
    fn touches_east(self) -> bool {
        matches!(
            self,
            HandleKind::NorthEast | HandleKind::SouthEast | HandleKind::East
        )
    }

    /// Whether this handle moves the left edge.
    fn touches_west(self) -> bool {
        matches!(
            self,
            HandleKind::NorthWest | HandleKind::SouthWest | HandleKind::West
        )
    }

    /// Whether this handle moves the top edge.
    fn touches_north(self) -> bool {
        matches!(
            self,
            HandleKind::NorthWest | HandleKind::NorthEast | HandleKind::North
        )
    }

    /// Whether this handle moves the bottom edge.
    fn touches_south(self) -> bool {
        matches!(
            self,
            HandleKind::SouthWest | HandleKind::SouthEast | HandleKind::South
        )
    }
}

/// Find the resize handle of `element` at a world point, if any.
/// Each handle is a circle of [`HANDLE_RADIUS`] around its anchor.
pub fn handle_at(element: &Element, point: Point) -> Option<HandleKind> {
    let bounds = element.bounds();
    HandleKind::ALL.into_iter().find(|kind| {
        let anchor = kind.anchor(bounds);
        (point - anchor).hypot2() <= HANDLE_RADIUS * HANDLE_RADIUS
    })
}

/// Find the topmost element containing a world point.
///
/// `elements` must be ordered by ascending z-index; the scan runs from
/// the highest z-index down so overlaps resolve to the topmost element.
pub fn hit_test(elements: &[Element], point: Point) -> Option<&Element> {
    elements.iter().rev().find(|el| el.contains(point))
}

/// Apply an incremental resize delta for the given handle.
///
/// Handles on the east/south edges grow the extent directly; handles on
/// the west/north edges shrink the extent and translate the origin so
/// the opposite edge stays fixed. Extents are clamped to [`MIN_SIZE`];
/// when the clamp engages, the origin offset is intentionally not
/// re-derived (the far edge may drift, matching the source behavior).
pub fn apply_resize(element: &mut Element, handle: HandleKind, delta: Vec2) {
    if handle.touches_east() {
        element.width = (element.width + delta.x).max(MIN_SIZE);
    }
    if handle.touches_west() {
        element.width = (element.width - delta.x).max(MIN_SIZE);
        element.origin.x += delta.x;
    }
    if handle.touches_south() {
        element.height = (element.height + delta.y).max(MIN_SIZE);
    }
    if handle.touches_north() {
        element.height = (element.height - delta.y).max(MIN_SIZE);
        element.origin.y += delta.y;
    }
}
