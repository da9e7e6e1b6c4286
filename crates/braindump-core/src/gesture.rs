//! Pointer/gesture state machine.
//!
//! Interprets pointer and touch input against the element store and the
//! geometry module to drive selection, drag, resize, pan, zoom and
//! arrow-drawing. All state here is transient: every gesture is resolved
//! by the next pointer-up or pointer-leave.

use crate::elements::ElementId;
use crate::engine::Whiteboard;
use crate::geometry::{self, HandleKind};
use crate::input::{Modifiers, TouchPoint};
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// The active gesture, with the anchor captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Panning the canvas; anchor is `pointer_screen - pan` at start.
    Panning { anchor: Point },
    /// Dragging an element; grab is `pointer_world - origin` at start.
    Dragging { id: ElementId, grab: Vec2 },
    /// Resizing via a handle; the anchor advances every move so deltas
    /// are incremental.
    Resizing {
        id: ElementId,
        handle: HandleKind,
        anchor: Point,
    },
    /// Drawing an arrow in world space.
    DrawingArrow { start: Point, current: Point },
}

/// Interprets pointer events against a [`Whiteboard`] context.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
    /// Pairwise distance of the previous two-finger frame.
    pinch_distance: Option<f64>,
    /// Midpoint of the previous two-finger frame.
    pinch_center: Option<Point>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// The in-flight arrow segment, for preview rendering.
    pub fn arrow_preview(&self) -> Option<(Point, Point)> {
        match self.state {
            GestureState::DrawingArrow { start, current } => Some((start, current)),
            _ => None,
        }
    }

    /// Pointer-down entry decision, in precedence order: element hit
    /// (resize handle before drag), then the armed tool.
    pub fn pointer_down(&mut self, wb: &mut Whiteboard, screen: Point, _modifiers: Modifiers) {
        let world = wb.camera.screen_to_world(screen);

        if let Some(id) = wb.store.element_at(world) {
            wb.select(id);
            if let Some(element) = wb.store.get(id) {
                self.state = match geometry::handle_at(element, world) {
                    Some(handle) => GestureState::Resizing {
                        id,
                        handle,
                        anchor: world,
                    },
                    None => GestureState::Dragging {
                        id,
                        grab: world - element.origin,
                    },
                };
            }
            return;
        }

        match wb.tools.current_tool {
            ToolKind::Arrow => {
                wb.clear_selection();
                self.state = GestureState::DrawingArrow {
                    start: world,
                    current: world,
                };
            }
            ToolKind::Text => {
                // Placement action: no drag gesture begins.
                wb.place_text(world);
            }
            ToolKind::Navigate | ToolKind::Select | ToolKind::ShapePending => {
                wb.clear_selection();
                self.state = GestureState::Panning {
                    anchor: (screen.to_vec2() - wb.camera.pan).to_point(),
                };
            }
        }
    }

    /// Advance the active gesture. Idempotent per event: each call is
    /// pure arithmetic plus a single store or camera update.
    pub fn pointer_move(&mut self, wb: &mut Whiteboard, screen: Point) {
        match self.state {
            GestureState::Idle => {}
            GestureState::Panning { anchor } => {
                // Absolute: pan follows the pointer exactly.
                wb.camera.set_pan(screen - anchor);
            }
            GestureState::Dragging { id, grab } => {
                let world = wb.camera.screen_to_world(screen);
                if let Some(element) = wb.store.get_mut(id) {
                    element.origin = world - grab;
                }
            }
            GestureState::Resizing { id, handle, anchor } => {
                let world = wb.camera.screen_to_world(screen);
                let delta = world - anchor;
                if let Some(element) = wb.store.get_mut(id) {
                    geometry::apply_resize(element, handle, delta);
                }
                // Incremental: the anchor advances to the current point.
                self.state = GestureState::Resizing {
                    id,
                    handle,
                    anchor: world,
                };
            }
            GestureState::DrawingArrow { start, .. } => {
                self.state = GestureState::DrawingArrow {
                    start,
                    current: wb.camera.screen_to_world(screen),
                };
            }
        }
    }

    /// Finish the active gesture. Returns the id of a materialized
    /// arrow, if the gesture was an arrow drag that cleared the minimum
    /// extent. A pointer-up with no active gesture is a no-op.
    pub fn pointer_up(&mut self, wb: &mut Whiteboard, screen: Point) -> Option<ElementId> {
        let finished = std::mem::take(&mut self.state);
        if let GestureState::DrawingArrow { start, .. } = finished {
            let end = wb.camera.screen_to_world(screen);
            return wb.finish_arrow(start, end);
        }
        None
    }

    /// Hard cancel: the pointer left the canvas mid-gesture. Any
    /// partial gesture is discarded, including an unfinished arrow.
    pub fn pointer_leave(&mut self, wb: &mut Whiteboard) {
        if let GestureState::DrawingArrow { .. } = self.state {
            wb.tools.finish_arrow_tool();
        }
        self.state = GestureState::Idle;
    }

    /// Wheel zoom. Positive scroll (wheel down) zooms out. The pivot is
    /// the origin: pan is untouched.
    pub fn wheel(&mut self, wb: &mut Whiteboard, scroll: f64) {
        wb.camera.wheel_zoom(scroll);
    }

    /// Begin a two-finger gesture; anything else is left to the pointer
    /// path.
    pub fn touch_start(&mut self, _wb: &mut Whiteboard, points: &[TouchPoint]) {
        if let [a, b] = points {
            self.pinch_distance = Some((b.position - a.position).hypot());
            self.pinch_center = Some(a.position.midpoint(b.position));
        }
    }

    /// Two-finger move: the ratio of consecutive distances scales the
    /// zoom (clamped) and the midpoint delta adds to the pan.
    pub fn touch_move(&mut self, wb: &mut Whiteboard, points: &[TouchPoint]) {
        let [a, b] = points else { return };
        let distance = (b.position - a.position).hypot();
        let center = a.position.midpoint(b.position);

        if let Some(last_distance) = self.pinch_distance {
            if last_distance > f64::EPSILON {
                wb.camera.zoom_by(distance / last_distance);
            }
        }
        if let Some(last_center) = self.pinch_center {
            wb.camera.pan_by(center - last_center);
        }

        self.pinch_distance = Some(distance);
        self.pinch_center = Some(center);
    }

    /// End of a touch gesture: forget the pinch anchors.
    pub fn touch_end(&mut self) {
        self.pinch_distance = None;
        self.pinch_center = None;
    }
}
