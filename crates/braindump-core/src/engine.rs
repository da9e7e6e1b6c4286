//! Whiteboard engine: the aggregate the controllers operate on and the
//! in-process API exposed to the chrome and to external collaborators.

use crate::camera::Camera;
use crate::elements::{
    ArrowBody, Element, ElementId, ElementKind, MIN_SIZE, StickyNote, TextContent,
};
use crate::import::DecodedImage;
use crate::projection::{Drawable, project};
use crate::store::{ElementOverrides, ElementStore, FormatPatch};
use crate::tools::{ShapeFigure, ToolController, ToolKind};
use kurbo::{Point, Size, Vec2};

/// Minimum image side on insertion, as a fraction of the viewport's
/// smaller axis.
const MIN_IMAGE_FRACTION: f64 = 0.1;

/// One board's canvas state: element store, camera, tool state and the
/// single-element selection. The gesture controller and shortcut router
/// receive this context explicitly; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct Whiteboard {
    pub store: ElementStore,
    pub camera: Camera,
    pub tools: ToolController,
    selection: Option<ElementId>,
}

impl Whiteboard {
    /// Create an empty whiteboard.
    pub fn new() -> Self {
        Self {
            store: ElementStore::new(),
            camera: Camera::new(),
            tools: ToolController::new(),
            selection: None,
        }
    }

    /// Create a whiteboard over a previously serialized element list.
    pub fn with_elements(elements: Vec<Element>) -> Self {
        Self {
            store: ElementStore::from_elements(elements),
            ..Self::new()
        }
    }

    /// The currently selected element id, if any.
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// The currently selected element, if any.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.and_then(|id| self.store.get(id))
    }

    /// Select an element. Selecting a missing id is a no-op.
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.store.get(id).is_some() {
            self.selection = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Create an element through the store (see [`ElementStore::create`]).
    pub fn create_element(
        &mut self,
        kind: ElementKind,
        origin: Option<Point>,
        overrides: ElementOverrides,
    ) -> ElementId {
        self.store.create(kind, origin, overrides)
    }

    /// Place a text element at a world point with the ambient format,
    /// returning the tool to navigate. This is the text-tool click
    /// action; the format popup stays as it was.
    pub fn place_text(&mut self, at: Point) -> ElementId {
        let content = TextContent::new(TextContent::PLACEHOLDER, self.tools.text_format);
        let id = self.store.create(
            ElementKind::Text(content),
            Some(at),
            ElementOverrides::default(),
        );
        self.tools.current_tool = ToolKind::Navigate;
        id
    }

    /// Resolve a shape-picker choice: solid figures are created on the
    /// default placement slot; the arrow figure only arms the arrow
    /// tool and creates nothing yet.
    pub fn choose_shape(&mut self, figure: ShapeFigure) -> Option<ElementId> {
        let kind = self.tools.choose_figure(figure)?;
        Some(self.store.create(kind, None, ElementOverrides::default()))
    }

    /// Materialize a finished arrow drag.
    ///
    /// The element's box is the min/max envelope of the two points,
    /// widened to the minimum element size; `start`/`end` are stored
    /// verbatim. Envelopes of 10 world units or less in both axes are
    /// discarded silently. The tool returns to navigate either way.
    pub fn finish_arrow(&mut self, start: Point, end: Point) -> Option<ElementId> {
        self.tools.finish_arrow_tool();

        let body = ArrowBody::new(start, end);
        if !body.clears_min_extent() {
            log::debug!("arrow drag below minimum extent, discarded");
            return None;
        }
        let envelope = body.envelope();
        let id = self.store.create(
            ElementKind::Arrow(body),
            Some(envelope.origin()),
            ElementOverrides {
                width: Some(envelope.width().max(MIN_SIZE)),
                height: Some(envelope.height().max(MIN_SIZE)),
                color: None,
            },
        );
        Some(id)
    }

    /// Insert a decoded image, sized from its source pixels but never
    /// smaller than a tenth of the viewport's smaller axis.
    pub fn insert_image(&mut self, decoded: DecodedImage, viewport: Size) -> ElementId {
        let min_side = MIN_IMAGE_FRACTION * viewport.width.min(viewport.height);
        let mut width = decoded.width as f64;
        let mut height = decoded.height as f64;
        if width < min_side && height < min_side {
            let aspect = width / height.max(1.0);
            if aspect >= 1.0 {
                width = min_side;
                height = min_side / aspect;
            } else {
                height = min_side;
                width = min_side * aspect;
            }
        }
        self.store.create(
            ElementKind::Image(decoded.into_content()),
            None,
            ElementOverrides {
                width: Some(width),
                height: Some(height),
                color: None,
            },
        )
    }

    /// Collaborator entry point for a dictation source: append the
    /// finalized string as a sticky note, exactly as if it had been
    /// placed with the text tool.
    pub fn append_dictated_text(&mut self, text: &str) -> ElementId {
        self.store.create(
            ElementKind::Sticky(StickyNote::new(text)),
            None,
            ElementOverrides::default(),
        )
    }

    /// Replace an element's text. Missing ids are a no-op.
    pub fn update_element_text(&mut self, id: ElementId, text: &str) -> bool {
        self.store.update_text(id, text)
    }

    /// Patch an element's formatting. Missing ids are a no-op.
    pub fn update_element_format(&mut self, id: ElementId, patch: FormatPatch) -> bool {
        self.store.update_format(id, patch)
    }

    /// Delete an element, clearing the selection if it pointed at it.
    /// Missing ids are a no-op.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let removed = self.store.remove(id).is_some();
        if removed && self.selection == Some(id) {
            self.selection = None;
        }
        removed
    }

    /// Delete the selected element; with no selection this is a no-op.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.delete_element(id),
            None => false,
        }
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.camera.set_zoom(zoom);
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.camera.set_pan(pan);
    }

    /// Project every element to its drawable description, in paint
    /// order (ascending z-index).
    pub fn drawables(&self) -> Vec<Drawable> {
        self.store
            .elements()
            .iter()
            .map(|el| project(el, self.selection == Some(el.id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Color, ImageFormat};

    #[test]
    fn place_text_uses_ambient_format_and_resets_tool() {
        let mut wb = Whiteboard::new();
        wb.tools.select_text_tool();
        wb.tools.text_format.bold = true;

        let id = wb.place_text(Point::new(40.0, 60.0));
        assert_eq!(wb.tools.current_tool, ToolKind::Navigate);

        let element = wb.store.get(id).unwrap();
        assert_eq!(element.origin, Point::new(40.0, 60.0));
        let ElementKind::Text(text) = &element.kind else {
            panic!("expected text element");
        };
        assert!(text.format.bold);
        assert_eq!(text.content, TextContent::PLACEHOLDER);
    }

    #[test]
    fn choose_shape_creates_solid_figures() {
        let mut wb = Whiteboard::new();
        wb.tools.open_shape_popup();
        let id = wb.choose_shape(ShapeFigure::Circle).unwrap();
        assert!(matches!(
            wb.store.get(id).unwrap().kind,
            ElementKind::Circle(_)
        ));
        assert_eq!(wb.tools.current_tool, ToolKind::Navigate);
    }

    #[test]
    fn choose_shape_arrow_creates_nothing() {
        let mut wb = Whiteboard::new();
        wb.tools.open_shape_popup();
        assert!(wb.choose_shape(ShapeFigure::Arrow).is_none());
        assert!(wb.store.is_empty());
        assert_eq!(wb.tools.current_tool, ToolKind::Arrow);
    }

    #[test]
    fn finish_arrow_below_threshold_discards() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Arrow);
        let created = wb.finish_arrow(Point::new(100.0, 100.0), Point::new(105.0, 102.0));
        assert!(created.is_none());
        assert!(wb.store.is_empty());
        assert_eq!(wb.tools.current_tool, ToolKind::Navigate);
    }

    #[test]
    fn finish_arrow_materializes_with_widened_box() {
        let mut wb = Whiteboard::new();
        wb.set_tool(ToolKind::Arrow);
        let id = wb
            .finish_arrow(Point::new(100.0, 100.0), Point::new(160.0, 100.0))
            .unwrap();
        let element = wb.store.get(id).unwrap();
        assert_eq!(element.origin, Point::new(100.0, 100.0));
        assert_eq!(element.width, 60.0);
        assert_eq!(element.height, 50.0);
        let ElementKind::Arrow(body) = &element.kind else {
            panic!("expected arrow element");
        };
        assert_eq!(body.start, Point::new(100.0, 100.0));
        assert_eq!(body.end, Point::new(160.0, 100.0));
    }

    #[test]
    fn arrow_direction_survives_box_normalization() {
        let mut wb = Whiteboard::new();
        // Right-to-left drag: the box origin is the min corner, but the
        // stored points keep the drawn direction.
        let id = wb
            .finish_arrow(Point::new(160.0, 140.0), Point::new(100.0, 100.0))
            .unwrap();
        let element = wb.store.get(id).unwrap();
        assert_eq!(element.origin, Point::new(100.0, 100.0));
        let ElementKind::Arrow(body) = &element.kind else {
            panic!("expected arrow element");
        };
        assert_eq!(body.start, Point::new(160.0, 140.0));
        assert_eq!(body.end, Point::new(100.0, 100.0));
    }

    #[test]
    fn delete_selected_clears_selection() {
        let mut wb = Whiteboard::new();
        let a = wb.place_text(Point::ZERO);
        let b = wb.place_text(Point::new(400.0, 0.0));
        wb.select(a);

        assert!(wb.delete_selected());
        assert!(wb.selection().is_none());
        assert_eq!(wb.store.len(), 1);
        assert!(wb.store.get(b).is_some());

        // No selection left: deleting again is a no-op.
        assert!(!wb.delete_selected());
        assert_eq!(wb.store.len(), 1);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut wb = Whiteboard::new();
        assert!(!wb.delete_element(42));
    }

    #[test]
    fn select_missing_is_noop() {
        let mut wb = Whiteboard::new();
        assert!(!wb.select(9));
        assert!(wb.selection().is_none());
    }

    #[test]
    fn dictated_text_lands_as_sticky() {
        let mut wb = Whiteboard::new();
        let id = wb.append_dictated_text("remember the milk");
        let element = wb.store.get(id).unwrap();
        assert!(matches!(element.kind, ElementKind::Sticky(_)));
        assert_eq!(element.text(), Some("remember the milk"));
        assert_eq!(element.color, Color::AMBER);
    }

    #[test]
    fn small_images_are_scaled_up() {
        let mut wb = Whiteboard::new();
        let decoded = DecodedImage {
            format: ImageFormat::Png,
            width: 40,
            height: 20,
            bytes: vec![1, 2, 3],
            rgba: Vec::new(),
        };
        let id = wb.insert_image(decoded, Size::new(1920.0, 1080.0));
        let element = wb.store.get(id).unwrap();
        // 10% of 1080 = 108; wide image fits width to the floor.
        assert!((element.width - 108.0).abs() < 1e-9);
        assert!((element.height - 54.0).abs() < 1e-9);
    }

    #[test]
    fn large_images_keep_source_size() {
        let mut wb = Whiteboard::new();
        let decoded = DecodedImage {
            format: ImageFormat::Jpeg,
            width: 800,
            height: 600,
            bytes: vec![0],
            rgba: Vec::new(),
        };
        let id = wb.insert_image(decoded, Size::new(1920.0, 1080.0));
        let element = wb.store.get(id).unwrap();
        assert_eq!((element.width, element.height), (800.0, 600.0));
    }
}
