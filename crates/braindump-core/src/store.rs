//! Element store: ordered collection with monotonic id allocation.

use crate::elements::{
    Color, Element, ElementId, ElementKind, MIN_SIZE, snap_font_size,
};
use crate::geometry;
use kurbo::Point;

/// Base coordinate of the default placement slot.
const PLACEMENT_BASE: f64 = 200.0;
/// Diagonal step between consecutive default placements.
const PLACEMENT_STEP: f64 = 10.0;

/// Optional creation overrides; unset fields use per-kind defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementOverrides {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<Color>,
}

/// Partial update of text formatting; unset fields are left unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatPatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_size: Option<u32>,
}

/// Sole owner of the elements on a board.
///
/// Elements are kept in z-ascending order. Ids are a running counter:
/// each creation takes the next id (which doubles as the z-index) and
/// removal never decrements or reuses it.
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    next_id: ElementId,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Create an empty store. The first element gets id 1.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from a previously serialized element list.
    /// The id counter resumes past the highest id seen.
    pub fn from_elements(mut elements: Vec<Element>) -> Self {
        elements.sort_by_key(|el| el.z_index);
        let next_id = elements.iter().map(|el| el.id).max().unwrap_or(0) + 1;
        Self { elements, next_id }
    }

    /// Create an element, assigning the next id and z-index.
    ///
    /// Without an origin hint the element lands on a deterministic
    /// diagonal slot (`200 + id * 10`) so sequential creations do not
    /// perfectly overlap.
    pub fn create(
        &mut self,
        kind: ElementKind,
        origin: Option<Point>,
        overrides: ElementOverrides,
    ) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;

        let origin = origin.unwrap_or_else(|| {
            let slot = PLACEMENT_BASE + id as f64 * PLACEMENT_STEP;
            Point::new(slot, slot)
        });
        let (width, height, color) = Self::defaults_for(&kind);

        let element = Element {
            id,
            origin,
            width: overrides.width.unwrap_or(width),
            height: overrides.height.unwrap_or(height),
            z_index: id,
            color: overrides.color.unwrap_or(color),
            rotation: 0.0,
            kind,
        };
        log::debug!("create {} element #{id}", element.kind.name());
        self.elements.push(element);
        id
    }

    /// Per-kind default extent and fill.
    fn defaults_for(kind: &ElementKind) -> (f64, f64, Color) {
        match kind {
            ElementKind::Text(_) => (300.0, 150.0, Color::WHITE),
            ElementKind::Rectangle(_)
            | ElementKind::Circle(_)
            | ElementKind::Triangle(_)
            | ElementKind::Star(_) => (500.0, 500.0, Color::INDIGO),
            ElementKind::Arrow(_) => (MIN_SIZE, MIN_SIZE, Color::INDIGO),
            ElementKind::Image(img) => {
                (img.source_width as f64, img.source_height as f64, Color::WHITE)
            }
            ElementKind::Sticky(_) => (220.0, 220.0, Color::AMBER),
        }
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Replace the text content of an element. Referencing a missing id
    /// or a kind without text is a no-op; returns whether anything changed.
    pub fn update_text(&mut self, id: ElementId, text: &str) -> bool {
        match self.get_mut(id).and_then(|el| el.text_mut()) {
            Some(content) => {
                *content = text.to_string();
                true
            }
            None => {
                log::debug!("update_text: no text target for #{id}");
                false
            }
        }
    }

    /// Patch formatting. Full formatting applies to text elements; for
    /// shape labels only the font size is meaningful. Requested sizes
    /// snap to the nearest palette entry. Missing ids are a no-op.
    pub fn update_format(&mut self, id: ElementId, patch: FormatPatch) -> bool {
        let Some(element) = self.get_mut(id) else {
            log::debug!("update_format: no element #{id}");
            return false;
        };
        match &mut element.kind {
            ElementKind::Text(text) => {
                if let Some(bold) = patch.bold {
                    text.format.bold = bold;
                }
                if let Some(italic) = patch.italic {
                    text.format.italic = italic;
                }
                if let Some(underline) = patch.underline {
                    text.format.underline = underline;
                }
                if let Some(size) = patch.font_size {
                    text.format.font_size = snap_font_size(size);
                }
                true
            }
            ElementKind::Rectangle(label)
            | ElementKind::Circle(label)
            | ElementKind::Triangle(label)
            | ElementKind::Star(label) => match patch.font_size {
                Some(size) => {
                    label.font_size = snap_font_size(size);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Remove an element. The id counter is unaffected.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|el| el.id == id)?;
        Some(self.elements.remove(index))
    }

    /// All elements, ordered by ascending z-index.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Topmost element containing a world point.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        geometry::hit_test(&self.elements, point).map(|el| el.id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the element list as an ordered list of records.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.elements)
    }

    /// Rebuild a store from a serialized element list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let elements: Vec<Element> = serde_json::from_str(json)?;
        Ok(Self::from_elements(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        ArrowBody, ImageContent, ImageFormat, ShapeLabel, StickyNote, TextContent, TextFormat,
    };

    fn label_kind() -> ElementKind {
        ElementKind::Rectangle(ShapeLabel::new())
    }

    #[test]
    fn ids_are_strictly_increasing_and_unique() {
        let mut store = ElementStore::new();
        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(store.create(label_kind(), None, ElementOverrides::default()));
        }
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        // Removal does not recycle ids.
        store.remove(ids[19]);
        let next = store.create(label_kind(), None, ElementOverrides::default());
        assert!(next > ids[19]);
    }

    #[test]
    fn z_index_equals_creation_order() {
        let mut store = ElementStore::new();
        let a = store.create(label_kind(), None, ElementOverrides::default());
        let b = store.create(label_kind(), None, ElementOverrides::default());
        assert_eq!(store.get(a).unwrap().z_index, a);
        assert_eq!(store.get(b).unwrap().z_index, b);
        assert!(store.elements().windows(2).all(|w| w[0].z_index < w[1].z_index));
    }

    #[test]
    fn default_placement_steps_diagonally() {
        let mut store = ElementStore::new();
        let a = store.create(label_kind(), None, ElementOverrides::default());
        let b = store.create(label_kind(), None, ElementOverrides::default());
        let pa = store.get(a).unwrap().origin;
        let pb = store.get(b).unwrap().origin;
        assert_eq!(pa, Point::new(210.0, 210.0));
        assert_eq!(pb, Point::new(220.0, 220.0));
    }

    #[test]
    fn origin_hint_overrides_placement() {
        let mut store = ElementStore::new();
        let id = store.create(
            ElementKind::Text(TextContent::default()),
            Some(Point::new(42.0, 17.0)),
            ElementOverrides::default(),
        );
        assert_eq!(store.get(id).unwrap().origin, Point::new(42.0, 17.0));
    }

    #[test]
    fn per_kind_defaults() {
        let mut store = ElementStore::new();
        let text = store.create(
            ElementKind::Text(TextContent::default()),
            None,
            ElementOverrides::default(),
        );
        let shape = store.create(label_kind(), None, ElementOverrides::default());
        let sticky = store.create(
            ElementKind::Sticky(StickyNote::default()),
            None,
            ElementOverrides::default(),
        );

        let text = store.get(text).unwrap();
        assert_eq!((text.width, text.height), (300.0, 150.0));
        assert_eq!(text.color, Color::WHITE);

        let shape = store.get(shape).unwrap();
        assert_eq!((shape.width, shape.height), (500.0, 500.0));
        assert_eq!(shape.color, Color::INDIGO);

        let sticky = store.get(sticky).unwrap();
        assert_eq!(sticky.color, Color::AMBER);
    }

    #[test]
    fn update_text_invalid_target_is_noop() {
        let mut store = ElementStore::new();
        assert!(!store.update_text(99, "hello"));

        let id = store.create(
            ElementKind::Text(TextContent::default()),
            None,
            ElementOverrides::default(),
        );
        assert!(store.update_text(id, "hello"));
        assert_eq!(store.get(id).unwrap().text(), Some("hello"));
    }

    #[test]
    fn update_format_snaps_font_size() {
        let mut store = ElementStore::new();
        let id = store.create(
            ElementKind::Text(TextContent::default()),
            None,
            ElementOverrides::default(),
        );
        assert!(store.update_format(
            id,
            FormatPatch {
                bold: Some(true),
                font_size: Some(30),
                ..Default::default()
            },
        ));
        let ElementKind::Text(text) = &store.get(id).unwrap().kind else {
            panic!("expected text element");
        };
        assert!(text.format.bold);
        assert_eq!(text.format.font_size, 32);
    }

    #[test]
    fn update_format_on_arrow_is_noop() {
        let mut store = ElementStore::new();
        let id = store.create(
            ElementKind::Arrow(ArrowBody::new(Point::ZERO, Point::new(100.0, 0.0))),
            None,
            ElementOverrides::default(),
        );
        assert!(!store.update_format(id, FormatPatch { bold: Some(true), ..Default::default() }));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut store = ElementStore::new();
        assert!(store.remove(7).is_none());
    }

    #[test]
    fn json_roundtrip_every_kind() {
        let mut store = ElementStore::new();
        store.create(
            ElementKind::Text(TextContent::new(
                "hello",
                TextFormat {
                    bold: true,
                    italic: false,
                    underline: true,
                    font_size: 24,
                },
            )),
            None,
            ElementOverrides::default(),
        );
        store.create(ElementKind::Rectangle(ShapeLabel::new()), None, ElementOverrides::default());
        store.create(ElementKind::Circle(ShapeLabel::new()), None, ElementOverrides::default());
        store.create(ElementKind::Triangle(ShapeLabel::new()), None, ElementOverrides::default());
        store.create(ElementKind::Star(ShapeLabel::new()), None, ElementOverrides::default());
        store.create(
            ElementKind::Arrow(ArrowBody::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0))),
            None,
            ElementOverrides::default(),
        );
        store.create(
            ElementKind::Image(ImageContent::new(ImageFormat::Png, &[1, 2, 3], 8, 8)),
            None,
            ElementOverrides::default(),
        );
        store.create(
            ElementKind::Sticky(StickyNote::new("note")),
            None,
            ElementOverrides::default(),
        );

        let json = store.to_json().unwrap();
        let restored = ElementStore::from_json(&json).unwrap();
        assert_eq!(restored.elements(), store.elements());

        // The restored counter keeps allocating fresh ids.
        let mut restored = restored;
        let next = restored.create(label_kind(), None, ElementOverrides::default());
        assert!(store.elements().iter().all(|el| el.id < next));
    }
}
