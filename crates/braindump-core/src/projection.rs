//! Render projection: pure mapping from an element plus selection state
//! to a drawable description. The view layer positions and fills what
//! it is told and never computes element geometry itself.

use crate::elements::{Color, Element, ElementId, ElementKind};
use crate::geometry::HandleKind;
use kurbo::{Point, Rect};

/// Arrowhead size in world units.
const ARROW_HEAD_SIZE: f64 = 15.0;

/// Triangle icon geometry on a unit square (from the source artwork).
const TRIANGLE_UNIT: [(f64, f64); 3] = [(0.50, 0.10), (0.90, 0.90), (0.10, 0.90)];

/// Five-pointed star on a unit square (from the source artwork).
const STAR_UNIT: [(f64, f64); 10] = [
    (0.50, 0.05),
    (0.61, 0.35),
    (0.95, 0.35),
    (0.68, 0.57),
    (0.79, 0.91),
    (0.50, 0.70),
    (0.21, 0.91),
    (0.32, 0.57),
    (0.05, 0.35),
    (0.39, 0.35),
];

/// Geometry primitive of a drawable.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawGeometry {
    /// Filled axis-aligned rectangle (text boxes, rectangles, stickies).
    Rect(Rect),
    /// Ellipse inscribed in the bounding box.
    Ellipse(Rect),
    /// Filled closed polygon in world coordinates.
    Polygon(Vec<Point>),
    /// Arrow shaft plus the two head strokes (end → head[i]).
    Arrow {
        start: Point,
        end: Point,
        head: [Point; 2],
    },
    /// Image pixels stretched over the bounding box; the view resolves
    /// the pixel data from the element payload.
    Image(Rect),
}

/// Text to lay out inside a drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Layout rectangle (the element bounds).
    pub rect: Rect,
    pub content: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: u32,
    /// Contrast color against the element fill.
    pub color: Color,
}

/// A resize handle to render on a selected element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    pub kind: HandleKind,
    pub center: Point,
}

/// Everything the view layer needs to paint one element.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub id: ElementId,
    pub z_index: u64,
    pub fill: peniko::Color,
    pub geometry: DrawGeometry,
    pub text: Option<TextBlock>,
    pub selected: bool,
    /// Resize handles in descriptor order; empty unless selected.
    pub handles: Vec<HandleMarker>,
}

/// Project one element to its drawable description.
pub fn project(element: &Element, selected: bool) -> Drawable {
    let bounds = element.bounds();

    let geometry = match &element.kind {
        ElementKind::Text(_) | ElementKind::Rectangle(_) | ElementKind::Sticky(_) => {
            DrawGeometry::Rect(bounds)
        }
        ElementKind::Circle(_) => DrawGeometry::Ellipse(bounds),
        ElementKind::Triangle(_) => DrawGeometry::Polygon(scale_unit(&TRIANGLE_UNIT, bounds)),
        ElementKind::Star(_) => DrawGeometry::Polygon(scale_unit(&STAR_UNIT, bounds)),
        ElementKind::Arrow(body) => {
            let dir = body.direction();
            let perp = kurbo::Vec2::new(-dir.y, dir.x);
            let back = body.end - dir * ARROW_HEAD_SIZE;
            DrawGeometry::Arrow {
                start: body.start,
                end: body.end,
                head: [
                    back + perp * (ARROW_HEAD_SIZE * 0.5),
                    back - perp * (ARROW_HEAD_SIZE * 0.5),
                ],
            }
        }
        ElementKind::Image(_) => DrawGeometry::Image(bounds),
    };

    let text = text_block(element, bounds);

    let handles = if selected {
        HandleKind::ALL
            .into_iter()
            .map(|kind| HandleMarker {
                kind,
                center: kind.anchor(bounds),
            })
            .collect()
    } else {
        Vec::new()
    };

    Drawable {
        id: element.id,
        z_index: element.z_index,
        fill: element.color.into(),
        geometry,
        text,
        selected,
        handles,
    }
}

/// Scale unit-square points into a bounding box.
fn scale_unit(unit: &[(f64, f64)], bounds: Rect) -> Vec<Point> {
    unit.iter()
        .map(|&(ux, uy)| {
            Point::new(
                bounds.x0 + ux * bounds.width(),
                bounds.y0 + uy * bounds.height(),
            )
        })
        .collect()
}

/// Text against a white fill is black; everything else gets white text.
fn contrast_color(fill: Color) -> Color {
    if fill == Color::WHITE {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

fn text_block(element: &Element, bounds: Rect) -> Option<TextBlock> {
    match &element.kind {
        ElementKind::Text(text) => Some(TextBlock {
            rect: bounds,
            content: text.content.clone(),
            bold: text.format.bold,
            italic: text.format.italic,
            underline: text.format.underline,
            font_size: text.format.font_size,
            color: contrast_color(element.color),
        }),
        ElementKind::Rectangle(label)
        | ElementKind::Circle(label)
        | ElementKind::Triangle(label)
        | ElementKind::Star(label) => Some(TextBlock {
            rect: bounds,
            content: label.text.clone(),
            bold: false,
            italic: false,
            underline: false,
            font_size: label.font_size,
            color: contrast_color(element.color),
        }),
        ElementKind::Sticky(note) => Some(TextBlock {
            rect: bounds,
            content: note.content.clone(),
            bold: false,
            italic: false,
            underline: false,
            font_size: 16,
            color: contrast_color(element.color),
        }),
        ElementKind::Arrow(_) | ElementKind::Image(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ArrowBody, ShapeLabel, TextContent, TextFormat};

    fn element(kind: ElementKind, color: Color) -> Element {
        Element {
            id: 1,
            origin: Point::new(100.0, 100.0),
            width: 200.0,
            height: 100.0,
            z_index: 1,
            color,
            rotation: 0.0,
            kind,
        }
    }

    #[test]
    fn text_projects_rect_with_formatting() {
        let kind = ElementKind::Text(TextContent::new(
            "hi",
            TextFormat {
                bold: true,
                italic: false,
                underline: true,
                font_size: 24,
            },
        ));
        let drawable = project(&element(kind, Color::WHITE), false);
        assert!(matches!(drawable.geometry, DrawGeometry::Rect(_)));
        let text = drawable.text.unwrap();
        assert!(text.bold && text.underline && !text.italic);
        assert_eq!(text.font_size, 24);
        // White fill gets black text.
        assert_eq!(text.color, Color::BLACK);
        assert!(drawable.handles.is_empty());
    }

    #[test]
    fn triangle_polygon_spans_bounds() {
        let kind = ElementKind::Triangle(ShapeLabel::new());
        let drawable = project(&element(kind, Color::INDIGO), false);
        let DrawGeometry::Polygon(points) = drawable.geometry else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 3);
        // Apex at the horizontal center, 10% down.
        assert_eq!(points[0], Point::new(200.0, 110.0));
        assert_eq!(points[1], Point::new(280.0, 190.0));
    }

    #[test]
    fn star_has_ten_points() {
        let kind = ElementKind::Star(ShapeLabel::new());
        let drawable = project(&element(kind, Color::INDIGO), false);
        let DrawGeometry::Polygon(points) = drawable.geometry else {
            panic!("expected polygon");
        };
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn arrow_head_is_perpendicular_pair() {
        let kind = ElementKind::Arrow(ArrowBody::new(
            Point::new(100.0, 100.0),
            Point::new(200.0, 100.0),
        ));
        let drawable = project(&element(kind, Color::INDIGO), false);
        let DrawGeometry::Arrow { start, end, head } = drawable.geometry else {
            panic!("expected arrow");
        };
        assert_eq!(start, Point::new(100.0, 100.0));
        assert_eq!(end, Point::new(200.0, 100.0));
        // Head strokes flare symmetrically behind the tip.
        assert_eq!(head[0], Point::new(185.0, 107.5));
        assert_eq!(head[1], Point::new(185.0, 92.5));
        assert!(drawable.text.is_none());
    }

    #[test]
    fn selection_adds_eight_handles_in_order() {
        let kind = ElementKind::Rectangle(ShapeLabel::new());
        let drawable = project(&element(kind, Color::INDIGO), true);
        assert!(drawable.selected);
        assert_eq!(drawable.handles.len(), 8);
        assert_eq!(drawable.handles[0].kind, HandleKind::NorthWest);
        assert_eq!(drawable.handles[0].center, Point::new(100.0, 100.0));
        assert_eq!(drawable.handles[7].kind, HandleKind::West);
    }

    #[test]
    fn image_projects_image_geometry() {
        use crate::elements::{ImageContent, ImageFormat};
        let kind = ElementKind::Image(ImageContent::new(ImageFormat::Png, &[0], 4, 4));
        let drawable = project(&element(kind, Color::WHITE), false);
        assert!(matches!(drawable.geometry, DrawGeometry::Image(_)));
        assert!(drawable.text.is_none());
    }
}
