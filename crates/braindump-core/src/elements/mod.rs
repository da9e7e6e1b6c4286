//! Element definitions for the whiteboard.

mod arrow;
mod image;
mod text;

pub use arrow::{ARROW_MIN_EXTENT, ArrowBody};
pub use image::{ImageContent, ImageFormat};
pub use text::{FONT_SIZE_PALETTE, StickyNote, TextContent, TextFormat, snap_font_size};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Unique identifier for elements: a monotonically increasing counter
/// assigned by the store, never reused within a session.
pub type ElementId = u64;

/// Minimum element width/height after any resize, in world units.
pub const MIN_SIZE: f64 = 50.0;

/// Serializable fill color token (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    /// Default shape/arrow fill (the indigo of the original palette).
    pub const INDIGO: Color = Color::new(0x63, 0x66, 0xF1, 255);
    /// Default sticky-note fill.
    pub const AMBER: Color = Color::new(0xFD, 0xE6, 0x8A, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rgb`, `#rrggbb` or `#rrggbbaa` hex token.
    /// Unparseable input falls back to black.
    pub fn from_hex(token: &str) -> Self {
        let hex = token.trim().trim_start_matches('#');
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        match hex.len() {
            3 => Self::new(
                channel(&hex[0..1]) * 17,
                channel(&hex[1..2]) * 17,
                channel(&hex[2..3]) * 17,
                255,
            ),
            6 => Self::new(
                channel(&hex[0..2]),
                channel(&hex[2..4]),
                channel(&hex[4..6]),
                255,
            ),
            8 => Self::new(
                channel(&hex[0..2]),
                channel(&hex[2..4]),
                channel(&hex[4..6]),
                channel(&hex[6..8]),
            ),
            _ => Self::BLACK,
        }
    }

    /// Format as a `#rrggbb` hex token (alpha omitted when opaque).
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

/// Label text carried by the solid shape variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeLabel {
    /// Label content (may be empty).
    pub text: String,
    /// Label font size in pixels.
    #[serde(default = "ShapeLabel::default_font_size")]
    pub font_size: u32,
}

impl ShapeLabel {
    pub const DEFAULT_FONT_SIZE: u32 = 24;

    fn default_font_size() -> u32 {
        Self::DEFAULT_FONT_SIZE
    }

    pub fn new() -> Self {
        Self {
            text: String::new(),
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }
}

/// Closed variant type over every element kind. Each case carries only
/// its applicable payload; render and hit-test code matches exhaustively
/// so a new kind cannot be half-supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Text(TextContent),
    Rectangle(ShapeLabel),
    Circle(ShapeLabel),
    Triangle(ShapeLabel),
    Star(ShapeLabel),
    Arrow(ArrowBody),
    Image(ImageContent),
    Sticky(StickyNote),
}

impl ElementKind {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Rectangle(_) => "rectangle",
            ElementKind::Circle(_) => "circle",
            ElementKind::Triangle(_) => "triangle",
            ElementKind::Star(_) => "star",
            ElementKind::Arrow(_) => "arrow",
            ElementKind::Image(_) => "image",
            ElementKind::Sticky(_) => "sticky",
        }
    }
}

/// A placed object on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique id, equal to the z-index at creation.
    pub id: ElementId,
    /// World-space top-left position.
    pub origin: Point,
    /// World-space width.
    pub width: f64,
    /// World-space height.
    pub height: f64,
    /// Draw/selection priority; equal to creation order.
    pub z_index: u64,
    /// Fill color token.
    pub color: Color,
    /// Reserved; always 0 and not applied to hit-testing or rendering.
    #[serde(default)]
    pub rotation: f64,
    /// Kind-specific payload.
    pub kind: ElementKind,
}

impl Element {
    /// Get the axis-aligned bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }

    /// Check if a world point falls inside the bounding box.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }

    /// The editable text carried by this element, if its kind has any.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(t) => Some(&t.content),
            ElementKind::Rectangle(l)
            | ElementKind::Circle(l)
            | ElementKind::Triangle(l)
            | ElementKind::Star(l) => Some(&l.text),
            ElementKind::Sticky(s) => Some(&s.content),
            ElementKind::Arrow(_) | ElementKind::Image(_) => None,
        }
    }

    /// Mutable access to the editable text, if the kind has any.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            ElementKind::Text(t) => Some(&mut t.content),
            ElementKind::Rectangle(l)
            | ElementKind::Circle(l)
            | ElementKind::Triangle(l)
            | ElementKind::Star(l) => Some(&mut l.text),
            ElementKind::Sticky(s) => Some(&mut s.content),
            ElementKind::Arrow(_) | ElementKind::Image(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let color = Color::from_hex("#6366F1");
        assert_eq!(color, Color::INDIGO);
        assert_eq!(color.to_hex(), "#6366F1");
    }

    #[test]
    fn hex_short_form_expands() {
        assert_eq!(Color::from_hex("#fff"), Color::WHITE);
        assert_eq!(Color::from_hex("#000"), Color::BLACK);
    }

    #[test]
    fn hex_garbage_falls_back_to_black() {
        assert_eq!(Color::from_hex("not-a-color"), Color::BLACK);
    }

    #[test]
    fn peniko_bridge_roundtrip() {
        let color = Color::new(10, 20, 30, 200);
        let back: Color = peniko::Color::from(color).into();
        assert_eq!(back, color);
    }

    #[test]
    fn bounds_and_containment() {
        let element = Element {
            id: 1,
            origin: Point::new(10.0, 20.0),
            width: 100.0,
            height: 50.0,
            z_index: 1,
            color: Color::WHITE,
            rotation: 0.0,
            kind: ElementKind::Rectangle(ShapeLabel::new()),
        };
        assert_eq!(element.bounds(), Rect::new(10.0, 20.0, 110.0, 70.0));
        assert!(element.contains(Point::new(50.0, 40.0)));
        assert!(element.contains(Point::new(10.0, 20.0)));
        assert!(!element.contains(Point::new(111.0, 40.0)));
    }

    #[test]
    fn text_access_per_kind() {
        let mut element = Element {
            id: 1,
            origin: Point::ZERO,
            width: 100.0,
            height: 100.0,
            z_index: 1,
            color: Color::INDIGO,
            rotation: 0.0,
            kind: ElementKind::Circle(ShapeLabel::new()),
        };
        assert_eq!(element.text(), Some(""));
        *element.text_mut().unwrap() = "label".to_string();
        assert_eq!(element.text(), Some("label"));

        element.kind = ElementKind::Arrow(ArrowBody::new(Point::ZERO, Point::new(100.0, 0.0)));
        assert!(element.text().is_none());
        assert!(element.text_mut().is_none());
    }
}
