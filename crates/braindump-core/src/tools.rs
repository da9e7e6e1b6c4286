//! Tool mode state machine and popup bookkeeping.

use crate::elements::{ElementKind, ShapeLabel, TextFormat};
use serde::{Deserialize, Serialize};

/// Available tool modes: the interpretation applied to the next
/// pointer-down on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    /// Pan the canvas; empty clicks clear the selection.
    #[default]
    Navigate,
    /// Clicks place a text element.
    Text,
    /// A figure choice is pending in the shape picker.
    ShapePending,
    /// Drags draw an arrow.
    Arrow,
    /// Selection-only mode; behaves like navigate for empty clicks.
    Select,
}

/// Figures offered by the shape picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeFigure {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Arrow,
}

impl ShapeFigure {
    pub const ALL: [ShapeFigure; 5] = [
        ShapeFigure::Star,
        ShapeFigure::Circle,
        ShapeFigure::Triangle,
        ShapeFigure::Rectangle,
        ShapeFigure::Arrow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShapeFigure::Rectangle => "Square",
            ShapeFigure::Circle => "Circle",
            ShapeFigure::Triangle => "Triangle",
            ShapeFigure::Star => "Star",
            ShapeFigure::Arrow => "Arrow",
        }
    }
}

/// Tracks the current tool, the open popups and the ambient text format
/// applied to newly placed text elements.
///
/// At most one of the text-format and shape popups is open at a time;
/// the shortcuts-help overlay may overlay anything and takes input
/// priority while open.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Text-format popup visibility.
    pub text_popup_open: bool,
    /// Shape picker visibility.
    pub shape_popup_open: bool,
    /// Shortcuts-help overlay visibility.
    pub shortcuts_help_open: bool,
    /// Formatting applied to the next text element.
    pub text_format: TextFormat,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools directly. Entering `ShapePending` opens the shape
    /// picker; every other mode leaves popups untouched.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        if tool == ToolKind::ShapePending {
            self.shape_popup_open = true;
            self.text_popup_open = false;
        }
    }

    /// Activate the text tool: opens the format popup, closes the shape
    /// picker.
    pub fn select_text_tool(&mut self) {
        self.current_tool = ToolKind::Text;
        self.text_popup_open = true;
        self.shape_popup_open = false;
    }

    /// Open the shape picker without changing the tool.
    pub fn open_shape_popup(&mut self) {
        self.shape_popup_open = true;
        self.text_popup_open = false;
    }

    /// Close both modal popups (the help overlay is independent).
    pub fn close_popups(&mut self) {
        self.text_popup_open = false;
        self.shape_popup_open = false;
    }

    /// Toggle the shortcuts-help overlay.
    pub fn toggle_shortcuts_help(&mut self) {
        self.shortcuts_help_open = !self.shortcuts_help_open;
    }

    /// Resolve a figure chosen in the shape picker.
    ///
    /// Solid figures yield the element kind to create and return the
    /// tool to navigate; choosing the arrow figure instead arms the
    /// arrow tool without creating anything. The picker closes either
    /// way.
    pub fn choose_figure(&mut self, figure: ShapeFigure) -> Option<ElementKind> {
        self.shape_popup_open = false;
        match figure {
            ShapeFigure::Arrow => {
                self.current_tool = ToolKind::Arrow;
                None
            }
            ShapeFigure::Rectangle => {
                self.current_tool = ToolKind::Navigate;
                Some(ElementKind::Rectangle(ShapeLabel::new()))
            }
            ShapeFigure::Circle => {
                self.current_tool = ToolKind::Navigate;
                Some(ElementKind::Circle(ShapeLabel::new()))
            }
            ShapeFigure::Triangle => {
                self.current_tool = ToolKind::Navigate;
                Some(ElementKind::Triangle(ShapeLabel::new()))
            }
            ShapeFigure::Star => {
                self.current_tool = ToolKind::Navigate;
                Some(ElementKind::Star(ShapeLabel::new()))
            }
        }
    }

    /// Handle Escape: closes the help overlay when it is open and
    /// reports that; otherwise closes the popups (the caller also
    /// clears the selection in that branch). The tool is unchanged.
    pub fn escape(&mut self) -> bool {
        if self.shortcuts_help_open {
            self.shortcuts_help_open = false;
            true
        } else {
            self.close_popups();
            false
        }
    }

    /// Arrow drags always return the tool to navigate, whether the
    /// arrow materialized or not.
    pub fn finish_arrow_tool(&mut self) {
        self.current_tool = ToolKind::Navigate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_tool_swaps_popups() {
        let mut tools = ToolController::new();
        tools.open_shape_popup();
        assert!(tools.shape_popup_open);

        tools.select_text_tool();
        assert_eq!(tools.current_tool, ToolKind::Text);
        assert!(tools.text_popup_open);
        assert!(!tools.shape_popup_open);
    }

    #[test]
    fn shape_popup_keeps_tool() {
        let mut tools = ToolController::new();
        tools.open_shape_popup();
        assert_eq!(tools.current_tool, ToolKind::Navigate);
        assert!(tools.shape_popup_open);
    }

    #[test]
    fn popups_are_mutually_exclusive() {
        let mut tools = ToolController::new();
        tools.select_text_tool();
        tools.open_shape_popup();
        assert!(!(tools.text_popup_open && tools.shape_popup_open));
    }

    #[test]
    fn choose_solid_figure_returns_kind_and_navigate() {
        let mut tools = ToolController::new();
        tools.open_shape_popup();
        let kind = tools.choose_figure(ShapeFigure::Star);
        assert!(matches!(kind, Some(ElementKind::Star(_))));
        assert_eq!(tools.current_tool, ToolKind::Navigate);
        assert!(!tools.shape_popup_open);
    }

    #[test]
    fn choose_arrow_arms_tool_without_creating() {
        let mut tools = ToolController::new();
        tools.open_shape_popup();
        let kind = tools.choose_figure(ShapeFigure::Arrow);
        assert!(kind.is_none());
        assert_eq!(tools.current_tool, ToolKind::Arrow);
        assert!(!tools.shape_popup_open);
    }

    #[test]
    fn escape_prefers_help_overlay() {
        let mut tools = ToolController::new();
        tools.select_text_tool();
        tools.toggle_shortcuts_help();

        // First escape only dismisses the overlay.
        assert!(tools.escape());
        assert!(!tools.shortcuts_help_open);
        assert!(tools.text_popup_open);

        // Second escape closes the popups, tool unchanged.
        assert!(!tools.escape());
        assert!(!tools.text_popup_open);
        assert_eq!(tools.current_tool, ToolKind::Text);
    }

    #[test]
    fn set_tool_shape_pending_opens_picker() {
        let mut tools = ToolController::new();
        tools.set_tool(ToolKind::ShapePending);
        assert!(tools.shape_popup_open);
    }
}
