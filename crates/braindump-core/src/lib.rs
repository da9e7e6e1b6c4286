//! BrainDump Core Library
//!
//! Platform-agnostic canvas engine and board registry for the BrainDump
//! idea board.

pub mod board;
pub mod camera;
pub mod elements;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod import;
pub mod input;
pub mod projection;
pub mod shortcuts;
pub mod storage;
pub mod store;
pub mod tools;

pub use board::{Board, BoardRegistry, Idea, InputMethod};
pub use camera::Camera;
pub use elements::{Color, Element, ElementId, ElementKind};
pub use engine::Whiteboard;
pub use gesture::{GestureController, GestureState};
pub use input::{KeyPress, Modifiers, TouchPoint};
pub use projection::{DrawGeometry, Drawable};
pub use shortcuts::ShortcutRouter;
pub use store::{ElementOverrides, ElementStore, FormatPatch};
pub use tools::{ShapeFigure, ToolController, ToolKind};
