//! Shared input types for the pointer and keyboard entry points.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state at the time of an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Platform command chord: ctrl everywhere, cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// One active touch contact, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub position: Point,
}

impl TouchPoint {
    pub fn new(position: Point) -> Self {
        Self { position }
    }
}

/// A key press routed to the shortcut router.
#[derive(Debug, Clone)]
pub struct KeyPress<'a> {
    /// Key name: single characters for letters/punctuation, named keys
    /// ("Escape", "Delete", "Backspace") otherwise.
    pub key: &'a str,
    pub modifiers: Modifiers,
    /// Whether focus is inside a text-entry field; element deletion and
    /// bare-letter tool switches are suppressed while typing.
    pub in_text_field: bool,
}
