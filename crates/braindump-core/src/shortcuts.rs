//! Keyboard shortcut router.
//!
//! Maps global key input onto tool-state and element-store operations.
//! Returns whether the key was consumed so the host can suppress the
//! platform default action for intercepted chords.

use crate::engine::Whiteboard;
use crate::input::KeyPress;

/// Routes key presses into a [`Whiteboard`] context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutRouter;

impl ShortcutRouter {
    pub fn new() -> Self {
        Self
    }

    /// Handle one key press. Returns true when the key was consumed.
    pub fn handle(&self, wb: &mut Whiteboard, press: &KeyPress<'_>) -> bool {
        if press.modifiers.command() {
            return self.handle_command_chord(wb, press);
        }

        match press.key {
            // The open help overlay takes input priority for Escape.
            "Escape" => {
                let help_closed = wb.tools.escape();
                if !help_closed {
                    wb.clear_selection();
                }
                true
            }
            "Delete" | "Backspace" if !press.in_text_field => {
                wb.delete_selected();
                true
            }
            "?" => {
                wb.tools.toggle_shortcuts_help();
                true
            }
            _ if !press.in_text_field => self.handle_tool_letter(wb, press.key),
            _ => false,
        }
    }

    /// Ctrl/Cmd chords: text formatting toggles (regardless of
    /// selection) and the help overlay.
    fn handle_command_chord(&self, wb: &mut Whiteboard, press: &KeyPress<'_>) -> bool {
        match press.key {
            "b" | "B" => {
                wb.tools.text_format.bold = !wb.tools.text_format.bold;
                true
            }
            "i" | "I" => {
                wb.tools.text_format.italic = !wb.tools.text_format.italic;
                true
            }
            "u" | "U" => {
                wb.tools.text_format.underline = !wb.tools.text_format.underline;
                true
            }
            "/" => {
                wb.tools.toggle_shortcuts_help();
                true
            }
            _ => false,
        }
    }

    /// Bare-letter tool switches, active only outside text fields.
    fn handle_tool_letter(&self, wb: &mut Whiteboard, key: &str) -> bool {
        match key {
            "v" | "V" | "h" | "H" => {
                wb.set_tool(crate::tools::ToolKind::Navigate);
                true
            }
            "t" | "T" => {
                wb.tools.select_text_tool();
                true
            }
            "s" | "S" => {
                wb.tools.open_shape_popup();
                true
            }
            _ => false,
        }
    }
}
