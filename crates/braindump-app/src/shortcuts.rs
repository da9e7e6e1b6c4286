//! Keyboard shortcut registry shown in the help overlay.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            description,
        }
    }

    /// Format the shortcut for display (e.g. "Ctrl+B").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("B", true, "Bold"),
            Shortcut::new("I", true, "Italic"),
            Shortcut::new("U", true, "Underline"),
            Shortcut::new("Delete", false, "Delete selected element"),
            Shortcut::new("Backspace", false, "Delete selected element"),
            Shortcut::new("Esc", false, "Deselect / close popups"),
            Shortcut::new("V", false, "Navigate tool"),
            Shortcut::new("H", false, "Navigate tool"),
            Shortcut::new("T", false, "Text tool"),
            Shortcut::new("S", false, "Shape picker"),
            Shortcut::new("?", false, "Toggle this help"),
            Shortcut::new("/", true, "Toggle this help"),
        ]
    }
}
