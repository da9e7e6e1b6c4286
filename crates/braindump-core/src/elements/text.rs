//! Text and sticky-note payloads.

use serde::{Deserialize, Serialize};

/// Allowed font sizes for text elements, in pixels.
pub const FONT_SIZE_PALETTE: [u32; 12] = [12, 14, 16, 18, 20, 24, 28, 32, 36, 48, 64, 72];

/// Snap a requested font size to the nearest palette entry.
pub fn snap_font_size(requested: u32) -> u32 {
    FONT_SIZE_PALETTE
        .into_iter()
        .min_by_key(|size| size.abs_diff(requested))
        .unwrap_or(TextFormat::DEFAULT_FONT_SIZE)
}

/// Formatting applied to a text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// One of [`FONT_SIZE_PALETTE`].
    pub font_size: u32,
}

impl TextFormat {
    pub const DEFAULT_FONT_SIZE: u32 = 16;
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }
}

/// Payload of a text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text content.
    pub content: String,
    /// Formatting state.
    #[serde(default)]
    pub format: TextFormat,
}

impl TextContent {
    /// Placeholder shown in a freshly placed text box.
    pub const PLACEHOLDER: &'static str = "Enter your Text";

    /// Create text content with the given formatting.
    pub fn new(content: impl Into<String>, format: TextFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }
}

/// Payload of a sticky note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    /// Note content.
    pub content: String,
}

impl StickyNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_sorted_and_unique() {
        let mut sorted = FONT_SIZE_PALETTE.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, FONT_SIZE_PALETTE);
        sorted.dedup();
        assert_eq!(sorted.len(), FONT_SIZE_PALETTE.len());
    }

    #[test]
    fn snap_keeps_palette_entries() {
        for size in FONT_SIZE_PALETTE {
            assert_eq!(snap_font_size(size), size);
        }
    }

    #[test]
    fn snap_picks_nearest() {
        assert_eq!(snap_font_size(15), 14);
        assert_eq!(snap_font_size(17), 16);
        assert_eq!(snap_font_size(40), 36);
        assert_eq!(snap_font_size(100), 72);
        assert_eq!(snap_font_size(1), 12);
    }

    #[test]
    fn default_format() {
        let format = TextFormat::default();
        assert!(!format.bold && !format.italic && !format.underline);
        assert_eq!(format.font_size, 16);
    }
}
