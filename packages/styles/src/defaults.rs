//! Formula constants shared by the surface and email style families.
//!
//! Both renderers compute their styles independently, but from these same
//! numbers. Changing one here changes both outputs together.

/// Left padding per indent level for plain blocks
pub const INDENT_STEP_PX: u32 = 24;

/// Left padding per indent level for list items, counted from level 1
pub const LIST_INDENT_STEP_PX: u32 = 20;

/// Bullet glyphs by list depth, cycling
pub const BULLETS: [&str; 3] = ["•", "◦", "–"];

pub const BASE_FONT_SIZE_PX: u32 = 16;
pub const BASE_LINE_HEIGHT: &str = "1.5";
pub const BLOCK_GAP_PX: u32 = 12;
pub const COLUMN_GAP_PX: u32 = 16;
pub const QUOTE_BORDER_PX: u32 = 4;
pub const QUOTE_PADDING_PX: u32 = 16;

/// Per-level heading defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingDefaults {
    pub font_size_px: u32,
    pub line_height_px: u32,
    pub margin_top_px: u32,
    pub margin_bottom_px: u32,
}

const HEADINGS: [HeadingDefaults; 6] = [
    HeadingDefaults { font_size_px: 32, line_height_px: 40, margin_top_px: 24, margin_bottom_px: 12 },
    HeadingDefaults { font_size_px: 24, line_height_px: 32, margin_top_px: 20, margin_bottom_px: 10 },
    HeadingDefaults { font_size_px: 20, line_height_px: 28, margin_top_px: 16, margin_bottom_px: 8 },
    HeadingDefaults { font_size_px: 18, line_height_px: 26, margin_top_px: 14, margin_bottom_px: 8 },
    HeadingDefaults { font_size_px: 16, line_height_px: 24, margin_top_px: 12, margin_bottom_px: 6 },
    HeadingDefaults { font_size_px: 14, line_height_px: 20, margin_top_px: 12, margin_bottom_px: 6 },
];

/// Defaults for heading `level` (clamped to 1..=6)
pub fn heading_defaults(level: u8) -> HeadingDefaults {
    let index = usize::from(level.clamp(1, 6)) - 1;
    HEADINGS[index]
}

/// Bullet glyph for a list item at `indent`
///
/// `indent` 0 and 1 both map to the outermost glyph.
pub fn bullet_glyph(indent: Option<u32>) -> &'static str {
    let depth = indent.unwrap_or(0).max(1) - 1;
    BULLETS[(depth as usize) % BULLETS.len()]
}
