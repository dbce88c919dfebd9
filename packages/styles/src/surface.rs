//! # Surface Styles
//!
//! Style computation for the interactive editing surface.
//!
//! Every function applies its rules in the same fixed order, later rules
//! overriding earlier ones:
//!
//! 1. variant defaults
//! 2. theme color and font
//! 3. the node's own `lineHeight`, `font` and `align`
//! 4. indent-derived left padding
//!
//! The email module computes the same formulas separately; see
//! [`crate::email`].

use crate::defaults::{
    bullet_glyph, heading_defaults, BASE_FONT_SIZE_PX, BASE_LINE_HEIGHT, BLOCK_GAP_PX,
    COLUMN_GAP_PX, INDENT_STEP_PX, LIST_INDENT_STEP_PX, QUOTE_BORDER_PX, QUOTE_PADDING_PX,
};
use crate::style::Style;
use proseline_schema::{Element, Theme};

/// Padding for a plain block at `indent`; `None` when not indented
pub fn indent_padding(indent: Option<u32>) -> Option<String> {
    match indent {
        Some(n) if n > 0 => Some(format!("{}px", u64::from(n) * u64::from(INDENT_STEP_PX))),
        _ => None,
    }
}

/// Padding for a list item at `indent`; level 0 pads like level 1
pub fn list_item_padding(indent: Option<u32>) -> String {
    let level = indent.unwrap_or(0).max(1);
    format!("{}px", u64::from(level - 1) * u64::from(LIST_INDENT_STEP_PX))
}

fn apply_theme(style: &mut Style, theme: Option<&Theme>) {
    if let Some(theme) = theme {
        style.set("color", theme.text_color());
        style.set("font-family", theme.font_family());
    }
}

fn apply_node_overrides(style: &mut Style, element: Option<&Element>) {
    let Some(el) = element else { return };
    style.set_opt("line-height", el.attrs.line_height.clone());
    style.set_opt("font-family", el.attrs.font.clone());
    style.set_opt("text-align", el.attrs.align.map(|a| a.as_str()));
}

pub fn paragraph_styles(element: Option<&Element>, theme: Option<&Theme>) -> Style {
    let mut style = Style::new()
        .with("margin", format!("0 0 {}px", BLOCK_GAP_PX))
        .with("font-size", format!("{}px", BASE_FONT_SIZE_PX))
        .with("line-height", BASE_LINE_HEIGHT);

    apply_theme(&mut style, theme);
    apply_node_overrides(&mut style, element);
    style.set_opt("padding-left", indent_padding(element.and_then(|e| e.attrs.indent)));
    style
}

pub fn heading_styles(level: u8, element: Option<&Element>, theme: Option<&Theme>) -> Style {
    let defaults = heading_defaults(level);
    let mut style = Style::new()
        .with(
            "margin",
            format!("{}px 0 {}px", defaults.margin_top_px, defaults.margin_bottom_px),
        )
        .with("font-size", format!("{}px", defaults.font_size_px))
        .with("line-height", format!("{}px", defaults.line_height_px))
        .with("font-weight", "700");

    apply_theme(&mut style, theme);
    apply_node_overrides(&mut style, element);
    style.set_opt("padding-left", indent_padding(element.and_then(|e| e.attrs.indent)));
    style
}

pub fn block_quote_styles(element: Option<&Element>, theme: Option<&Theme>) -> Style {
    let accent = theme
        .map(|t| t.primary_color.clone())
        .unwrap_or_else(|| Theme::default().primary_color);

    let mut style = Style::new()
        .with("margin", format!("0 0 {}px", BLOCK_GAP_PX))
        .with("padding", format!("0 0 0 {}px", QUOTE_PADDING_PX))
        .with("border-left", format!("{}px solid {}", QUOTE_BORDER_PX, accent))
        .with("font-style", "italic")
        .with("font-size", format!("{}px", BASE_FONT_SIZE_PX))
        .with("line-height", BASE_LINE_HEIGHT);

    apply_theme(&mut style, theme);
    apply_node_overrides(&mut style, element);
    style.set_opt("margin-left", indent_padding(element.and_then(|e| e.attrs.indent)));
    style
}

pub fn list_styles(element: Option<&Element>, theme: Option<&Theme>) -> Style {
    let mut style = Style::new()
        .with("margin", format!("0 0 {}px", BLOCK_GAP_PX))
        .with("padding", "0")
        .with("list-style", "none");

    apply_theme(&mut style, theme);
    apply_node_overrides(&mut style, element);
    style
}

/// How a list item is labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    /// 1-based position in a numbered list
    Number(usize),
}

impl ListMarker {
    /// Literal prefix rendered before the item content
    pub fn prefix(&self, indent: Option<u32>) -> String {
        match self {
            ListMarker::Bullet => format!("{} ", bullet_glyph(indent)),
            ListMarker::Number(n) => format!("{}. ", n),
        }
    }
}

/// Computed list item presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemStyles {
    pub style: Style,
    pub prefix: String,
}

pub fn list_item_styles(
    element: Option<&Element>,
    marker: ListMarker,
    theme: Option<&Theme>,
) -> ListItemStyles {
    let indent = element.and_then(|e| e.attrs.indent);
    let mut style = Style::new()
        .with("margin", "0 0 4px")
        .with("font-size", format!("{}px", BASE_FONT_SIZE_PX))
        .with("line-height", BASE_LINE_HEIGHT);

    apply_theme(&mut style, theme);
    apply_node_overrides(&mut style, element);
    style.set("padding-left", list_item_padding(indent));

    ListItemStyles {
        style,
        prefix: marker.prefix(indent),
    }
}

pub fn link_styles(theme: Option<&Theme>) -> Style {
    let color = theme
        .map(|t| t.primary_color.clone())
        .unwrap_or_else(|| Theme::default().primary_color);
    Style::new()
        .with("color", color)
        .with("text-decoration", "underline")
        .with("cursor", "pointer")
}

/// Image styles; the selection outline only appears for a real image
pub fn image_styles(element: Option<&Element>, selected: bool, theme: Option<&Theme>) -> Style {
    let mut style = Style::new()
        .with("display", "block")
        .with("max-width", "100%")
        .with("height", "auto");

    let has_url = element
        .and_then(|e| e.attrs.url.as_deref())
        .is_some_and(|url| !url.is_empty());

    if selected && has_url {
        let accent = theme
            .map(|t| t.primary_color.clone())
            .unwrap_or_else(|| Theme::default().primary_color);
        style.set("outline", format!("2px solid {}", accent));
        style.set("outline-offset", "2px");
    }
    style
}

/// Placeholder shown for an image without a url
pub fn image_placeholder_styles() -> Style {
    Style::new()
        .with("display", "flex")
        .with("align-items", "center")
        .with("justify-content", "center")
        .with("min-height", "120px")
        .with("border", "1px dashed #d1d5db")
        .with("color", "#6b7280")
        .with("font-size", "14px")
}

pub fn layout_container_styles(element: Option<&Element>) -> Style {
    let mut style = Style::new()
        .with("display", "flex")
        .with("gap", format!("{}px", COLUMN_GAP_PX))
        .with("margin", format!("0 0 {}px", BLOCK_GAP_PX));
    apply_node_overrides(&mut style, element);
    style
}

/// Column styles; `width` comes from the container's `columnWidths`
pub fn layout_column_styles(width: Option<&str>) -> Style {
    let mut style = Style::new().with("min-width", "0");
    match width {
        Some(width) => style.set("flex", format!("0 0 {}", width)),
        None => style.set("flex", "1 1 0"),
    };
    style
}

/// True iff any of the seven block-styling attributes is present
pub fn has_block_styles(element: &Element) -> bool {
    let a = &element.attrs;
    a.padding.is_some()
        || a.margin.is_some()
        || a.background_color.is_some()
        || a.border.is_some()
        || a.border_radius.is_some()
        || a.width.is_some()
        || a.max_width.is_some()
}

/// The block-style container declarations
pub fn block_styles(element: &Element) -> Style {
    let a = &element.attrs;
    let mut style = Style::new();
    style
        .set_opt("padding", a.padding.clone())
        .set_opt("margin", a.margin.clone())
        .set_opt("background-color", a.background_color.clone())
        .set_opt("border", a.border.clone())
        .set_opt("border-radius", a.border_radius.clone())
        .set_opt("width", a.width.clone())
        .set_opt("max-width", a.max_width.clone());
    style
}
