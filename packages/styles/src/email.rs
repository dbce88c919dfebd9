//! # Email Styles
//!
//! Style computation for the static email renderer.
//!
//! These functions mirror [`crate::surface`] rule for rule: same defaults,
//! same precedence, same indent arithmetic. They differ where email clients
//! force them to: colors and fonts are always explicit (inheritance is
//! unreliable), margins use four values, and layout is expressed for tables
//! rather than flexbox.

use crate::defaults::{
    bullet_glyph, heading_defaults, BASE_FONT_SIZE_PX, BASE_LINE_HEIGHT, BLOCK_GAP_PX,
    COLUMN_GAP_PX, INDENT_STEP_PX, LIST_INDENT_STEP_PX, QUOTE_BORDER_PX, QUOTE_PADDING_PX,
};
use crate::style::Style;
use proseline_schema::{Element, Theme};

/// Left padding for a plain block; unindented when `indent` is 0 or absent
pub fn indent_padding(indent: Option<u32>) -> Option<String> {
    let n = indent.filter(|n| *n > 0)?;
    Some(format!("{}px", u64::from(n) * u64::from(INDENT_STEP_PX)))
}

/// Left padding for a list item; levels 0 and 1 are both flush
pub fn list_item_padding(indent: Option<u32>) -> String {
    let steps = indent.map_or(0, |n| n.saturating_sub(1));
    format!("{}px", u64::from(steps) * u64::from(LIST_INDENT_STEP_PX))
}

/// Literal bullet prefix for an unordered list item
pub fn bullet_prefix(indent: Option<u32>) -> String {
    format!("{}\u{a0}", bullet_glyph(indent))
}

/// Literal number prefix for an ordered list item
pub fn number_prefix(position: usize) -> String {
    format!("{}.\u{a0}", position)
}

fn text_base(font_size_px: u32, line_height: String, theme: &Theme) -> Style {
    Style::new()
        .with("font-size", format!("{}px", font_size_px))
        .with("line-height", line_height)
        .with("color", theme.text_color())
        .with("font-family", theme.font_family())
}

fn apply_node_overrides(style: &mut Style, element: Option<&Element>) {
    if let Some(el) = element {
        style
            .set_opt("line-height", el.attrs.line_height.as_deref())
            .set_opt("font-family", el.attrs.font.as_deref())
            .set_opt("text-align", el.attrs.align.map(|a| a.as_str()));
    }
}

pub fn paragraph_styles(element: Option<&Element>, theme: &Theme) -> Style {
    let mut style = Style::new().with("margin", format!("0 0 {}px 0", BLOCK_GAP_PX));
    style.merge(&text_base(BASE_FONT_SIZE_PX, BASE_LINE_HEIGHT.to_string(), theme));
    apply_node_overrides(&mut style, element);
    if let Some(padding) = indent_padding(element.and_then(|e| e.attrs.indent)) {
        style.set("padding-left", padding);
    }
    style
}

pub fn heading_styles(level: u8, element: Option<&Element>, theme: &Theme) -> Style {
    let d = heading_defaults(level);
    let mut style = Style::new().with(
        "margin",
        format!("{}px 0 {}px 0", d.margin_top_px, d.margin_bottom_px),
    );
    style
        .merge(&text_base(d.font_size_px, format!("{}px", d.line_height_px), theme))
        .set("font-weight", "700")
        .set("mso-line-height-rule", "exactly");
    apply_node_overrides(&mut style, element);
    if let Some(padding) = indent_padding(element.and_then(|e| e.attrs.indent)) {
        style.set("padding-left", padding);
    }
    style
}

pub fn block_quote_styles(element: Option<&Element>, theme: &Theme) -> Style {
    let mut style = Style::new()
        .with("margin", format!("0 0 {}px 0", BLOCK_GAP_PX))
        .with("padding", format!("0 0 0 {}px", QUOTE_PADDING_PX))
        .with(
            "border-left",
            format!("{}px solid {}", QUOTE_BORDER_PX, theme.primary_color),
        )
        .with("font-style", "italic");
    style.merge(&text_base(BASE_FONT_SIZE_PX, BASE_LINE_HEIGHT.to_string(), theme));
    apply_node_overrides(&mut style, element);
    if let Some(margin) = indent_padding(element.and_then(|e| e.attrs.indent)) {
        style.set("margin-left", margin);
    }
    style
}

/// Wrapper around a list's rendered items
pub fn list_styles(element: Option<&Element>, theme: &Theme) -> Style {
    let mut style = Style::new()
        .with("margin", format!("0 0 {}px 0", BLOCK_GAP_PX))
        .with("padding", "0");
    style.set("color", theme.text_color());
    apply_node_overrides(&mut style, element);
    style
}

/// A list item is emitted as a paragraph with a literal marker prefix
pub fn list_item_styles(element: Option<&Element>, theme: &Theme) -> Style {
    let mut style = Style::new().with("margin", "0 0 4px 0");
    style.merge(&text_base(BASE_FONT_SIZE_PX, BASE_LINE_HEIGHT.to_string(), theme));
    apply_node_overrides(&mut style, element);
    style.set(
        "padding-left",
        list_item_padding(element.and_then(|e| e.attrs.indent)),
    );
    style
}

pub fn link_styles(theme: &Theme) -> Style {
    Style::new()
        .with("color", theme.primary_color.clone())
        .with("text-decoration", "underline")
}

pub fn image_styles() -> Style {
    Style::new()
        .with("display", "block")
        .with("max-width", "100%")
        .with("height", "auto")
        .with("border", "0")
        .with("outline", "none")
        .with("text-decoration", "none")
}

/// Void placeholder kept in the output for an image without a url
pub fn image_placeholder_styles() -> Style {
    Style::new()
        .with("display", "block")
        .with("height", "0")
        .with("overflow", "hidden")
}

pub fn layout_table_styles() -> Style {
    Style::new()
        .with("width", "100%")
        .with("border-collapse", "collapse")
        .with("table-layout", "fixed")
        .with("margin", format!("0 0 {}px 0", BLOCK_GAP_PX))
}

pub fn layout_cell_styles(index: usize, count: usize) -> Style {
    let half_gap = COLUMN_GAP_PX / 2;
    let left = if index == 0 { 0 } else { half_gap };
    let right = if index + 1 >= count { 0 } else { half_gap };
    Style::new()
        .with("vertical-align", "top")
        .with("padding", format!("0 {}px 0 {}px", right, left))
}

/// True iff any of the seven block-styling attributes is present
pub fn has_block_styles(element: &Element) -> bool {
    !block_styles(element).is_empty()
}

pub fn block_styles(element: &Element) -> Style {
    let a = &element.attrs;
    let declarations = [
        ("padding", &a.padding),
        ("margin", &a.margin),
        ("background-color", &a.background_color),
        ("border", &a.border),
        ("border-radius", &a.border_radius),
        ("width", &a.width),
        ("max-width", &a.max_width),
    ];

    declarations
        .into_iter()
        .filter_map(|(property, value)| value.clone().map(|v| (property, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface;
    use proseline_schema::{Attributes, ElementType};

    #[test]
    fn test_deep_indent_does_not_overflow() {
        assert_eq!(indent_padding(Some(u32::MAX)), Some("103079215080px".to_string()));
        assert_eq!(list_item_padding(Some(u32::MAX)), "85899345880px");
        assert_eq!(indent_padding(Some(u32::MAX)), surface::indent_padding(Some(u32::MAX)));
        assert_eq!(
            list_item_padding(Some(u32::MAX)),
            surface::list_item_padding(Some(u32::MAX))
        );
    }

    #[test]
    fn test_indent_formula_matches_surface() {
        for n in 0..8 {
            assert_eq!(indent_padding(Some(n)), surface::indent_padding(Some(n)));
            assert_eq!(
                list_item_padding(Some(n)),
                surface::list_item_padding(Some(n))
            );
        }
        assert_eq!(indent_padding(None), surface::indent_padding(None));
    }

    #[test]
    fn test_block_styles_match_surface() {
        let el = Element::empty(ElementType::Paragraph).with_attrs(Attributes {
            padding: Some("12px".to_string()),
            background_color: Some("#f5f5f5".to_string()),
            max_width: Some("480px".to_string()),
            ..Attributes::default()
        });

        assert_eq!(block_styles(&el), surface::block_styles(&el));
        assert_eq!(has_block_styles(&el), surface::has_block_styles(&el));
    }

    #[test]
    fn test_colors_are_always_explicit() {
        let style = paragraph_styles(None, &Theme::default());
        assert_eq!(style.get("color"), Some(proseline_schema::theme::DEFAULT_TEXT_COLOR));
    }

    #[test]
    fn test_heading_sizes_match_surface() {
        let theme = Theme::default();
        for level in 1..=3 {
            assert_eq!(
                heading_styles(level, None, &theme).get("font-size"),
                surface::heading_styles(level, None, Some(&theme)).get("font-size")
            );
        }
    }

    #[test]
    fn test_layout_cell_gutters() {
        assert_eq!(layout_cell_styles(0, 2).get("padding"), Some("0 8px 0 0px"));
        assert_eq!(layout_cell_styles(1, 2).get("padding"), Some("0 0px 0 8px"));
    }
}
