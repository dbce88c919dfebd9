//! Attribute commands on the block enclosing the selection.

use crate::editor::Editor;
use proseline_schema::{Attributes, TextAlign};
use serde::{Deserialize, Serialize};

/// One of the seven block-styling attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockStyle {
    Padding,
    Margin,
    BackgroundColor,
    Border,
    BorderRadius,
    Width,
    MaxWidth,
}

impl BlockStyle {
    pub const ALL: [BlockStyle; 7] = [
        BlockStyle::Padding,
        BlockStyle::Margin,
        BlockStyle::BackgroundColor,
        BlockStyle::Border,
        BlockStyle::BorderRadius,
        BlockStyle::Width,
        BlockStyle::MaxWidth,
    ];

    fn slot(self, attrs: &mut Attributes) -> &mut Option<String> {
        match self {
            BlockStyle::Padding => &mut attrs.padding,
            BlockStyle::Margin => &mut attrs.margin,
            BlockStyle::BackgroundColor => &mut attrs.background_color,
            BlockStyle::Border => &mut attrs.border,
            BlockStyle::BorderRadius => &mut attrs.border_radius,
            BlockStyle::Width => &mut attrs.width,
            BlockStyle::MaxWidth => &mut attrs.max_width,
        }
    }
}

/// The block-styling attributes of one block; unset ones are absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

impl From<&Attributes> for BlockStyles {
    fn from(attrs: &Attributes) -> Self {
        Self {
            padding: attrs.padding.clone(),
            margin: attrs.margin.clone(),
            background_color: attrs.background_color.clone(),
            border: attrs.border.clone(),
            border_radius: attrs.border_radius.clone(),
            width: attrs.width.clone(),
            max_width: attrs.max_width.clone(),
        }
    }
}

impl Editor {
    /// Run `update` on the attributes of the lowest block around the
    /// selection anchor
    fn update_selected_block(&mut self, command: &'static str, update: impl FnOnce(&mut Attributes)) {
        let Some(block) = self.selection_block() else {
            return self.skip(command, "no selection");
        };
        let Some(el) = self.document.element_mut(&block) else {
            return self.skip(command, "no block at selection");
        };
        let before = el.attrs.clone();
        update(&mut el.attrs);
        if el.attrs == before {
            return self.skip(command, "nothing to change");
        }
        self.commit(command);
    }

    /// Set (or with `None`, unset) one block-styling attribute
    pub fn set_block_style(&mut self, style: BlockStyle, value: Option<&str>) {
        let value = value.map(str::to_string);
        self.update_selected_block("set_block_style", |attrs| *style.slot(attrs) = value);
    }

    pub fn set_padding(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::Padding, value);
    }

    pub fn set_margin(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::Margin, value);
    }

    pub fn set_background_color(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::BackgroundColor, value);
    }

    pub fn set_border(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::Border, value);
    }

    pub fn set_border_radius(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::BorderRadius, value);
    }

    pub fn set_width(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::Width, value);
    }

    pub fn set_max_width(&mut self, value: Option<&str>) {
        self.set_block_style(BlockStyle::MaxWidth, value);
    }

    /// Unset all seven block-styling attributes in one step
    pub fn clear_block_styles(&mut self) {
        self.update_selected_block("clear_block_styles", |attrs| {
            for style in BlockStyle::ALL {
                *style.slot(attrs) = None;
            }
        });
    }

    /// Block styles of the selected block (all absent without a selection)
    pub fn get_block_styles(&self) -> BlockStyles {
        self.selection_block()
            .and_then(|block| self.block_element(&block))
            .map(|el| BlockStyles::from(&el.attrs))
            .unwrap_or_default()
    }

    pub fn increase_indent(&mut self) {
        self.update_selected_block("increase_indent", |attrs| {
            attrs.indent = Some(attrs.indent.unwrap_or(0).saturating_add(1));
        });
    }

    /// Lowers the indent by one; already at 0 it does nothing
    pub fn decrease_indent(&mut self) {
        self.update_selected_block("decrease_indent", |attrs| {
            if let Some(current) = attrs.indent.filter(|n| *n > 0) {
                attrs.indent = Some(current - 1);
            }
        });
    }

    pub fn set_align(&mut self, align: Option<TextAlign>) {
        self.update_selected_block("set_align", |attrs| attrs.align = align);
    }

    pub fn set_line_height(&mut self, line_height: Option<&str>) {
        let value = line_height.map(str::to_string);
        self.update_selected_block("set_line_height", |attrs| attrs.line_height = value);
    }

    pub fn set_font(&mut self, font: Option<&str>) {
        let value = font.map(str::to_string);
        self.update_selected_block("set_font", |attrs| attrs.font = value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Point, Selection};
    use proseline_schema::{Document, Path};
    use serde_json::json;

    fn editor_in_list() -> Editor {
        let document = Document::from_value(json!([
            { "type": "bulleted-list", "children": [
                { "type": "list-item", "children": [{ "text": "a" }] },
                { "type": "list-item", "children": [{ "text": "b" }] }
            ]}
        ]))
        .unwrap();
        let mut editor = Editor::with_document(document);
        editor.select(Selection::caret(Point::new(vec![0, 1, 0], 0)));
        editor
    }

    #[test]
    fn test_styles_target_lowest_block() {
        let mut editor = editor_in_list();
        editor.set_padding(Some("12px"));

        let item = editor.document().element(&Path::new(vec![0, 1])).unwrap();
        assert_eq!(item.attrs.padding.as_deref(), Some("12px"));
        let list = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(list.attrs.padding, None);
    }

    #[test]
    fn test_get_block_styles_omits_unset_keys() {
        let mut editor = editor_in_list();
        editor.set_background_color(Some("#eee"));
        editor.set_border_radius(Some("4px"));

        let styles = editor.get_block_styles();
        assert_eq!(
            serde_json::to_value(&styles).unwrap(),
            json!({ "backgroundColor": "#eee", "borderRadius": "4px" })
        );

        editor.clear_block_styles();
        assert_eq!(editor.get_block_styles(), BlockStyles::default());
    }

    #[test]
    fn test_indent_saturates_at_max() {
        let document = Document::from_value(json!([
            { "type": "paragraph", "indent": u32::MAX, "children": [{ "text": "deep" }] }
        ]))
        .unwrap();
        let mut editor = Editor::with_document(document);
        editor.select(Selection::caret(Point::new(vec![0, 0], 0)));

        editor.increase_indent();
        let block = editor.document().element(&Path::new(vec![0])).unwrap();
        assert_eq!(block.attrs.indent, Some(u32::MAX));
    }

    #[test]
    fn test_indent_clamps_at_zero() {
        let mut editor = editor_in_list();
        editor.decrease_indent();
        assert_eq!(editor.version(), 0);

        editor.increase_indent();
        editor.increase_indent();
        editor.decrease_indent();
        let item = editor.document().element(&Path::new(vec![0, 1])).unwrap();
        assert_eq!(item.attrs.indent, Some(1));

        editor.decrease_indent();
        editor.decrease_indent();
        let item = editor.document().element(&Path::new(vec![0, 1])).unwrap();
        assert_eq!(item.attrs.indent, Some(0));
    }

    #[test]
    fn test_commands_need_a_selection() {
        let mut editor = editor_in_list();
        editor.deselect();
        let before = editor.document().clone();

        editor.set_margin(Some("4px"));
        editor.increase_indent();
        editor.set_align(Some(TextAlign::Right));
        assert_eq!(editor.document(), &before);
        assert_eq!(editor.get_block_styles(), BlockStyles::default());
    }
}
